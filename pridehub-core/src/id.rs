use nanoid::nanoid;

/// Alphabet for generated document ids: lowercase and digits, minus the
/// glyphs that read ambiguously in logs and URLs (0/o, 1/l).
const ID_ALPHABET: &[char] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'm', 'n', 'p', 'q',
    'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Id length, sized for collision headroom well past community scale.
const ID_LENGTH: usize = 21;

/// Generate a new document id.
pub fn generate_entity_id() -> String {
    nanoid!(ID_LENGTH, ID_ALPHABET)
}
