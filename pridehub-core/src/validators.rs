use std::sync::OnceLock;

use email_address::EmailAddress;
use regex::Regex;
use url::Url;
use uuid::Uuid;

/// Returns `true` if the provided string is a syntactically valid email address.
pub fn is_valid_email(value: &str) -> bool {
    EmailAddress::is_valid(value)
}

/// Returns `true` if the provided string parses as a URL with a scheme.
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

/// Returns `true` if the provided string parses as a UUID.
pub fn is_valid_uuid(value: &str) -> bool {
    Uuid::parse_str(value).is_ok()
}

/// Returns `true` if the provided string is an acceptable username:
/// 3–20 alphanumeric characters.
pub fn is_valid_username(value: &str) -> bool {
    static USERNAME: OnceLock<Regex> = OnceLock::new();
    let pattern = USERNAME.get_or_init(|| Regex::new(r"^[a-zA-Z0-9]{3,20}$").expect("username pattern"));
    pattern.is_match(value)
}
