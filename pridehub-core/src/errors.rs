use thiserror::Error;

use crate::graph::EdgeRepair;

/// Top-level error type returned by core operations.
///
/// Every variant maps to a stable machine-readable code via [`CoreError::code`];
/// the HTTP boundary renders codes as status values without the core knowing
/// about HTTP.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The referenced entity does not exist.
    #[error("{entity} not found")]
    NotFound {
        entity: &'static str,
        entity_id: String,
    },

    /// The acting identity does not own the resource it tried to mutate.
    #[error("not authorized to modify this {resource}")]
    Forbidden { resource: &'static str },

    /// The actor is already a member of the target engagement set.
    #[error("already present in {set}")]
    AlreadyInState { set: &'static str },

    /// The actor is not a member of the target engagement set.
    #[error("not present in {set}")]
    NotInState { set: &'static str },

    /// The follow edge already exists.
    #[error("already following this user")]
    AlreadyFollowing,

    /// No follow edge exists to remove.
    #[error("not following this user")]
    NotFollowing,

    /// A user attempted to follow or unfollow themselves.
    #[error("cannot follow yourself")]
    SelfReference,

    /// An event schedule ends before it starts.
    #[error("event must not end before it starts")]
    InvalidRange,

    /// Validation failed for one or more fields.
    #[error("validation failed")]
    Validation(#[from] ValidationError),

    /// Underlying document store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A multi-document write sequence failed after its first write had
    /// already been applied. The attached [`EdgeRepair`] record is the input
    /// contract for the external reconciliation job.
    #[error("store error after partial write: {source}")]
    PartiallyApplied {
        repair: EdgeRepair,
        source: StoreError,
    },
}

impl CoreError {
    /// Stable code identifying the error kind across releases.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::NotFound { .. } => "not_found",
            CoreError::Forbidden { .. } => "forbidden",
            CoreError::AlreadyInState { .. } => "already_in_state",
            CoreError::NotInState { .. } => "not_in_state",
            CoreError::AlreadyFollowing => "already_following",
            CoreError::NotFollowing => "not_following",
            CoreError::SelfReference => "self_reference",
            CoreError::InvalidRange => "invalid_range",
            CoreError::Validation(_) => "validation_failed",
            CoreError::Store(_) | CoreError::PartiallyApplied { .. } => "store_error",
        }
    }
}

/// Opaque failure from the document store. Not retried by the core; the
/// caller decides retry policy.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying Redis command failed.
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// A stored document could not be encoded or decoded.
    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// The store rejected or timed out the operation.
    #[error("store unavailable: {message}")]
    Unavailable { message: String },
}

/// Collection of validation issues encountered while preparing a mutation.
#[derive(Debug, Error)]
#[error("validation errors: {issues:?}")]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new<I>(issues: I) -> Self
    where
        I: IntoIterator<Item = ValidationIssue>,
    {
        Self {
            issues: issues.into_iter().collect(),
        }
    }

    /// Convenience helper for constructing a single-field validation error.
    pub fn single(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new([ValidationIssue::new(field, code, message)])
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Detailed validation failure for a single field or logical path.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Convenience alias used by validation helpers.
pub type ValidationResult<T> = Result<T, ValidationError>;
