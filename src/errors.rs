use thiserror::Error; // derives Display and std::error::Error for both enums

// Failures produced while turning a raw string into a typed value, or while
// writing that value into record storage. They carry no key: the walker
// attaches one when it wraps them into a `BindError`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoerceError {
    // The string is not a valid spelling of the declared kind
    #[error("invalid {kind} value {value:?}: {reason}")]
    Malformed {
        kind: String,
        value: String,
        reason: String,
    },

    // A well-formed number that does not fit the declared width
    #[error("value {value:?} overflows {kind}")]
    Overflow { kind: String, value: String },

    // The coercer has no rule for this kind
    #[error("unsupported type {kind}")]
    Unsupported { kind: String },

    // List elements must themselves be scalars
    #[error("unsupported slice type {kind}")]
    UnsupportedElement { kind: String },

    // Storage of one type was handed a value of another
    #[error("cannot store {found} value in {expected} field")]
    Mismatch { expected: String, found: String },

    // Storage has no field with this name
    #[error("no field named {field:?}")]
    NoSuchField { field: String },
}

// Errors returned from a `load` call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindError {
    // Root of a load was not a record shape
    #[error("expected record shape, got {type_name}")]
    InvalidRoot { type_name: String },

    // A leaf or nested field failed; `key` is the upper-cased environment key
    #[error("{key}: {source}")]
    Field {
        key: String,
        #[source]
        source: CoerceError,
    },
}

// Coarse classification of a `BindError`, for callers that branch on failure class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // Root is not record-shaped
    InvalidRoot,
    // A present value did not parse, or overflowed its width
    MalformedScalar,
    // A field declares a kind that cannot be coerced or stored
    UnsupportedKind,
}

impl BindError {
    pub(crate) fn field(key: impl Into<String>, source: CoerceError) -> Self {
        BindError::Field {
            key: key.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BindError::InvalidRoot { .. } => ErrorKind::InvalidRoot,
            BindError::Field { source, .. } => match source {
                CoerceError::Malformed { .. } | CoerceError::Overflow { .. } => {
                    ErrorKind::MalformedScalar
                }
                CoerceError::Unsupported { .. }
                | CoerceError::UnsupportedElement { .. }
                | CoerceError::Mismatch { .. }
                | CoerceError::NoSuchField { .. } => ErrorKind::UnsupportedKind,
            },
        }
    }

    // Upper-case environment key of the failing field, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            BindError::Field { key, .. } => Some(key),
            BindError::InvalidRoot { .. } => None,
        }
    }
}

// Every public load returns this; coercion helpers return `CoerceError` directly
pub type Result<T> = std::result::Result<T, BindError>;
