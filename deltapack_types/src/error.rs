use std::io::{self, ErrorKind};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every failure aborts the whole serialize or deserialize call.
/// Output written or objects built before the failure must be discarded.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot transfer {requested} bits at once; at most {max} are allowed")]
    InvalidArgument { requested: u32, max: u32 },

    #[error("Unrecognized type: {0}")]
    UnrecognizedType(String),

    #[error("Field {field} in type {owner} is marked as delta-stored, but {field_type} has no delta adapter")]
    UnsupportedDeltaType {
        owner: String,
        field: String,
        field_type: String,
    },

    #[error("Precision loss: {0}")]
    PrecisionLoss(String),

    #[error("No default constructor found for type {0}")]
    NoDefaultConstructor(String),

    #[error("The root object is absent")]
    NullRoot,

    #[error("Truncated read of {0}")]
    TruncatedRead(String),

    #[error("Type mismatch at {at}: expected {expected}, found {found}")]
    TypeMismatch {
        at: String,
        expected: String,
        found: String,
    },

    #[error("Field {field} in type {owner} is absent")]
    MissingField { owner: String, field: String },

    #[error("Malformed data: {0}")]
    Malformed(String),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("{0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Maps an I/O failure that happened while reading `what`.
    ///
    /// A source that ran dry becomes [`Error::TruncatedRead`]; anything else stays [`Error::Io`].
    pub fn from_read(e: io::Error, what: impl FnOnce() -> String) -> Self {
        if e.kind() == ErrorKind::UnexpectedEof {
            Self::TruncatedRead(what())
        } else {
            Self::Io(e)
        }
    }
}
