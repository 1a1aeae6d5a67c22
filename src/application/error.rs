//! Application-level errors (decode, config and I/O failures)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors carry the location or path where an operation failed.
#[derive(Error, Debug)]
pub enum ApplicationError {
    /// Text that is not valid JSON, lacks a required field, or names an
    /// unknown enumeration constant.
    #[error("parse error: {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record whose shape cannot be mapped to a single entity kind.
    #[error("malformed record: {message}")]
    Malformed { message: String },

    /// A well-formed record the factory refused.
    #[error("invalid record at {location}: {source}")]
    Invalid {
        location: String,
        #[source]
        source: DomainError,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    /// True for the three kinds raised while decoding text.
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::Malformed { .. } | Self::Invalid { .. }
        )
    }

    /// The underlying I/O error, if this error came from the filesystem.
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            Self::OperationFailed { source, .. } => source.downcast_ref::<std::io::Error>(),
            _ => None,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
