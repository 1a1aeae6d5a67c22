//! CLI-level errors (wraps infrastructure errors)

use std::io::ErrorKind;

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Application(e) => match e {
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::OperationFailed { .. } => match e.io_error() {
                        Some(io) if io.kind() == ErrorKind::NotFound => crate::exitcode::NOINPUT,
                        Some(_) => crate::exitcode::IOERR,
                        None => crate::exitcode::SOFTWARE,
                    },
                    e if e.is_parse_failure() => crate::exitcode::DATAERR,
                    _ => crate::exitcode::SOFTWARE,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn given_errors_when_mapping_exit_codes_then_sysexits_values() {
        let usage = CliError::Usage("no such lesson".into());
        assert_eq!(usage.exit_code(), crate::exitcode::USAGE);

        let malformed = CliError::from(ApplicationError::Malformed {
            message: "x".into(),
        });
        assert_eq!(malformed.exit_code(), crate::exitcode::DATAERR);

        let invalid = CliError::from(ApplicationError::Invalid {
            location: "units[0]".into(),
            source: DomainError::invalid("lessons", "duplicate"),
        });
        assert_eq!(invalid.exit_code(), crate::exitcode::DATAERR);

        let missing = CliError::from(ApplicationError::OperationFailed {
            context: "read catalog".into(),
            source: Box::new(std::io::Error::new(ErrorKind::NotFound, "gone")),
        });
        assert_eq!(missing.exit_code(), crate::exitcode::NOINPUT);

        let config = CliError::from(ApplicationError::Config {
            message: "bad".into(),
        });
        assert_eq!(config.exit_code(), crate::exitcode::CONFIG);
    }
}
