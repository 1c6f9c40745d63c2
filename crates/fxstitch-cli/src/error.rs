use thiserror::Error;

use fxstitch_core::{ConfigError, RateError, ValidationError};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Rate(#[from] RateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Rate(error) if error.is_validation() => 2,
            Self::Rate(_) => 3,
            Self::Config(_) => 2,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_failures_exit_with_usage_code() {
        let error = CliError::Validation(ValidationError::EmptySymbols);
        assert_eq!(error.exit_code(), 2);

        let wrapped = CliError::Rate(RateError::Validation(ValidationError::MissingSpan));
        assert_eq!(wrapped.exit_code(), 2);
    }

    #[test]
    fn upstream_failures_exit_with_remote_code() {
        let error = CliError::Rate(RateError::Upstream { status: 502 });
        assert_eq!(error.exit_code(), 3);
    }
}
