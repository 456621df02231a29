//! CLI-specific error types
//!
//! Every CLI error is fatal. Errors raised by the library keep their own
//! stable code.

use std::fmt;
use std::io;

use crate::binding::BindingError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::key::MalformedTokenError;
use crate::version::VersionError;

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: &'static str,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new("VSEL_CLI_IO_ERROR", msg)
    }

    /// Startup failure (runtime, bind)
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new("VSEL_CLI_BOOT_FAILED", msg)
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

macro_rules! coded_from {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for CliError {
                fn from(e: $source) -> Self {
                    Self::new(e.code(), e.to_string())
                }
            }
        )*
    };
}

coded_from!(
    ConfigError,
    CatalogError,
    BindingError,
    MalformedTokenError,
    VersionError,
);

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::io_error("stdout closed");
        assert_eq!(err.to_string(), "VSEL_CLI_IO_ERROR: stdout closed");
    }

    #[test]
    fn test_library_code_preserved() {
        let err: CliError = ConfigError::Invalid("max_candidates must be > 0".into()).into();
        assert_eq!(err.code(), "VSEL_CONFIG_INVALID");
    }
}
