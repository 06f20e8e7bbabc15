//! Error types for the CLI

use std::path::Path;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// A command-line argument can't be used for this run
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// The project could not be prepared; the run stops here
    #[error("Project setup failed in {path}: {message}")]
    ProjectSetup {
        /// Project directory
        path: String,
        /// Error message
        message: String,
    },

    /// A subprocess could not be started or failed
    #[error("Command `{command}` failed: {message}")]
    Command {
        /// Command line that was run
        command: String,
        /// Error message
        message: String,
    },

    /// A request did not finish in time
    #[error("Request to {url} timed out")]
    Timeout {
        /// Requested URL
        url: String,
    },

    /// A server answered with an error status
    #[error("API error {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Answer refinement or config derivation error
    #[error("Init error: {0}")]
    Init(#[from] nightwatch_init::InitError),

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl CliError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a project setup error
    #[must_use]
    pub fn project_setup(path: &Path, message: impl Into<String>) -> Self {
        Self::ProjectSetup {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    /// Create a command error
    #[must_use]
    pub fn command(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Command {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create a timeout error
    #[must_use]
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Create an API error
    #[must_use]
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_error() {
        let err = CliError::invalid_argument("bad arg");
        assert!(err.to_string().contains("Invalid argument"));
    }

    #[test]
    fn test_project_setup_error() {
        let err = CliError::project_setup(Path::new("/tmp/app"), "permission denied");
        let text = err.to_string();
        assert!(text.contains("/tmp/app"));
        assert!(text.contains("permission denied"));
    }

    #[test]
    fn test_command_error() {
        let err = CliError::command("npm init -y", "exit status 1");
        assert_eq!(err.to_string(), "Command `npm init -y` failed: exit status 1");
    }

    #[test]
    fn test_timeout_error() {
        let err = CliError::timeout("https://registry.npmjs.org");
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_api_error() {
        let err = CliError::api(503, "unavailable");
        assert_eq!(err.to_string(), "API error 503: unavailable");
    }

    #[test]
    fn test_init_error_from() {
        let init_err = nightwatch_init::InitError::prompt("stdin closed");
        let cli_err: CliError = init_err.into();
        assert!(cli_err.to_string().contains("Init error"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.to_string().contains("I/O"));
    }
}
