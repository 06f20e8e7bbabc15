//! Result and error types for nightwatch-init.

use thiserror::Error;

/// Result type for scaffolding operations
pub type InitResult<T> = Result<T, InitError>;

/// Errors that can occur while building a project configuration
#[derive(Debug, Error)]
pub enum InitError {
    /// An answer id is not part of the option catalog
    #[error("Unknown {field} value '{value}'")]
    UnknownChoice {
        /// Answer field the value was given for
        field: &'static str,
        /// Offending value
        value: String,
    },

    /// An answer has the wrong shape for its question
    #[error("Invalid answer for '{question}': {message}")]
    InvalidAnswer {
        /// Question id
        question: &'static str,
        /// Error message
        message: String,
    },

    /// The prompt engine failed to produce an answer
    #[error("Prompt failed: {message}")]
    Prompt {
        /// Error message
        message: String,
    },

    /// A project manifest could not be parsed
    #[error("Invalid manifest {path}: {message}")]
    Manifest {
        /// Manifest path
        path: String,
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl InitError {
    /// Create an unknown-choice error
    #[must_use]
    pub fn unknown_choice(field: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownChoice {
            field,
            value: value.into(),
        }
    }

    /// Create an invalid-answer error
    #[must_use]
    pub fn invalid_answer(question: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidAnswer {
            question,
            message: message.into(),
        }
    }

    /// Create a prompt error
    #[must_use]
    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt {
            message: message.into(),
        }
    }

    /// Create a manifest error
    #[must_use]
    pub fn manifest(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_choice_display() {
        let err = InitError::unknown_choice("backend", "cloud");
        assert_eq!(err.to_string(), "Unknown backend value 'cloud'");
    }

    #[test]
    fn test_invalid_answer_display() {
        let err = InitError::invalid_answer("browsers", "expected a list");
        assert!(err.to_string().contains("browsers"));
        assert!(err.to_string().contains("expected a list"));
    }

    #[test]
    fn test_manifest_display() {
        let err = InitError::manifest("package.json", "trailing comma");
        assert!(err.to_string().contains("package.json"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: InitError = io_err.into();
        assert!(err.to_string().contains("I/O"));
    }

    #[test]
    fn test_json_error_from() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: InitError = json_err.into();
        assert!(err.to_string().starts_with("JSON error"));
    }
}
