//! Error types and handling for the Viajeros AI service

use thiserror::Error;

/// Main error type for the Viajeros AI service
#[derive(Error, Debug)]
pub enum TravelAiError {
    /// Configuration-related errors, including an unknown provider selection
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A provider that is recognised but has no implementation yet
    #[error("{message}")]
    NotImplemented { message: String },

    /// Upstream plan generation failures
    #[error("Generation error: {message}")]
    Generation { message: String },

    /// Credential check failures
    #[error("Credential error: {message}")]
    Credential { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TravelAiError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new not-implemented error
    pub fn not_implemented<S: Into<String>>(message: S) -> Self {
        Self::NotImplemented {
            message: message.into(),
        }
    }

    /// Create a new generation error
    pub fn generation<S: Into<String>>(message: S) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Create a new credential error
    pub fn credential<S: Into<String>>(message: S) -> Self {
        Self::Credential {
            message: message.into(),
        }
    }

    /// Get a user-facing error message. Never includes internal detail.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TravelAiError::Config { .. } | TravelAiError::NotImplemented { .. } => {
                "AI service unavailable".to_string()
            }
            TravelAiError::Generation { .. } | TravelAiError::Io { .. } => {
                "Failed to generate travel plan".to_string()
            }
            TravelAiError::Credential { .. } => "AI service credential rejected".to_string(),
        }
    }
}
