use thiserror::Error;

use crate::client::validation::{MAX_DIMENSION, MIN_DIMENSION, MIN_PROMPT_CHARS};

/// Precondition failures detected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a description of the image")]
    EmptyPrompt,

    #[error("The description must contain at least {} characters (got {0})", MIN_PROMPT_CHARS)]
    PromptTooShort(usize),

    #[error("Please specify both image width and height")]
    MissingDimensions,

    #[error(
        "Dimensions must be between {} and {} pixels (got {width}x{height})",
        MIN_DIMENSION,
        MAX_DIMENSION
    )]
    DimensionOutOfRange { width: i64, height: i64 },

    #[error("Invalid image filename: {0:?}")]
    InvalidFilename(String),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Service error: {0}")]
    Service(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Share error: {0}")]
    Share(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl ClientError {
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::Validation(_) => "validation",
            ClientError::Transport(_) => "transport",
            ClientError::Service(_) => "service",
            ClientError::Clipboard(_) => "clipboard",
            ClientError::Share(_) => "share",
            ClientError::Config(_) => "config",
            ClientError::Io(_) => "io",
        }
    }

    /// Message suitable for the status line, without the category prefix.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(e) => e.to_string(),
            ClientError::Transport(msg)
            | ClientError::Service(msg)
            | ClientError::Clipboard(msg)
            | ClientError::Share(msg)
            | ClientError::Config(msg)
            | ClientError::Io(msg) => msg.clone(),
        }
    }
}

/// Failures reported by a clipboard or share capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("capability not supported on this platform")]
    Unsupported,

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("cancelled by user")]
    Cancelled,

    #[error("{0}")]
    Failed(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_converts_into_client_error() {
        let err: ClientError = ValidationError::EmptyPrompt.into();
        assert_eq!(err.kind(), "validation");
        assert_eq!(err.user_message(), "Please enter a description of the image");
    }

    #[test]
    fn test_service_message_is_surfaced_verbatim() {
        let err = ClientError::Service("disk full".into());
        assert_eq!(err.user_message(), "disk full");
        assert_eq!(err.to_string(), "Service error: disk full");
    }

    #[test]
    fn test_out_of_range_message_names_bounds() {
        let msg = ValidationError::DimensionOutOfRange {
            width: 100,
            height: 512,
        }
        .to_string();
        assert!(msg.contains("256"));
        assert!(msg.contains("2048"));
        assert!(msg.contains("100x512"));
    }
}
