use thiserror::Error;

/// Error taxonomy for one submission lifecycle. The first three variants
/// render as the exact strings shown in the error slot of the UI.
#[derive(Debug, Error)]
pub enum SentiscopeError {
    /// Submit was pressed with nothing but whitespace in the input.
    #[error("Please enter some text to analyze.")]
    Validation,

    /// The service answered with a non-2xx status. `message` is the
    /// backend-provided `{error}` string when one was present, otherwise the
    /// generic `HTTP error! Status: <code>` line.
    #[error("{message}")]
    Service { status: u16, message: String },

    /// The request never completed, or a 2xx body could not be decoded.
    #[error("Failed to analyze sentiment. {reason}. Check if the backend is running at {origin}.")]
    Transport { reason: String, origin: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CLI argument error: {0}")]
    Cli(String),
}

impl SentiscopeError {
    pub fn service(status: u16, message: impl Into<String>) -> Self {
        SentiscopeError::Service {
            status,
            message: message.into(),
        }
    }

    pub fn transport(reason: impl ToString, origin: impl Into<String>) -> Self {
        SentiscopeError::Transport {
            reason: reason.to_string(),
            origin: origin.into(),
        }
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        SentiscopeError::Config(msg.into())
    }

    pub fn cli<S: Into<String>>(msg: S) -> Self {
        SentiscopeError::Cli(msg.into())
    }
}

/// Result type alias for sentiscope operations
pub type SentiscopeResult<T> = Result<T, SentiscopeError>;
