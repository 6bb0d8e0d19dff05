use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a call across the API seam.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable HTTP response.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The backend answered `success: false` or a non-2xx status.
    #[error("rejected by server ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The body was not the JSON envelope we expect.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The envelope was fine but its payload did not match the model.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn transport(err: impl Into<BoxError>) -> Self {
        ApiError::Transport(err.into())
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        ApiError::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Message the backend wants shown to the user, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }
}
