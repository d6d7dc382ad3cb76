use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The API answered with a non-success status
    #[error("Server rejected request with {status}: {detail}")]
    Server { status: StatusCode, detail: String },

    /// The request left but no response came back
    #[error("No response received: {0}")]
    NoResponse(#[source] reqwest::Error),

    /// The request could not be built or sent
    #[error("Failed to set up request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Alert text for a server rejection.
pub fn rejection_message(detail: &str) -> String {
    format!("Erro: {detail}")
}

impl Error {
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage(message.into())
    }

    /// Sorts a transport failure into one of the two log-only cases.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Request(err)
        } else {
            Self::NoResponse(err)
        }
    }

    /// Status the API answered with, for server rejections.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text to show the user, if this failure is user-facing at all.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Error::Server { detail, .. } => Some(rejection_message(detail)),
            _ => None,
        }
    }
}
