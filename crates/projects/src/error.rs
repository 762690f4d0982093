use monster_common::FromMessage;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error("`{operation}` returned {status}")]
    Status {
        operation: &'static str,
        status: reqwest::StatusCode,
    },
    #[error("project {id} is not in the loaded list")]
    ProjectNotFound { id: String },
    #[error("{message}")]
    Message { message: String },
}

impl Error {
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn status(operation: &'static str, status: reqwest::StatusCode) -> Self {
        Self::Status { operation, status }
    }
}

impl FromMessage for Error {
    fn from_message(message: String) -> Self {
        Self::Message { message }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

monster_common::impl_context!();
