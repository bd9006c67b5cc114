use thiserror::Error;

#[derive(Error, Debug)]
pub enum KanbanError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Failure of a single call against the remote board service.
///
/// The `Display` text is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Connection error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl RemoteError {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl KanbanError {
    /// Text suitable for a user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Remote(e) => e.message(),
            Self::NotFound(what) => format!("{} not found", what),
            Self::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
