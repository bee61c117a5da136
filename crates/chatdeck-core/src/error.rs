use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Chat not found: {0}")]
    NotFound(String),

    #[error("Invalid rename: {0}")]
    InvalidRename(String),

    #[error("Message is empty")]
    EmptyInput,

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    #[error("Responder error: {0}")]
    Responder(String),

    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl DeckError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn invalid_rename(reason: impl Into<String>) -> Self {
        Self::InvalidRename(reason.into())
    }

    /// Errors the UI should report and re-prompt on, rather than ending the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::InvalidRename(_)
                | Self::EmptyInput
                | Self::InvalidColor(_)
                | Self::UnsupportedImage(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;
