use crate::chat::Blob;
use crate::error::DeckError;

/// Everything a responder gets for one user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseRequest {
    /// Chat the reply belongs to.
    pub chat_name: String,
    pub text: String,
    pub image: Option<Blob>,
    pub drawing: Option<Blob>,
}

impl ResponseRequest {
    pub fn text_only(chat_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            chat_name: chat_name.into(),
            text: text.into(),
            image: None,
            drawing: None,
        }
    }
}

/// Produces the assistant's reply for a user turn. Implementations may be a
/// canned placeholder or a real model; the chat store does not care which.
#[async_trait::async_trait]
pub trait Responder: Send + Sync {
    fn name(&self) -> &str;

    async fn respond(&self, request: &ResponseRequest) -> Result<String, DeckError>;
}
