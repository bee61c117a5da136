use super::traits::{ResponseRequest, Responder};
use crate::constants::responder::ECHO;
use crate::error::DeckError;

/// Replies immediately with the user's own words.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoResponder;

#[async_trait::async_trait]
impl Responder for EchoResponder {
    fn name(&self) -> &str {
        ECHO
    }

    async fn respond(&self, request: &ResponseRequest) -> Result<String, DeckError> {
        Ok(format!("You said: {}", request.text))
    }
}
