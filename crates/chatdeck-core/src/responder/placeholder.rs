use std::time::Duration;

use super::traits::{ResponseRequest, Responder};
use crate::constants::responder::{
    DEFAULT_DELAY_MS, DRAWING_ACK, IDLE_GREETING, IMAGE_ACK, PLACEHOLDER, SIGNATURE,
};
use crate::error::DeckError;

/// Stand-in model: waits a fixed delay, then acknowledges what it was sent.
#[derive(Debug, Clone)]
pub struct PlaceholderResponder {
    delay: Duration,
}

impl PlaceholderResponder {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The reply text, without the delay.
    pub fn compose(request: &ResponseRequest) -> String {
        let mut body = String::new();
        if request.image.is_some() {
            body.push_str(IMAGE_ACK);
        }
        if request.drawing.is_some() {
            body.push_str(DRAWING_ACK);
        }
        if !request.text.is_empty() {
            body.push_str(&format!("You said: '{}'. ", request.text));
        }
        if body.is_empty() {
            body.push_str(IDLE_GREETING);
        }
        body.push_str(SIGNATURE);
        body
    }
}

impl Default for PlaceholderResponder {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DELAY_MS))
    }
}

#[async_trait::async_trait]
impl Responder for PlaceholderResponder {
    fn name(&self) -> &str {
        PLACEHOLDER
    }

    async fn respond(&self, request: &ResponseRequest) -> Result<String, DeckError> {
        tracing::debug!(chat = %request.chat_name, delay_ms = self.delay.as_millis() as u64, "placeholder responding");
        tokio::time::sleep(self.delay).await;
        Ok(Self::compose(request))
    }
}
