mod traits;
mod placeholder;
mod echo;

pub use traits::*;
pub use placeholder::PlaceholderResponder;
pub use echo::EchoResponder;

use std::time::Duration;

use crate::config::Settings;
use crate::constants::responder::{ECHO, PLACEHOLDER};
use crate::error::{DeckError, Result};

/// Build the responder named by `settings.responder.kind`.
pub fn build_responder(settings: &Settings) -> Result<Box<dyn Responder>> {
    match settings.responder.kind.to_lowercase().as_str() {
        PLACEHOLDER => Ok(Box::new(PlaceholderResponder::new(Duration::from_millis(
            settings.responder.delay_ms,
        )))),
        ECHO => Ok(Box::new(EchoResponder)),
        other => Err(DeckError::Config(format!(
            "Unknown responder '{other}'. Available: {PLACEHOLDER}, {ECHO}"
        ))),
    }
}
