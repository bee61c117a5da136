pub mod error;
pub mod constants;
pub mod chat;
pub mod session;
pub mod responder;
pub mod classifier;
pub mod canvas;
pub mod config;

// Re-export key types
pub use error::{DeckError, Result};
pub use chat::{Blob, ChatStore, Content, Message, MessageKind, Role};
pub use session::{Outcome, PendingImage, SessionEvent, SessionState};
pub use responder::{build_responder, EchoResponder, PlaceholderResponder, ResponseRequest, Responder};
pub use classifier::{predict_species, Classifier, FeatureSpec, LinearModel, Species};
pub use canvas::{parse_hex_color, Canvas, Rgba};
pub use config::Settings;
