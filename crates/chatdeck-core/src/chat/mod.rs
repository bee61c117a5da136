mod message;
mod store;

pub use message::{Blob, Content, Message, MessageKind, Role};
pub use store::{Chat, ChatStore};
