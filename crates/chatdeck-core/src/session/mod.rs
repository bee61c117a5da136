mod events;
mod state;

pub use events::{Outcome, SessionEvent};
pub use state::{PendingImage, SessionState};
