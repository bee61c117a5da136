// Library interface for chatdeck-cli.
// The binary in main.rs drives these modules; integration tests use them directly.

pub mod bot;
pub mod canvas_view;
pub mod chat_view;
pub mod commands;
pub mod input;
pub mod predict;
pub mod studio;
pub mod theme;
pub mod tui;
pub mod worker;

// Re-export commonly used items for easier testing
pub use commands::{complete_command, handle_command, CommandResult};
pub use theme::Theme;
