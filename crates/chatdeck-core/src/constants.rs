//! Centralized constants for chatdeck.
//! Limits, default names and canned strings live here.

// ─── Chats ────────────────────────────────────────────────────────────────────

pub mod chats {
    pub const INITIAL_CHAT: &str = "New Chat";
    pub const NEW_CHAT_BASE: &str = "Chat";

    /// Greeting chats seeded into a studio session ahead of `INITIAL_CHAT`.
    pub const STUDIO_GREETINGS: &[(&str, &str)] = &[
        ("Chat 1", "Welcome! How can I help you with Chat 1?"),
        ("Chat 2", "Hello! I'm ready for Chat 2."),
    ];
}

// ─── Responders ───────────────────────────────────────────────────────────────

pub mod responder {
    pub const PLACEHOLDER: &str = "placeholder";
    pub const ECHO: &str = "echo";
    pub const DEFAULT_DELAY_MS: u64 = 1000;

    pub const IMAGE_ACK: &str = "I received an image! ";
    pub const DRAWING_ACK: &str = "I received a drawing! ";
    pub const IDLE_GREETING: &str = "Hello! How can I assist you today?";
    pub const SIGNATURE: &str = " I'm a Gemini-like chatbot demo.";
}

// ─── Canvas ───────────────────────────────────────────────────────────────────

pub mod canvas {
    pub const WIDTH: u32 = 600;
    pub const HEIGHT: u32 = 300;
    pub const STROKE_WIDTH: u32 = 3;
    pub const MIN_STROKE_WIDTH: u32 = 1;
    pub const MAX_STROKE_WIDTH: u32 = 25;
    pub const STROKE_COLOR: &str = LIGHT_STROKE_COLOR;
    pub const BACKGROUND_COLOR: &str = LIGHT_BACKGROUND_COLOR;

    pub const DARK_STROKE_COLOR: &str = "#eee";
    pub const DARK_BACKGROUND_COLOR: &str = "#444";
    pub const LIGHT_STROKE_COLOR: &str = "#222";
    pub const LIGHT_BACKGROUND_COLOR: &str = "#fff";

    pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
}

// ─── Classifier ───────────────────────────────────────────────────────────────

pub mod classifier {
    pub const NUM_FEATURES: usize = 4;
    pub const NUM_CLASSES: usize = 3;
    pub const SLIDER_STEP: f32 = 0.1;
}

// ─── Config Paths ─────────────────────────────────────────────────────────────

pub mod paths {
    pub const CONFIG_DIR: &str = "chatdeck";
    pub const CONFIG_FILE: &str = "config.toml";
    pub const MODEL_FILE: &str = "model/model.json";
}
