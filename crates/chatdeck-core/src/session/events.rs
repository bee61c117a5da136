/// A user action coming from the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    NewChat,
    /// Rename the current chat.
    Rename(String),
    Switch(String),
    ClearCurrent,
    /// The "+" button: show or hide the attach/draw panel.
    ToggleOptions,
    ToggleDrawing,
    ToggleDarkMode,
    SetStrokeWidth(u32),
    SetStrokeColor(String),
    SetBackgroundColor(String),
    AttachImage { name: String, bytes: Vec<u8> },
    DetachImage,
    StrokeBegin { x: i32, y: i32 },
    StrokeTo { x: i32, y: i32 },
    StrokeEnd,
    ClearCanvas,
}

impl SessionEvent {
    /// Short name for logs; keeps image payloads out of trace output.
    pub fn label(&self) -> &'static str {
        match self {
            SessionEvent::NewChat => "new_chat",
            SessionEvent::Rename(_) => "rename",
            SessionEvent::Switch(_) => "switch",
            SessionEvent::ClearCurrent => "clear",
            SessionEvent::ToggleOptions => "toggle_options",
            SessionEvent::ToggleDrawing => "toggle_drawing",
            SessionEvent::ToggleDarkMode => "toggle_dark_mode",
            SessionEvent::SetStrokeWidth(_) => "stroke_width",
            SessionEvent::SetStrokeColor(_) => "stroke_color",
            SessionEvent::SetBackgroundColor(_) => "background_color",
            SessionEvent::AttachImage { .. } => "attach_image",
            SessionEvent::DetachImage => "detach_image",
            SessionEvent::StrokeBegin { .. } => "stroke_begin",
            SessionEvent::StrokeTo { .. } => "stroke_to",
            SessionEvent::StrokeEnd => "stroke_end",
            SessionEvent::ClearCanvas => "clear_canvas",
        }
    }
}

/// What an applied event did, so the caller knows what to redraw or report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    ChatCreated(String),
    Renamed { from: String, to: String },
    Switched(String),
    Cleared(String),
    Updated,
    /// The event had no effect in the current mode (e.g. a stroke with the canvas hidden).
    Ignored,
}
