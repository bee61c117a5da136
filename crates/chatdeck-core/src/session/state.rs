use std::path::Path;

use uuid::Uuid;

use super::events::{Outcome, SessionEvent};
use crate::canvas::{parse_hex_color, Canvas};
use crate::chat::{Blob, ChatStore, Message};
use crate::config::Settings;
use crate::constants::canvas::{
    DARK_BACKGROUND_COLOR, DARK_STROKE_COLOR, IMAGE_EXTENSIONS, LIGHT_BACKGROUND_COLOR,
    LIGHT_STROKE_COLOR,
};
use crate::constants::chats::{NEW_CHAT_BASE, STUDIO_GREETINGS};
use crate::error::{DeckError, Result};
use crate::responder::{ResponseRequest, Responder};

/// An uploaded image waiting to be sent with the next message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingImage {
    pub name: String,
    pub bytes: Blob,
}

/// Everything one interactive session knows: the chats plus UI toggles.
///
/// Built once per session and handed by `&mut` to whoever dispatches events.
/// Every operation either applies fully or returns an error with the state
/// untouched.
#[derive(Debug, Clone)]
pub struct SessionState {
    id: Uuid,
    store: ChatStore,
    show_options: bool,
    drawing_mode: bool,
    dark_mode: bool,
    canvas: Canvas,
    pending_image: Option<PendingImage>,
}

impl SessionState {
    pub fn new(canvas: Canvas) -> Self {
        let id = Uuid::new_v4();
        tracing::info!(session = %id, "session started");
        Self {
            id,
            store: ChatStore::new(),
            show_options: false,
            drawing_mode: false,
            dark_mode: false,
            canvas,
            pending_image: None,
        }
    }

    /// A session with a single empty chat, canvas and palette from `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut state = Self::new(settings.canvas.build()?);
        if settings.ui.dark_mode {
            state.set_dark_mode(true)?;
        }
        Ok(state)
    }

    /// Like [`SessionState::from_settings`], with the greeting chats seeded
    /// ahead of the empty current chat.
    pub fn studio(settings: &Settings) -> Result<Self> {
        let mut state = Self::from_settings(settings)?;
        for (name, greeting) in STUDIO_GREETINGS {
            state.store.seed_chat(name, vec![Message::assistant(*greeting)]);
        }
        Ok(state)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn store(&self) -> &ChatStore {
        &self.store
    }

    pub fn current_name(&self) -> &str {
        self.store.current_name()
    }

    pub fn current_messages(&self) -> &[Message] {
        self.store.current_messages()
    }

    pub fn other_chat_names(&self) -> Vec<&str> {
        self.store.other_chat_names()
    }

    pub fn show_options(&self) -> bool {
        self.show_options
    }

    pub fn drawing_mode(&self) -> bool {
        self.drawing_mode
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn pending_image(&self) -> Option<&PendingImage> {
        self.pending_image.as_ref()
    }

    /// Apply one UI event.
    pub fn apply(&mut self, event: SessionEvent) -> Result<Outcome> {
        tracing::debug!(session = %self.id, event = event.label(), "apply");
        match event {
            SessionEvent::NewChat => {
                let name = self.store.create_chat(NEW_CHAT_BASE);
                self.hide_options();
                Ok(Outcome::ChatCreated(name))
            }
            SessionEvent::Rename(new_name) => {
                let from = self.store.current_name().to_string();
                self.store.rename_chat(&from, &new_name)?;
                let to = self.store.current_name().to_string();
                Ok(Outcome::Renamed { from, to })
            }
            SessionEvent::Switch(name) => {
                self.store.switch_chat(&name)?;
                self.hide_options();
                Ok(Outcome::Switched(name))
            }
            SessionEvent::ClearCurrent => {
                let name = self.store.current_name().to_string();
                self.store.clear_chat(&name)?;
                self.hide_options();
                Ok(Outcome::Cleared(name))
            }
            SessionEvent::ToggleOptions => {
                if self.show_options {
                    self.hide_options();
                } else {
                    self.show_options = true;
                    self.close_canvas();
                }
                Ok(Outcome::Updated)
            }
            SessionEvent::ToggleDrawing => {
                if self.drawing_mode {
                    self.close_canvas();
                } else {
                    if let Some(img) = &self.pending_image {
                        self.canvas.set_background_image(&img.bytes)?;
                    }
                    self.drawing_mode = true;
                    self.show_options = true;
                }
                Ok(Outcome::Updated)
            }
            SessionEvent::ToggleDarkMode => {
                self.set_dark_mode(!self.dark_mode)?;
                Ok(Outcome::Updated)
            }
            SessionEvent::SetStrokeWidth(width) => {
                self.canvas.set_stroke_width(width);
                Ok(Outcome::Updated)
            }
            SessionEvent::SetStrokeColor(color) => {
                self.canvas.set_stroke_color(parse_hex_color(&color)?);
                Ok(Outcome::Updated)
            }
            SessionEvent::SetBackgroundColor(color) => {
                self.canvas.set_background(parse_hex_color(&color)?);
                Ok(Outcome::Updated)
            }
            SessionEvent::AttachImage { name, bytes } => {
                self.attach_image(name, bytes)?;
                Ok(Outcome::Updated)
            }
            SessionEvent::DetachImage => {
                self.pending_image = None;
                self.canvas.clear_background_image();
                Ok(Outcome::Updated)
            }
            SessionEvent::StrokeBegin { x, y } => self.on_canvas(|c| c.begin_stroke(x, y)),
            SessionEvent::StrokeTo { x, y } => self.on_canvas(|c| c.stroke_to(x, y)),
            SessionEvent::StrokeEnd => self.on_canvas(Canvas::end_stroke),
            SessionEvent::ClearCanvas => self.on_canvas(Canvas::clear),
        }
    }

    /// First half of a submission: record the user's turn and hand back what
    /// the responder needs.
    ///
    /// Appends the text, then the pending image, then the drawing (only when
    /// the canvas is open). Afterwards the options panel and canvas are closed
    /// and the upload is consumed.
    pub fn begin_submit(&mut self, text: &str) -> Result<ResponseRequest> {
        if text.trim().is_empty() {
            return Err(DeckError::EmptyInput);
        }

        let drawing: Option<Blob> = if self.drawing_mode {
            Some(self.canvas.to_png()?.into())
        } else {
            None
        };
        let image = self.pending_image.as_ref().map(|p| p.bytes.clone());

        let chat_name = self.store.current_name().to_string();
        self.store.append_message(&chat_name, Message::user(text))?;
        if let Some(bytes) = &image {
            self.store.append_message(&chat_name, Message::image(bytes.clone()))?;
        }
        if let Some(bytes) = &drawing {
            self.store.append_message(&chat_name, Message::drawing(bytes.clone()))?;
        }

        self.hide_options();

        tracing::debug!(
            session = %self.id,
            chat = %chat_name,
            image = image.is_some(),
            drawing = drawing.is_some(),
            "submitted"
        );

        Ok(ResponseRequest {
            chat_name,
            text: text.to_string(),
            image,
            drawing,
        })
    }

    /// Second half of a submission. A reply is appended to the chat the
    /// request came from; a failure appends nothing and comes back as an
    /// opaque [`DeckError::Responder`].
    pub fn finish_submit(&mut self, request: &ResponseRequest, reply: Result<String>) -> Result<()> {
        match reply {
            Ok(text) => self
                .store
                .append_message(&request.chat_name, Message::assistant(text)),
            Err(e) => {
                tracing::warn!(session = %self.id, chat = %request.chat_name, "responder failed: {e}");
                Err(match e {
                    DeckError::Responder(_) => e,
                    other => DeckError::Responder(other.to_string()),
                })
            }
        }
    }

    /// Both halves of a submission, awaiting `responder` in between.
    pub async fn submit(&mut self, responder: &dyn Responder, text: &str) -> Result<String> {
        let request = self.begin_submit(text)?;
        let reply = responder.respond(&request).await;
        let text = reply.as_ref().map(String::clone).unwrap_or_default();
        self.finish_submit(&request, reply)?;
        Ok(text)
    }

    fn attach_image(&mut self, name: String, bytes: Vec<u8>) -> Result<()> {
        let ext = Path::new(&name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            return Err(DeckError::UnsupportedImage(format!(
                "{name}: expected one of {}",
                IMAGE_EXTENSIONS.join(", ")
            )));
        }
        if let Err(e) = image::load_from_memory(&bytes) {
            return Err(DeckError::UnsupportedImage(format!("{name}: {e}")));
        }

        if self.drawing_mode {
            self.canvas.set_background_image(&bytes)?;
        }
        self.pending_image = Some(PendingImage {
            name,
            bytes: bytes.into(),
        });
        self.show_options = true;
        Ok(())
    }

    fn set_dark_mode(&mut self, dark: bool) -> Result<()> {
        let (stroke, background) = if dark {
            (DARK_STROKE_COLOR, DARK_BACKGROUND_COLOR)
        } else {
            (LIGHT_STROKE_COLOR, LIGHT_BACKGROUND_COLOR)
        };
        let stroke = parse_hex_color(stroke)?;
        let background = parse_hex_color(background)?;
        self.canvas.set_stroke_color(stroke);
        self.canvas.set_background(background);
        self.dark_mode = dark;
        Ok(())
    }

    fn on_canvas(&mut self, f: impl FnOnce(&mut Canvas)) -> Result<Outcome> {
        if !self.drawing_mode {
            return Ok(Outcome::Ignored);
        }
        f(&mut self.canvas);
        Ok(Outcome::Updated)
    }

    /// Hide the attach/draw panel; the upload and canvas go with it.
    fn hide_options(&mut self) {
        self.show_options = false;
        self.pending_image = None;
        self.close_canvas();
    }

    fn close_canvas(&mut self) {
        self.drawing_mode = false;
        self.canvas.clear();
        self.canvas.clear_background_image();
    }
}
