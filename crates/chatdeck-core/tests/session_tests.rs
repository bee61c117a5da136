use chatdeck_core::{
    DeckError, EchoResponder, MessageKind, Outcome, ResponseRequest, Responder, Role,
    SessionEvent, SessionState, Settings,
};
use std::io::Cursor;

fn session() -> SessionState {
    SessionState::from_settings(&Settings::default()).unwrap()
}

fn tiny_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([255, 0, 0, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Responder that always fails.
struct BrokenResponder;

#[async_trait::async_trait]
impl Responder for BrokenResponder {
    fn name(&self) -> &str {
        "broken"
    }

    async fn respond(&self, _request: &ResponseRequest) -> Result<String, DeckError> {
        Err(DeckError::Config("model offline".into()))
    }
}

// ========================================================================
// Construction
// ========================================================================

#[test]
fn test_studio_session_seeds_greeting_chats() {
    let state = SessionState::studio(&Settings::default()).unwrap();
    assert_eq!(state.current_name(), "New Chat");
    assert!(state.current_messages().is_empty());
    assert_eq!(state.other_chat_names(), vec!["Chat 1", "Chat 2"]);

    let greeting = &state.store().messages("Chat 1").unwrap()[0];
    assert_eq!(greeting.role(), Role::Assistant);
    assert_eq!(greeting.text(), Some("Welcome! How can I help you with Chat 1?"));
}

#[test]
fn test_studio_new_chat_does_not_collide_with_seeds() {
    let mut state = SessionState::studio(&Settings::default()).unwrap();
    let outcome = state.apply(SessionEvent::NewChat).unwrap();
    assert_eq!(outcome, Outcome::ChatCreated("Chat 4".into()));
    assert_eq!(state.store().len(), 4);
}

// ========================================================================
// Toggles
// ========================================================================

#[test]
fn test_new_switch_clear_hide_panels() {
    let mut state = session();
    state.apply(SessionEvent::ToggleDrawing).unwrap();
    assert!(state.drawing_mode() && state.show_options());

    state.apply(SessionEvent::NewChat).unwrap();
    assert!(!state.drawing_mode() && !state.show_options());

    state.apply(SessionEvent::ToggleDrawing).unwrap();
    state.apply(SessionEvent::Switch("New Chat".into())).unwrap();
    assert!(!state.drawing_mode() && !state.show_options());

    state.apply(SessionEvent::ToggleOptions).unwrap();
    state.apply(SessionEvent::ClearCurrent).unwrap();
    assert!(!state.show_options());
}

#[test]
fn test_toggle_options_closes_canvas() {
    let mut state = session();
    state.apply(SessionEvent::ToggleDrawing).unwrap();
    state.apply(SessionEvent::ToggleOptions).unwrap();
    assert!(!state.show_options());
    assert!(!state.drawing_mode());

    state.apply(SessionEvent::ToggleOptions).unwrap();
    assert!(state.show_options());
    assert!(!state.drawing_mode());
}

#[test]
fn test_dark_mode_swaps_palette() {
    let mut state = session();
    state.apply(SessionEvent::ToggleDarkMode).unwrap();
    assert!(state.dark_mode());
    assert_eq!(state.canvas().stroke_color(), image::Rgba([0xee, 0xee, 0xee, 255]));
    assert_eq!(state.canvas().background(), image::Rgba([0x44, 0x44, 0x44, 255]));

    state.apply(SessionEvent::ToggleDarkMode).unwrap();
    assert_eq!(state.canvas().stroke_color(), image::Rgba([0x22, 0x22, 0x22, 255]));
    assert_eq!(state.canvas().background(), image::Rgba([0xff, 0xff, 0xff, 255]));
}

#[test]
fn test_fresh_session_uses_light_palette() {
    let state = SessionState::studio(&Settings::default()).unwrap();
    assert!(!state.dark_mode());
    assert_eq!(state.canvas().stroke_color(), image::Rgba([0x22, 0x22, 0x22, 255]));
    assert_eq!(state.canvas().background(), image::Rgba([0xff, 0xff, 0xff, 255]));
}

#[test]
fn test_dark_mode_setting_applies_dark_palette() {
    let mut settings = Settings::default();
    settings.ui.dark_mode = true;
    let state = SessionState::from_settings(&settings).unwrap();
    assert!(state.dark_mode());
    assert_eq!(state.canvas().stroke_color(), image::Rgba([0xee, 0xee, 0xee, 255]));
    assert_eq!(state.canvas().background(), image::Rgba([0x44, 0x44, 0x44, 255]));
}

#[test]
fn test_invalid_color_leaves_canvas_alone() {
    let mut state = session();
    let before = state.canvas().stroke_color();
    let err = state.apply(SessionEvent::SetStrokeColor("red".into())).unwrap_err();
    assert!(matches!(err, DeckError::InvalidColor(_)));
    assert!(err.is_recoverable());
    assert_eq!(state.canvas().stroke_color(), before);
}

#[test]
fn test_stroke_width_clamped() {
    let mut state = session();
    state.apply(SessionEvent::SetStrokeWidth(100)).unwrap();
    assert_eq!(state.canvas().stroke_width(), 25);
}

#[test]
fn test_extreme_stroke_is_clipped() {
    let mut state = session();
    state.apply(SessionEvent::ToggleDrawing).unwrap();
    state.apply(SessionEvent::StrokeBegin { x: -10, y: 0 }).unwrap();
    state.apply(SessionEvent::StrokeTo { x: i32::MAX, y: 0 }).unwrap();
    state.apply(SessionEvent::StrokeTo { x: i32::MIN, y: i32::MAX }).unwrap();
    state.apply(SessionEvent::StrokeEnd).unwrap();

    let ink = state.canvas().stroke_color();
    let width = state.canvas().width();
    assert_eq!(state.canvas().pixel(0, 0), Some(ink));
    assert_eq!(state.canvas().pixel(width - 1, 0), Some(ink));
}

#[test]
fn test_strokes_ignored_without_canvas() {
    let mut state = session();
    let outcome = state.apply(SessionEvent::StrokeBegin { x: 1, y: 1 }).unwrap();
    assert_eq!(outcome, Outcome::Ignored);
    assert!(state.canvas().is_blank());
}

// ========================================================================
// Rename / switch through events
// ========================================================================

#[test]
fn test_rename_event_reports_names() {
    let mut state = session();
    let outcome = state.apply(SessionEvent::Rename("Notes".into())).unwrap();
    assert_eq!(
        outcome,
        Outcome::Renamed {
            from: "New Chat".into(),
            to: "Notes".into()
        }
    );
}

#[test]
fn test_switch_unknown_chat_is_recoverable() {
    let mut state = session();
    let err = state.apply(SessionEvent::Switch("Nope".into())).unwrap_err();
    assert!(matches!(err, DeckError::NotFound(_)));
    assert!(err.is_recoverable());
}

// ========================================================================
// Images
// ========================================================================

#[test]
fn test_attach_rejects_unsupported_extension() {
    let mut state = session();
    let err = state
        .apply(SessionEvent::AttachImage {
            name: "notes.gif".into(),
            bytes: tiny_png(),
        })
        .unwrap_err();
    assert!(matches!(err, DeckError::UnsupportedImage(_)));
    assert!(state.pending_image().is_none());
}

#[test]
fn test_attach_rejects_undecodable_bytes() {
    let mut state = session();
    let err = state
        .apply(SessionEvent::AttachImage {
            name: "photo.PNG".into(),
            bytes: b"not an image".to_vec(),
        })
        .unwrap_err();
    assert!(matches!(err, DeckError::UnsupportedImage(_)));
}

#[test]
fn test_attached_image_becomes_canvas_background() {
    let mut state = session();
    state
        .apply(SessionEvent::AttachImage {
            name: "red.png".into(),
            bytes: tiny_png(),
        })
        .unwrap();
    assert!(state.show_options());
    assert!(!state.canvas().has_background_image());

    state.apply(SessionEvent::ToggleDrawing).unwrap();
    assert!(state.canvas().has_background_image());
    let px = state.canvas().pixel(0, 0).unwrap();
    assert!(px[0] > 250 && px[1] < 5 && px[2] < 5, "expected red, got {px:?}");

    // Hiding the canvas drops the background but keeps the upload.
    state.apply(SessionEvent::ToggleDrawing).unwrap();
    assert!(!state.canvas().has_background_image());
    assert!(state.pending_image().is_some());
}

// ========================================================================
// Submission
// ========================================================================

#[test]
fn test_submit_rejects_empty_text() {
    let mut state = session();
    assert!(matches!(state.begin_submit("  "), Err(DeckError::EmptyInput)));
    assert!(state.current_messages().is_empty());
}

#[test]
fn test_submit_orders_text_image_drawing() {
    let mut state = session();
    state
        .apply(SessionEvent::AttachImage {
            name: "red.jpg".into(),
            bytes: tiny_png(),
        })
        .unwrap();
    state.apply(SessionEvent::ToggleDrawing).unwrap();
    state.apply(SessionEvent::StrokeBegin { x: 10, y: 10 }).unwrap();
    state.apply(SessionEvent::StrokeTo { x: 50, y: 10 }).unwrap();
    state.apply(SessionEvent::StrokeEnd).unwrap();

    let request = state.begin_submit("look").unwrap();
    assert_eq!(request.chat_name, "New Chat");
    assert!(request.image.is_some());
    assert!(request.drawing.is_some());

    let kinds: Vec<MessageKind> = state.current_messages().iter().map(|m| m.kind()).collect();
    assert_eq!(kinds, vec![MessageKind::Text, MessageKind::Image, MessageKind::Drawing]);

    // Drawing blob is a PNG
    let drawing = state.current_messages()[2].blob().unwrap();
    assert_eq!(&drawing[..8], b"\x89PNG\r\n\x1a\n");

    // Panels reset after sending
    assert!(!state.show_options());
    assert!(!state.drawing_mode());
    assert!(state.pending_image().is_none());
    assert!(state.canvas().is_blank());

    state.finish_submit(&request, Ok("reply".into())).unwrap();
    let last = state.current_messages().last().unwrap();
    assert_eq!(last.role(), Role::Assistant);
    assert_eq!(last.text(), Some("reply"));
}

#[test]
fn test_submit_text_only_has_no_blobs() {
    let mut state = session();
    let request = state.begin_submit("hello").unwrap();
    assert!(request.image.is_none());
    assert!(request.drawing.is_none());
    assert_eq!(state.current_messages().len(), 1);
}

#[test]
fn test_reply_lands_in_originating_chat() {
    let mut state = session();
    let request = state.begin_submit("hello").unwrap();
    state.apply(SessionEvent::NewChat).unwrap();
    state.finish_submit(&request, Ok("hi".into())).unwrap();

    assert!(state.current_messages().is_empty());
    assert_eq!(state.store().messages("New Chat").unwrap().len(), 2);
}

#[tokio::test]
async fn test_submit_with_echo_responder() {
    let mut state = session();
    let reply = state.submit(&EchoResponder, "ping").await.unwrap();
    assert_eq!(reply, "You said: ping");
    let texts: Vec<_> = state.current_messages().iter().map(|m| m.text().unwrap()).collect();
    assert_eq!(texts, vec!["ping", "You said: ping"]);
}

#[tokio::test]
async fn test_responder_failure_appends_nothing() {
    let mut state = session();
    let err = state.submit(&BrokenResponder, "ping").await.unwrap_err();
    assert!(matches!(err, DeckError::Responder(ref msg) if msg.contains("model offline")));

    // Only the user's turn is recorded.
    assert_eq!(state.current_messages().len(), 1);
    assert_eq!(state.current_messages()[0].role(), Role::User);
}
