use anyhow::Result;
use chatdeck_core::{DeckError, Responder, SessionState, Settings};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::chat_view::{self, ChatScroll, BOT_LABELS};
use crate::input::LineEditor;
use crate::theme::Theme;
use crate::tui;
use crate::worker::ResponderWorker;

const TITLE: &str = "💬 Chatbot";
const PLACEHOLDER: &str = "What is up?";

// ── Single-prompt mode ──────────────────────────────────────────────────

pub async fn run_single_prompt(settings: &Settings, responder: &dyn Responder, prompt: &str) -> Result<()> {
    let mut state = SessionState::from_settings(settings)?;
    let reply = state.submit(responder, prompt).await?;
    println!("{}{prompt}", BOT_LABELS.user);
    println!("{}{reply}", BOT_LABELS.assistant);
    Ok(())
}

// ── Interactive TUI ─────────────────────────────────────────────────────

struct BotApp {
    state: SessionState,
    worker: ResponderWorker,
    editor: LineEditor,
    scroll: ChatScroll,
    theme: Theme,
    is_processing: bool,
    error: Option<String>,
}

impl BotApp {
    fn submit(&mut self) {
        if self.is_processing {
            return;
        }
        let text = self.editor.text().to_string();
        let request = match self.state.begin_submit(&text) {
            Ok(request) => request,
            Err(DeckError::EmptyInput) => return,
            Err(e) => {
                self.error = Some(e.to_string());
                return;
            }
        };
        self.editor.take();
        self.error = None;
        match self.worker.send(request) {
            Ok(()) => self.is_processing = true,
            Err(e) => self.error = Some(e.to_string()),
        }
        self.scroll.to_bottom();
    }

    fn poll_replies(&mut self) {
        while let Some((request, reply)) = self.worker.try_recv() {
            self.is_processing = false;
            if let Err(e) = self.state.finish_submit(&request, reply) {
                self.error = Some(e.to_string());
            }
            self.scroll.to_bottom();
        }
    }
}

pub async fn run_tui(settings: &Settings, responder: Box<dyn Responder>, theme: Theme) -> Result<()> {
    let mut app = BotApp {
        state: SessionState::from_settings(settings)?,
        worker: ResponderWorker::spawn(responder),
        editor: LineEditor::new(),
        scroll: ChatScroll::default(),
        theme,
        is_processing: false,
        error: None,
    };

    let mut terminal = tui::enter(false)?;
    let outcome: Result<()> = loop {
        app.poll_replies();
        if let Err(e) = terminal.draw(|f| draw_ui(f, &mut app)) {
            break Err(e.into());
        }

        match event::poll(tui::FRAME) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(e) => break Err(e.into()),
        }
        let key = match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => key,
            Ok(_) => continue,
            Err(e) => break Err(e.into()),
        };

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Esc) => break Ok(()),
            (_, KeyCode::Enter) => app.submit(),
            (_, KeyCode::PageUp) | (KeyModifiers::SHIFT, KeyCode::Up) => app.scroll.up(5),
            (_, KeyCode::PageDown) | (KeyModifiers::SHIFT, KeyCode::Down) => app.scroll.down(5),
            _ if !app.is_processing => {
                app.editor.handle_key(key);
            }
            _ => {}
        }
    };

    tui::leave(&mut terminal, false)?;
    outcome
}

fn draw_ui(f: &mut ratatui::Frame, app: &mut BotApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3), Constraint::Length(1)])
        .split(f.area());

    let lines = chat_view::build_chat_lines(
        app.state.current_messages(),
        &BOT_LABELS,
        app.is_processing,
        &app.theme,
    );
    chat_view::draw_chat(f, chunks[0], TITLE, lines, &mut app.scroll, &app.theme);
    chat_view::draw_input(f, chunks[1], &app.editor, PLACEHOLDER, app.is_processing, &app.theme);

    let status = match &app.error {
        Some(e) => Span::styled(format!(" {e} "), Style::default().fg(app.theme.error)),
        None => Span::styled(
            format!(
                " {} | {} messages | Enter send  Esc quit ",
                app.worker.name(),
                app.state.current_messages().len()
            ),
            Style::default().fg(app.theme.muted),
        ),
    };
    f.render_widget(Paragraph::new(Line::from(status)), chunks[2]);
}
