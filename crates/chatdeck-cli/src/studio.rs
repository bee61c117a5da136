use std::path::Path;

use anyhow::Result;
use chatdeck_core::{DeckError, Outcome, Responder, SessionEvent, SessionState, Settings};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::canvas_view::{self, CanvasView};
use crate::chat_view::{self, ChatScroll, STUDIO_LABELS};
use crate::commands::{self, CommandResult};
use crate::input::LineEditor;
use crate::theme::Theme;
use crate::tui;
use crate::worker::ResponderWorker;

const TITLE: &str = "♊ Chat Studio";
const PLACEHOLDER: &str = "Message the bot...  (/help for commands)";

#[derive(Debug, Clone)]
enum Notice {
    Info(String),
    Warning(String),
    Error(String),
}

impl Notice {
    /// Text, colour and box title for the overlay.
    fn look<'a>(&'a self, theme: &Theme) -> (&'a str, ratatui::style::Color, &'static str) {
        match self {
            Notice::Info(t) => (t.as_str(), theme.fg, " Info "),
            Notice::Warning(t) => (t.as_str(), theme.warning, " Busy "),
            Notice::Error(t) => (t.as_str(), theme.error, " Error "),
        }
    }
}

// ── Single-prompt mode ──────────────────────────────────────────────────

pub async fn run_single_prompt(settings: &Settings, responder: &dyn Responder, prompt: &str) -> Result<()> {
    let mut state = SessionState::studio(settings)?;
    let reply = state.submit(responder, prompt).await?;
    println!("[{}]", state.current_name());
    println!("{}{prompt}", STUDIO_LABELS.user);
    println!("{}{reply}", STUDIO_LABELS.assistant);
    Ok(())
}

// ── Interactive TUI ─────────────────────────────────────────────────────

struct StudioApp {
    state: SessionState,
    worker: ResponderWorker,
    editor: LineEditor,
    scroll: ChatScroll,
    theme: Theme,
    is_processing: bool,
    notice: Option<Notice>,
    should_quit: bool,
    /// Where the canvas and the sidebar chat list were last drawn, for mouse hits.
    canvas_area: Option<Rect>,
    chat_list_area: Option<Rect>,
    stroking: bool,
}

impl StudioApp {
    fn new(state: SessionState, responder: Box<dyn Responder>, theme: Theme) -> Self {
        Self {
            state,
            worker: ResponderWorker::spawn(responder),
            editor: LineEditor::new(),
            scroll: ChatScroll::default(),
            theme,
            is_processing: false,
            notice: None,
            should_quit: false,
            canvas_area: None,
            chat_list_area: None,
            stroking: false,
        }
    }

    fn dispatch(&mut self, event: SessionEvent) {
        if self.is_processing && !matches!(
            event,
            SessionEvent::StrokeBegin { .. } | SessionEvent::StrokeTo { .. } | SessionEvent::StrokeEnd
        ) {
            self.notice = Some(Notice::Warning("Wait for the reply to finish.".into()));
            return;
        }
        let dark_toggle = event == SessionEvent::ToggleDarkMode;

        match self.state.apply(event) {
            Ok(outcome) => {
                if dark_toggle {
                    self.theme = Theme::for_mode(self.state.dark_mode());
                }
                self.notice = match outcome {
                    Outcome::ChatCreated(name) => Some(Notice::Info(format!("Started {name}"))),
                    Outcome::Renamed { from, to } if from != to => {
                        Some(Notice::Info(format!("Renamed '{from}' to '{to}'")))
                    }
                    Outcome::Cleared(name) => Some(Notice::Info(format!("Cleared {name}"))),
                    _ => self.notice.take(),
                };
                self.scroll.to_bottom();
            }
            Err(e) => {
                if !e.is_recoverable() {
                    tracing::warn!(session = %self.state.id(), "event failed: {e}");
                }
                self.notice = Some(Notice::Error(e.to_string()));
            }
        }
    }

    fn attach(&mut self, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match std::fs::read(path) {
            Ok(bytes) => self.dispatch(SessionEvent::AttachImage { name, bytes }),
            Err(e) => self.notice = Some(Notice::Error(format!("{}: {e}", path.display()))),
        }
    }

    fn submit(&mut self) {
        if self.is_processing {
            return;
        }
        let text = self.editor.text().to_string();
        let request = match self.state.begin_submit(&text) {
            Ok(request) => request,
            Err(DeckError::EmptyInput) => return,
            Err(e) => {
                self.notice = Some(Notice::Error(e.to_string()));
                return;
            }
        };
        self.editor.take();
        self.stroking = false;
        match self.worker.send(request) {
            Ok(()) => self.is_processing = true,
            Err(e) => self.notice = Some(Notice::Error(e.to_string())),
        }
        self.scroll.to_bottom();
    }

    fn poll_replies(&mut self) {
        while let Some((request, reply)) = self.worker.try_recv() {
            self.is_processing = false;
            if let Err(e) = self.state.finish_submit(&request, reply) {
                self.notice = Some(Notice::Error(e.to_string()));
            }
            self.scroll.to_bottom();
        }
    }

    fn handle_input(&mut self) {
        let text = self.editor.text().trim().to_string();
        match commands::handle_command(&text) {
            CommandResult::NotACommand => self.submit(),
            result => {
                self.editor.take();
                self.run_command(result);
            }
        }
    }

    fn run_command(&mut self, result: CommandResult) {
        match result {
            CommandResult::Message(text) => self.notice = Some(Notice::Info(text)),
            CommandResult::Quit => self.should_quit = true,
            CommandResult::NewChat => self.dispatch(SessionEvent::NewChat),
            CommandResult::Rename(name) => self.dispatch(SessionEvent::Rename(name)),
            CommandResult::Switch(name) => self.dispatch(SessionEvent::Switch(name)),
            CommandResult::ListChats => {
                let current = self.state.current_name();
                let listing: Vec<String> = self
                    .state
                    .store()
                    .chat_names()
                    .into_iter()
                    .enumerate()
                    .map(|(i, name)| {
                        let marker = if name == current { "➤" } else { " " };
                        format!("{marker} {}. {name}", i + 1)
                    })
                    .collect();
                self.notice = Some(Notice::Info(listing.join("\n")));
            }
            CommandResult::Clear => self.dispatch(SessionEvent::ClearCurrent),
            CommandResult::Attach(path) => self.attach(&path),
            CommandResult::Detach => self.dispatch(SessionEvent::DetachImage),
            CommandResult::ToggleDrawing => self.dispatch(SessionEvent::ToggleDrawing),
            CommandResult::ToggleOptions => self.dispatch(SessionEvent::ToggleOptions),
            CommandResult::ToggleDarkMode => self.dispatch(SessionEvent::ToggleDarkMode),
            CommandResult::StrokeWidth(w) => self.dispatch(SessionEvent::SetStrokeWidth(w)),
            CommandResult::StrokeColor(c) => self.dispatch(SessionEvent::SetStrokeColor(c)),
            CommandResult::BackgroundColor(c) => self.dispatch(SessionEvent::SetBackgroundColor(c)),
            CommandResult::ClearCanvas => self.dispatch(SessionEvent::ClearCanvas),
            CommandResult::ThemeChanged(name) => {
                if Theme::all_names().contains(&name.as_str()) {
                    self.theme = Theme::by_name(&name);
                } else {
                    let themes = Theme::all_names().join(", ");
                    self.notice = Some(Notice::Error(format!("Unknown theme '{name}'. Available: {themes}")));
                }
            }
            CommandResult::NotACommand => {}
        }
    }

    fn switch_to_nth(&mut self, n: usize) {
        let name = self.state.store().chat_names().get(n).map(|s| s.to_string());
        if let Some(name) = name {
            self.dispatch(SessionEvent::Switch(name));
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Esc closes an open notice before it quits.
        if self.notice.is_some() && matches!(key.code, KeyCode::Esc) {
            self.notice = None;
            return;
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Esc) => self.should_quit = true,
            (_, KeyCode::Enter) => {
                if !self.is_processing {
                    self.notice = None;
                    self.handle_input();
                }
            }
            (_, KeyCode::Tab) => {
                if let Some(done) = commands::complete_command(self.editor.text()) {
                    self.editor.set_text(done);
                }
            }
            (KeyModifiers::CONTROL, KeyCode::Char('n')) => self.dispatch(SessionEvent::NewChat),
            (KeyModifiers::CONTROL, KeyCode::Char('l')) => self.dispatch(SessionEvent::ClearCurrent),
            (KeyModifiers::CONTROL, KeyCode::Char('o')) => self.dispatch(SessionEvent::ToggleOptions),
            (KeyModifiers::CONTROL, KeyCode::Char('d')) => self.dispatch(SessionEvent::ToggleDrawing),
            (KeyModifiers::CONTROL, KeyCode::Char('t')) => self.dispatch(SessionEvent::ToggleDarkMode),
            (KeyModifiers::CONTROL, KeyCode::Char('r')) => {
                let current = self.state.current_name().to_string();
                self.editor.set_text(format!("/rename {current}"));
            }
            (KeyModifiers::ALT, KeyCode::Char(c @ '1'..='9')) => {
                self.switch_to_nth(c as usize - '1' as usize);
            }
            (_, KeyCode::PageUp) | (KeyModifiers::SHIFT, KeyCode::Up) => self.scroll.up(5),
            (_, KeyCode::PageDown) | (KeyModifiers::SHIFT, KeyCode::Down) => self.scroll.down(5),
            _ if !self.is_processing => {
                self.editor.handle_key(key);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (col, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll.up(3),
            MouseEventKind::ScrollDown => self.scroll.down(3),
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(area) = self.canvas_area.filter(|a| canvas_view::contains(*a, col, row)) {
                    let (x, y) = canvas_view::cell_to_pixel(area, self.state.canvas(), col, row);
                    self.stroking = true;
                    self.dispatch(SessionEvent::StrokeBegin { x, y });
                } else if let Some(list) = self.chat_list_area.filter(|a| canvas_view::contains(*a, col, row)) {
                    self.switch_to_nth((row - list.y) as usize);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) if self.stroking => {
                if let Some(area) = self.canvas_area {
                    let (x, y) = canvas_view::cell_to_pixel(area, self.state.canvas(), col, row);
                    self.dispatch(SessionEvent::StrokeTo { x, y });
                }
            }
            MouseEventKind::Up(MouseButton::Left) if self.stroking => {
                self.stroking = false;
                self.dispatch(SessionEvent::StrokeEnd);
            }
            _ => {}
        }
    }
}

pub async fn run_tui(settings: &Settings, responder: Box<dyn Responder>, theme: Theme) -> Result<()> {
    let mut app = StudioApp::new(SessionState::studio(settings)?, responder, theme);
    app.notice = Some(Notice::Info(
        "Welcome! Type a message, or /help for commands. Esc dismisses this.".into(),
    ));

    let mut terminal = tui::enter(true)?;
    let outcome: Result<()> = loop {
        app.poll_replies();
        if let Err(e) = terminal.draw(|f| draw_ui(f, &mut app)) {
            break Err(e.into());
        }
        if app.should_quit {
            break Ok(());
        }

        match event::poll(tui::FRAME) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(e) => break Err(e.into()),
        }
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => app.handle_key(key),
            Ok(Event::Mouse(mouse)) => app.handle_mouse(mouse),
            Ok(_) => {}
            Err(e) => break Err(e.into()),
        }
        if app.should_quit {
            break Ok(());
        }
    };

    tui::leave(&mut terminal, true)?;
    outcome
}

// ── Rendering ───────────────────────────────────────────────────────────

fn draw_ui(f: &mut ratatui::Frame, app: &mut StudioApp) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(40)])
        .split(f.area());

    draw_sidebar(f, columns[0], app);

    let main = columns[1];
    let panel_height = options_panel_height(app, main);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(panel_height),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(main);

    let lines = chat_view::build_chat_lines(
        app.state.current_messages(),
        &STUDIO_LABELS,
        app.is_processing,
        &app.theme,
    );
    let title = format!("{TITLE} · {}", app.state.current_name());
    chat_view::draw_chat(f, chunks[0], &title, lines, &mut app.scroll, &app.theme);
    if let Some(notice) = &app.notice {
        draw_notice(f, chunks[0], notice, &app.theme);
    }

    app.canvas_area = None;
    if panel_height > 0 {
        draw_options_panel(f, chunks[1], app);
    }

    chat_view::draw_input(f, chunks[2], &app.editor, PLACEHOLDER, app.is_processing, &app.theme);
    draw_status_bar(f, chunks[3], app);
}

fn options_panel_height(app: &StudioApp, main: Rect) -> u16 {
    if !app.state.show_options() {
        return 0;
    }
    if !app.state.drawing_mode() {
        return 4;
    }
    let canvas = app.state.canvas();
    let inner_width = main.width.saturating_sub(2) as u32;
    // Half-block cells are roughly square: one cell per two canvas rows.
    let rows = inner_width * canvas.height() / canvas.width().max(1) / 2;
    let cap = main.height.saturating_sub(8).max(4);
    (rows as u16 + 2).clamp(4, cap)
}

fn draw_sidebar(f: &mut ratatui::Frame, area: Rect, app: &mut StudioApp) {
    let theme = &app.theme;
    let heading = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
    let hint = Style::default().fg(theme.muted);

    let mut lines = vec![
        Line::from(vec![Span::styled("✨ New Chat ", heading), Span::styled("^N", hint)]),
        Line::raw(""),
        Line::from(Span::styled("Current Chat", heading)),
        Line::from(Span::styled(
            format!("➤ {}", app.state.current_name()),
            Style::default().fg(theme.fg),
        )),
        Line::from(Span::styled("rename: ^R", hint)),
        Line::raw(""),
        Line::from(Span::styled("Chat History", heading)),
    ];

    let list_row = lines.len() as u16;
    let names = app.state.store().chat_names();
    let current = app.state.current_name();
    for (i, name) in names.iter().enumerate() {
        let is_current = *name == current;
        let style = if is_current {
            Style::default().fg(theme.fg).bg(theme.selection).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg)
        };
        let key = if i < 9 { format!("M-{} ", i + 1) } else { "    ".into() };
        lines.push(Line::from(vec![Span::styled(key, hint), Span::styled(name.to_string(), style)]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Settings", heading)));
    let dark = if app.state.dark_mode() { "[x]" } else { "[ ]" };
    lines.push(Line::from(vec![
        Span::styled(format!("{dark} Dark mode "), Style::default().fg(theme.fg)),
        Span::styled("^T", hint),
    ]));
    lines.push(Line::from(vec![
        Span::styled("🗑 Clear chat ", Style::default().fg(theme.fg)),
        Span::styled("^L", hint),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Chats ")
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    f.render_widget(Paragraph::new(lines).block(block).style(Style::default().bg(theme.bg)), area);

    let list_height = (names.len() as u16).min(inner.height.saturating_sub(list_row));
    app.chat_list_area = (list_height > 0).then(|| Rect::new(inner.x, inner.y + list_row, inner.width, list_height));
}

fn draw_options_panel(f: &mut ratatui::Frame, area: Rect, app: &mut StudioApp) {
    let theme = &app.theme;
    let canvas = app.state.canvas();

    if app.state.drawing_mode() {
        let title = format!(
            " 🎨 Canvas  {}px {} on {}  drag to draw · /wipe · ^D close ",
            canvas.stroke_width(),
            canvas_view::to_hex(canvas.stroke_color()),
            canvas_view::to_hex(canvas.background()),
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(theme.accent));
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(CanvasView::new(canvas), inner);
        app.canvas_area = Some(inner);
        return;
    }

    let attachment = match app.state.pending_image() {
        Some(img) => Line::from(vec![
            Span::styled("📎 ", Style::default().fg(theme.accent)),
            Span::styled(
                format!("{} ({})", img.name, chat_view::format_size(img.bytes.len())),
                Style::default().fg(theme.fg),
            ),
            Span::styled("  /detach", Style::default().fg(theme.muted)),
        ]),
        None => Line::from(Span::styled(
            "Upload an image: /attach <path.png|jpg>",
            Style::default().fg(theme.muted),
        )),
    };
    let draw = Line::from(vec![
        Span::styled("🎨 Draw on Canvas ", Style::default().fg(theme.fg)),
        Span::styled("^D", Style::default().fg(theme.muted)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ➕ Options ")
        .border_style(Style::default().fg(theme.border));
    f.render_widget(Paragraph::new(vec![attachment, draw]).block(block), area);
}

fn draw_notice(f: &mut ratatui::Frame, chat_area: Rect, notice: &Notice, theme: &Theme) {
    let (text, color, title) = notice.look(theme);
    let inner_width = chat_area.width.saturating_sub(4);
    let height = (text.lines().count() as u16 + 2).min(chat_area.height.saturating_sub(2));
    if height < 3 || inner_width == 0 {
        return;
    }
    let area = Rect::new(
        chat_area.x + 1,
        chat_area.y + chat_area.height - height - 1,
        chat_area.width - 2,
        height,
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(color));
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(text.to_string())
            .style(Style::default().fg(color).bg(theme.bg))
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

fn draw_status_bar(f: &mut ratatui::Frame, area: Rect, app: &StudioApp) {
    let theme = &app.theme;
    let mode = if app.state.dark_mode() { "dark" } else { "light" };
    let clock = chrono::Local::now().format("%H:%M").to_string();

    let spans = vec![
        Span::styled(
            format!(" {} ", app.worker.name()),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("| {} ", app.state.current_name()), Style::default().fg(theme.accent)),
        Span::styled(
            format!("| {} chats ", app.state.store().len()),
            Style::default().fg(theme.muted),
        ),
        Span::styled(format!("| {mode} "), Style::default().fg(theme.muted)),
        Span::styled(format!("| {} ", theme.name), Style::default().fg(theme.muted)),
        Span::styled(format!("| {clock} "), Style::default().fg(theme.muted)),
    ];
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
