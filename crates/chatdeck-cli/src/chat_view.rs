use chatdeck_core::{Message, MessageKind, Role};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
};

use crate::input::LineEditor;
use crate::theme::Theme;

/// Speaker prefixes for one front-end.
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    pub user: &'static str,
    pub assistant: &'static str,
}

pub const BOT_LABELS: Labels = Labels {
    user: "🧑 You: ",
    assistant: "🤖 Bot: ",
};

pub const STUDIO_LABELS: Labels = Labels {
    user: "You > ",
    assistant: "Bot > ",
};

/// Scroll position of a chat pane. `usize::MAX` pins it to the bottom.
#[derive(Debug, Clone, Copy)]
pub struct ChatScroll {
    offset: usize,
}

impl Default for ChatScroll {
    fn default() -> Self {
        Self { offset: usize::MAX }
    }
}

impl ChatScroll {
    pub fn to_bottom(&mut self) {
        self.offset = usize::MAX;
    }

    pub fn up(&mut self, lines: usize) {
        // Resolved to a real offset by the last draw.
        self.offset = self.offset.saturating_sub(lines);
    }

    pub fn down(&mut self, lines: usize) {
        self.offset = self.offset.saturating_add(lines);
    }
}

pub fn format_size(bytes: usize) -> String {
    if bytes >= 1_000_000 {
        format!("{:.1} MB", bytes as f64 / 1_000_000.0)
    } else if bytes >= 1_000 {
        format!("{:.1} KB", bytes as f64 / 1_000.0)
    } else {
        format!("{bytes} B")
    }
}

/// One-line stand-in for an image or drawing message.
pub fn describe_blob(msg: &Message) -> String {
    let what = match msg.kind() {
        MessageKind::Image => "Uploaded Image",
        MessageKind::Drawing => "Drawing",
        MessageKind::Text => return msg.text().unwrap_or_default().to_string(),
    };
    let size = msg.blob().map(|b| format_size(b.len())).unwrap_or_default();
    match msg.image_dimensions() {
        Some((w, h)) => format!("[{what}: {w}x{h}, {size}]"),
        None => format!("[{what}: {size}]"),
    }
}

pub fn render_message_lines(msg: &Message, labels: &Labels, theme: &Theme) -> Vec<Line<'static>> {
    let (prefix, color) = match msg.role() {
        Role::User => (labels.user, theme.user_color),
        Role::Assistant => (labels.assistant, theme.assistant_color),
    };
    let prefix_style = Style::default().fg(color).add_modifier(Modifier::BOLD);

    if msg.kind() != MessageKind::Text {
        return vec![Line::from(vec![
            Span::styled(prefix, prefix_style),
            Span::styled(
                describe_blob(msg),
                Style::default().fg(theme.accent).add_modifier(Modifier::ITALIC),
            ),
        ])];
    }

    let text = msg.text().unwrap_or_default();
    let indent = " ".repeat(prefix.chars().count());
    let mut lines = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let lead = if i == 0 {
            Span::styled(prefix, prefix_style)
        } else {
            Span::raw(indent.clone())
        };
        lines.push(Line::from(vec![
            lead,
            Span::styled(raw.to_string(), Style::default().fg(theme.fg)),
        ]));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(prefix, prefix_style)));
    }
    lines
}

pub fn build_chat_lines(
    messages: &[Message],
    labels: &Labels,
    is_processing: bool,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut chat_lines = Vec::new();
    for msg in messages {
        chat_lines.extend(render_message_lines(msg, labels, theme));
        chat_lines.push(Line::raw(""));
    }

    if is_processing {
        chat_lines.push(Line::from(Span::styled(
            "  Thinking...",
            Style::default().fg(theme.accent).add_modifier(Modifier::DIM),
        )));
    }
    chat_lines
}

pub fn draw_chat(
    f: &mut ratatui::Frame,
    area: Rect,
    title: &str,
    lines: Vec<Line<'static>>,
    scroll: &mut ChatScroll,
    theme: &Theme,
) {
    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2) as usize;
    let max_scroll = total_lines.saturating_sub(visible_height);
    if scroll.offset > max_scroll {
        scroll.offset = max_scroll;
    }

    let chat = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {title} "))
                .border_style(Style::default().fg(theme.border)),
        )
        .style(Style::default().bg(theme.bg))
        .wrap(Wrap { trim: false })
        .scroll((scroll.offset.min(u16::MAX as usize) as u16, 0));
    f.render_widget(chat, area);

    if total_lines > visible_height {
        let mut scrollbar_state = ScrollbarState::new(max_scroll).position(scroll.offset);
        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("^"))
                .end_symbol(Some("v")),
            area,
            &mut scrollbar_state,
        );
    }
}

pub fn draw_input(
    f: &mut ratatui::Frame,
    area: Rect,
    editor: &LineEditor,
    placeholder: &str,
    is_processing: bool,
    theme: &Theme,
) {
    let is_command = editor.text().starts_with('/');
    let title = if is_processing {
        " Input (processing...) "
    } else if is_command {
        " Command "
    } else {
        " Input "
    };

    let body = if editor.is_empty() {
        Span::styled(placeholder.to_string(), Style::default().fg(theme.muted))
    } else {
        Span::styled(
            editor.text().to_string(),
            Style::default().fg(if is_processing { theme.muted } else { theme.fg }),
        )
    };

    let input = Paragraph::new(Line::from(body)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(if is_command { theme.accent } else { theme.border })),
    );
    f.render_widget(input, area);

    if !is_processing {
        let cursor_x = area.x + editor.cursor_column() as u16 + 1;
        let max_x = area.x + area.width.saturating_sub(2);
        f.set_cursor_position((cursor_x.min(max_x), area.y + 1));
    }
}
