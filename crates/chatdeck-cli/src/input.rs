use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Single-line input buffer with history.
///
/// `cursor` is a byte offset that always sits on a char boundary.
#[derive(Debug, Default, Clone)]
pub struct LineEditor {
    text: String,
    cursor: usize,
    history: Vec<String>,
    history_pos: Option<usize>,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor column in characters, for placing the terminal cursor.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the buffer and put the cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    /// Empty the buffer, remembering non-blank input in history.
    pub fn take(&mut self) -> String {
        let text = std::mem::take(&mut self.text);
        self.cursor = 0;
        self.push_history(&text);
        text
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary(self.cursor) {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary(self.cursor) {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn left(&mut self) {
        if let Some(prev) = self.prev_boundary(self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = self.next_boundary(self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn word_left(&mut self) {
        self.cursor = self.word_boundary_left();
    }

    pub fn word_right(&mut self) {
        self.cursor = self.word_boundary_right();
    }

    /// Ctrl+W: delete the word before the cursor.
    pub fn delete_word(&mut self) {
        let start = self.word_boundary_left();
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    /// Ctrl+U
    pub fn kill_to_start(&mut self) {
        self.text.replace_range(..self.cursor, "");
        self.cursor = 0;
    }

    /// Ctrl+K
    pub fn kill_to_end(&mut self) {
        self.text.truncate(self.cursor);
    }

    pub fn push_history(&mut self, entry: &str) {
        let trimmed = entry.trim();
        if !trimmed.is_empty() && self.history.last().map(|s| s.as_str()) != Some(trimmed) {
            self.history.push(trimmed.to_string());
        }
        self.history_pos = None;
    }

    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let pos = match self.history_pos {
            None => self.history.len() - 1,
            Some(0) => 0,
            Some(p) => p - 1,
        };
        self.history_pos = Some(pos);
        self.set_text(self.history[pos].clone());
    }

    pub fn history_next(&mut self) {
        match self.history_pos {
            None => {}
            Some(p) if p + 1 >= self.history.len() => {
                self.history_pos = None;
                self.set_text(String::new());
            }
            Some(p) => {
                self.history_pos = Some(p + 1);
                self.set_text(self.history[p + 1].clone());
            }
        }
    }

    /// Apply an editing key. Returns `false` for keys the editor leaves to the caller.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match (key.modifiers, key.code) {
            (_, KeyCode::Backspace) => self.backspace(),
            (_, KeyCode::Delete) => self.delete(),
            (KeyModifiers::CONTROL, KeyCode::Left) => self.word_left(),
            (KeyModifiers::CONTROL, KeyCode::Right) => self.word_right(),
            (_, KeyCode::Left) => self.left(),
            (_, KeyCode::Right) => self.right(),
            (_, KeyCode::Home) | (KeyModifiers::CONTROL, KeyCode::Char('a')) => self.home(),
            (_, KeyCode::End) | (KeyModifiers::CONTROL, KeyCode::Char('e')) => self.end(),
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => self.kill_to_start(),
            (KeyModifiers::CONTROL, KeyCode::Char('k')) => self.kill_to_end(),
            (KeyModifiers::CONTROL, KeyCode::Char('w')) => self.delete_word(),
            (KeyModifiers::NONE, KeyCode::Up) => self.history_prev(),
            (KeyModifiers::NONE, KeyCode::Down) => self.history_next(),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => self.insert(c),
            _ => return false,
        }
        true
    }

    fn prev_boundary(&self, at: usize) -> Option<usize> {
        self.text[..at].char_indices().next_back().map(|(i, _)| i)
    }

    fn next_boundary(&self, at: usize) -> Option<usize> {
        self.text[at..].chars().next().map(|c| at + c.len_utf8())
    }

    fn word_boundary_left(&self) -> usize {
        let before = &self.text[..self.cursor];
        let trimmed = before.trim_end_matches(|c: char| !c.is_alphanumeric());
        trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| !c.is_alphanumeric())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0)
    }

    fn word_boundary_right(&self) -> usize {
        let after = &self.text[self.cursor..];
        let skip_word = after
            .find(|c: char| !c.is_alphanumeric())
            .unwrap_or(after.len());
        let rest = &after[skip_word..];
        let skip_space = rest
            .find(|c: char| c.is_alphanumeric())
            .unwrap_or(rest.len());
        self.cursor + skip_word + skip_space
    }
}
