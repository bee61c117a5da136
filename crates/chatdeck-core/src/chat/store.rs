use super::message::Message;
use crate::constants::chats::INITIAL_CHAT;
use crate::error::{DeckError, Result};

/// A named message thread.
#[derive(Debug, Clone)]
pub struct Chat {
    name: String,
    messages: Vec<Message>,
}

impl Chat {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

/// In-memory set of named chats plus the active one.
///
/// Chats are kept in insertion order for navigation. The active chat is held
/// as an index into that list; chats are never removed, so the index always
/// names a live chat.
#[derive(Debug, Clone)]
pub struct ChatStore {
    chats: Vec<Chat>,
    current: usize,
}

impl ChatStore {
    /// A store holding one empty chat, which is current.
    pub fn new() -> Self {
        Self::with_initial_chat(INITIAL_CHAT)
    }

    pub fn with_initial_chat(name: impl Into<String>) -> Self {
        Self {
            chats: vec![Chat::new(name)],
            current: 0,
        }
    }

    /// Insert a chat just ahead of the current one without making it current.
    /// Used to seed greeting chats; an existing name is left untouched.
    pub fn seed_chat(&mut self, name: &str, messages: Vec<Message>) {
        if self.contains(name) {
            return;
        }
        let seeded = Chat {
            name: name.to_string(),
            messages,
        };
        self.chats.insert(self.current, seeded);
        self.current += 1;
    }

    pub fn len(&self) -> usize {
        self.chats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn current_name(&self) -> &str {
        &self.chats[self.current].name
    }

    pub fn current_messages(&self) -> &[Message] {
        &self.chats[self.current].messages
    }

    pub fn messages(&self, name: &str) -> Result<&[Message]> {
        self.index_of(name)
            .map(|i| self.chats[i].messages.as_slice())
            .ok_or_else(|| DeckError::not_found(name))
    }

    /// All chat names, in insertion order.
    pub fn chat_names(&self) -> Vec<&str> {
        self.chats.iter().map(|c| c.name.as_str()).collect()
    }

    /// Names of every chat except the current one, for navigation links.
    pub fn other_chat_names(&self) -> Vec<&str> {
        self.chats
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != self.current)
            .map(|(_, c)| c.name.as_str())
            .collect()
    }

    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    /// Create an empty chat named `"{base_name} {n}"` and make it current.
    ///
    /// `n` starts at one past the current chat count and is bumped until the
    /// name is free, so an existing chat is never overwritten.
    pub fn create_chat(&mut self, base_name: &str) -> String {
        let mut n = self.chats.len() + 1;
        let name = loop {
            let candidate = format!("{base_name} {n}");
            if !self.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };

        self.chats.push(Chat::new(name.clone()));
        self.current = self.chats.len() - 1;
        tracing::debug!(chat = %name, "created chat");
        name
    }

    /// Rename a chat in place. The chat keeps its messages and its position
    /// in the listing; if it was current it stays current.
    pub fn rename_chat(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(DeckError::invalid_rename("chat name cannot be empty"));
        }

        let idx = self
            .index_of(old_name)
            .ok_or_else(|| DeckError::not_found(old_name))?;

        if new_name == old_name {
            return Ok(());
        }

        if self.contains(new_name) {
            return Err(DeckError::invalid_rename(format!(
                "a chat named '{new_name}' already exists"
            )));
        }

        self.chats[idx].name = new_name.to_string();
        tracing::debug!(from = %old_name, to = %new_name, "renamed chat");
        Ok(())
    }

    /// Make `name` current and return its messages for display.
    pub fn switch_chat(&mut self, name: &str) -> Result<&[Message]> {
        let idx = self
            .index_of(name)
            .ok_or_else(|| DeckError::not_found(name))?;
        self.current = idx;
        tracing::debug!(chat = %name, "switched chat");
        Ok(&self.chats[idx].messages)
    }

    pub fn append_message(&mut self, chat_name: &str, message: Message) -> Result<()> {
        let idx = self
            .index_of(chat_name)
            .ok_or_else(|| DeckError::not_found(chat_name))?;
        self.chats[idx].messages.push(message);
        Ok(())
    }

    pub fn clear_chat(&mut self, chat_name: &str) -> Result<()> {
        let idx = self
            .index_of(chat_name)
            .ok_or_else(|| DeckError::not_found(chat_name))?;
        self.chats[idx].messages.clear();
        tracing::debug!(chat = %chat_name, "cleared chat");
        Ok(())
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.chats.iter().position(|c| c.name == name)
    }
}

impl Default for ChatStore {
    fn default() -> Self {
        Self::new()
    }
}
