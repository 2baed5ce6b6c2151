use crate::events::{ChatMessage, ChatRole};

/// In-memory, append-only message list plus the typing placeholder
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    typing: bool,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of entries with the given role
    pub fn count(&self, role: ChatRole) -> usize {
        self.messages.iter().filter(|m| m.role == role).count()
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn show_typing(&mut self) {
        self.typing = true;
    }

    pub fn hide_typing(&mut self) {
        self.typing = false;
    }

    /// Full reset: the only way messages are ever removed
    pub fn clear(&mut self) {
        self.messages.clear();
        self.typing = false;
    }
}
