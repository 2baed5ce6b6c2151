//! Conversation UI components for the chat surface

pub mod bindings;
pub mod commands;
pub mod composer;
pub mod history;
pub mod manager;
pub mod typing;

pub use bindings::{ChatAction, KeyBindings, KeyChord};
pub use commands::{get_help_text, parse_slash_command, SlashCommand};
pub use composer::{ComposerInput, ConversationComposer};
pub use history::HistoryView;
pub use manager::{ConversationAction, ConversationManager};
pub use typing::TypingIndicator;
