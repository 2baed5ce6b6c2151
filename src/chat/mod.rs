//! Conversation state and the controller that drives one turn at a time

pub mod controller;
pub mod conversation;

pub use controller::{ChatController, ERROR_REPLY, WELCOME_MESSAGE};
pub use conversation::Conversation;
