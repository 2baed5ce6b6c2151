//! Terminal chat assistant.
//!
//! User text is relayed to a hosted language-model endpoint and the reply is
//! rewritten into a short, casual Indonesian answer before it is shown.
//! Greetings and a few identity questions are answered locally.

pub mod chat;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod instance;
pub mod llm;
pub mod normalizer;
pub mod precheck;
pub mod ui;

pub use chat::{ChatController, Conversation};
pub use config::Config;
pub use error::RemoteError;
pub use events::{ChatMessage, ChatRole, IgnoreReason, SubmitOutcome};
pub use instance::ChatWidget;
pub use llm::{ChatBackend, LlmClient};
pub use normalizer::Normalizer;
