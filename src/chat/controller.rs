use crate::chat::Conversation;
use crate::config::Config;
use crate::error::RemoteError;
use crate::events::{ChatMessage, IgnoreReason, SubmitOutcome, TurnReply};
use crate::llm::{ChatBackend, LlmClient};
use crate::normalizer::Normalizer;
use crate::precheck;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Shown for every failed turn, whatever the cause
pub const ERROR_REPLY: &str = "Maaf, terjadi kesalahan. Silakan coba lagi.";

/// First entry of a fresh conversation
pub const WELCOME_MESSAGE: &str =
    "Halo! Saya asisten AI yang siap membantu Anda. Ada yang bisa saya bantu?";

/// Drives the conversation: one submission at a time, one remote call in flight at most
pub struct ChatController {
    conversation: Conversation,
    backend: Arc<dyn ChatBackend>,
    normalizer: Normalizer,
    pending: bool,
    /// Bumped on reset so replies from an abandoned turn are dropped
    generation: u64,
    reply_tx: mpsc::UnboundedSender<TurnReply>,
    reply_rx: mpsc::UnboundedReceiver<TurnReply>,
}

impl ChatController {
    pub fn new(backend: Arc<dyn ChatBackend>, normalizer: Normalizer) -> Self {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        let mut conversation = Conversation::new();
        conversation.push(ChatMessage::assistant(WELCOME_MESSAGE));

        Self {
            conversation,
            backend,
            normalizer,
            pending: false,
            generation: 0,
            reply_tx,
            reply_rx,
        }
    }

    /// Controller talking to the configured remote endpoint
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = LlmClient::new(config.remote.clone())?;
        let normalizer = Normalizer::new(&config.normalizer);
        Ok(Self::new(Arc::new(client), normalizer))
    }

    /// Handle one piece of user input. Must be called inside a tokio runtime.
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored(IgnoreReason::EmptyInput);
        }
        if self.pending {
            tracing::debug!("submit ignored, request already pending");
            return SubmitOutcome::Ignored(IgnoreReason::RequestPending);
        }

        self.conversation.push(ChatMessage::user(text));

        if let Some(kind) = precheck::classify(text) {
            tracing::debug!(?kind, "answered by pre-check");
            self.conversation.push(ChatMessage::assistant(kind.reply()));
            return SubmitOutcome::Answered;
        }

        self.pending = true;
        self.conversation.show_typing();

        let backend = Arc::clone(&self.backend);
        let tx = self.reply_tx.clone();
        let generation = self.generation;
        let prompt = text.to_string();
        let content = prompt.clone();
        tokio::spawn(async move {
            let request = tokio::spawn(async move { backend.ask(&content).await });
            // A panicking backend still completes the turn, as a failure
            let result = match request.await {
                Ok(result) => result,
                Err(e) => Err(RemoteError::TaskFailed(e.to_string())),
            };
            // Receiver gone means the controller was dropped; nothing to report to
            let _ = tx.send(TurnReply {
                generation,
                prompt,
                result,
            });
        });

        SubmitOutcome::Dispatched
    }

    /// Apply every reply that has already arrived, without waiting.
    /// Returns how many turns completed.
    pub fn poll_replies(&mut self) -> usize {
        let mut completed = 0;
        while let Ok(reply) = self.reply_rx.try_recv() {
            if self.apply_reply(reply) {
                completed += 1;
            }
        }
        completed
    }

    /// Wait for the in-flight turn and return the message it produced.
    /// Returns `None` straight away when nothing is pending.
    pub async fn next_reply(&mut self) -> Option<ChatMessage> {
        while self.pending {
            let reply = self.reply_rx.recv().await?;
            if self.apply_reply(reply) {
                return self.conversation.last().cloned();
            }
        }
        None
    }

    fn apply_reply(&mut self, reply: TurnReply) -> bool {
        if reply.generation != self.generation {
            tracing::debug!(generation = reply.generation, "dropping reply from reset conversation");
            return false;
        }

        self.pending = false;
        self.conversation.hide_typing();

        let message = match reply.result {
            Ok(raw) => {
                let text = self.normalizer.normalize_reply(&raw, Some(&reply.prompt));
                ChatMessage::assistant(text)
            }
            Err(e) => {
                tracing::warn!(kind = e.kind(), error = %e, "remote request failed");
                ChatMessage::error(ERROR_REPLY)
            }
        };
        self.conversation.push(message);
        true
    }

    /// Drop every message and start over with the welcome message.
    /// A reply still in flight is discarded when it lands.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.pending = false;
        self.conversation.clear();
        self.conversation.push(ChatMessage::assistant(WELCOME_MESSAGE));
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
