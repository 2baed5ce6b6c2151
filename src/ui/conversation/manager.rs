use crate::config::UiConfig;
use crate::events::{IgnoreReason, SubmitOutcome};
use crate::instance::ChatWidget;
use crate::ui::conversation::{
    get_help_text, ChatAction, ComposerInput, ConversationComposer, HistoryView, KeyBindings,
    SlashCommand, TypingIndicator,
};
use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Actions that can be requested by the conversation manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationAction {
    None,
    Exit,
}

/// Wires the terminal surface (keys, composer, history) to the chat widget
pub struct ConversationManager {
    widget: ChatWidget,
    composer: ConversationComposer,
    bindings: KeyBindings,
    ui: UiConfig,
    notice: Option<String>,
    scroll: usize,
    frame: u64,
}

impl ConversationManager {
    pub fn new(widget: ChatWidget, ui: UiConfig) -> Self {
        let mut manager = Self {
            widget,
            composer: ConversationComposer::new("Ketik pesan Anda..."),
            bindings: KeyBindings::new(),
            ui,
            notice: None,
            scroll: 0,
            frame: 0,
        };
        manager.setup_bindings();
        manager
    }

    /// (Re)install key handlers; never leaves more than one handler per key
    pub fn setup_bindings(&mut self) {
        self.bindings.bind_defaults();
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Advance the animation and pick up finished replies
    pub async fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
        let mut chat = self.widget.lock().await;
        if chat.poll_replies() > 0 {
            self.scroll = 0;
        }
        self.composer.set_locked(chat.is_pending());
    }

    /// Handle key input
    pub async fn handle_key(&mut self, key: KeyEvent) -> ConversationAction {
        match self.bindings.action_for(&key) {
            Some(ChatAction::Submit) => self.submit().await,
            Some(ChatAction::Reset) => {
                self.reset().await;
                ConversationAction::None
            }
            Some(ChatAction::Quit) => ConversationAction::Exit,
            Some(ChatAction::ScrollUp) => {
                self.scroll = self.scroll.saturating_add(3);
                ConversationAction::None
            }
            Some(ChatAction::ScrollDown) => {
                self.scroll = self.scroll.saturating_sub(3);
                ConversationAction::None
            }
            Some(ChatAction::DismissNotice) => {
                self.notice = None;
                ConversationAction::None
            }
            None => {
                self.composer.handle_key(key);
                ConversationAction::None
            }
        }
    }

    async fn submit(&mut self) -> ConversationAction {
        match self.composer.input() {
            ComposerInput::Command(command) => {
                self.composer.clear();
                self.handle_slash_command(command).await
            }
            ComposerInput::Text(text) => {
                let mut chat = self.widget.lock().await;
                let outcome = chat.submit(&text);
                self.composer.set_locked(chat.is_pending());
                drop(chat);

                // Keep the draft so it can be sent once the reply lands
                if outcome != SubmitOutcome::Ignored(IgnoreReason::RequestPending) {
                    self.composer.clear();
                    self.scroll = 0;
                }
                ConversationAction::None
            }
        }
    }

    async fn handle_slash_command(&mut self, command: SlashCommand) -> ConversationAction {
        match command {
            SlashCommand::Clear => {
                self.reset().await;
                ConversationAction::None
            }
            SlashCommand::Help => {
                self.notice = Some(get_help_text());
                ConversationAction::None
            }
            SlashCommand::Bye => ConversationAction::Exit,
        }
    }

    async fn reset(&mut self) {
        self.widget.lock().await.reset();
        self.composer.set_locked(false);
        self.notice = None;
        self.scroll = 0;
    }

    /// Draw the whole chat surface
    pub async fn draw(&self, terminal: &mut crate::ui::tui::Tui) -> anyhow::Result<()> {
        let chat = self.widget.lock().await;
        terminal.draw(|frame| {
            let typing = chat
                .conversation()
                .is_typing()
                .then(|| TypingIndicator::new(self.frame));
            let history = HistoryView::new(chat.conversation().messages())
                .typing(typing)
                .show_timestamps(self.ui.show_timestamps)
                .scroll(self.scroll);
            self.render(frame, history);
        })?;
        Ok(())
    }

    fn render(&self, frame: &mut Frame, history: HistoryView<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // History
                Constraint::Length(1), // Command hints
                Constraint::Length(3), // Composer
            ])
            .split(frame.size());

        frame.render_widget(history, chunks[0]);
        frame.render_widget(Paragraph::new(self.composer.hint_line()), chunks[1]);
        frame.render_widget(&self.composer, chunks[2]);

        if let Some(notice) = &self.notice {
            let area = centered(chunks[0], 70, 9);
            frame.render_widget(Clear, area);
            frame.render_widget(
                Paragraph::new(notice.as_str())
                    .wrap(Wrap { trim: false })
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title("Bantuan (Esc untuk tutup)")
                            .style(Style::default().fg(Color::Cyan)),
                    ),
                area,
            );
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChatController, WELCOME_MESSAGE};
    use crate::config::NormalizerConfig;
    use crate::error::RemoteError;
    use crate::llm::ChatBackend;
    use crate::normalizer::Normalizer;
    use crate::precheck::GREETING_REPLY;
    use async_trait::async_trait;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    struct Fixed;

    #[async_trait]
    impl ChatBackend for Fixed {
        async fn ask(&self, _content: &str) -> Result<String, RemoteError> {
            Ok("Tokyo.".to_string())
        }
    }

    fn manager() -> ConversationManager {
        let normalizer = Normalizer::seeded(
            &NormalizerConfig {
                max_reply_chars: 100,
                casual_openers: false,
            },
            5,
        );
        let widget = ChatWidget::from_controller(ChatController::new(Arc::new(Fixed), normalizer));
        ConversationManager::new(widget, UiConfig::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn type_and_send(manager: &mut ConversationManager, text: &str) -> ConversationAction {
        for c in text.chars() {
            manager.handle_key(key(KeyCode::Char(c))).await;
        }
        manager.handle_key(key(KeyCode::Enter)).await
    }

    #[tokio::test]
    async fn test_enter_submits_and_clears_composer() {
        let mut manager = manager();
        type_and_send(&mut manager, "halo").await;

        assert_eq!(manager.composer.content(), "");
        let chat = manager.widget.lock().await;
        assert_eq!(chat.conversation().last().unwrap().text, GREETING_REPLY);
    }

    #[tokio::test]
    async fn test_draft_kept_while_pending() {
        let mut manager = manager();
        type_and_send(&mut manager, "ibu kota jepang").await;
        type_and_send(&mut manager, "lagi").await;
        assert_eq!(manager.composer.content(), "lagi");

        manager.widget.lock().await.next_reply().await;
        manager.tick().await;
        let chat = manager.widget.lock().await;
        assert_eq!(chat.conversation().last().unwrap().text, "Tokyo.");
    }

    #[tokio::test]
    async fn test_clear_command_resets_conversation() {
        let mut manager = manager();
        type_and_send(&mut manager, "halo").await;
        type_and_send(&mut manager, "/clear").await;

        let chat = manager.widget.lock().await;
        assert_eq!(chat.conversation().len(), 1);
        assert_eq!(chat.conversation().messages()[0].text, WELCOME_MESSAGE);
    }

    #[tokio::test]
    async fn test_help_and_bye() {
        let mut manager = manager();
        type_and_send(&mut manager, "/help").await;
        assert!(manager.notice.is_some());
        manager.handle_key(key(KeyCode::Esc)).await;
        assert!(manager.notice.is_none());

        assert_eq!(type_and_send(&mut manager, "/bye").await, ConversationAction::Exit);
    }

    #[tokio::test]
    async fn test_setup_twice_keeps_single_handlers() {
        let mut manager = manager();
        let installed = manager.bindings().len();
        manager.setup_bindings();
        manager.setup_bindings();
        assert_eq!(manager.bindings().len(), installed);
        assert_eq!(manager.bindings().chords_for(ChatAction::Submit), 1);
    }

    #[tokio::test]
    async fn test_command_hints_get_their_own_row() {
        let mut manager = manager();
        for c in "/he".chars() {
            manager.handle_key(key(KeyCode::Char(c))).await;
        }

        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        let chat = manager.widget.lock().await;
        terminal
            .draw(|frame| {
                let history = HistoryView::new(chat.conversation().messages()).show_timestamps(false);
                manager.render(frame, history);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row = |y: u16| -> String { (0..40).map(|x| buffer.get(x, y).symbol().to_string()).collect() };
        // history 0..8, hints 8, composer 9..12
        assert!(row(7).starts_with('└'), "history border overwritten: {:?}", row(7));
        assert!(row(8).starts_with("/help"), "hint row: {:?}", row(8));
        assert!(row(9).starts_with('┌'));
    }
}
