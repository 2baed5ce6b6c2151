//! Interactive terminal chat

pub mod conversation;
pub mod tui;

use crate::config::Config;
use crate::instance::ChatWidget;
use anyhow::Result;
use conversation::{ConversationAction, ConversationManager};
use std::time::Duration;
use tui::{EventHandler, TuiEvent};

const TICK_RATE: Duration = Duration::from_millis(250);

/// Run the chat until the user quits
pub async fn run_chat(config: &Config) -> Result<()> {
    let widget = ChatWidget::get_or_init(config)?;
    let mut manager = ConversationManager::new(widget, config.ui.clone());

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new(TICK_RATE);

    let result = event_loop(&mut manager, &mut terminal, &mut events).await;

    tui::restore()?;
    result
}

async fn event_loop(
    manager: &mut ConversationManager,
    terminal: &mut tui::Tui,
    events: &mut EventHandler,
) -> Result<()> {
    tracing::info!("chat session started");
    manager.draw(terminal).await?;

    while let Some(event) = events.next().await {
        match event {
            TuiEvent::Key(key) => {
                if manager.handle_key(key).await == ConversationAction::Exit {
                    break;
                }
            }
            TuiEvent::Tick => manager.tick().await,
            TuiEvent::Resize(_, _) => {}
        }
        manager.draw(terminal).await?;
    }

    tracing::info!("chat session ended");
    Ok(())
}
