use crate::config::Config;
use crate::events::{ChatMessage, ChatRole, SubmitOutcome};
use crate::instance::ChatWidget;
use anyhow::{Context, Result};

/// One turn from the command line. Returns false when the turn ended in an error.
pub async fn ask(config: &Config, text: &str) -> Result<bool> {
    let widget = ChatWidget::get_or_init(config)?;

    match run_turn(&widget, text).await {
        Some(message) => {
            print_message(&message);
            Ok(message.role != ChatRole::Error)
        }
        None => {
            println!("📭 Nothing to send. Type a message after 'asisten ask'.");
            Ok(true)
        }
    }
}

/// Submit `text` and wait for whatever message closes the turn
pub async fn run_turn(widget: &ChatWidget, text: &str) -> Option<ChatMessage> {
    let mut chat = widget.lock().await;
    match chat.submit(text) {
        SubmitOutcome::Ignored(reason) => {
            tracing::debug!(%reason, "nothing submitted");
            None
        }
        SubmitOutcome::Answered => chat.conversation().last().cloned(),
        SubmitOutcome::Dispatched => chat.next_reply().await,
    }
}

fn print_message(message: &ChatMessage) {
    match message.role {
        ChatRole::Assistant => println!("🤖 {}", message.text),
        ChatRole::Error => eprintln!("⚠️  {}", message.text),
        ChatRole::User => println!("👤 {}", message.text),
    }
}

/// Print the effective configuration, optionally writing the defaults to disk
pub fn show_config(config: &Config, init: bool) -> Result<()> {
    let path = config.config_path();

    if init {
        if path.exists() {
            println!("📄 Config already exists at {}", path.display());
        } else {
            config.save()?;
            println!("✨ Wrote default config to {}", path.display());
        }
    } else if !path.exists() {
        println!("📭 No config file at {} (using defaults)", path.display());
    } else {
        println!("📄 Config file: {}", path.display());
    }

    println!("{}", "=".repeat(50));
    let rendered = toml::to_string_pretty(config).context("Failed to serialize config")?;
    println!("{}", rendered);
    println!("📝 Log file: {}", config.log_path().display());
    Ok(())
}
