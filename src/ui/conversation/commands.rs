use std::str::FromStr;

use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Commands that can be invoked by starting a message with a leading slash.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, AsRefStr, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum SlashCommand {
    /// Start the conversation over
    Clear,
    /// Show help
    Help,
    /// Exit the application
    Bye,
}

impl SlashCommand {
    /// User-visible description shown in help.
    pub fn description(self) -> &'static str {
        match self {
            SlashCommand::Clear => "hapus percakapan dan mulai lagi",
            SlashCommand::Help => "tampilkan daftar perintah",
            SlashCommand::Bye => "keluar dari aplikasi",
        }
    }

    /// Command string without the leading '/'.
    pub fn command(self) -> &'static str {
        self.into()
    }
}

/// Parse a slash command from user input. Unknown commands return `None`
/// and are sent as ordinary text.
pub fn parse_slash_command(input: &str) -> Option<SlashCommand> {
    let head = input.trim().strip_prefix('/')?.split_whitespace().next()?;

    SlashCommand::from_str(head).ok().or_else(|| match head.to_lowercase().as_str() {
        "q" | "quit" | "exit" | "keluar" => Some(SlashCommand::Bye),
        "reset" | "new" => Some(SlashCommand::Clear),
        "h" | "?" | "bantuan" => Some(SlashCommand::Help),
        _ => None,
    })
}

/// Commands whose name starts with `prefix` (without the slash)
pub fn matching_commands(prefix: &str) -> Vec<SlashCommand> {
    let prefix = prefix.to_lowercase();
    SlashCommand::iter()
        .filter(|c| c.command().starts_with(&prefix))
        .collect()
}

/// Get help text for all available commands
pub fn get_help_text() -> String {
    let mut help = String::from("Perintah yang tersedia:\n");
    for command in SlashCommand::iter() {
        help.push_str(&format!("/{} - {}\n", command.command(), command.description()));
    }
    help.push_str("Alias: /q untuk /bye, /reset untuk /clear. Ctrl+L juga menghapus percakapan.");
    help
}
