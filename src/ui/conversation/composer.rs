use crate::ui::conversation::commands::{matching_commands, parse_slash_command, SlashCommand};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// What the composer currently holds, as seen by the submit handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerInput {
    Text(String),
    Command(SlashCommand),
}

/// Single-line input box. The cursor is a char index, not a byte offset.
#[derive(Debug, Clone)]
pub struct ConversationComposer {
    content: String,
    cursor: usize,
    placeholder: String,
    has_focus: bool,
    locked: bool,
}

impl ConversationComposer {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            placeholder: placeholder.into(),
            has_focus: true,
            locked: false,
        }
    }

    /// Apply an editing key. Returns whether the content changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }

        match key.code {
            KeyCode::Char(c) => {
                let at = self.byte_index(self.cursor);
                self.content.insert(at, c);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.content.remove(at);
                true
            }
            KeyCode::Delete if self.cursor < self.char_len() => {
                let at = self.byte_index(self.cursor);
                self.content.remove(at);
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = self.char_len();
                false
            }
            _ => false,
        }
    }

    /// Current content interpreted as a slash command or plain text
    pub fn input(&self) -> ComposerInput {
        match parse_slash_command(&self.content) {
            Some(command) => ComposerInput::Command(command),
            None => ComposerInput::Text(self.content.clone()),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn set_focus(&mut self, has_focus: bool) {
        self.has_focus = has_focus;
    }

    /// While locked the box shows that a reply is on its way
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Slash commands matching what has been typed so far
    pub fn command_hints(&self) -> Vec<SlashCommand> {
        match self.content.strip_prefix('/') {
            Some(rest) if !rest.contains(char::is_whitespace) => matching_commands(rest),
            _ => Vec::new(),
        }
    }

    /// One-row hint for the slash commands matching the current input
    pub fn hint_line(&self) -> Line<'static> {
        let spans: Vec<Span<'static>> = self
            .command_hints()
            .iter()
            .flat_map(|c| {
                [
                    Span::styled(format!("/{}", c.command()), Style::default().fg(Color::Cyan)),
                    Span::styled(format!(" {}  ", c.description()), Style::default().fg(Color::DarkGray)),
                ]
            })
            .collect();
        Line::from(spans)
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }
}

impl Widget for &ConversationComposer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.locked {
            "✍️  Asisten sedang mengetik..."
        } else {
            "💬 Pesan (Enter kirim, /help bantuan)"
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(if self.has_focus {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Gray)
            });

        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.content.is_empty() {
            Line::from(Span::styled(
                self.placeholder.as_str(),
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            let mut shown = self.content.clone();
            if self.has_focus {
                shown.insert(self.byte_index(self.cursor), '▌');
            }
            Line::from(Span::styled(shown, Style::default().fg(Color::White)))
        };
        buf.set_line(inner.x, inner.y, &line, inner.width);
    }
}
