//! Conversation history display component

use crate::events::{ChatMessage, ChatRole};
use crate::ui::conversation::typing::TypingIndicator;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Borrowed view over the conversation, rebuilt every frame
pub struct HistoryView<'a> {
    messages: &'a [ChatMessage],
    typing: Option<TypingIndicator>,
    show_timestamps: bool,
    /// Lines scrolled up from the bottom
    scroll: usize,
}

impl<'a> HistoryView<'a> {
    pub fn new(messages: &'a [ChatMessage]) -> Self {
        Self {
            messages,
            typing: None,
            show_timestamps: true,
            scroll: 0,
        }
    }

    pub fn typing(mut self, typing: Option<TypingIndicator>) -> Self {
        self.typing = typing;
        self
    }

    pub fn show_timestamps(mut self, show: bool) -> Self {
        self.show_timestamps = show;
        self
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    /// All lines for the given inner width, top to bottom
    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for message in self.messages {
            lines.extend(self.render_message(message, width));
            lines.push(Line::default());
        }
        lines
    }

    fn render_message(&self, message: &ChatMessage, width: u16) -> Vec<Line<'static>> {
        let (icon, label) = match message.role {
            ChatRole::User => ("👤", "Kamu"),
            ChatRole::Assistant => ("🤖", "Asisten"),
            ChatRole::Error => ("⚠️", "Error"),
        };

        let mut header = vec![Span::styled(
            format!("{} {}", icon, label),
            role_style(message.role),
        )];
        if self.show_timestamps {
            header.push(Span::styled(
                format!("  {}", message.timestamp.with_timezone(&chrono::Local).format("%H:%M")),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let mut lines = vec![Line::from(header)];
        for content_line in wrap_text(&message.text, width.saturating_sub(2) as usize) {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(content_line, content_style(message.role)),
            ]));
        }
        lines
    }
}

impl Widget for HistoryView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("🤖 Chat dengan Asisten AI");
        let inner = block.inner(area);
        block.render(area, buf);

        let mut height = inner.height as usize;
        let typing_row = match self.typing {
            Some(indicator) if height > 0 => {
                height -= 1;
                Some(indicator)
            }
            _ => None,
        };

        let lines = self.lines(inner.width);
        let max_scroll = lines.len().saturating_sub(height);
        let end = lines.len() - self.scroll.min(max_scroll);
        let start = end.saturating_sub(height);

        for (i, line) in lines[start..end].iter().enumerate() {
            buf.set_line(inner.x, inner.y + i as u16, line, inner.width);
        }

        if let Some(indicator) = typing_row {
            let row = Rect {
                x: inner.x,
                y: inner.y + (end - start) as u16,
                width: inner.width,
                height: 1,
            };
            indicator.render(row, buf);
        }
    }
}

fn role_style(role: ChatRole) -> Style {
    match role {
        ChatRole::User => Style::default().fg(Color::Blue),
        ChatRole::Assistant => Style::default().fg(Color::Green),
        ChatRole::Error => Style::default().fg(Color::Red),
    }
}

fn content_style(role: ChatRole) -> Style {
    match role {
        ChatRole::Error => Style::default().fg(Color::Red),
        _ => Style::default(),
    }
}

/// Word-wrap to `width` chars, keeping explicit line breaks (numbered lists)
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            if current_len > 0 && current_len + 1 + word_len > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
        }
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap_text("satu dua tiga empat lima", 9);
        assert_eq!(lines, vec!["satu dua", "tiga", "empat", "lima"]);
    }

    #[test]
    fn test_wrap_keeps_list_lines() {
        let lines = wrap_text("Caranya:\n1. Buka\n2. Simpan", 40);
        assert_eq!(lines, vec!["Caranya:", "1. Buka", "2. Simpan"]);
    }

    #[test]
    fn test_lines_include_header_and_spacing() {
        let messages = vec![ChatMessage::user("halo"), ChatMessage::error("Maaf")];
        let view = HistoryView::new(&messages).show_timestamps(false);
        // header + one content line + blank, per message
        assert_eq!(view.lines(40).len(), 6);
    }

    #[test]
    fn test_render_shows_latest_lines() {
        let messages: Vec<ChatMessage> = (0..10)
            .map(|i| ChatMessage::assistant(format!("pesan {}", i)))
            .collect();
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);
        HistoryView::new(&messages)
            .show_timestamps(false)
            .render(area, &mut buf);

        let rendered: String = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf.get(x, y).symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        assert!(rendered.contains("pesan 9"));
        assert!(!rendered.contains("pesan 0"));
    }
}
