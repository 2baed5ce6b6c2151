use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Transient "assistant is typing" marker shown while a request is pending
#[derive(Debug, Clone, Copy)]
pub struct TypingIndicator {
    frame: u64,
}

impl TypingIndicator {
    /// `frame` advances once per UI tick and drives the dot animation
    pub fn new(frame: u64) -> Self {
        Self { frame }
    }

    pub fn dots(&self) -> &'static str {
        match self.frame % 4 {
            0 => "   ",
            1 => ".  ",
            2 => ".. ",
            _ => "...",
        }
    }
}

impl Widget for TypingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let line = Line::from(vec![
            Span::styled("🤖 ", Style::default().fg(Color::Green)),
            Span::styled("sedang mengetik", Style::default().fg(Color::DarkGray)),
            Span::styled(self.dots(), Style::default().fg(Color::Yellow)),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dots_cycle() {
        let frames: Vec<&str> = (0..5).map(|f| TypingIndicator::new(f).dots()).collect();
        assert_eq!(frames, vec!["   ", ".  ", ".. ", "...", "   "]);
    }
}
