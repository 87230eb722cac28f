use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

/// Key hints shown on the bottom line.
pub const HELP_TEXT: &str = "↑/↓: Navigate  Enter: Expand/Collapse  /: Search  q: Quit";

/// Bottom help line, with the match count while a filter is active.
pub struct HelpBarWidget<'a> {
    theme: &'a ThemeColors,
    matches: Option<usize>,
}

impl<'a> HelpBarWidget<'a> {
    pub fn new(theme: &'a ThemeColors) -> Self {
        Self {
            theme,
            matches: None,
        }
    }

    pub fn matches(mut self, count: usize) -> Self {
        self.matches = Some(count);
        self
    }
}

impl<'a> Widget for HelpBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let width = area.width as usize;
        let style = Style::default().bg(self.theme.help_bg).fg(self.theme.help_fg);

        let mut text = HELP_TEXT.to_string();
        if let Some(count) = self.matches {
            let info = format!(
                "{} match{}",
                count,
                if count == 1 { "" } else { "es" }
            );
            let used = text.chars().count() + info.chars().count();
            let gap = width.saturating_sub(used).max(2);
            text.push_str(&" ".repeat(gap));
            text.push_str(&info);
        }

        // Pad to fill the full width so the background covers the line.
        let len = text.chars().count();
        if len < width {
            text.push_str(&" ".repeat(width - len));
        }

        let line = Line::from(Span::styled(text, style));
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
