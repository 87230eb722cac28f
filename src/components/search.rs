use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

/// Live query line shown while typing a search: `Search: <query>_`.
pub struct SearchPromptWidget<'a> {
    query: &'a str,
    theme: &'a ThemeColors,
}

impl<'a> SearchPromptWidget<'a> {
    pub fn new(query: &'a str, theme: &'a ThemeColors) -> Self {
        Self { query, theme }
    }
}

impl<'a> Widget for SearchPromptWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let label_style = Style::default()
            .fg(self.theme.prompt_fg)
            .add_modifier(Modifier::BOLD);
        let query_style = Style::default().fg(self.theme.tree_fg);
        let cursor_style = Style::default()
            .fg(self.theme.prompt_fg)
            .add_modifier(Modifier::SLOW_BLINK);

        let line = Line::from(vec![
            Span::styled("Search: ", label_style),
            Span::styled(self.query, query_style),
            Span::styled("_", cursor_style),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
