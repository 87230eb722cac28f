use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::fs::node::Node;
use crate::render::format::annotations;
use crate::render::{Annotate, Row};
use crate::theme::ThemeColors;

/// Tree body: one line per visible row, windowed by the scroll offset.
pub struct TreeWidget<'a> {
    rows: &'a [Row<'a>],
    selected: Option<usize>,
    scroll_offset: usize,
    annotate: Annotate,
    theme: &'a ThemeColors,
}

impl<'a> TreeWidget<'a> {
    pub fn new(rows: &'a [Row<'a>], theme: &'a ThemeColors) -> Self {
        Self {
            rows,
            selected: None,
            scroll_offset: 0,
            annotate: Annotate::default(),
            theme,
        }
    }

    pub fn selected(mut self, index: Option<usize>) -> Self {
        self.selected = index;
        self
    }

    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    pub fn annotate(mut self, annotate: Annotate) -> Self {
        self.annotate = annotate;
        self
    }

    fn name_style(&self, node: &Node) -> Style {
        if node.is_symlink() {
            Style::default().fg(self.theme.tree_symlink_fg)
        } else if node.is_dir() {
            Style::default()
                .fg(self.theme.tree_dir_fg)
                .add_modifier(Modifier::BOLD)
        } else if node.is_hidden() {
            Style::default().fg(self.theme.tree_hidden_fg)
        } else if node.is_executable() {
            Style::default().fg(self.theme.tree_exec_fg)
        } else {
            Style::default().fg(self.theme.tree_fg)
        }
    }

    fn row_line(&self, row: &Row, is_selected: bool) -> Line<'static> {
        let parts = if row.is_root {
            Vec::new()
        } else {
            annotations(row.node, &self.annotate)
        };

        if is_selected {
            let mut text = format!("{}{}", row.lead(), row.node.name);
            if !parts.is_empty() {
                text.push_str("  ");
                text.push_str(&parts.join("  "));
            }
            let style = Style::default()
                .bg(self.theme.tree_selected_bg)
                .fg(self.theme.tree_selected_fg)
                .add_modifier(Modifier::BOLD);
            return Line::from(Span::styled(text, style));
        }

        let mut spans = vec![
            Span::styled(row.lead(), Style::default().fg(self.theme.annotation_fg)),
            Span::styled(row.node.name.clone(), self.name_style(row.node)),
        ];
        if !parts.is_empty() {
            spans.push(Span::styled(
                format!("  {}", parts.join("  ")),
                Style::default().fg(self.theme.annotation_fg),
            ));
        }
        Line::from(spans)
    }
}

impl<'a> Widget for TreeWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let visible_height = area.height as usize;
        if self.rows.is_empty() || visible_height == 0 {
            return;
        }

        let window = self
            .rows
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(visible_height);

        for (i, (idx, row)) in window.enumerate() {
            let y = area.y + i as u16;
            let is_selected = self.selected == Some(idx);
            let line = self.row_line(row, is_selected);
            if is_selected {
                buf.set_style(
                    Rect::new(area.x, y, area.width, 1),
                    Style::default().bg(self.theme.tree_selected_bg),
                );
            }
            buf.set_line(area.x, y, &line, area.width);
        }
    }
}
