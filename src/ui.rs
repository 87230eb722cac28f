use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Mode};
use crate::components::search::SearchPromptWidget;
use crate::components::status_bar::HelpBarWidget;
use crate::components::tree::TreeWidget;

/// Render the browser: title, optional search prompt, tree body, help line.
pub fn render(app: &App, frame: &mut Frame) {
    let searching = app.mode == Mode::SearchInput;

    let mut constraints = vec![Constraint::Length(1)];
    if searching {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    let title = Paragraph::new(Line::from(Span::styled(
        format!("Directory Tree: {}", app.root.name),
        Style::default()
            .fg(app.colors.title_fg)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, chunks[0]);

    let body = if searching {
        frame.render_widget(SearchPromptWidget::new(&app.query, &app.colors), chunks[1]);
        chunks[2]
    } else {
        chunks[1]
    };

    let rows = app.visible_rows();
    let tree = TreeWidget::new(&rows, &app.colors)
        .selected(app.selected_index(&rows))
        .scroll_offset(app.scroll_offset)
        .annotate(app.annotate);
    frame.render_widget(tree, body);

    let mut help = HelpBarWidget::new(&app.colors);
    if !app.filtered.is_empty() {
        help = help.matches(app.filtered.len());
    }
    frame.render_widget(help, chunks[chunks.len() - 1]);
}
