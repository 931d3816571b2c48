use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};
use crate::tui::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let header_cells = ["Country", "Status", "Matches"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(app.theme.warning)));

    let header = Row::new(header_cells)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .height(1)
        .bottom_margin(1);

    let countries = app.visible_countries();
    let rows = countries.iter().map(|(name, result)| {
        let color = app.theme.status_color(result.status);
        let cells = vec![
            Cell::from(name.to_string()).style(Style::default().fg(color)),
            Cell::from(result.status.label()).style(Style::default().fg(color)),
            Cell::from(result.matches.len().to_string()),
        ];
        Row::new(cells).height(1)
    });

    let title = format!("Countries ({}, filter: {} [f])", countries.len(), app.table_filter.label());
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(50),
            Constraint::Percentage(30),
            Constraint::Percentage(20),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(app.theme.primary)),
    )
    .highlight_style(
        Style::default()
            .bg(app.theme.muted)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol(">> ");

    let mut state = TableState::default();
    state.select(app.selected_index());

    frame.render_stateful_widget(table, area, &mut state);
}
