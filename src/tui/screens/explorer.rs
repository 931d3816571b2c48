use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use crate::tui::{app::App, components};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(36), // Filters + details
            Constraint::Min(0),     // Countries + logs
        ])
        .split(area);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(14), // Filters and legend
            Constraint::Min(0),     // Selected country
        ])
        .split(columns[0]);

    components::filters::render(frame, sidebar[0], app);
    components::details::render(frame, sidebar[1], app);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(75), // Countries table
            Constraint::Min(0),         // Logs
        ])
        .split(columns[1]);

    components::countries_table::render(frame, main[0], app);
    components::logs::render(frame, main[1], app);
}
