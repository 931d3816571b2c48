use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use crate::tui::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let summary = app.results().summary();

    let title = vec![
        Span::styled("🌍 ", Style::default().fg(app.theme.warning)),
        Span::styled(
            "Mobility Explorer",
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("{} eligible of {}", summary.eligible, summary.total),
            Style::default().fg(app.theme.success),
        ),
        Span::raw(" | "),
        Span::styled("Demo data only. Not legal advice.", Style::default().fg(app.theme.muted)),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.primary));

    let paragraph = Paragraph::new(Line::from(title))
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
