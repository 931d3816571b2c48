use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use crate::{
    eligibility::EligibilityStatus,
    filter::{MAX_AGE, MAX_INCOME_USD, MIN_AGE},
    tui::app::App,
    utils::format_usd,
};

/// Persona, age and income controls plus the color legend.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Persona
            Constraint::Length(3), // Age
            Constraint::Length(3), // Income
            Constraint::Length(5), // Legend
        ])
        .split(area);

    let persona = Paragraph::new(Line::from(vec![
        Span::styled("◀ ", Style::default().fg(app.theme.muted)),
        Span::styled(
            app.filter.persona.label().to_string(),
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", Style::default().fg(app.theme.muted)),
    ]))
    .block(titled(app, "Persona (p/P)"));
    frame.render_widget(persona, chunks[0]);

    let age_ratio = app.filter.age.saturating_sub(MIN_AGE) as f64 / (MAX_AGE - MIN_AGE) as f64;
    let age = Gauge::default()
        .block(titled(app, "Age (←/→)"))
        .gauge_style(Style::default().fg(app.theme.secondary))
        .ratio(age_ratio.clamp(0.0, 1.0))
        .label(app.filter.age.to_string());
    frame.render_widget(age, chunks[1]);

    let income_ratio = app.filter.income_usd as f64 / MAX_INCOME_USD as f64;
    let income = Gauge::default()
        .block(titled(app, "Annual Income USD ([/])"))
        .gauge_style(Style::default().fg(app.theme.secondary))
        .ratio(income_ratio.clamp(0.0, 1.0))
        .label(format_usd(app.filter.income_usd));
    frame.render_widget(income, chunks[2]);

    let legend: Vec<Line> = [
        EligibilityStatus::Eligible,
        EligibilityStatus::Ineligible,
        EligibilityStatus::Unknown,
    ]
    .into_iter()
    .map(|status| {
        Line::from(vec![
            Span::styled("■ ", Style::default().fg(app.theme.status_color(status))),
            Span::raw(status.label()),
        ])
    })
    .collect();
    frame.render_widget(Paragraph::new(legend).block(titled(app, "Legend")), chunks[3]);
}

fn titled<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(app.theme.border))
}
