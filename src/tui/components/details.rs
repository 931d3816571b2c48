use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use crate::{
    eligibility::{EligibilityStatus, MatchPath},
    tui::app::App,
    utils::format_thresholds,
};

/// Matching visas for the selected country.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let (title, lines) = match app.selected_result() {
        None => (
            "Details".to_string(),
            vec![Line::from(Span::styled(
                "Select a country with ↑/↓",
                Style::default().fg(app.theme.muted),
            ))],
        ),
        Some((name, result)) => {
            let mut lines = vec![Line::from(Span::styled(
                result.status.label(),
                Style::default()
                    .fg(app.theme.status_color(result.status))
                    .add_modifier(Modifier::BOLD),
            ))];

            match result.status {
                EligibilityStatus::Unknown => {
                    lines.push(Line::from("No rules in the demo data yet."));
                }
                EligibilityStatus::Ineligible => {
                    lines.push(Line::from("No matching visa in demo for current filters."));
                }
                EligibilityStatus::Eligible => {
                    for visa in &result.matches {
                        lines.push(Line::from(""));
                        lines.push(Line::from(vec![
                            Span::styled(
                                visa.rule.label.as_str(),
                                Style::default().add_modifier(Modifier::BOLD),
                            ),
                            Span::raw(" - "),
                            Span::raw(format_thresholds(visa.rule.min_age, visa.rule.min_income_usd)),
                        ]));
                        if visa.path == MatchPath::YoungRetireeFallback {
                            lines.push(Line::from(Span::styled(
                                "Offered as an alternative: under the minimum age",
                                Style::default().fg(app.theme.warning),
                            )));
                        }
                        if let Some(notes) = &visa.rule.notes {
                            lines.push(Line::from(Span::styled(
                                notes.as_str(),
                                Style::default().fg(app.theme.muted),
                            )));
                        }
                    }
                }
            }

            (name.to_string(), lines)
        }
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(app.theme.primary)),
        );

    frame.render_widget(paragraph, area);
}
