use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use crate::tui::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let dataset = app.dataset();
    let rules_status = match &dataset.rules {
        Some(rules) => format!("{} countries, {} visas", rules.len(), rules.visa_count()),
        None => "not loaded".to_string(),
    };
    let geometry_status = match &dataset.geometry {
        Some(geometry) => format!("{} countries", geometry.len()),
        None => "not loaded".to_string(),
    };

    let settings = vec![
        ("Rules File", truncate(&app.config.data.rules_path)),
        ("World File", truncate(&app.config.data.world_path)),
        ("Rules", rules_status),
        ("Geometry", geometry_status),
        ("Data Generation", dataset.generation.to_string()),
        ("Name Aliases", app.normalizer().alias_count().to_string()),
        ("Default Persona", app.config.filter.persona.clone()),
        ("Default Age", app.config.filter.age.to_string()),
        ("Default Income", crate::utils::format_usd(app.config.filter.income_usd)),
        ("Tick Rate", format!("{} ms", app.config.tui.tick_rate_ms)),
        ("Theme", format!("{:?}", app.config.tui.theme)),
    ];

    let items: Vec<ListItem> = settings
        .iter()
        .map(|(key, value)| {
            let content = vec![
                Span::styled(format!("{:20}", key), Style::default().fg(app.theme.warning)),
                Span::raw(": "),
                Span::styled(value.as_str(), Style::default().fg(app.theme.foreground)),
            ];
            ListItem::new(Line::from(content))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Configuration")
                .border_style(Style::default().fg(app.theme.primary)),
        );

    frame.render_widget(list, area);
}

fn truncate(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() > 60 {
        let head: String = chars[..24].iter().collect();
        let tail: String = chars[chars.len() - 32..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        s.to_string()
    }
}
