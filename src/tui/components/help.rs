use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};
use crate::tui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, theme: &Theme) {
    let keybindings = vec![
        ("Tab / Shift+Tab", "Next / Previous screen"),
        ("↑ / ↓", "Select country"),
        ("p / P", "Next / Previous persona"),
        ("← / →", "Age -1 / +1"),
        ("[ / ]", "Income -$1,000 / +$1,000"),
        ("f", "Cycle table filter"),
        ("r", "Reload data"),
        ("?", "Toggle help"),
        ("q / Esc", "Quit"),
    ];

    let items: Vec<ListItem> = keybindings
        .iter()
        .map(|(key, desc)| {
            let content = vec![
                Span::styled(
                    format!("{:15}", key),
                    Style::default()
                        .fg(theme.warning)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" - "),
                Span::styled(*desc, Style::default().fg(theme.foreground)),
            ];
            ListItem::new(Line::from(content))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Keybindings")
                .border_style(Style::default().fg(theme.primary)),
        );

    frame.render_widget(Clear, area);
    frame.render_widget(list, area);
}
