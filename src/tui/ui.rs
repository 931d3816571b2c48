use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::{io, sync::Arc, time::Duration};
use tokio::sync::mpsc;
use tracing::info;
use crate::{
    config::Config,
    error::{ExplorerError, Result},
    loader::{load_dataset, DataSource, FileDataSource},
    rules::NameNormalizer,
    tui::{
        app::{App, AppAction, Screen},
        components,
        event::{Event, EventHandler},
        screens,
    },
};

type CrosstermTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Run the interactive explorer until the user quits.
pub async fn run_tui(config: Config) -> Result<()> {
    let source: Arc<dyn DataSource> = Arc::new(FileDataSource::from_config(&config));
    let tick_rate = Duration::from_millis(config.tui.tick_rate_ms);
    let mut app = App::new(config);

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app, source, tick_rate).await;
    restore_terminal(&mut terminal)?;

    info!("Explorer closed");
    result
}

fn setup_terminal() -> Result<CrosstermTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut CrosstermTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn event_loop(
    terminal: &mut CrosstermTerminal,
    app: &mut App,
    source: Arc<dyn DataSource>,
    tick_rate: Duration,
) -> Result<()> {
    let mut events = EventHandler::new(tick_rate);

    // The first frame draws before any data arrives.
    app.begin_loading();
    spawn_load(source.clone(), app.normalizer().clone(), events.sender());

    while !app.should_quit {
        terminal.draw(|frame| render_ui(frame, app))?;

        let event = events
            .next()
            .await
            .ok_or_else(|| ExplorerError::Terminal("event channel closed".to_string()))?;

        match event {
            Event::Key(key) => {
                if app.handle_key(key) == AppAction::Reload {
                    app.begin_loading();
                    spawn_load(source.clone(), app.normalizer().clone(), events.sender());
                }
            }
            Event::Loaded(dataset) => app.apply_dataset(*dataset),
            Event::Tick | Event::Resize(_, _) => {}
        }
    }

    Ok(())
}

fn spawn_load(source: Arc<dyn DataSource>, normalizer: NameNormalizer, sender: mpsc::Sender<Event>) {
    tokio::spawn(async move {
        let dataset = load_dataset(source.as_ref(), &normalizer).await;
        sender.send(Event::Loaded(Box::new(dataset))).await.ok();
    });
}

pub fn render_ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(0),     // Content
            Constraint::Length(3),  // Status bar
        ])
        .split(frame.size());

    components::header::render(frame, chunks[0], app);

    match app.current_screen {
        Screen::Explorer => screens::explorer::render(frame, chunks[1], app),
        Screen::Settings => screens::settings::render(frame, chunks[1], app),
    }

    render_status_bar(frame, chunks[2], app);

    if app.show_help {
        components::help::render(frame, centered(frame.size(), 60, 60), &app.theme);
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let screen_indicator = match app.current_screen {
        Screen::Explorer => "Explorer",
        Screen::Settings => "Settings",
    };

    let status_text = if app.is_loading {
        "Loading data...".to_string()
    } else if let Some(msg) = &app.status_message {
        msg.clone()
    } else {
        "Ready".to_string()
    };

    let text = Line::from(vec![
        Span::styled(
            format!(" {} ", screen_indicator),
            Style::default()
                .fg(Color::Black)
                .bg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(status_text, Style::default().fg(Color::Gray)),
        Span::raw(" | "),
        Span::styled("?: Help", Style::default().fg(app.theme.warning)),
        Span::raw(" | "),
        Span::styled("Tab: Next Screen", Style::default().fg(app.theme.warning)),
        Span::raw(" | "),
        Span::styled("q: Quit", Style::default().fg(app.theme.error)),
    ]);

    let paragraph = Paragraph::new(text).block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

/// A rectangle of `percent_x` by `percent_y` centered in `area`.
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
