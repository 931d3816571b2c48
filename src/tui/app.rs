use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;
use crate::{
    config::Config,
    eligibility::{EligibilityCache, EligibilityMap, EligibilityResult, EligibilityStatus},
    filter::FilterInput,
    loader::Dataset,
    rules::NameNormalizer,
    tui::theme::Theme,
};

const MAX_LOGS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Explorer,
    Settings,
}

/// Which countries the table lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFilter {
    All,
    Only(EligibilityStatus),
}

impl TableFilter {
    pub fn next(self) -> Self {
        match self {
            TableFilter::All => TableFilter::Only(EligibilityStatus::Eligible),
            TableFilter::Only(EligibilityStatus::Eligible) => TableFilter::Only(EligibilityStatus::Ineligible),
            TableFilter::Only(EligibilityStatus::Ineligible) => TableFilter::Only(EligibilityStatus::Unknown),
            TableFilter::Only(EligibilityStatus::Unknown) => TableFilter::All,
        }
    }

    pub fn admits(self, status: EligibilityStatus) -> bool {
        match self {
            TableFilter::All => true,
            TableFilter::Only(wanted) => wanted == status,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TableFilter::All => "all",
            TableFilter::Only(status) => status.label(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

/// Follow-up work a key press asks the event loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    None,
    Reload,
}

/// State of one interactive session.
pub struct App {
    // UI state
    pub current_screen: Screen,
    pub should_quit: bool,
    pub show_help: bool,
    pub status_message: Option<String>,
    pub is_loading: bool,
    pub table_filter: TableFilter,
    pub selected_country: Option<String>,

    // Filter
    pub filter: FilterInput,

    pub logs: Vec<LogEntry>,
    pub config: Config,
    pub theme: Theme,

    normalizer: NameNormalizer,
    dataset: Dataset,
    cache: EligibilityCache,
}

impl App {
    pub fn new(config: Config) -> Self {
        let mut app = Self {
            current_screen: Screen::Explorer,
            should_quit: false,
            show_help: false,
            status_message: None,
            is_loading: false,
            table_filter: TableFilter::All,
            selected_country: None,
            filter: config.initial_filter(),
            logs: Vec::new(),
            theme: Theme::from_name(config.tui.theme),
            normalizer: config.normalizer(),
            dataset: Dataset::default(),
            cache: EligibilityCache::new(),
            config,
        };
        app.refresh();
        app
    }

    pub fn normalizer(&self) -> &NameNormalizer {
        &self.normalizer
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Current per-country results.
    pub fn results(&self) -> &EligibilityMap {
        self.cache.current()
    }

    /// Countries shown in the table, in name order.
    pub fn visible_countries(&self) -> Vec<(&str, &EligibilityResult)> {
        self.results()
            .iter()
            .filter(|(_, result)| self.table_filter.admits(result.status))
            .collect()
    }

    pub fn selected_index(&self) -> Option<usize> {
        let selected = self.selected_country.as_deref()?;
        self.visible_countries()
            .iter()
            .position(|(name, _)| *name == selected)
    }

    pub fn selected_result(&self) -> Option<(&str, &EligibilityResult)> {
        let name = self.selected_country.as_deref()?;
        self.results().get(name).map(|result| (name, result))
    }

    /// Recompute results if the filter or data changed since last time.
    pub fn refresh(&mut self) {
        self.cache.get_or_compute(&self.filter, &self.dataset);
    }

    pub fn begin_loading(&mut self) {
        self.is_loading = true;
        self.status_message = Some("Loading data...".to_string());
        self.add_log(LogLevel::Info, "Loading visa rules and world geometry...");
    }

    pub fn apply_dataset(&mut self, dataset: Dataset) {
        self.is_loading = false;

        match &dataset.rules {
            Some(rules) => self.add_log(
                LogLevel::Success,
                &format!("Loaded rules for {} countries", rules.len()),
            ),
            None => self.add_log(LogLevel::Warning, "Visa rules unavailable; countries show as no data"),
        }
        match &dataset.geometry {
            Some(geometry) => self.add_log(
                LogLevel::Success,
                &format!("Loaded geometry for {} countries", geometry.len()),
            ),
            None => self.add_log(LogLevel::Error, "World geometry unavailable"),
        }

        self.dataset.replace(dataset);
        self.refresh();

        let summary = self.results().summary();
        self.status_message = Some(format!(
            "{} countries, {} eligible",
            summary.total, summary.eligible
        ));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.kind != KeyEventKind::Press {
            return AppAction::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return AppAction::None;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return AppAction::None;
        }

        let mut action = AppAction::None;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab => self.next_screen(),
            KeyCode::BackTab => self.previous_screen(),
            KeyCode::Down | KeyCode::Char('j') => self.next_item(),
            KeyCode::Up | KeyCode::Char('k') => self.previous_item(),
            KeyCode::Char('p') => self.set_persona(self.filter.persona.next()),
            KeyCode::Char('P') => self.set_persona(self.filter.persona.previous()),
            KeyCode::Right => self.filter.adjust_age(1),
            KeyCode::Left => self.filter.adjust_age(-1),
            KeyCode::Char(']') => self.filter.adjust_income(1),
            KeyCode::Char('[') => self.filter.adjust_income(-1),
            KeyCode::Char('f') => {
                self.table_filter = self.table_filter.next();
                self.status_message = Some(format!("Showing: {}", self.table_filter.label()));
            }
            KeyCode::Char('r') if !self.is_loading => action = AppAction::Reload,
            _ => {}
        }

        self.refresh();
        action
    }

    fn set_persona(&mut self, persona: crate::filter::Persona) {
        debug!("Persona changed to {}", persona);
        self.add_log(LogLevel::Info, &format!("Persona: {}", persona.label()));
        self.filter.persona = persona;
    }

    // Navigation
    pub fn next_screen(&mut self) {
        self.current_screen = match self.current_screen {
            Screen::Explorer => Screen::Settings,
            Screen::Settings => Screen::Explorer,
        };
    }

    pub fn previous_screen(&mut self) {
        // Two screens, so backwards is the same hop.
        self.next_screen();
    }

    pub fn next_item(&mut self) {
        self.move_selection(1);
    }

    pub fn previous_item(&mut self) {
        self.move_selection(-1);
    }

    fn move_selection(&mut self, delta: isize) {
        let names: Vec<String> = self
            .visible_countries()
            .into_iter()
            .map(|(name, _)| name.to_string())
            .collect();
        if names.is_empty() {
            return;
        }

        let len = names.len() as isize;
        let next = match self.selected_index() {
            Some(index) => (index as isize + delta).rem_euclid(len),
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.selected_country = Some(names[next as usize].clone());
    }

    pub fn add_log(&mut self, level: LogLevel, message: &str) {
        self.logs.push(LogEntry {
            timestamp: Local::now(),
            level,
            message: message.to_string(),
        });
        if self.logs.len() > MAX_LOGS {
            self.logs.remove(0);
        }
    }
}
