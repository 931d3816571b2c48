pub mod app;
pub mod ui;
pub mod event;
pub mod theme;
pub mod components;
pub mod screens;

pub use app::App;
pub use ui::run_tui;
