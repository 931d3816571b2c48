pub mod explorer;
pub mod settings;
