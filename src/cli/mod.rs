pub mod commands;

pub use commands::{Cli, Commands, FilterArgs, OutputFormat};
