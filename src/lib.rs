//! Explore which countries offer a residency or visa pathway for a persona,
//! age and income.
//!
//! The eligibility engine in [`eligibility`] is a pure function over a
//! [`rules::RulesTable`] and a [`geo::GeometrySet`]; everything else loads
//! those tables or presents the results.

pub mod config;
pub mod eligibility;
pub mod error;
pub mod filter;
pub mod geo;
pub mod loader;
pub mod rules;
pub mod tui;
pub mod utils;

pub use config::Config;
pub use error::{ExplorerError, Result};
pub use filter::{FilterInput, Persona};
