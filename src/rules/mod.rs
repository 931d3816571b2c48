pub mod types;
pub mod normalize;
pub mod loader;

pub use types::{CountryRules, RulesTable, VisaRule};
pub use normalize::{NameAlias, NameNormalizer};
pub use loader::parse_rules;
