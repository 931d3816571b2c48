use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Spelling variants shipped with the explorer.
const BUILTIN_ALIASES: &[(&str, &str)] = &[("Viet Nam", "Vietnam")];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameAlias {
    pub from: String,
    pub to: String,
}

/// Maps alternate country spellings to the one canonical key used for all lookups.
///
/// Rules ingestion, geometry ingestion, the engine and every display path
/// go through the same instance.
#[derive(Debug, Clone)]
pub struct NameNormalizer {
    aliases: HashMap<String, String>,
}

impl NameNormalizer {
    pub fn new(extra: &[NameAlias]) -> Self {
        let mut aliases: HashMap<String, String> = BUILTIN_ALIASES
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        for alias in extra {
            aliases.insert(alias.from.trim().to_string(), alias.to.trim().to_string());
        }
        Self { aliases }
    }

    pub fn normalize(&self, name: &str) -> String {
        let trimmed = name.trim();
        match self.aliases.get(trimmed) {
            Some(canonical) => canonical.clone(),
            None => trimmed.to_string(),
        }
    }

    pub fn is_canonical(&self, name: &str) -> bool {
        self.normalize(name) == name
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }
}

impl Default for NameNormalizer {
    fn default() -> Self {
        Self::new(&[])
    }
}
