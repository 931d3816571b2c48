use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One named visa/residency pathway with its eligibility thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisaRule {
    pub label: String,
    /// Persona tags, stored lower-cased.
    pub categories: BTreeSet<String>,
    pub min_age: Option<u32>,
    pub min_income_usd: Option<u32>,
    pub notes: Option<String>,
}

impl VisaRule {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            categories: BTreeSet::new(),
            min_age: None,
            min_income_usd: None,
            notes: None,
        }
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.categories = categories
            .into_iter()
            .map(|c| c.as_ref().to_lowercase())
            .collect();
        self
    }

    pub fn with_min_age(mut self, min_age: u32) -> Self {
        self.min_age = Some(min_age);
        self
    }

    pub fn with_min_income(mut self, min_income_usd: u32) -> Self {
        self.min_income_usd = Some(min_income_usd);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRules {
    pub country_name: String,
    pub visas: Vec<VisaRule>,
}

/// Rules keyed by canonical country name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RulesTable {
    countries: BTreeMap<String, CountryRules>,
}

impl RulesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under the entry's own `country_name`, which must already be canonical.
    pub fn insert(&mut self, rules: CountryRules) -> Option<CountryRules> {
        self.countries.insert(rules.country_name.clone(), rules)
    }

    pub fn get(&self, canonical_name: &str) -> Option<&CountryRules> {
        self.countries.get(canonical_name)
    }

    pub fn contains(&self, canonical_name: &str) -> bool {
        self.countries.contains_key(canonical_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountryRules> {
        self.countries.values()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn visa_count(&self) -> usize {
        self.countries.values().map(|c| c.visas.len()).sum()
    }
}

impl FromIterator<CountryRules> for RulesTable {
    fn from_iter<T: IntoIterator<Item = CountryRules>>(iter: T) -> Self {
        let mut table = RulesTable::new();
        for rules in iter {
            table.insert(rules);
        }
        table
    }
}
