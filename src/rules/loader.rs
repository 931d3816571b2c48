use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tracing::{debug, warn};
use crate::{
    error::{ExplorerError, Result},
    rules::{normalize::NameNormalizer, types::{CountryRules, RulesTable, VisaRule}},
};

/// Build a [`RulesTable`] from a `{ "<Country>": { "visas": [...] } }` document.
///
/// Only a non-object top level is an error. Everything below it is read
/// leniently: a bad visa entry is dropped on its own, and a country whose
/// `visas` is unusable stays in the table with no rules.
pub fn parse_rules(document: &Value, normalizer: &NameNormalizer) -> Result<RulesTable> {
    let countries = document
        .as_object()
        .ok_or_else(|| ExplorerError::Data("rules document must be a JSON object".to_string()))?;

    let mut table = RulesTable::new();

    // Canonical spellings first so they win over alias-keyed duplicates.
    let (canonical, aliased): (Vec<_>, Vec<_>) = countries
        .iter()
        .partition(|(name, _)| normalizer.is_canonical(name));

    for (raw_name, entry) in canonical.into_iter().chain(aliased) {
        let country_name = normalizer.normalize(raw_name);
        if table.contains(&country_name) {
            warn!("Duplicate rules for {} (key {:?}), keeping the first", country_name, raw_name);
            continue;
        }

        let visas = parse_country_visas(&country_name, entry);
        debug!("Loaded {} visa rule(s) for {}", visas.len(), country_name);
        table.insert(CountryRules { country_name, visas });
    }

    Ok(table)
}

fn parse_country_visas(country: &str, entry: &Value) -> Vec<VisaRule> {
    let Some(visas) = entry.get("visas").and_then(Value::as_array) else {
        warn!("Rules for {} have no usable \"visas\" array", country);
        return Vec::new();
    };

    visas
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match parse_visa(raw) {
            Ok(rule) => Some(rule),
            Err(reason) => {
                warn!("Skipping visa #{} for {}: {}", index, country, reason);
                None
            }
        })
        .collect()
}

fn parse_visa(raw: &Value) -> std::result::Result<VisaRule, String> {
    let object = raw.as_object().ok_or("entry is not an object")?;

    let label = object
        .get("label")
        .and_then(Value::as_str)
        .ok_or("missing string \"label\"")?;

    let categories = parse_categories(object)?;
    let min_age = parse_threshold(object, "min_age")?;
    let min_income_usd = parse_threshold(object, "min_income_usd")?;
    let notes = object
        .get("notes")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(VisaRule {
        label: label.to_string(),
        categories,
        min_age,
        min_income_usd,
        notes,
    })
}

fn parse_categories(object: &Map<String, Value>) -> std::result::Result<BTreeSet<String>, String> {
    match object.get("categories") {
        None | Some(Value::Null) => Ok(BTreeSet::new()),
        Some(Value::Array(items)) => Ok(items
            .iter()
            .filter_map(Value::as_str)
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect()),
        Some(other) => Err(format!("\"categories\" is not an array: {}", other)),
    }
}

/// Zero and negative thresholds are always satisfied, so they map to `None`
/// like an absent one.
fn parse_threshold(object: &Map<String, Value>, key: &str) -> std::result::Result<Option<u32>, String> {
    let value = match object.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };

    let number = value
        .as_f64()
        .filter(|n| n.is_finite())
        .ok_or_else(|| format!("\"{}\" is not a number: {}", key, value))?;
    if number <= 0.0 {
        return Ok(None);
    }

    let threshold = number.ceil();
    if threshold > u32::MAX as f64 {
        return Err(format!("\"{}\" is out of range: {}", key, value));
    }

    Ok(match threshold as u32 {
        0 => None,
        n => Some(n),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        eligibility::{evaluate_country, EligibilityStatus},
        filter::{FilterInput, Persona},
    };
    use serde_json::json;

    fn parse(document: Value) -> RulesTable {
        parse_rules(&document, &NameNormalizer::default()).unwrap()
    }

    #[test]
    fn parses_well_formed_rules() {
        let table = parse(json!({
            "Spain": { "visas": [
                { "label": "Non-Lucrative Visa", "categories": ["Retiree"], "min_income_usd": 30000,
                  "notes": "Passive income" },
                { "label": "Digital Nomad Visa", "categories": ["digital_nomad", "remote_worker"] }
            ]}
        }));

        let spain = table.get("Spain").unwrap();
        assert_eq!(spain.visas.len(), 2);
        assert_eq!(spain.visas[0].label, "Non-Lucrative Visa");
        assert!(spain.visas[0].categories.contains("retiree"));
        assert_eq!(spain.visas[0].min_income_usd, Some(30_000));
        assert_eq!(spain.visas[0].notes.as_deref(), Some("Passive income"));
        assert_eq!(spain.visas[1].min_age, None);
    }

    #[test]
    fn malformed_entry_does_not_drop_siblings() {
        let table = parse(json!({
            "Portugal": { "visas": [
                "not an object",
                { "categories": ["retiree"] },
                { "label": "Bad Age", "categories": ["retiree"], "min_age": "fifty" },
                { "label": "Bad Categories", "categories": "retiree" },
                { "label": "D7", "categories": ["retiree", 7], "min_income_usd": 9000 }
            ]}
        }));

        let visas = &table.get("Portugal").unwrap().visas;
        assert_eq!(visas.len(), 1);
        assert_eq!(visas[0].label, "D7");
        assert_eq!(visas[0].categories.len(), 1);
    }

    #[test]
    fn categories_and_keys_are_trimmed() {
        let table = parse(json!({
            " Spain ": { "visas": [
                { "label": "Non-Lucrative Visa", "categories": [" Retiree ", "  "] }
            ]}
        }));

        let visas = &table.get("Spain").unwrap().visas;
        assert_eq!(visas[0].categories.len(), 1);
        assert!(visas[0].categories.contains("retiree"));
    }

    #[test]
    fn unusable_visas_keep_country_present() {
        let table = parse(json!({
            "Greece": { "visas": "see website" },
            "Italy": 42
        }));

        assert!(table.get("Greece").unwrap().visas.is_empty());
        assert!(table.get("Italy").unwrap().visas.is_empty());
    }

    #[test]
    fn thresholds_are_rounded_up_and_non_positive_is_absent() {
        let table = parse(json!({
            "Panama": { "visas": [
                { "label": "Pensionado", "categories": ["retiree"], "min_age": 0, "min_income_usd": 999.5 },
                { "label": "Friendly Nations", "categories": ["retiree"], "min_age": -1, "min_income_usd": -5000 }
            ]}
        }));

        let visas = &table.get("Panama").unwrap().visas;
        assert_eq!(visas.len(), 2);
        assert_eq!(visas[0].min_age, None);
        assert_eq!(visas[0].min_income_usd, Some(1000));
        assert_eq!(visas[1].label, "Friendly Nations");
        assert_eq!(visas[1].min_age, None);
        assert_eq!(visas[1].min_income_usd, None);
    }

    #[test]
    fn negative_threshold_keeps_country_eligible() {
        let normalizer = NameNormalizer::default();
        let table = parse(json!({
            "Panama": { "visas": [
                { "label": "Pensionado", "categories": ["retiree"], "min_age": -1 }
            ]}
        }));

        let filter = FilterInput::new(Persona::Retiree, 60, 50_000);
        let result = evaluate_country(&filter, Some(&table), &normalizer, "Panama");
        assert_eq!(result.status, EligibilityStatus::Eligible);
        assert_eq!(result.labels(), vec!["Pensionado"]);
    }

    #[test]
    fn alias_keys_are_normalized_and_canonical_wins() {
        let table = parse(json!({
            "Viet Nam": { "visas": [ { "label": "From Alias", "categories": ["retiree"] } ] }
        }));
        assert_eq!(table.get("Vietnam").unwrap().visas[0].label, "From Alias");
        assert!(table.get("Viet Nam").is_none());

        let table = parse(json!({
            "Viet Nam": { "visas": [ { "label": "From Alias", "categories": ["retiree"] } ] },
            "Vietnam": { "visas": [ { "label": "Canonical", "categories": ["retiree"] } ] }
        }));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("Vietnam").unwrap().visas[0].label, "Canonical");
    }

    #[test]
    fn rejects_non_object_document() {
        let err = parse_rules(&json!([1, 2, 3]), &NameNormalizer::default()).unwrap_err();
        assert!(matches!(err, ExplorerError::Data(_)));
    }
}
