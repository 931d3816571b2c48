use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::{
    filter::{FilterInput, Persona},
    loader::Dataset,
    rules::{CountryRules, NameNormalizer, RulesTable, VisaRule},
};

/// Categories a retiree under a visa's minimum age may qualify through instead.
pub const YOUNG_RETIREE_FALLBACKS: [&str; 3] = ["second_home", "investor", "remote_worker"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    /// No rules entry exists for the country.
    Unknown,
    Eligible,
    /// Rules exist but none matched.
    Ineligible,
}

impl EligibilityStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EligibilityStatus::Unknown => "No data yet",
            EligibilityStatus::Eligible => "Eligible",
            EligibilityStatus::Ineligible => "Not eligible",
        }
    }

    /// Display color as `#RRGGBB`.
    pub fn color_hex(&self) -> &'static str {
        match self {
            EligibilityStatus::Eligible => "#4CAF50",
            EligibilityStatus::Ineligible => "#D6D6DA",
            EligibilityStatus::Unknown => "#ECECEC",
        }
    }
}

impl std::fmt::Display for EligibilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EligibilityStatus::Unknown => write!(f, "unknown"),
            EligibilityStatus::Eligible => write!(f, "eligible"),
            EligibilityStatus::Ineligible => write!(f, "ineligible"),
        }
    }
}

impl std::str::FromStr for EligibilityStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unknown" => Ok(EligibilityStatus::Unknown),
            "eligible" => Ok(EligibilityStatus::Eligible),
            "ineligible" => Ok(EligibilityStatus::Ineligible),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

/// How a visa came to be offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPath {
    /// The visa is tagged for the user's persona and all thresholds hold.
    Persona,
    /// A retiree below the visa's minimum age, offered a visa tagged for a
    /// fallback category whose income threshold they meet.
    YoungRetireeFallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisaMatch {
    #[serde(flatten)]
    pub rule: VisaRule,
    pub path: MatchPath,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityResult {
    pub status: EligibilityStatus,
    /// Admitted visas in the order the rules list them.
    pub matches: Vec<VisaMatch>,
}

impl EligibilityResult {
    pub fn unknown() -> Self {
        Self { status: EligibilityStatus::Unknown, matches: Vec::new() }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.matches.iter().map(|m| m.rule.label.as_str()).collect()
    }
}

/// Decide whether one visa applies to the filter, and through which path.
///
/// | persona tagged | age ok | fallback tag | result                       |
/// |----------------|--------|--------------|------------------------------|
/// | yes            | -      | -            | `Persona` if age and income  |
/// | no             | no     | yes          | fallback if income           |
/// | otherwise      |        |              | excluded                     |
pub fn select(rule: &VisaRule, filter: &FilterInput) -> Option<MatchPath> {
    let categories: Vec<String> = rule.categories.iter().map(|c| c.to_lowercase()).collect();

    let persona_match = filter
        .persona
        .tag()
        .is_some_and(|tag| categories.iter().any(|c| c == tag));
    let age_ok = rule.min_age.map_or(true, |min| filter.age >= min);
    let income_ok = rule.min_income_usd.map_or(true, |min| filter.income_usd >= min);

    if persona_match {
        return (age_ok && income_ok).then_some(MatchPath::Persona);
    }

    if !age_ok && young_retiree_fallback(&filter.persona, &categories) {
        return income_ok.then_some(MatchPath::YoungRetireeFallback);
    }

    None
}

fn young_retiree_fallback(persona: &Persona, categories: &[String]) -> bool {
    *persona == Persona::Retiree
        && categories
            .iter()
            .any(|c| YOUNG_RETIREE_FALLBACKS.contains(&c.as_str()))
}

pub fn evaluate_visas(filter: &FilterInput, visas: &[VisaRule]) -> Vec<VisaMatch> {
    visas
        .iter()
        .filter_map(|rule| {
            select(rule, filter).map(|path| VisaMatch { rule: rule.clone(), path })
        })
        .collect()
}

/// Classify one country. `rules` is `None` while the table has not loaded.
pub fn evaluate_country(
    filter: &FilterInput,
    rules: Option<&RulesTable>,
    normalizer: &NameNormalizer,
    country: &str,
) -> EligibilityResult {
    let name = normalizer.normalize(country);
    classify(filter, rules.and_then(|table| table.get(&name)))
}

fn classify(filter: &FilterInput, country_rules: Option<&CountryRules>) -> EligibilityResult {
    let Some(country_rules) = country_rules else {
        return EligibilityResult::unknown();
    };

    let matches = evaluate_visas(filter, &country_rules.visas);
    let status = if matches.is_empty() {
        EligibilityStatus::Ineligible
    } else {
        EligibilityStatus::Eligible
    };

    EligibilityResult { status, matches }
}

/// Per-country results for every country in the geometry set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EligibilityMap {
    results: BTreeMap<String, EligibilityResult>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub total: usize,
    pub eligible: usize,
    pub ineligible: usize,
    pub unknown: usize,
}

impl EligibilityMap {
    pub fn get(&self, canonical_name: &str) -> Option<&EligibilityResult> {
        self.results.get(canonical_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EligibilityResult)> {
        self.results.iter().map(|(name, result)| (name.as_str(), result))
    }

    pub fn with_status(&self, status: EligibilityStatus) -> impl Iterator<Item = (&str, &EligibilityResult)> {
        self.iter().filter(move |(_, result)| result.status == status)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn summary(&self) -> StatusSummary {
        let mut summary = StatusSummary { total: self.results.len(), ..Default::default() };
        for result in self.results.values() {
            match result.status {
                EligibilityStatus::Eligible => summary.eligible += 1,
                EligibilityStatus::Ineligible => summary.ineligible += 1,
                EligibilityStatus::Unknown => summary.unknown += 1,
            }
        }
        summary
    }
}

/// Evaluate every geometry country. Geometry keys are already canonical.
pub fn evaluate_all(filter: &FilterInput, dataset: &Dataset) -> EligibilityMap {
    let Some(geometry) = dataset.geometry.as_ref() else {
        return EligibilityMap::default();
    };

    let results = geometry
        .names()
        .map(|name| {
            let country_rules = dataset.rules.as_ref().and_then(|table| table.get(name));
            (name.to_string(), classify(filter, country_rules))
        })
        .collect();

    EligibilityMap { results }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeometrySet;
    use proptest::prelude::*;

    fn retiree(age: u32, income: u32) -> FilterInput {
        FilterInput::new(Persona::Retiree, age, income)
    }

    fn table(entries: Vec<(&str, Vec<VisaRule>)>) -> RulesTable {
        entries
            .into_iter()
            .map(|(name, visas)| CountryRules { country_name: name.to_string(), visas })
            .collect()
    }

    fn dataset(rules: RulesTable, countries: &[&str]) -> Dataset {
        let geometry = GeometrySet::from_names(countries.iter().copied(), &NameNormalizer::default());
        Dataset::new(Some(rules), Some(geometry))
    }

    #[test]
    fn spain_non_lucrative_visa_matches_at_threshold() {
        let rules = table(vec![(
            "Spain",
            vec![VisaRule::new("Non-Lucrative Visa").with_categories(["retiree"]).with_min_income(30_000)],
        )]);

        let result = evaluate_country(&retiree(55, 30_000), Some(&rules), &NameNormalizer::default(), "Spain");
        assert_eq!(result.status, EligibilityStatus::Eligible);
        assert_eq!(result.labels(), vec!["Non-Lucrative Visa"]);
        assert_eq!(result.matches[0].path, MatchPath::Persona);
    }

    #[test]
    fn thailand_retirement_visa_rejects_young_retiree() {
        let rules = table(vec![(
            "Thailand",
            vec![VisaRule::new("Retirement Visa")
                .with_categories(["retiree"])
                .with_min_age(50)
                .with_min_income(24_000)],
        )]);

        let result = evaluate_country(&retiree(40, 30_000), Some(&rules), &NameNormalizer::default(), "Thailand");
        assert_eq!(result.status, EligibilityStatus::Ineligible);
        assert!(result.matches.is_empty());
    }

    #[test]
    fn young_retiree_falls_back_to_remote_worker_visa() {
        let rule = VisaRule::new("LTR")
            .with_categories(["remote_worker"])
            .with_min_age(50)
            .with_min_income(80_000);

        assert_eq!(select(&rule, &retiree(40, 90_000)), Some(MatchPath::YoungRetireeFallback));
        // Fallback still requires income.
        assert_eq!(select(&rule, &retiree(40, 70_000)), None);
        // Old enough retirees do not take the fallback path.
        assert_eq!(select(&rule, &retiree(55, 90_000)), None);
        // Only retirees get the fallback.
        let nomad = FilterInput::new(Persona::DigitalNomad, 40, 90_000);
        assert_eq!(select(&rule, &nomad), None);
    }

    #[test]
    fn fallback_requires_an_age_shortfall() {
        let rule = VisaRule::new("LTR").with_categories(["remote_worker"]).with_min_income(80_000);
        assert_eq!(select(&rule, &retiree(40, 90_000)), None);
    }

    #[test]
    fn investor_and_second_home_tags_are_fallbacks() {
        for tag in ["investor", "second_home"] {
            let rule = VisaRule::new("Golden Visa").with_categories([tag]).with_min_age(60);
            assert_eq!(select(&rule, &retiree(30, 0)), Some(MatchPath::YoungRetireeFallback));
        }
        let rule = VisaRule::new("Nomad").with_categories(["digital_nomad"]).with_min_age(60);
        assert_eq!(select(&rule, &retiree(30, 0)), None);
    }

    #[test]
    fn category_case_is_ignored() {
        let mut rule = VisaRule::new("Pensionado");
        rule.categories.insert("Retiree".to_string());
        assert_eq!(select(&rule, &retiree(60, 0)), Some(MatchPath::Persona));
    }

    #[test]
    fn empty_categories_never_match() {
        let rule = VisaRule::new("Untagged");
        assert_eq!(select(&rule, &retiree(20, 0)), None);
        assert_eq!(select(&rule, &retiree(80, 200_000)), None);
    }

    #[test]
    fn unrecognized_persona_matches_nothing() {
        let rules = table(vec![(
            "Portugal",
            vec![VisaRule::new("Any").with_categories(["investor", "retiree"])],
        )]);
        let filter = FilterInput::new(Persona::Unrecognized("investor".into()), 40, 100_000);

        let normalizer = NameNormalizer::default();
        assert_eq!(
            evaluate_country(&filter, Some(&rules), &normalizer, "Portugal").status,
            EligibilityStatus::Ineligible
        );
        assert_eq!(
            evaluate_country(&filter, Some(&rules), &normalizer, "Chile").status,
            EligibilityStatus::Unknown
        );
    }

    #[test]
    fn mixed_rules_keep_matching_subset_in_order() {
        let rules = table(vec![(
            "Panama",
            vec![
                VisaRule::new("Pensionado").with_categories(["retiree"]).with_min_income(12_000),
                VisaRule::new("Friendly Nations").with_categories(["investor"]),
                VisaRule::new("Qualified Investor").with_categories(["retiree", "investor"]).with_min_income(300_000),
                VisaRule::new("Short Stay").with_categories(["Retiree"]),
            ],
        )]);

        let result = evaluate_country(&retiree(65, 40_000), Some(&rules), &NameNormalizer::default(), "Panama");
        assert_eq!(result.status, EligibilityStatus::Eligible);
        assert_eq!(result.labels(), vec!["Pensionado", "Short Stay"]);
    }

    #[test]
    fn missing_tables_yield_unknown() {
        let normalizer = NameNormalizer::default();
        let result = evaluate_country(&retiree(60, 60_000), None, &normalizer, "Spain");
        assert_eq!(result, EligibilityResult::unknown());

        let no_rules = Dataset::new(None, dataset(RulesTable::new(), &["Spain", "Peru"]).geometry);
        let map = evaluate_all(&retiree(60, 60_000), &no_rules);
        assert_eq!(map.summary(), StatusSummary { total: 2, eligible: 0, ineligible: 0, unknown: 2 });

        let no_geometry = Dataset::new(Some(RulesTable::new()), None);
        assert!(evaluate_all(&retiree(60, 60_000), &no_geometry).is_empty());
    }

    #[test]
    fn alias_geometry_resolves_to_canonical_rules() {
        let rules = table(vec![(
            "Vietnam",
            vec![VisaRule::new("Retirement").with_categories(["retiree"])],
        )]);
        let data = dataset(rules.clone(), &["Viet Nam", "Laos"]);
        let map = evaluate_all(&retiree(60, 0), &data);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("Vietnam").unwrap().status, EligibilityStatus::Eligible);
        assert_eq!(map.get("Laos").unwrap().status, EligibilityStatus::Unknown);
        assert_eq!(
            evaluate_country(&retiree(60, 0), Some(&rules), &NameNormalizer::default(), "Viet Nam"),
            *map.get("Vietnam").unwrap()
        );
    }

    #[test]
    fn every_geometry_country_gets_one_result() {
        let rules = table(vec![("Spain", vec![]), ("Mexico", vec![VisaRule::new("Temp").with_categories(["retiree"])])]);
        let data = dataset(rules, &["Spain", "Mexico", "Chile"]);
        let map = evaluate_all(&retiree(40, 0), &data);

        assert_eq!(map.len(), 3);
        assert_eq!(map.get("Spain").unwrap().status, EligibilityStatus::Ineligible);
        assert_eq!(map.get("Mexico").unwrap().status, EligibilityStatus::Eligible);
        assert_eq!(map.get("Chile").unwrap().status, EligibilityStatus::Unknown);
        assert_eq!(map.with_status(EligibilityStatus::Eligible).count(), 1);
    }

    fn persona_strategy() -> impl Strategy<Value = Persona> {
        prop_oneof![
            Just(Persona::Retiree),
            Just(Persona::DigitalNomad),
            Just(Persona::RemoteWorker),
            Just(Persona::SecondHome),
        ]
    }

    fn rule_strategy() -> impl Strategy<Value = VisaRule> {
        let tags = prop::sample::subsequence(
            vec!["retiree", "digital_nomad", "remote_worker", "second_home", "investor"],
            0..=3,
        );
        (tags, prop::option::of(18u32..90), prop::option::of(0u32..250_000)).prop_map(|(tags, age, income)| {
            let mut rule = VisaRule::new("Generated").with_categories(tags);
            rule.min_age = age;
            rule.min_income_usd = income;
            rule
        })
    }

    proptest! {
        /// Evaluation is a pure function of its inputs.
        #[test]
        fn evaluation_is_idempotent(
            persona in persona_strategy(),
            age in 18u32..=85,
            income in 0u32..=200_000,
            visas in prop::collection::vec(rule_strategy(), 0..6),
        ) {
            let filter = FilterInput::new(persona, age, income);
            prop_assert_eq!(evaluate_visas(&filter, &visas), evaluate_visas(&filter, &visas));
        }

        /// Raising income never drops a match.
        #[test]
        fn matches_are_monotonic_in_income(
            persona in persona_strategy(),
            age in 18u32..=85,
            income in 0u32..=200_000,
            raise in 0u32..=200_000,
            visas in prop::collection::vec(rule_strategy(), 0..6),
        ) {
            let before = FilterInput::new(persona, age, income);
            let after = before.with_income(income.saturating_add(raise));
            for rule in &visas {
                if let Some(path) = select(rule, &before) {
                    prop_assert_eq!(select(rule, &after), Some(path));
                }
            }
        }

        /// Countries without a rules entry are unknown for any filter.
        #[test]
        fn absent_countries_are_unknown(
            persona in persona_strategy(),
            age in 18u32..=85,
            income in 0u32..=200_000,
        ) {
            let rules = table(vec![("Spain", vec![VisaRule::new("Any").with_categories(["retiree"])])]);
            let result = evaluate_country(
                &FilterInput::new(persona, age, income),
                Some(&rules),
                &NameNormalizer::default(),
                "Atlantis",
            );
            prop_assert_eq!(result.status, EligibilityStatus::Unknown);
        }
    }
}
