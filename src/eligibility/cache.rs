use tracing::debug;
use crate::{
    eligibility::engine::{evaluate_all, EligibilityMap},
    filter::FilterInput,
    loader::Dataset,
};

/// Memoizes the full result map on the filter and the dataset generation.
#[derive(Debug, Default)]
pub struct EligibilityCache {
    key: Option<(FilterInput, u64)>,
    results: EligibilityMap,
    computations: u64,
}

impl EligibilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(&mut self, filter: &FilterInput, dataset: &Dataset) -> &EligibilityMap {
        let fresh = self
            .key
            .as_ref()
            .is_some_and(|(f, generation)| f == filter && *generation == dataset.generation);

        if !fresh {
            self.results = evaluate_all(filter, dataset);
            self.key = Some((filter.clone(), dataset.generation));
            self.computations += 1;
            debug!(
                "Recomputed eligibility for {} countries (generation {})",
                self.results.len(),
                dataset.generation
            );
        }

        &self.results
    }

    /// Last computed results, possibly stale.
    pub fn current(&self) -> &EligibilityMap {
        &self.results
    }

    pub fn computations(&self) -> u64 {
        self.computations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        filter::Persona,
        geo::GeometrySet,
        rules::{CountryRules, NameNormalizer, RulesTable, VisaRule},
        eligibility::EligibilityStatus,
    };

    fn dataset() -> Dataset {
        let rules: RulesTable = vec![CountryRules {
            country_name: "Spain".into(),
            visas: vec![VisaRule::new("NLV").with_categories(["retiree"]).with_min_income(30_000)],
        }]
        .into_iter()
        .collect();
        let geometry = GeometrySet::from_names(["Spain", "France"], &NameNormalizer::default());
        Dataset::new(Some(rules), Some(geometry))
    }

    #[test]
    fn recomputes_only_when_key_changes() {
        let mut data = dataset();
        let mut cache = EligibilityCache::new();
        let filter = FilterInput::new(Persona::Retiree, 60, 40_000);

        assert_eq!(cache.get_or_compute(&filter, &data).len(), 2);
        cache.get_or_compute(&filter, &data);
        assert_eq!(cache.computations(), 1);

        let poorer = filter.with_income(10_000);
        let status = cache.get_or_compute(&poorer, &data).get("Spain").unwrap().status;
        assert_eq!(status, EligibilityStatus::Ineligible);
        assert_eq!(cache.computations(), 2);

        data.replace(Dataset::new(None, data.geometry.clone()));
        let status = cache.get_or_compute(&poorer, &data).get("Spain").unwrap().status;
        assert_eq!(status, EligibilityStatus::Unknown);
        assert_eq!(cache.computations(), 3);

        cache.get_or_compute(&poorer, &data);
        assert_eq!(cache.computations(), 3);
    }
}
