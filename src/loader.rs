use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{info, warn};
use crate::{
    config::Config,
    error::Result,
    geo::GeometrySet,
    rules::{parse_rules, NameNormalizer, RulesTable},
};

#[cfg(test)]
use mockall::automock;

/// Where the explorer's two static documents come from.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_rules(&self) -> Result<Value>;
    async fn fetch_geometry(&self) -> Result<Value>;
}

pub struct FileDataSource {
    rules_path: PathBuf,
    world_path: PathBuf,
}

impl FileDataSource {
    pub fn new(rules_path: impl Into<PathBuf>, world_path: impl Into<PathBuf>) -> Self {
        Self {
            rules_path: rules_path.into(),
            world_path: world_path.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.data.rules_path, &config.data.world_path)
    }
}

async fn read_json(path: &PathBuf) -> Result<Value> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

#[async_trait]
impl DataSource for FileDataSource {
    async fn fetch_rules(&self) -> Result<Value> {
        read_json(&self.rules_path).await
    }

    async fn fetch_geometry(&self) -> Result<Value> {
        read_json(&self.world_path).await
    }
}

/// Rules and geometry as currently known. Either half may still be missing.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub rules: Option<RulesTable>,
    pub geometry: Option<GeometrySet>,
    /// Bumped every time the contents are replaced.
    pub generation: u64,
}

impl Dataset {
    pub fn new(rules: Option<RulesTable>, geometry: Option<GeometrySet>) -> Self {
        Self { rules, geometry, generation: 1 }
    }

    pub fn is_loaded(&self) -> bool {
        self.rules.is_some() && self.geometry.is_some()
    }

    pub fn replace(&mut self, other: Dataset) {
        let generation = self.generation.max(other.generation) + 1;
        *self = Dataset { generation, ..other };
    }
}

/// Fetch and parse both documents concurrently. Failures are logged and
/// leave the affected half empty.
pub async fn load_dataset(source: &dyn DataSource, normalizer: &NameNormalizer) -> Dataset {
    let (rules, geometry) = tokio::join!(source.fetch_rules(), source.fetch_geometry());

    let rules = match rules.and_then(|doc| parse_rules(&doc, normalizer)) {
        Ok(table) => {
            info!("Loaded rules for {} countries ({} visas)", table.len(), table.visa_count());
            Some(table)
        }
        Err(e) => {
            warn!("Visa rules unavailable: {}", e);
            None
        }
    };

    let geometry = match geometry.and_then(|doc| GeometrySet::from_document(&doc, normalizer)) {
        Ok(set) => {
            info!("Loaded geometry for {} countries", set.len());
            Some(set)
        }
        Err(e) => {
            warn!("World geometry unavailable: {}", e);
            None
        }
    };

    Dataset::new(rules, geometry)
}
