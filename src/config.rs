use serde::{Deserialize, Serialize};
use crate::{
    filter::{FilterInput, Persona},
    rules::{NameAlias, NameNormalizer},
};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub data: DataConfig,
    pub filter: FilterDefaults,
    pub names: NamesConfig,
    pub tui: TuiConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DataConfig {
    pub rules_path: String,
    pub world_path: String,
}

/// Initial filter state for a new session.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FilterDefaults {
    pub persona: String,
    pub age: u32,
    pub income_usd: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NamesConfig {
    #[serde(default)]
    pub aliases: Vec<NameAlias>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TuiConfig {
    pub tick_rate_ms: u64,
    pub theme: ThemeName,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    Default,
    Dark,
}

impl Config {
    /// Load `path` (extension optional) over built-in defaults, then apply
    /// `MOBILITY__SECTION__KEY` environment overrides.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let config = Self::builder()?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("MOBILITY").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    fn builder() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(config::Config::builder()
            .set_default("data.rules_path", "data/visa_rules.json")?
            .set_default("data.world_path", "data/world.geojson")?
            .set_default("filter.persona", "retiree")?
            .set_default("filter.age", 37)?
            .set_default("filter.income_usd", 50_000)?
            .set_default("names.aliases", Vec::<String>::new())?
            .set_default("tui.tick_rate_ms", 250)?
            .set_default("tui.theme", "default")?)
    }

    pub fn normalizer(&self) -> NameNormalizer {
        NameNormalizer::new(&self.names.aliases)
    }

    /// Starting filter, with out-of-range values clamped.
    pub fn initial_filter(&self) -> FilterInput {
        let persona = self
            .filter
            .persona
            .parse::<Persona>()
            .unwrap_or(Persona::Retiree);
        FilterInput::new(persona, self.filter.age, self.filter.income_usd)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig {
                rules_path: "data/visa_rules.json".to_string(),
                world_path: "data/world.geojson".to_string(),
            },
            filter: FilterDefaults {
                persona: "retiree".to_string(),
                age: 37,
                income_usd: 50_000,
            },
            names: NamesConfig { aliases: Vec::new() },
            tui: TuiConfig {
                tick_rate_ms: 250,
                theme: ThemeName::Default,
            },
        }
    }
}
