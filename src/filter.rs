use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 85;
pub const MAX_INCOME_USD: u32 = 200_000;
pub const INCOME_STEP_USD: u32 = 1_000;

/// The user's life situation, used to pick visa programs by category tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    Retiree,
    DigitalNomad,
    RemoteWorker,
    SecondHome,
    /// A value that is not one of the known personas. Matches no category.
    #[serde(untagged)]
    Unrecognized(String),
}

impl Persona {
    pub const ALL: [Persona; 4] = [
        Persona::Retiree,
        Persona::DigitalNomad,
        Persona::RemoteWorker,
        Persona::SecondHome,
    ];

    /// Category tag this persona matches, `None` for unrecognized values.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Persona::Retiree => Some("retiree"),
            Persona::DigitalNomad => Some("digital_nomad"),
            Persona::RemoteWorker => Some("remote_worker"),
            Persona::SecondHome => Some("second_home"),
            Persona::Unrecognized(_) => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Persona::Retiree => "Retiree",
            Persona::DigitalNomad => "Digital Nomad",
            Persona::RemoteWorker => "Remote Worker",
            Persona::SecondHome => "Second Home",
            Persona::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        self.tag().is_some()
    }

    pub fn next(&self) -> Persona {
        self.step(1)
    }

    pub fn previous(&self) -> Persona {
        self.step(Self::ALL.len() - 1)
    }

    fn step(&self, offset: usize) -> Persona {
        let index = Self::ALL.iter().position(|p| p == self).unwrap_or(0);
        Self::ALL[(index + offset) % Self::ALL.len()].clone()
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag() {
            Some(tag) => write!(f, "{}", tag),
            None => write!(f, "{}", self.label()),
        }
    }
}

impl FromStr for Persona {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Ok(match normalized.as_str() {
            "retiree" => Persona::Retiree,
            "digital_nomad" => Persona::DigitalNomad,
            "remote_worker" => Persona::RemoteWorker,
            "second_home" => Persona::SecondHome,
            _ => Persona::Unrecognized(s.to_string()),
        })
    }
}

/// Filter state driving an eligibility evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterInput {
    pub persona: Persona,
    pub age: u32,
    pub income_usd: u32,
}

impl FilterInput {
    /// Build a filter with age and income clamped to the supported ranges.
    pub fn new(persona: Persona, age: u32, income_usd: u32) -> Self {
        Self {
            persona,
            age: age.clamp(MIN_AGE, MAX_AGE),
            income_usd: income_usd.min(MAX_INCOME_USD),
        }
    }

    pub fn with_age(&self, age: u32) -> Self {
        Self::new(self.persona.clone(), age, self.income_usd)
    }

    pub fn with_income(&self, income_usd: u32) -> Self {
        Self::new(self.persona.clone(), self.age, income_usd)
    }

    pub fn adjust_age(&mut self, delta: i64) {
        let age = (self.age as i64 + delta).max(0) as u32;
        self.age = age.clamp(MIN_AGE, MAX_AGE);
    }

    pub fn adjust_income(&mut self, steps: i64) {
        let income = self.income_usd as i64 + steps * INCOME_STEP_USD as i64;
        self.income_usd = (income.max(0) as u32).min(MAX_INCOME_USD);
    }
}

impl Default for FilterInput {
    fn default() -> Self {
        Self::new(Persona::Retiree, 37, 50_000)
    }
}
