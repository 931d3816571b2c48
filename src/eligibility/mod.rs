pub mod engine;
pub mod cache;

pub use engine::{
    evaluate_all, evaluate_country, evaluate_visas, select, EligibilityMap, EligibilityResult,
    EligibilityStatus, MatchPath, StatusSummary, VisaMatch,
};
pub use cache::EligibilityCache;
