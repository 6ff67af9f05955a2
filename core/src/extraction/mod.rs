pub mod acr;
pub mod birads;
pub mod patterns;

pub use acr::{extract_acr, extract_acr_with};
pub use birads::{extract_birads, extract_birads_with, find_birads, BiradsMatch};
pub use patterns::{BiradsRule, BiradsRuleKind, PatternLibrary};
