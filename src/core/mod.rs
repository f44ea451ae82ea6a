// Core algorithm exports
pub mod catalog;
pub mod filters;
pub mod matcher;
pub mod profile;
pub mod scoring;
pub mod selector;

pub use catalog::{Catalog, CatalogStore};
pub use filters::{calculate_lifestyle_score, filter_candidates, matches_request};
pub use matcher::{MatchOutcome, Matcher};
pub use profile::{normalize_profile, parse_category, require_category, ProfileDefaults};
pub use scoring::{explain, score_candidate, score_candidates};
pub use selector::{assemble_result, select_winners};
