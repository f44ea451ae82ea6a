// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BodyType, Category, Contrast, DimensionScore, FitDimension, FitQuality, MatchMode,
    MatchRequest, MatchResult, MatrixOutfitEntry, Occasion, OutfitItems, ScoredCandidate,
    ScoringWeights, SkinTone, StyleProfile, Tier, TierPick,
};
pub use requests::{MatchOutfitsRequest, RawStyleProfile};
pub use responses::{ErrorResponse, HealthResponse, MatchOutfitsResponse};
