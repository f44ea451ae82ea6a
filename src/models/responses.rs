use serde::{Deserialize, Serialize};
use crate::models::domain::MatchResult;

/// Response for the match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOutfitsResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub occasion: String,
    pub mode: String,
    #[serde(rename = "catalogVersion")]
    pub catalog_version: String,
    pub outfits: MatchResult,
    #[serde(rename = "hasAlternatives")]
    pub has_alternatives: bool,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "catalogVersion")]
    pub catalog_version: String,
    #[serde(rename = "catalogEntries")]
    pub catalog_entries: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
