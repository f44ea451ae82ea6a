use serde::{Deserialize, Serialize};
use validator::Validate;

/// Profile fields as they arrive from onboarding; any of them may be missing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawStyleProfile {
    #[serde(default, alias = "skin_tone", rename = "skinTone")]
    pub skin_tone: Option<String>,
    #[serde(default, alias = "body_type", rename = "bodyType")]
    pub body_type: Option<String>,
    #[serde(default)]
    pub contrast: Option<String>,
    #[serde(default)]
    pub lifestyle: Vec<String>,
}

/// Request to match outfits for an occasion
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchOutfitsRequest {
    #[validate(length(min = 1))]
    pub occasion: String,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default)]
    pub profile: RawStyleProfile,
    #[validate(length(max = 200))]
    #[serde(default, alias = "exclude_ids", rename = "excludeIds")]
    pub exclude_ids: Vec<String>,
}

fn default_mode() -> String {
    "quick".to_string()
}
