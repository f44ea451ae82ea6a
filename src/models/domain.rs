use crate::error::InvalidWeight;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A closed categorical vocabulary shared by profiles and the catalog.
///
/// `ALL` lists every variant in declaration order; catalog validation uses it
/// to check that a fit mapping covers the whole dimension.
pub trait Category: Copy + Ord + fmt::Debug + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    /// Extra spellings accepted on input, on top of `as_str`
    fn alias(_token: &str) -> Option<Self> {
        None
    }

    fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == token)
            .or_else(|| Self::alias(token))
    }

    fn expected() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkinTone {
    Warm,
    Cool,
    Neutral,
    Deep,
}

impl Category for SkinTone {
    const ALL: &'static [Self] = &[Self::Warm, Self::Cool, Self::Neutral, Self::Deep];

    fn as_str(self) -> &'static str {
        match self {
            Self::Warm => "warm",
            Self::Cool => "cool",
            Self::Neutral => "neutral",
            Self::Deep => "deep",
        }
    }

    // Buckets reported by photo analysis
    fn alias(token: &str) -> Option<Self> {
        match token {
            "very-light" | "light" => Some(Self::Cool),
            "medium" | "tan-olive" | "tan" | "olive" => Some(Self::Warm),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyType {
    Hourglass,
    Rectangle,
    Triangle,
    InvertedTriangle,
    Oval,
}

impl Category for BodyType {
    const ALL: &'static [Self] = &[
        Self::Hourglass,
        Self::Rectangle,
        Self::Triangle,
        Self::InvertedTriangle,
        Self::Oval,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Hourglass => "hourglass",
            Self::Rectangle => "rectangle",
            Self::Triangle => "triangle",
            Self::InvertedTriangle => "inverted-triangle",
            Self::Oval => "oval",
        }
    }

    fn alias(token: &str) -> Option<Self> {
        match token {
            "pear" => Some(Self::Triangle),
            "apple" => Some(Self::Oval),
            "straight" => Some(Self::Rectangle),
            "v-shape" => Some(Self::InvertedTriangle),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Contrast {
    Low,
    Medium,
    High,
}

impl Category for Contrast {
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High];

    fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Occasion {
    Wedding,
    Work,
    Interview,
    Dinner,
    DateNight,
    Party,
    Everyday,
    FormalEvent,
}

impl Category for Occasion {
    const ALL: &'static [Self] = &[
        Self::Wedding,
        Self::Work,
        Self::Interview,
        Self::Dinner,
        Self::DateNight,
        Self::Party,
        Self::Everyday,
        Self::FormalEvent,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Wedding => "wedding",
            Self::Work => "work",
            Self::Interview => "interview",
            Self::Dinner => "dinner",
            Self::DateNight => "date-night",
            Self::Party => "party",
            Self::Everyday => "everyday",
            Self::FormalEvent => "formal-event",
        }
    }

    fn alias(token: &str) -> Option<Self> {
        match token {
            "date" => Some(Self::DateNight),
            _ => None,
        }
    }
}

/// How much the user told us: `Quick` is occasion-only onboarding,
/// `Personal` comes from photo analysis plus explicit preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    Quick,
    Personal,
}

impl Category for MatchMode {
    const ALL: &'static [Self] = &[Self::Quick, Self::Personal];

    fn as_str(self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::Personal => "personal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Safe,
    Sharp,
    Relaxed,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Safe, Tier::Sharp, Tier::Relaxed];

    pub fn label(self) -> &'static str {
        match self {
            Tier::Safe => "Safest choice",
            Tier::Sharp => "Sharper choice",
            Tier::Relaxed => "More relaxed choice",
        }
    }
}

/// How well an outfit suits one category of a fit dimension.
///
/// `Avoid` has no numeric value: anything rated `Avoid` for the profile
/// cannot be scored, only disqualified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitQuality {
    Ideal,
    Good,
    Neutral,
    Avoid,
}

impl FitQuality {
    pub const MAX_POINTS: u8 = 3;

    #[inline]
    pub fn points(self) -> Option<u8> {
        match self {
            FitQuality::Ideal => Some(3),
            FitQuality::Good => Some(2),
            FitQuality::Neutral => Some(1),
            FitQuality::Avoid => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitDimension {
    SkinTone,
    Contrast,
    BodyType,
}

impl FitDimension {
    pub const ALL: [FitDimension; 3] = [
        FitDimension::SkinTone,
        FitDimension::Contrast,
        FitDimension::BodyType,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FitDimension::SkinTone => "skin_tone",
            FitDimension::Contrast => "contrast",
            FitDimension::BodyType => "body_type",
        }
    }

    /// Phrase used in stylist explanations
    pub fn phrase(self) -> &'static str {
        match self {
            FitDimension::SkinTone => "your coloring",
            FitDimension::Contrast => "your natural contrast",
            FitDimension::BodyType => "your proportions",
        }
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display!(SkinTone, BodyType, Contrast, Occasion, MatchMode, FitDimension);

/// Normalized style attributes for a single matching request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleProfile {
    pub skin_tone: SkinTone,
    pub body_type: BodyType,
    pub contrast: Contrast,
    #[serde(default)]
    pub lifestyle_tags: BTreeSet<String>,
    /// Dimensions filled in by the default policy rather than by the user
    #[serde(default)]
    pub defaulted: BTreeSet<FitDimension>,
}

impl StyleProfile {
    /// A profile where every dimension was supplied by the user
    pub fn new(skin_tone: SkinTone, body_type: BodyType, contrast: Contrast) -> Self {
        Self {
            skin_tone,
            body_type,
            contrast,
            lifestyle_tags: BTreeSet::new(),
            defaulted: BTreeSet::new(),
        }
    }

    pub fn with_lifestyle_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lifestyle_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    pub fn is_confident(&self, dimension: FitDimension) -> bool {
        !self.defaulted.contains(&dimension)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitItems {
    pub top: String,
    pub bottom: String,
    pub shoes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<String>,
}

/// One row of the outfit matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixOutfitEntry {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub occasions: BTreeSet<Occasion>,
    pub tier: Tier,
    pub skin_tone_fit: BTreeMap<SkinTone, FitQuality>,
    pub contrast_fit: BTreeMap<Contrast, FitQuality>,
    pub body_type_fit: BTreeMap<BodyType, FitQuality>,
    #[serde(default)]
    pub lifestyle_tags: BTreeSet<String>,
    pub items: OutfitItems,
    pub image_url: String,
    pub reason: String,
}

impl MatrixOutfitEntry {
    #[inline]
    pub fn suits(&self, occasion: Occasion) -> bool {
        self.occasions.contains(&occasion)
    }

    /// The entry's rating for the profile along one dimension.
    ///
    /// `None` only for entries that never went through catalog validation.
    pub fn fit_for(&self, dimension: FitDimension, profile: &StyleProfile) -> Option<FitQuality> {
        match dimension {
            FitDimension::SkinTone => self.skin_tone_fit.get(&profile.skin_tone).copied(),
            FitDimension::Contrast => self.contrast_fit.get(&profile.contrast).copied(),
            FitDimension::BodyType => self.body_type_fit.get(&profile.body_type).copied(),
        }
    }
}

/// A request to pick one outfit per tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRequest {
    pub occasion: Occasion,
    pub profile: StyleProfile,
    pub mode: MatchMode,
    pub exclude_ids: BTreeSet<String>,
}

impl MatchRequest {
    pub fn new(occasion: Occasion, profile: StyleProfile, mode: MatchMode) -> Self {
        Self {
            occasion,
            profile,
            mode,
            exclude_ids: BTreeSet::new(),
        }
    }

    pub fn excluding<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_ids.extend(ids.into_iter().map(Into::into));
        self
    }
}

/// Contribution of one fit dimension to a candidate's score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionScore {
    pub dimension: FitDimension,
    pub quality: FitQuality,
    pub confident: bool,
    pub points: f64,
}

/// A candidate after scoring; lives only for the duration of one match call
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub entry: &'a MatrixOutfitEntry,
    pub score: f64,
    pub disqualified: bool,
    pub breakdown: [DimensionScore; 3],
    pub shared_lifestyle: Vec<String>,
}

/// The winning outfit for one tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierPick {
    pub tier: Tier,
    pub label: String,
    #[serde(rename = "outfitId")]
    pub outfit_id: String,
    pub title: String,
    pub items: OutfitItems,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub reason: String,
    pub score: f64,
    pub explanation: String,
}

/// One slot per tier; an empty slot means no valid candidate for the occasion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub safe: Option<TierPick>,
    pub sharp: Option<TierPick>,
    pub relaxed: Option<TierPick>,
}

impl MatchResult {
    pub fn get(&self, tier: Tier) -> Option<&TierPick> {
        match tier {
            Tier::Safe => self.safe.as_ref(),
            Tier::Sharp => self.sharp.as_ref(),
            Tier::Relaxed => self.relaxed.as_ref(),
        }
    }

    pub fn set(&mut self, pick: TierPick) {
        let slot = match pick.tier {
            Tier::Safe => &mut self.safe,
            Tier::Sharp => &mut self.sharp,
            Tier::Relaxed => &mut self.relaxed,
        };
        *slot = Some(pick);
    }

    /// Present picks in tier order
    pub fn picks(&self) -> impl Iterator<Item = &TierPick> {
        Tier::ALL.into_iter().filter_map(move |tier| self.get(tier))
    }

    pub fn is_empty(&self) -> bool {
        self.picks().next().is_none()
    }

    pub fn outfit_ids(&self) -> Vec<&str> {
        self.picks().map(|p| p.outfit_id.as_str()).collect()
    }
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub skin_tone: f64,
    pub contrast: f64,
    pub body_type: f64,
    /// Uniform weight applied to every fit dimension in quick mode
    pub quick_uniform: f64,
    pub lifestyle: f64,
}

impl ScoringWeights {
    /// Reject negative, NaN or infinite weights
    pub fn validate(&self) -> Result<(), InvalidWeight> {
        let fields = [
            ("skin_tone", self.skin_tone),
            ("contrast", self.contrast),
            ("body_type", self.body_type),
            ("quick_uniform", self.quick_uniform),
            ("lifestyle", self.lifestyle),
        ];

        match fields.into_iter().find(|&(_, value)| !value.is_finite() || value < 0.0) {
            Some((field, value)) => Err(InvalidWeight { field, value }),
            None => Ok(()),
        }
    }

    pub fn for_dimension(&self, dimension: FitDimension, mode: MatchMode) -> f64 {
        match mode {
            MatchMode::Quick => self.quick_uniform,
            MatchMode::Personal => match dimension {
                FitDimension::SkinTone => self.skin_tone,
                FitDimension::Contrast => self.contrast,
                FitDimension::BodyType => self.body_type,
            },
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skin_tone: 0.35,
            contrast: 0.25,
            body_type: 0.30,
            quick_uniform: 0.20,
            lifestyle: 0.10,
        }
    }
}
