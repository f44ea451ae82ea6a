use crate::error::ValidationError;
use crate::models::{
    BodyType, Category, Contrast, FitDimension, FitQuality, MatrixOutfitEntry, RawStyleProfile,
    SkinTone, StyleProfile,
};
use std::collections::BTreeSet;

/// Categories used when onboarding left a dimension unset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileDefaults {
    pub skin_tone: SkinTone,
    pub body_type: BodyType,
    pub contrast: Contrast,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            skin_tone: SkinTone::Neutral,
            body_type: BodyType::Rectangle,
            contrast: Contrast::Medium,
        }
    }
}

impl ProfileDefaults {
    /// Defaults for a concrete catalog.
    ///
    /// The body type falls back to the category with the most neutral fit
    /// distribution: fewest `Avoid` ratings, then most `Neutral` ratings,
    /// then declaration order.
    pub fn for_entries(entries: &[MatrixOutfitEntry]) -> Self {
        let mut defaults = Self::default();
        if entries.is_empty() {
            return defaults;
        }

        let mut best: Option<(BodyType, usize, usize)> = None;
        for &body_type in BodyType::ALL {
            let (avoid, neutral) = entries.iter().fold((0, 0), |(avoid, neutral), entry| {
                match entry.body_type_fit.get(&body_type) {
                    Some(FitQuality::Avoid) => (avoid + 1, neutral),
                    Some(FitQuality::Neutral) => (avoid, neutral + 1),
                    _ => (avoid, neutral),
                }
            });

            let better = match best {
                None => true,
                Some((_, best_avoid, best_neutral)) => {
                    avoid < best_avoid || (avoid == best_avoid && neutral > best_neutral)
                }
            };
            if better {
                best = Some((body_type, avoid, neutral));
            }
        }

        if let Some((body_type, _, _)) = best {
            defaults.body_type = body_type;
        }
        defaults
    }
}

/// Lowercase, trim, and fold `_` and spaces into `-`.
/// Returns `None` for blank input.
pub(crate) fn normalize_token(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let token = trimmed
        .to_lowercase()
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    Some(token)
}

/// Parse one categorical input. Blank input yields `Ok(None)`.
pub fn parse_category<C: Category>(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<C>, ValidationError> {
    let Some(token) = raw.and_then(normalize_token) else {
        return Ok(None);
    };

    C::from_token(&token)
        .map(Some)
        .ok_or_else(|| ValidationError::UnknownCategory {
            field,
            value: raw.unwrap_or_default().to_string(),
            expected: C::expected(),
        })
}

/// Like `parse_category`, but the field is mandatory
pub fn require_category<C: Category>(field: &'static str, raw: &str) -> Result<C, ValidationError> {
    parse_category(field, Some(raw))?.ok_or(ValidationError::BlankValue { field })
}

/// Map raw onboarding data onto a `StyleProfile`.
///
/// Unset fields take the value from `defaults` and are recorded as defaulted;
/// values that match no category are rejected with the field named.
pub fn normalize_profile(
    raw: &RawStyleProfile,
    defaults: &ProfileDefaults,
) -> Result<StyleProfile, ValidationError> {
    let mut defaulted = BTreeSet::new();

    let skin_tone = parse_category::<SkinTone>("skin_tone", raw.skin_tone.as_deref())?
        .unwrap_or_else(|| {
            defaulted.insert(FitDimension::SkinTone);
            defaults.skin_tone
        });

    let body_type = parse_category::<BodyType>("body_type", raw.body_type.as_deref())?
        .unwrap_or_else(|| {
            defaulted.insert(FitDimension::BodyType);
            defaults.body_type
        });

    let contrast = parse_category::<Contrast>("contrast", raw.contrast.as_deref())?
        .unwrap_or_else(|| {
            defaulted.insert(FitDimension::Contrast);
            defaults.contrast
        });

    let lifestyle_tags = raw
        .lifestyle
        .iter()
        .map(|tag| normalize_token(tag).ok_or(ValidationError::BlankValue { field: "lifestyle" }))
        .collect::<Result<BTreeSet<_>, _>>()?;

    Ok(StyleProfile {
        skin_tone,
        body_type,
        contrast,
        lifestyle_tags,
        defaulted,
    })
}
