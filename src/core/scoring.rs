use crate::core::filters::calculate_lifestyle_score;
use crate::models::{
    DimensionScore, FitDimension, FitQuality, MatchMode, MatrixOutfitEntry, ScoredCandidate,
    ScoringWeights, StyleProfile,
};

/// Score one candidate against the profile
///
/// Scoring formula:
/// score = (
///     Σ weight(dim, mode) * points(dim) / 3 +   # skin tone, contrast, body type
///     lifestyle_factor * weights.lifestyle      # shared lifestyle tags
/// ) * 100
///
/// A dimension rated `Avoid` disqualifies the candidate no matter how the
/// other dimensions score. In quick mode, dimensions the user did not supply
/// resolve to `Neutral` instead of the catalog rating.
pub fn score_candidate<'a>(
    entry: &'a MatrixOutfitEntry,
    profile: &StyleProfile,
    mode: MatchMode,
    weights: &ScoringWeights,
) -> ScoredCandidate<'a> {
    let breakdown = FitDimension::ALL.map(|dimension| {
        let confident = profile.is_confident(dimension);
        let quality = resolve_quality(entry, profile, dimension, mode);
        let points = quality
            .points()
            .map(|p| dimension_points(p, weights.for_dimension(dimension, mode)))
            .unwrap_or(0.0);

        DimensionScore {
            dimension,
            quality,
            confident,
            points,
        }
    });

    let disqualified = breakdown.iter().any(|d| d.quality == FitQuality::Avoid);
    let (lifestyle_factor, shared_lifestyle) = calculate_lifestyle_score(entry, profile);

    let score = if disqualified {
        0.0
    } else {
        let fit_total: f64 = breakdown.iter().map(|d| d.points).sum();
        fit_total + lifestyle_factor * weights.lifestyle * 100.0
    };

    ScoredCandidate {
        entry,
        score,
        disqualified,
        breakdown,
        shared_lifestyle,
    }
}

/// Score every candidate; order of the input does not affect any score
pub fn score_candidates<'a>(
    candidates: &[&'a MatrixOutfitEntry],
    profile: &StyleProfile,
    mode: MatchMode,
    weights: &ScoringWeights,
) -> Vec<ScoredCandidate<'a>> {
    candidates
        .iter()
        .map(|&entry| score_candidate(entry, profile, mode, weights))
        .collect()
}

#[inline]
fn resolve_quality(
    entry: &MatrixOutfitEntry,
    profile: &StyleProfile,
    dimension: FitDimension,
    mode: MatchMode,
) -> FitQuality {
    if mode == MatchMode::Quick && !profile.is_confident(dimension) {
        return FitQuality::Neutral;
    }

    // A validated catalog always has a rating; fail closed otherwise
    entry
        .fit_for(dimension, profile)
        .unwrap_or(FitQuality::Avoid)
}

#[inline]
fn dimension_points(points: u8, weight: f64) -> f64 {
    weight * (points as f64 / FitQuality::MAX_POINTS as f64) * 100.0
}

/// Stylist-facing explanation naming the strongest confident dimensions
pub fn explain(candidate: &ScoredCandidate<'_>) -> String {
    let mut strongest: Vec<&DimensionScore> = candidate
        .breakdown
        .iter()
        .filter(|d| d.confident && d.quality != FitQuality::Avoid)
        .collect();

    // Stable sort keeps declaration order among equal contributions
    strongest.sort_by(|a, b| b.points.total_cmp(&a.points));

    match strongest.as_slice() {
        [] => "A dependable pick for the occasion.".to_string(),
        [only] => format!("Chosen to suit {}.", only.dimension.phrase()),
        [first, second, ..] => format!(
            "Chosen to suit {} and {}.",
            first.dimension.phrase(),
            second.dimension.phrase()
        ),
    }
}
