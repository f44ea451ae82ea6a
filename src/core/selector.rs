use crate::core::scoring::explain;
use crate::models::{MatchResult, ScoredCandidate, Tier, TierPick};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Fractional digits of a score that take part in ranking
const SCORE_PRECISION: f64 = 1e6;

/// Scores quantized to a fixed precision. Weighted sums with equal point
/// totals can differ in the last ulp; those must still compare as a tie.
#[inline]
fn score_key(score: f64) -> i64 {
    (score * SCORE_PRECISION).round() as i64
}

/// Ranking between two candidates of the same tier: higher score first,
/// then the lexicographically smaller id.
#[inline]
fn rank(a: &ScoredCandidate<'_>, b: &ScoredCandidate<'_>) -> Ordering {
    score_key(a.score)
        .cmp(&score_key(b.score))
        .then_with(|| b.entry.id.cmp(&a.entry.id))
}

/// Best non-disqualified candidate per tier.
///
/// Tiers without an eligible candidate are absent from the map; nothing is
/// backfilled from other tiers or from disqualified entries.
pub fn select_winners<'a, 'b>(
    scored: &'b [ScoredCandidate<'a>],
) -> BTreeMap<Tier, &'b ScoredCandidate<'a>> {
    let mut winners: BTreeMap<Tier, &'b ScoredCandidate<'a>> = BTreeMap::new();

    for candidate in scored.iter().filter(|c| !c.disqualified) {
        winners
            .entry(candidate.entry.tier)
            .and_modify(|current| {
                if rank(candidate, *current) == Ordering::Greater {
                    *current = candidate;
                }
            })
            .or_insert(candidate);
    }

    winners
}

/// Turn the winning candidates into the caller-facing result
pub fn assemble_result(winners: &BTreeMap<Tier, &ScoredCandidate<'_>>) -> MatchResult {
    let mut result = MatchResult::default();

    for (&tier, candidate) in winners {
        let entry = candidate.entry;
        result.set(TierPick {
            tier,
            label: tier.label().to_string(),
            outfit_id: entry.id.clone(),
            title: entry.title.clone(),
            items: entry.items.clone(),
            image_url: entry.image_url.clone(),
            reason: entry.reason.clone(),
            score: candidate.score,
            explanation: explain(candidate),
        });
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BodyType, Category, Contrast, DimensionScore, FitDimension, FitQuality, MatrixOutfitEntry,
        Occasion, OutfitItems, SkinTone,
    };
    use std::collections::BTreeSet;

    fn create_test_entry(id: &str, tier: Tier) -> MatrixOutfitEntry {
        MatrixOutfitEntry {
            id: id.to_string(),
            title: format!("Outfit {}", id),
            occasions: [Occasion::Dinner].into_iter().collect(),
            tier,
            skin_tone_fit: SkinTone::ALL.iter().map(|&s| (s, FitQuality::Good)).collect(),
            contrast_fit: Contrast::ALL.iter().map(|&c| (c, FitQuality::Good)).collect(),
            body_type_fit: BodyType::ALL.iter().map(|&b| (b, FitQuality::Good)).collect(),
            lifestyle_tags: BTreeSet::new(),
            items: OutfitItems {
                top: "Shirt".to_string(),
                bottom: "Trousers".to_string(),
                shoes: "Loafers".to_string(),
                extras: None,
            },
            image_url: format!("/images/{}.jpg", id),
            reason: "Test".to_string(),
        }
    }

    fn scored(entry: &MatrixOutfitEntry, score: f64, disqualified: bool) -> ScoredCandidate<'_> {
        ScoredCandidate {
            entry,
            score,
            disqualified,
            breakdown: FitDimension::ALL.map(|dimension| DimensionScore {
                dimension,
                quality: FitQuality::Good,
                confident: true,
                points: score / 3.0,
            }),
            shared_lifestyle: vec![],
        }
    }

    #[test]
    fn test_highest_score_wins_per_tier() {
        let a = create_test_entry("a", Tier::Safe);
        let b = create_test_entry("b", Tier::Safe);
        let c = create_test_entry("c", Tier::Relaxed);
        let candidates = vec![scored(&a, 40.0, false), scored(&b, 60.0, false), scored(&c, 10.0, false)];

        let winners = select_winners(&candidates);

        assert_eq!(winners[&Tier::Safe].entry.id, "b");
        assert_eq!(winners[&Tier::Relaxed].entry.id, "c");
        assert!(!winners.contains_key(&Tier::Sharp));
    }

    #[test]
    fn test_tie_breaks_on_smallest_id() {
        let z = create_test_entry("z_outfit", Tier::Sharp);
        let a = create_test_entry("a_outfit", Tier::Sharp);
        let m = create_test_entry("m_outfit", Tier::Sharp);

        let forward = vec![scored(&z, 50.0, false), scored(&a, 50.0, false), scored(&m, 50.0, false)];
        let backward = vec![scored(&m, 50.0, false), scored(&a, 50.0, false), scored(&z, 50.0, false)];

        assert_eq!(select_winners(&forward)[&Tier::Sharp].entry.id, "a_outfit");
        assert_eq!(select_winners(&backward)[&Tier::Sharp].entry.id, "a_outfit");
    }

    #[test]
    fn test_equal_point_totals_tie_in_quick_mode() {
        use crate::core::scoring::score_candidates;
        use crate::models::{MatchMode, ScoringWeights, StyleProfile};

        // Ideal + Ideal + Neutral and Good + Good + Ideal are both 7 points
        let mut a = create_test_entry("a", Tier::Safe);
        a.skin_tone_fit.insert(SkinTone::Warm, FitQuality::Ideal);
        a.contrast_fit.insert(Contrast::Medium, FitQuality::Ideal);
        a.body_type_fit.insert(BodyType::Rectangle, FitQuality::Neutral);
        let mut b = create_test_entry("b", Tier::Safe);
        b.body_type_fit.insert(BodyType::Rectangle, FitQuality::Ideal);

        let profile = StyleProfile::new(SkinTone::Warm, BodyType::Rectangle, Contrast::Medium);
        let weights = ScoringWeights::default();

        for order in [[&a, &b], [&b, &a]] {
            let scored = score_candidates(&order, &profile, MatchMode::Quick, &weights);
            assert_eq!(score_key(scored[0].score), score_key(scored[1].score));
            assert_eq!(select_winners(&scored)[&Tier::Safe].entry.id, "a");
        }
    }

    #[test]
    fn test_disqualified_never_selected() {
        let a = create_test_entry("a", Tier::Safe);
        let b = create_test_entry("b", Tier::Sharp);
        let candidates = vec![scored(&a, 99.0, true), scored(&b, 20.0, false)];

        let winners = select_winners(&candidates);

        assert!(!winners.contains_key(&Tier::Safe));
        assert_eq!(winners[&Tier::Sharp].entry.id, "b");
    }

    #[test]
    fn test_assemble_result_leaves_gaps() {
        let a = create_test_entry("a", Tier::Relaxed);
        let candidates = vec![scored(&a, 42.0, false)];

        let result = assemble_result(&select_winners(&candidates));

        assert!(result.safe.is_none());
        assert!(result.sharp.is_none());
        let relaxed = result.relaxed.as_ref().unwrap();
        assert_eq!(relaxed.outfit_id, "a");
        assert_eq!(relaxed.label, "More relaxed choice");
        assert_eq!(relaxed.score, 42.0);
        assert_eq!(relaxed.image_url, "/images/a.jpg");
    }
}
