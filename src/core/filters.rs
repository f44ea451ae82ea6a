use crate::core::catalog::Catalog;
use crate::models::{MatchRequest, MatrixOutfitEntry, StyleProfile};

/// Check if an entry may be offered for the request at all
///
/// Occasion is a hard constraint: an entry outside the occasion is never
/// scored, however well it fits otherwise.
#[inline]
pub fn matches_request(entry: &MatrixOutfitEntry, request: &MatchRequest) -> bool {
    entry.suits(request.occasion) && !request.exclude_ids.contains(&entry.id)
}

/// Reduce the catalog to entries eligible for the request
pub fn filter_candidates<'a>(
    catalog: &'a Catalog,
    request: &MatchRequest,
) -> Vec<&'a MatrixOutfitEntry> {
    catalog
        .entries()
        .iter()
        .filter(|entry| matches_request(entry, request))
        .collect()
}

/// Lifestyle alignment between an outfit and the profile
///
/// Returns a factor in 0.0..=1.0 and the shared tags. Without tags on
/// either side the factor sits at the midpoint.
#[inline]
pub fn calculate_lifestyle_score(
    entry: &MatrixOutfitEntry,
    profile: &StyleProfile,
) -> (f64, Vec<String>) {
    if entry.lifestyle_tags.is_empty() || profile.lifestyle_tags.is_empty() {
        return (0.5, Vec::new());
    }

    let shared: Vec<String> = entry
        .lifestyle_tags
        .intersection(&profile.lifestyle_tags)
        .cloned()
        .collect();

    // Two shared tags is already a strong signal
    let factor = (shared.len().min(2) as f64) / 2.0;

    (factor, shared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BodyType, Category, Contrast, FitQuality, MatchMode, Occasion, OutfitItems, SkinTone, Tier,
    };

    fn create_test_entry(id: &str, occasions: &[Occasion], tags: &[&str]) -> MatrixOutfitEntry {
        MatrixOutfitEntry {
            id: id.to_string(),
            title: format!("Outfit {}", id),
            occasions: occasions.iter().copied().collect(),
            tier: Tier::Safe,
            skin_tone_fit: SkinTone::ALL.iter().map(|&s| (s, FitQuality::Ideal)).collect(),
            contrast_fit: Contrast::ALL.iter().map(|&c| (c, FitQuality::Ideal)).collect(),
            body_type_fit: BodyType::ALL.iter().map(|&b| (b, FitQuality::Ideal)).collect(),
            lifestyle_tags: tags.iter().map(|t| t.to_string()).collect(),
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

    fn create_test_request(occasion: Occasion) -> MatchRequest {
        MatchRequest::new(
            occasion,
            StyleProfile::new(SkinTone::Warm, BodyType::Rectangle, Contrast::Medium),
            MatchMode::Personal,
        )
    }

    #[test]
    fn test_occasion_is_hard_filter() {
        let catalog = Catalog::new(
            "test",
            vec![
                create_test_entry("wedding", &[Occasion::Wedding], &[]),
                create_test_entry("work", &[Occasion::Work, Occasion::Interview], &[]),
                create_test_entry("both", &[Occasion::Wedding, Occasion::Work], &[]),
            ],
        )
        .unwrap();

        let ids: Vec<_> = filter_candidates(&catalog, &create_test_request(Occasion::Wedding))
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();

        assert_eq!(ids, vec!["wedding", "both"]);
    }

    #[test]
    fn test_no_entries_for_occasion() {
        let catalog =
            Catalog::new("test", vec![create_test_entry("a", &[Occasion::Wedding], &[])]).unwrap();

        assert!(filter_candidates(&catalog, &create_test_request(Occasion::FormalEvent)).is_empty());
    }

    #[test]
    fn test_excluded_ids_filtered() {
        let entry = create_test_entry("seen", &[Occasion::Party], &[]);
        let request = create_test_request(Occasion::Party).excluding(["seen"]);

        assert!(!matches_request(&entry, &request));
        assert!(matches_request(&entry, &create_test_request(Occasion::Party)));
    }

    #[test]
    fn test_lifestyle_score() {
        let entry = create_test_entry("a", &[Occasion::Work], &["work", "social", "casual"]);
        let profile = StyleProfile::new(SkinTone::Warm, BodyType::Oval, Contrast::Low)
            .with_lifestyle_tags(["work", "travel"]);

        let (score, shared) = calculate_lifestyle_score(&entry, &profile);
        assert_eq!(score, 0.5);
        assert_eq!(shared, vec!["work"]);

        let profile = profile.with_lifestyle_tags(["casual", "social", "work"]);
        let (score, shared) = calculate_lifestyle_score(&entry, &profile);
        assert_eq!(score, 1.0);
        assert_eq!(shared, vec!["casual", "social", "work"]);

        let profile = profile.with_lifestyle_tags(["nightlife"]);
        let (score, shared) = calculate_lifestyle_score(&entry, &profile);
        assert_eq!(score, 0.0);
        assert!(shared.is_empty());
    }

    #[test]
    fn test_lifestyle_score_without_tags_is_neutral() {
        let entry = create_test_entry("a", &[Occasion::Work], &["work"]);
        let profile = StyleProfile::new(SkinTone::Warm, BodyType::Oval, Contrast::Low);

        let (score, shared) = calculate_lifestyle_score(&entry, &profile);

        assert_eq!(score, 0.5);
        assert!(shared.is_empty());
    }
}
