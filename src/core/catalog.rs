use crate::core::profile::{normalize_token, ProfileDefaults};
use crate::error::CatalogError;
use crate::models::{BodyType, Category, Contrast, FitQuality, MatrixOutfitEntry, SkinTone};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Matrix compiled into the binary, used when no catalog path is configured
const EMBEDDED_MATRIX: &str = include_str!("../../data/matrix.toml");

/// On-disk shape of a catalog file
#[derive(Debug, Deserialize)]
struct CatalogFile {
    version: String,
    #[serde(default)]
    outfits: Vec<MatrixOutfitEntry>,
}

/// A validated, immutable outfit matrix
#[derive(Debug, Clone)]
pub struct Catalog {
    version: String,
    entries: Vec<MatrixOutfitEntry>,
    defaults: ProfileDefaults,
}

impl Catalog {
    /// Build a catalog, rejecting it as a whole if any entry is malformed
    pub fn new(version: impl Into<String>, mut entries: Vec<MatrixOutfitEntry>) -> Result<Self, CatalogError> {
        for entry in &mut entries {
            entry.lifestyle_tags = normalize_tags(&entry.id, &entry.lifestyle_tags)?;
        }

        let mut seen = HashSet::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            if entry.id.trim().is_empty() {
                return Err(CatalogError::EmptyId { index });
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
            if entry.occasions.is_empty() {
                return Err(CatalogError::NoOccasions { id: entry.id.clone() });
            }
            check_coverage::<SkinTone>(&entry.id, "skin_tone", &entry.skin_tone_fit)?;
            check_coverage::<Contrast>(&entry.id, "contrast", &entry.contrast_fit)?;
            check_coverage::<BodyType>(&entry.id, "body_type", &entry.body_type_fit)?;
        }

        let defaults = ProfileDefaults::for_entries(&entries);

        Ok(Self {
            version: version.into(),
            entries,
            defaults,
        })
    }

    /// The matrix shipped with the service
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_toml_str(EMBEDDED_MATRIX)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(source)?;
        Self::new(file.version, file.outfits)
    }

    pub fn from_json_str(source: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(source)?;
        Self::new(file.version, file.outfits)
    }

    /// Load a `.toml` or `.json` catalog file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&source),
            Some("json") => Self::from_json_str(&source),
            _ => Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn entries(&self) -> &[MatrixOutfitEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&MatrixOutfitEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn profile_defaults(&self) -> &ProfileDefaults {
        &self.defaults
    }
}

/// Catalog tags use the same token form as profile tags so they can be compared
fn normalize_tags(id: &str, tags: &BTreeSet<String>) -> Result<BTreeSet<String>, CatalogError> {
    tags.iter()
        .map(|tag| {
            normalize_token(tag).ok_or_else(|| CatalogError::BlankLifestyleTag { id: id.to_string() })
        })
        .collect()
}

fn check_coverage<C: Category>(
    id: &str,
    dimension: &'static str,
    fit: &BTreeMap<C, FitQuality>,
) -> Result<(), CatalogError> {
    match C::ALL.iter().find(|&&category| !fit.contains_key(&category)) {
        Some(missing) => Err(CatalogError::IncompleteFit {
            id: id.to_string(),
            dimension,
            category: missing.as_str(),
        }),
        None => Ok(()),
    }
}

/// Shared handle to the current catalog snapshot.
///
/// Readers take an `Arc` and keep it for the whole evaluation; `replace`
/// swaps in a new snapshot without touching the one in flight.
#[derive(Debug)]
pub struct CatalogStore {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn snapshot(&self) -> Arc<Catalog> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&*guard),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    /// Swap in a new catalog, returning the previous snapshot
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        tracing::info!(
            from = %guard.version(),
            to = %next.version(),
            entries = next.len(),
            "Replacing catalog snapshot"
        );
        std::mem::replace(&mut *guard, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Occasion, OutfitItems, Tier};

    fn create_entry(id: &str) -> MatrixOutfitEntry {
        MatrixOutfitEntry {
            id: id.to_string(),
            title: "Test".to_string(),
            occasions: [Occasion::Wedding].into_iter().collect(),
            tier: Tier::Safe,
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

    #[test]
    fn test_valid_catalog() {
        let catalog = Catalog::new("v1", vec![create_entry("a"), create_entry("b")]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.version(), "v1");
        assert!(catalog.get("b").is_some());
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = Catalog::new("v0", vec![]).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.profile_defaults(), &ProfileDefaults::default());
    }

    #[test]
    fn test_rejects_empty_occasions() {
        let mut entry = create_entry("a");
        entry.occasions.clear();

        let err = Catalog::new("v1", vec![entry]).unwrap_err();
        assert!(matches!(err, CatalogError::NoOccasions { ref id } if id == "a"));
    }

    #[test]
    fn test_rejects_incomplete_fit_mapping() {
        let mut entry = create_entry("a");
        entry.contrast_fit.remove(&Contrast::High);

        let err = Catalog::new("v1", vec![create_entry("ok"), entry]).unwrap_err();
        match err {
            CatalogError::IncompleteFit { id, dimension, category } => {
                assert_eq!(id, "a");
                assert_eq!(dimension, "contrast");
                assert_eq!(category, "high");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_duplicate_and_empty_ids() {
        let err = Catalog::new("v1", vec![create_entry("a"), create_entry("a")]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(ref id) if id == "a"));

        let err = Catalog::new("v1", vec![create_entry(" ")]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyId { index: 0 }));
    }

    #[test]
    fn test_lifestyle_tags_share_profile_token_form() {
        use crate::core::filters::calculate_lifestyle_score;
        use crate::core::profile::normalize_profile;
        use crate::models::RawStyleProfile;

        let mut entry = create_entry("a");
        entry.lifestyle_tags = ["Night Out".to_string(), "work_wear".to_string()].into_iter().collect();
        let catalog = Catalog::new("v1", vec![entry]).unwrap();

        let tags: Vec<_> = catalog.entries()[0].lifestyle_tags.iter().cloned().collect();
        assert_eq!(tags, vec!["night-out", "work-wear"]);

        let raw = RawStyleProfile {
            lifestyle: vec!["Night Out".to_string()],
            ..Default::default()
        };
        let profile = normalize_profile(&raw, catalog.profile_defaults()).unwrap();
        let (factor, shared) = calculate_lifestyle_score(&catalog.entries()[0], &profile);

        assert_eq!(factor, 0.5);
        assert_eq!(shared, vec!["night-out".to_string()]);
    }

    #[test]
    fn test_rejects_blank_lifestyle_tag() {
        let mut entry = create_entry("a");
        entry.lifestyle_tags.insert("  ".to_string());

        let err = Catalog::new("v1", vec![entry]).unwrap_err();
        assert!(matches!(err, CatalogError::BlankLifestyleTag { ref id } if id == "a"));
    }

    #[test]
    fn test_embedded_matrix_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert!(!catalog.is_empty());
        for occasion in [Occasion::Wedding, Occasion::Work, Occasion::DateNight] {
            for tier in Tier::ALL {
                assert!(
                    catalog
                        .entries()
                        .iter()
                        .any(|e| e.suits(occasion) && e.tier == tier),
                    "no {tier:?} entry for {occasion}"
                );
            }
        }
    }

    #[test]
    fn test_json_catalog_rejects_unknown_category() {
        let source = r#"{
            "version": "v1",
            "outfits": [{
                "id": "x",
                "occasions": ["wedding"],
                "tier": "safe",
                "skin_tone_fit": {"warm": "ideal", "cool": "good", "neutral": "good", "olive": "good"},
                "contrast_fit": {"low": "good", "medium": "good", "high": "good"},
                "body_type_fit": {"hourglass": "good", "rectangle": "good", "triangle": "good", "inverted-triangle": "good", "oval": "good"},
                "items": {"top": "a", "bottom": "b", "shoes": "c"},
                "image_url": "/x.jpg",
                "reason": "r"
            }]
        }"#;

        assert!(matches!(Catalog::from_json_str(source), Err(CatalogError::Json(_))));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let path = std::env::temp_dir().join("outfit-matrix-catalog.yaml");
        std::fs::write(&path, "version: v1").unwrap();

        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedFormat(_)));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_store_swaps_whole_snapshot() {
        let store = CatalogStore::new(Catalog::new("v1", vec![create_entry("a")]).unwrap());
        let in_flight = store.snapshot();

        let previous = store.replace(Catalog::new("v2", vec![create_entry("b")]).unwrap());

        assert_eq!(previous.version(), "v1");
        assert_eq!(in_flight.version(), "v1");
        assert!(in_flight.get("a").is_some());
        assert_eq!(store.snapshot().version(), "v2");
    }
}
