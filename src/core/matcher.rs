use crate::core::{
    catalog::Catalog,
    filters::filter_candidates,
    profile::normalize_profile,
    scoring::score_candidates,
    selector::{assemble_result, select_winners},
};
use crate::error::{InvalidWeight, MatchError, ValidationError};
use crate::models::{MatchMode, MatchRequest, MatchResult, Occasion, RawStyleProfile, ScoringWeights};

/// Result of the matching process
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub result: MatchResult,
    pub total_candidates: usize,
    pub eligible_candidates: usize,
    pub disqualified_candidates: usize,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Occasion filter (hard constraint, plus caller exclusions)
/// 2. Fit scoring with the Avoid floor
/// 3. Per-tier selection with id tie-break
///
/// Holds no catalog state of its own; every call reads the catalog it is
/// given, so concurrent calls over one snapshot need no locking.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    /// Build a matcher from weights already checked by the caller,
    /// e.g. through `WeightsConfig::to_weights`
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Build a matcher, rejecting weights that are negative or not finite
    pub fn try_new(weights: ScoringWeights) -> Result<Self, InvalidWeight> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Pick one outfit per tier for the request
    ///
    /// # Arguments
    /// * `catalog` - The validated outfit matrix
    /// * `request` - Occasion, normalized profile and mode
    ///
    /// # Returns
    /// MatchOutcome with the per-tier result and candidate counts
    pub fn find_outfits(&self, catalog: &Catalog, request: &MatchRequest) -> MatchOutcome {
        let candidates = filter_candidates(catalog, request);
        let scored = score_candidates(&candidates, &request.profile, request.mode, &self.weights);
        let disqualified_candidates = scored.iter().filter(|c| c.disqualified).count();

        let winners = select_winners(&scored);
        let result = assemble_result(&winners);

        tracing::debug!(
            occasion = %request.occasion,
            mode = %request.mode,
            eligible = candidates.len(),
            disqualified = disqualified_candidates,
            picks = ?result.outfit_ids(),
            "Matched outfits"
        );

        MatchOutcome {
            result,
            total_candidates: catalog.len(),
            eligible_candidates: candidates.len(),
            disqualified_candidates,
        }
    }

    /// Whether a different set of outfits could still be offered once the
    /// current picks are excluded as well
    pub fn has_alternatives(&self, catalog: &Catalog, request: &MatchRequest, current: &MatchResult) -> bool {
        let next = request.clone().excluding(current.outfit_ids());
        !self.find_outfits(catalog, &next).result.is_empty()
    }

    /// Build a request from raw onboarding data, filling unset fields from
    /// the catalog's defaults
    pub fn prepare(
        &self,
        catalog: &Catalog,
        occasion: Occasion,
        raw: &RawStyleProfile,
        mode: MatchMode,
        exclude_ids: &[String],
    ) -> Result<MatchRequest, ValidationError> {
        let profile = normalize_profile(raw, catalog.profile_defaults())?;
        Ok(MatchRequest::new(occasion, profile, mode).excluding(exclude_ids.iter().cloned()))
    }

    /// Normalize raw onboarding data and match in one call
    pub fn match_raw(
        &self,
        catalog: &Catalog,
        occasion: Occasion,
        raw: &RawStyleProfile,
        mode: MatchMode,
        exclude_ids: &[String],
    ) -> Result<MatchOutcome, MatchError> {
        let request = self.prepare(catalog, occasion, raw, mode, exclude_ids)?;
        Ok(self.find_outfits(catalog, &request))
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
