use actix_web::{web, HttpResponse, Responder};
use crate::core::{require_category, CatalogStore, Matcher};
use crate::error::ValidationError;
use crate::models::{
    ErrorResponse, HealthResponse, MatchMode, MatchOutfitsRequest, MatchOutfitsResponse, Occasion,
};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub matcher: Matcher,
}

/// Configure all outfit-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/outfits/match", web::post().to(match_outfits));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let catalog = state.catalog.snapshot();

    // An empty matrix can only ever return empty slots
    let status = if catalog.is_empty() { "degraded" } else { "healthy" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        catalog_version: catalog.version().to_string(),
        catalog_entries: catalog.len(),
    })
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

/// Match outfits endpoint
///
/// POST /api/v1/outfits/match
///
/// Request body:
/// ```json
/// {
///   "occasion": "wedding",
///   "mode": "personal",
///   "profile": {
///     "skinTone": "warm",
///     "bodyType": "rectangle",
///     "contrast": "medium",
///     "lifestyle": ["work", "social"]
///   },
///   "excludeIds": ["wedding_safe_01"]
/// }
/// ```
async fn match_outfits(
    state: web::Data<AppState>,
    req: web::Json<MatchOutfitsRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match_outfits request: field_errors={:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let parsed: Result<(Occasion, MatchMode), ValidationError> = require_category("occasion", &req.occasion)
        .and_then(|occasion| Ok((occasion, require_category("mode", &req.mode)?)));
    let (occasion, mode) = match parsed {
        Ok(parsed) => parsed,
        Err(e) => return bad_request("Invalid request", e.to_string()),
    };

    let request_id = uuid::Uuid::new_v4().to_string();
    let span = tracing::info_span!("match_outfits", %request_id, %occasion, %mode);
    let _guard = span.enter();

    // Hold one snapshot for the whole request so a reload is never observed halfway
    let catalog = state.catalog.snapshot();

    let request = match state
        .matcher
        .prepare(&catalog, occasion, &req.profile, mode, &req.exclude_ids)
    {
        Ok(request) => request,
        Err(e) => {
            tracing::info!(field = e.field(), "Rejected style profile: {}", e);
            return bad_request("Invalid style profile", e.to_string());
        }
    };

    let outcome = state.matcher.find_outfits(&catalog, &request);
    let has_alternatives = state
        .matcher
        .has_alternatives(&catalog, &request, &outcome.result);

    tracing::info!(
        "Returning {:?} for {} (from {} candidates, {} disqualified)",
        outcome.result.outfit_ids(),
        occasion,
        outcome.eligible_candidates,
        outcome.disqualified_candidates
    );

    HttpResponse::Ok().json(MatchOutfitsResponse {
        request_id,
        occasion: occasion.to_string(),
        mode: mode.to_string(),
        catalog_version: catalog.version().to_string(),
        outfits: outcome.result,
        has_alternatives,
        total_candidates: outcome.total_candidates,
    })
}
