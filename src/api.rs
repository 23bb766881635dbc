use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::catalog::{CatalogError, SpeciesRecord, SpeciesSummary};
use crate::models::{BloomPrediction, PredictionRequest, PredictionResult, PredictionSource};
use crate::pollination::{
    Drainage, Light, PollinationInfo, Pollinator, SoilSpec, SoilTexture,
};
use crate::services::{PhenologyError, PhenologyService, SpeciesService};

/// Prediction responses may be reused for an hour
pub const PHENOLOGY_CACHE_CONTROL: &str = "public, max-age=3600";

#[derive(Clone)]
pub struct AppState {
    pub phenology_service: PhenologyService,
    pub species_service: SpeciesService,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

/// Query string for the phenology endpoint
///
/// Coordinates are kept as raw strings; a blank or non-numeric value is
/// treated as absent rather than rejecting the request.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PhenologyParams {
    /// Species identifier from the catalog
    pub id: Option<String>,
    /// Latitude, only used together with `lng`
    pub lat: Option<String>,
    /// Longitude, only used together with `lat`
    pub lng: Option<String>,
}

impl PhenologyParams {
    fn coordinate(raw: Option<&str>) -> Option<f64> {
        raw.map(str::trim)
            .filter(|value| !value.is_empty())
            .and_then(|value| value.parse::<f64>().ok())
            .filter(|value| value.is_finite())
    }

    pub fn to_request(&self) -> Option<PredictionRequest> {
        let id = self.id.as_deref().filter(|id| !id.is_empty())?;
        let mut request = PredictionRequest::new(id);

        let lat = Self::coordinate(self.lat.as_deref());
        let lng = Self::coordinate(self.lng.as_deref());
        if let (Some(lat), Some(lng)) = (lat, lng) {
            request = request.with_coordinates(lat, lng);
        }

        Some(request)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, get_phenology, list_species, get_species, get_pollination),
    components(schemas(
        HealthResponse,
        ErrorResponse,
        PredictionResult,
        BloomPrediction,
        PredictionSource,
        SpeciesRecord,
        SpeciesSummary,
        PollinationInfo,
        SoilSpec,
        SoilTexture,
        Drainage,
        Light,
        Pollinator
    )),
    tags((name = "bloomwatch", description = "Flowering predictions for Brazilian species"))
)]
pub struct ApiDoc;

pub fn generate_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health))
        .route("/phenology", get(get_phenology))
        .route("/species", get(list_species))
        .route("/species/{id}", get(get_species))
        .route("/species/{id}/pollination", get(get_pollination))
        .with_state(state);

    Router::new().nest("/api/v1", api_routes)
}

#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
#[instrument(skip(_state))]
async fn health(State(_state): State<AppState>) -> impl IntoResponse {
    debug!("Health check requested");
    let response = HealthResponse {
        status: "healthy".to_string(),
    };
    (StatusCode::OK, Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/phenology",
    params(PhenologyParams),
    responses(
        (status = 200, description = "Next bloom prediction (may be null)", body = PredictionResult),
        (status = 400, description = "Missing species id", body = ErrorResponse),
        (status = 404, description = "Unknown species id", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
async fn get_phenology(
    State(state): State<AppState>,
    Query(params): Query<PhenologyParams>,
) -> Result<impl IntoResponse, ApiError> {
    let request = params.to_request().ok_or_else(|| {
        warn!("Phenology request without species id");
        api_error(StatusCode::BAD_REQUEST, "missing id")
    })?;

    debug!(
        "Predicting bloom for {} (coordinates: {:?})",
        request.species_id,
        request.coordinates()
    );

    let result = state
        .phenology_service
        .predict(&request)
        .await
        .map_err(|e| match e {
            PhenologyError::Validation(message) => {
                warn!("Rejected phenology request: {}", message);
                api_error(StatusCode::BAD_REQUEST, &message)
            }
            PhenologyError::NotFound(id) => {
                warn!("Species {} not found", id);
                api_error(StatusCode::NOT_FOUND, "unknown id")
            }
            PhenologyError::Catalog(e) => {
                error!("Failed to load species catalog: {}", e);
                api_error(StatusCode::INTERNAL_SERVER_ERROR, "catalog unavailable")
            }
        })?;

    info!(
        "Prediction for {} from source {:?}: {:?}",
        result.id, result.source, result.next_bloom
    );

    Ok((
        [(header::CACHE_CONTROL, PHENOLOGY_CACHE_CONTROL)],
        Json(result),
    ))
}

fn catalog_error(id: &str, e: CatalogError) -> ApiError {
    match e {
        CatalogError::NotFound(_) => {
            warn!("Species {} not found", id);
            api_error(StatusCode::NOT_FOUND, "unknown id")
        }
        other => {
            error!("Failed to load species catalog: {}", other);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "catalog unavailable")
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/species",
    responses((status = 200, description = "All catalog species", body = [SpeciesSummary]))
)]
#[instrument(skip(state))]
async fn list_species(
    State(state): State<AppState>,
) -> Result<Json<Vec<SpeciesSummary>>, ApiError> {
    let species = state.species_service.list_species().await.map_err(|e| {
        error!("Failed to list species: {}", e);
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "catalog unavailable")
    })?;

    info!("Listed {} species", species.len());
    Ok(Json(species))
}

#[utoipa::path(
    get,
    path = "/api/v1/species/{id}",
    params(("id" = String, Path, description = "Species identifier")),
    responses(
        (status = 200, description = "Species record", body = SpeciesRecord),
        (status = 404, description = "Unknown species id", body = ErrorResponse)
    )
)]
#[instrument(skip(state), fields(id = %id))]
async fn get_species(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SpeciesRecord>, ApiError> {
    let species = state
        .species_service
        .get_species(&id)
        .await
        .map_err(|e| catalog_error(&id, e))?;

    Ok(Json(species))
}

#[utoipa::path(
    get,
    path = "/api/v1/species/{id}/pollination",
    params(("id" = String, Path, description = "Species identifier")),
    responses(
        (status = 200, description = "Soil and pollinator hints", body = PollinationInfo),
        (status = 404, description = "Unknown species id", body = ErrorResponse)
    )
)]
#[instrument(skip(state), fields(id = %id))]
async fn get_pollination(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PollinationInfo>, ApiError> {
    let info = state
        .species_service
        .get_pollination(&id)
        .await
        .map_err(|e| catalog_error(&id, e))?;

    debug!("Pollination hints for {}: {:?}", id, info.likely_pollinators);
    Ok(Json(info))
}
