use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use crate::catalog::{CatalogError, SpeciesCatalog, SpeciesRecord};
use crate::fetch_error::FetchError;
use crate::fetcher::{HistogramFetcher, HistogramQuery};
use crate::histogram;
use crate::models::{
    BloomPrediction, MonthHistogram, PredictionRequest, PredictionResult, PredictionSource,
};
use crate::season;

pub const DEFAULT_RADIUS_KM: u32 = 200;

#[derive(Debug, thiserror::Error)]
pub enum PhenologyError {
    #[error("Invalid request: {0}")]
    Validation(String),
    #[error("Unknown species: {0}")]
    NotFound(String),
    #[error("Species catalog unavailable: {0}")]
    Catalog(CatalogError),
}

impl From<CatalogError> for PhenologyError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => PhenologyError::NotFound(id),
            other => PhenologyError::Catalog(other),
        }
    }
}

/// Result of the observation-data stage of a prediction
#[derive(Debug)]
pub enum HistogramOutcome {
    /// Histogram fetched and it has a peak
    Resolved {
        histogram: MonthHistogram,
        prediction: BloomPrediction,
    },
    /// Histogram fetched but empty or all zero
    Inconclusive { histogram: MonthHistogram },
    /// Upstream could not be reached or answered with an error
    Unavailable(FetchError),
}

#[derive(Clone)]
pub struct PhenologyService {
    catalog: SpeciesCatalog,
    fetcher: HistogramFetcher,
    radius_km: u32,
}

impl PhenologyService {
    pub fn new(catalog: SpeciesCatalog, fetcher: HistogramFetcher, radius_km: u32) -> Self {
        Self {
            catalog,
            fetcher,
            radius_km,
        }
    }

    pub async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, PhenologyError> {
        self.predict_at(request, Utc::now()).await
    }

    /// Predict the next bloom relative to `now`
    ///
    /// Observation data is tried first; the catalog's season text is only
    /// consulted when that yields nothing. Upstream failures never fail the
    /// request, only an invalid or unknown species id does.
    #[instrument(skip(self), fields(species_id = %request.species_id))]
    pub async fn predict_at(
        &self,
        request: &PredictionRequest,
        now: DateTime<Utc>,
    ) -> Result<PredictionResult, PhenologyError> {
        let species_id = request.species_id.as_str();
        if species_id.is_empty() {
            return Err(PhenologyError::Validation("missing id".to_string()));
        }

        let species = self.catalog.lookup(species_id).await?;
        debug!("Resolved species {} -> {}", species.id, species.sci);

        let histogram = match self.histogram_outcome(&species, request, now).await {
            HistogramOutcome::Resolved {
                histogram,
                prediction,
            } => {
                info!(
                    "Histogram prediction for {}: month {} in {} days",
                    species.id, prediction.month, prediction.days_until
                );
                return Ok(Self::result(
                    species,
                    histogram,
                    Some(prediction),
                    PredictionSource::Histogram,
                ));
            }
            HistogramOutcome::Inconclusive { histogram } => {
                debug!("Histogram for {} has no peak, trying season text", species.id);
                histogram
            }
            HistogramOutcome::Unavailable(e) => {
                warn!(
                    "Histogram unavailable for {}, falling back to season text: {}",
                    species.id, e
                );
                MonthHistogram::new()
            }
        };

        let (next_bloom, source) = match season::next_bloom_from_text(species.season_text(), now) {
            Some(prediction) => {
                info!(
                    "Season text prediction for {}: month {} in {} days",
                    species.id, prediction.month, prediction.days_until
                );
                (Some(prediction), PredictionSource::SeasonText)
            }
            None => {
                info!("No bloom prediction available for {}", species.id);
                (None, PredictionSource::None)
            }
        };

        Ok(Self::result(species, histogram, next_bloom, source))
    }

    /// Fetch and resolve the observation histogram for `species`
    pub async fn histogram_outcome(
        &self,
        species: &SpeciesRecord,
        request: &PredictionRequest,
        now: DateTime<Utc>,
    ) -> HistogramOutcome {
        let mut query =
            HistogramQuery::new(species.sci.clone(), request.radius_km.unwrap_or(self.radius_km));
        if let Some((lat, lng)) = request.coordinates() {
            query = query.near(lat, lng);
        }

        match self.fetcher.fetch_histogram(&query).await {
            Ok(histogram) => match histogram::next_bloom_from_histogram(&histogram, now) {
                Some(prediction) => HistogramOutcome::Resolved {
                    histogram,
                    prediction,
                },
                None => HistogramOutcome::Inconclusive { histogram },
            },
            Err(e) => HistogramOutcome::Unavailable(e),
        }
    }

    fn result(
        species: SpeciesRecord,
        histogram: MonthHistogram,
        next_bloom: Option<BloomPrediction>,
        source: PredictionSource,
    ) -> PredictionResult {
        PredictionResult {
            id: species.id,
            sci: species.sci,
            histogram,
            next_bloom,
            source,
        }
    }
}
