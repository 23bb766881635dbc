use moka::future::Cache;
use reqwest::Url;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::fetch_error::FetchError;
use crate::models::MonthHistogram;

/// iNaturalist controlled term "Plant Phenology"
const PHENOLOGY_TERM_ID: &str = "12";
/// Value "Flowering" for the plant phenology term
const FLOWERING_TERM_VALUE_ID: &str = "13";

const CACHE_CAPACITY: u64 = 1_000;

/// Histogram endpoint response; only the month-of-year path is read
#[derive(Debug, Deserialize)]
struct HistogramResponse {
    results: Option<HistogramResults>,
}

#[derive(Debug, Deserialize)]
struct HistogramResults {
    month_of_year: Option<HashMap<String, u64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramQuery {
    pub taxon_name: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius_km: u32,
}

impl HistogramQuery {
    pub fn new(taxon_name: impl Into<String>, radius_km: u32) -> Self {
        Self {
            taxon_name: taxon_name.into(),
            lat: None,
            lng: None,
            radius_km,
        }
    }

    pub fn near(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("taxon_name", self.taxon_name.clone()),
            ("verifiable", "true".to_string()),
            ("interval", "month_of_year".to_string()),
            ("term_id", PHENOLOGY_TERM_ID.to_string()),
            ("term_value_id", FLOWERING_TERM_VALUE_ID.to_string()),
        ];

        if let (Some(lat), Some(lng)) = (self.lat, self.lng) {
            params.push(("lat", lat.to_string()));
            params.push(("lng", lng.to_string()));
            params.push(("radius", self.radius_km.to_string()));
        }

        params
    }
}

/// Client for the observation histogram endpoint
///
/// Successful responses are cached per request URL; failures never are.
#[derive(Clone)]
pub struct HistogramFetcher {
    client: reqwest::Client,
    base_url: String,
    cache: Option<Cache<String, MonthHistogram>>,
}

impl HistogramFetcher {
    /// `cache_ttl` of zero disables caching
    pub fn new(base_url: String, timeout: Duration, cache_ttl: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        let cache = (!cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(CACHE_CAPACITY)
                .time_to_live(cache_ttl)
                .build()
        });

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache,
        }
    }

    pub fn histogram_url(&self, query: &HistogramQuery) -> Result<Url, FetchError> {
        let endpoint = format!("{}/observations/histogram", self.base_url);
        Url::parse_with_params(&endpoint, query.query_params())
            .map_err(|e| FetchError::InvalidUrl(format!("{endpoint}: {e}")))
    }

    #[instrument(skip(self), fields(taxon = %query.taxon_name))]
    pub async fn fetch_histogram(&self, query: &HistogramQuery) -> Result<MonthHistogram, FetchError> {
        let url = self.histogram_url(query)?;

        if let Some(cache) = &self.cache {
            if let Some(histogram) = cache.get(url.as_str()).await {
                debug!("Histogram cache hit");
                return Ok(histogram);
            }
        }

        debug!("Sending HTTP request to {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        debug!("Received HTTP response with status: {}", status);

        if !status.is_success() {
            warn!("Histogram request for {} failed with status {}", query.taxon_name, status);
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        debug!("Retrieved histogram body, size: {} bytes", body.len());

        let histogram = parse_histogram(&body)?;
        debug!(
            "Parsed histogram with {} months, {} observations",
            histogram.to_array().iter().filter(|&&c| c > 0).count(),
            histogram.total()
        );

        if let Some(cache) = &self.cache {
            cache.insert(url.to_string(), histogram.clone()).await;
        }

        Ok(histogram)
    }
}

/// Extract `results.month_of_year`; a missing path is an empty histogram
fn parse_histogram(body: &str) -> Result<MonthHistogram, FetchError> {
    let response: HistogramResponse = serde_json::from_str(body)?;
    let raw = response
        .results
        .and_then(|results| results.month_of_year)
        .unwrap_or_default();
    Ok(MonthHistogram::from_upstream(raw))
}
