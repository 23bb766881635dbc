use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use utoipa::ToSchema;

/// Observation counts bucketed by month of year (1-12).
///
/// Months absent from the map count as zero. Keys outside 1-12 never make it in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthHistogram(BTreeMap<u32, u64>);

impl MonthHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from upstream data keyed by stringified month number
    ///
    /// Unparseable or out-of-range keys are dropped.
    pub fn from_upstream(raw: HashMap<String, u64>) -> Self {
        let counts = raw
            .into_iter()
            .filter_map(|(key, count)| {
                let month = key.trim().parse::<u32>().ok()?;
                (1..=12).contains(&month).then_some((month, count))
            })
            .collect();
        Self(counts)
    }

    pub fn set(&mut self, month: u32, count: u64) {
        if (1..=12).contains(&month) {
            self.0.insert(month, count);
        }
    }

    pub fn count(&self, month: u32) -> u64 {
        self.0.get(&month).copied().unwrap_or(0)
    }

    /// Dense 12-entry array, index 0 = January
    pub fn to_array(&self) -> [u64; 12] {
        let mut counts = [0; 12];
        for (month, slot) in (1..=12).zip(counts.iter_mut()) {
            *slot = self.count(month);
        }
        counts
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(u32, u64)> for MonthHistogram {
    fn from_iter<I: IntoIterator<Item = (u32, u64)>>(iter: I) -> Self {
        let mut histogram = Self::new();
        for (month, count) in iter {
            histogram.set(month, count);
        }
        histogram
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BloomPrediction {
    /// Month of next flowering onset (1-12)
    pub month: u32,
    /// Whole days from the request instant to the first day of `month`
    pub days_until: u32,
}

/// Where a prediction came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PredictionSource {
    #[serde(rename = "inat")]
    Histogram,
    #[serde(rename = "season")]
    SeasonText,
    #[serde(rename = "none")]
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    pub species_id: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Overrides the service's default search radius
    pub radius_km: Option<u32>,
}

impl PredictionRequest {
    pub fn new(species_id: impl Into<String>) -> Self {
        Self {
            species_id: species_id.into(),
            lat: None,
            lng: None,
            radius_km: None,
        }
    }

    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self
    }

    /// Both coordinates, or nothing. Non-finite values count as missing.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some((lat, lng)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub id: String,
    pub sci: String,
    /// Month number -> flowering observation count
    #[schema(value_type = Object)]
    pub histogram: MonthHistogram,
    pub next_bloom: Option<BloomPrediction>,
    pub source: PredictionSource,
}
