use chrono::{DateTime, Utc};

use crate::models::{BloomPrediction, MonthHistogram};
use crate::utils;

/// Every month whose count equals the histogram maximum, ascending
///
/// Empty when all twelve months are zero.
pub fn peak_months(histogram: &MonthHistogram) -> Vec<u32> {
    let counts = histogram.to_array();
    let max = counts.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return Vec::new();
    }

    (1..=12)
        .zip(counts)
        .filter(|&(_, count)| count == max)
        .map(|(month, _)| month)
        .collect()
}

/// Next peak month relative to `now`
///
/// Tied maxima are all candidates; the nearest one on or after the current
/// month is chosen, otherwise the earliest peak of next year.
pub fn next_bloom_from_histogram(
    histogram: &MonthHistogram,
    now: DateTime<Utc>,
) -> Option<BloomPrediction> {
    let peaks = peak_months(histogram);
    utils::next_occurrence(&peaks, now)
}
