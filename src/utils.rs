/// Calendar helpers shared by the histogram and season-text predictors
use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::models::BloomPrediction;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Pick the nearest upcoming month out of `candidates` (ascending, 1-12)
///
/// The first candidate on or after the current month wins; when every
/// candidate is earlier in the year, wrap to the first one in the next year.
/// Returns `None` for an empty slice or an invalid month.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use bloomwatch_service::utils::next_occurrence;
///
/// let now = Utc.with_ymd_and_hms(2025, 11, 10, 0, 0, 0).unwrap();
/// let next = next_occurrence(&[3, 9], now).unwrap();
/// assert_eq!(next.month, 3);
/// assert_eq!(next.days_until, 111);
/// ```
pub fn next_occurrence(candidates: &[u32], now: DateTime<Utc>) -> Option<BloomPrediction> {
    let earliest = *candidates.first()?;
    let current_month = now.month();

    let next_month = candidates
        .iter()
        .copied()
        .find(|&month| month >= current_month)
        .unwrap_or(earliest);

    let year = if next_month >= current_month {
        now.year()
    } else {
        now.year() + 1
    };

    let target = month_start(year, next_month)?;

    Some(BloomPrediction {
        month: next_month,
        days_until: days_until(target, now),
    })
}

/// First instant of `year`-`month`-01 in UTC
pub fn month_start(year: i32, month: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single()
}

/// Whole days from `now` to `target`, rounded up and never negative
pub fn days_until(target: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let millis = (target - now).num_milliseconds();
    if millis <= 0 {
        return 0;
    }

    let days = (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;
    u32::try_from(days).unwrap_or(u32::MAX)
}
