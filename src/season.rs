//! Portuguese free-text flowering season heuristic.
//!
//! Catalog entries describe flowering loosely ("floração: abr–jun",
//! "primavera e verão"). This module turns that text into calendar months.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::models::BloomPrediction;
use crate::utils;

/// Three-letter month abbreviations, January first
const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

const SEASONS: [(&str, [u32; 3]); 4] = [
    ("primavera", [9, 10, 11]),
    ("verão", [12, 1, 2]),
    ("inverno", [6, 7, 8]),
    ("outono", [3, 4, 5]),
];

static MONTH_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    let months = MONTH_ABBREVIATIONS.join("|");
    Regex::new(&format!(r"({months})\s*[–-]\s*({months})"))
        .expect("month range pattern is valid")
});

/// Months mentioned in `text`, de-duplicated and ascending
///
/// Abbreviations and season names match anywhere in the text. The first
/// `abbr-abbr` range (hyphen or en dash) adds every month from start to end
/// inclusive, wrapping past December.
pub fn months_from_text(text: &str) -> Vec<u32> {
    let normalized = text.to_lowercase();
    let mut found = BTreeSet::new();

    for (month, abbreviation) in (1..=12).zip(MONTH_ABBREVIATIONS) {
        if normalized.contains(abbreviation) {
            found.insert(month);
        }
    }

    for (season, months) in SEASONS {
        if normalized.contains(season) {
            found.extend(months);
        }
    }

    if let Some(captures) = MONTH_RANGE.captures(&normalized) {
        let start = month_index(&captures[1]);
        let end = month_index(&captures[2]);
        if let (Some(start), Some(end)) = (start, end) {
            found.extend(range_wrapping(start, end));
        }
    }

    found.into_iter().collect()
}

/// Next flowering onset implied by `text`, or `None` when no month is named
pub fn next_bloom_from_text(text: &str, now: DateTime<Utc>) -> Option<BloomPrediction> {
    let months = months_from_text(text);
    utils::next_occurrence(&months, now)
}

fn month_index(abbreviation: &str) -> Option<usize> {
    MONTH_ABBREVIATIONS
        .iter()
        .position(|&candidate| candidate == abbreviation)
}

/// Month numbers from `start` to `end` (0-based indices), wrapping mod 12
fn range_wrapping(start: usize, end: usize) -> Vec<u32> {
    let mut months = Vec::new();
    for offset in 0..12 {
        let index = (start + offset) % 12;
        months.push(index as u32 + 1);
        if index == end {
            break;
        }
    }
    months
}
