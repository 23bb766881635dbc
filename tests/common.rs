#![allow(dead_code)]

use std::time::Duration;

use bloomwatch_service::catalog::{SpeciesCatalog, SpeciesRecord};
use bloomwatch_service::fetcher::HistogramFetcher;
use bloomwatch_service::services::{PhenologyService, SpeciesService};
use mockito::Matcher;

pub const HISTOGRAM_PATH: &str = "/observations/histogram";

pub fn species(id: &str, sci: &str, biome: Option<&str>, season: Option<&str>) -> SpeciesRecord {
    SpeciesRecord {
        id: id.to_string(),
        common: id.to_string(),
        sci: sci.to_string(),
        emoji: None,
        biome: biome.map(str::to_string),
        season: season.map(str::to_string),
        summary: None,
        colors: None,
    }
}

/// Small in-memory catalog shared by the integration tests
pub fn test_catalog() -> SpeciesCatalog {
    SpeciesCatalog::from_records(vec![
        species(
            "ipe-amarelo",
            "Handroanthus albus",
            Some("Cerrado"),
            Some("floração: jul–set"),
        ),
        species(
            "flor-de-maio",
            "Schlumbergera truncata",
            Some("Mata Atlântica"),
            Some("floração: abr–jun"),
        ),
        species("caliandra", "Calliandra dysantha", Some("Cerrado"), Some("")),
        species("sem-dados", "Incognita nullius", None, None),
    ])
}

/// iNaturalist-style histogram body with the given month counts
///
/// Months not listed are reported as zero, as the real API does.
pub fn histogram_body(counts: &[(u32, u64)]) -> String {
    let month_of_year: serde_json::Map<String, serde_json::Value> = (1..=12u32)
        .map(|month| {
            let count = counts
                .iter()
                .find(|(m, _)| *m == month)
                .map(|(_, c)| *c)
                .unwrap_or(0);
            (month.to_string(), serde_json::json!(count))
        })
        .collect();

    serde_json::json!({
        "total_results": 12,
        "page": 1,
        "per_page": 12,
        "results": { "month_of_year": month_of_year }
    })
    .to_string()
}

pub fn taxon_query(taxon_name: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("taxon_name".into(), taxon_name.into()),
        Matcher::UrlEncoded("verifiable".into(), "true".into()),
        Matcher::UrlEncoded("interval".into(), "month_of_year".into()),
        Matcher::UrlEncoded("term_id".into(), "12".into()),
        Matcher::UrlEncoded("term_value_id".into(), "13".into()),
    ])
}

pub fn test_fetcher(base_url: String) -> HistogramFetcher {
    HistogramFetcher::new(base_url, Duration::from_secs(5), Duration::ZERO)
}

pub fn phenology_service(base_url: String) -> PhenologyService {
    PhenologyService::new(test_catalog(), test_fetcher(base_url), 200)
}

pub fn species_service() -> SpeciesService {
    SpeciesService::new(test_catalog())
}
