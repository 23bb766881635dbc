use std::env;
use std::time::Duration;

use crate::services::phenology_service::DEFAULT_RADIUS_KM;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub catalog_path: String,
    pub inat_base_url: String,
    pub search_radius_km: u32,
    pub upstream_timeout_secs: u64,
    pub histogram_cache_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            catalog_path: "data/flowers.json".to_string(),
            inat_base_url: "https://api.inaturalist.org/v1".to_string(),
            search_radius_km: DEFAULT_RADIUS_KM,
            upstream_timeout_secs: 10,
            histogram_cache_ttl_secs: 3600,
        }
    }
}

impl Config {
    /// Read settings from the environment; unset or unparseable values use defaults
    pub fn from_env() -> Self {
        let defaults = Config::default();

        Config {
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_or("SERVER_PORT", defaults.server_port),
            catalog_path: env::var("CATALOG_PATH").unwrap_or(defaults.catalog_path),
            inat_base_url: env::var("INAT_BASE_URL").unwrap_or(defaults.inat_base_url),
            search_radius_km: parse_or("SEARCH_RADIUS_KM", defaults.search_radius_km),
            upstream_timeout_secs: parse_or(
                "UPSTREAM_TIMEOUT_SECS",
                defaults.upstream_timeout_secs,
            ),
            histogram_cache_ttl_secs: parse_or(
                "HISTOGRAM_CACHE_TTL_SECS",
                defaults.histogram_cache_ttl_secs,
            ),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn histogram_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.histogram_cache_ttl_secs)
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
