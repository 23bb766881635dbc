use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::catalog::SpeciesCatalog;
use crate::config::Config;
use crate::fetcher::HistogramFetcher;
use crate::services::{PhenologyService, SpeciesService};

/// Application with its spawned HTTP server
pub struct Application {
    pub server_handle: JoinHandle<Result<(), std::io::Error>>,
}

impl Application {
    /// Wire services into the router and start serving
    ///
    /// The species catalog is shared by every service and loaded on first
    /// request. The histogram fetcher owns the upstream HTTP client and its
    /// response cache.
    pub async fn build(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Initializing application components");

        let state = Self::state(&config);
        let app = create_router(state).layer(TraceLayer::new_for_http());

        let addr = config.server_addr();
        info!("Starting HTTP server on {}", addr);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        let server_handle = tokio::spawn(async move { axum::serve(listener, app).await });

        info!("Application initialized successfully");
        Ok(Self { server_handle })
    }

    /// Services built from configuration, without binding a socket
    pub fn state(config: &Config) -> AppState {
        let catalog = SpeciesCatalog::new(&config.catalog_path);
        info!("Species catalog: {}", catalog.path().display());

        let fetcher = HistogramFetcher::new(
            config.inat_base_url.clone(),
            config.upstream_timeout(),
            config.histogram_cache_ttl(),
        );
        info!(
            "Histogram upstream {} (timeout {}s, cache ttl {}s, radius {} km)",
            config.inat_base_url,
            config.upstream_timeout_secs,
            config.histogram_cache_ttl_secs,
            config.search_radius_km
        );

        AppState {
            phenology_service: PhenologyService::new(
                catalog.clone(),
                fetcher,
                config.search_radius_km,
            ),
            species_service: SpeciesService::new(catalog),
        }
    }

    /// Run until the server stops
    pub async fn run_until_stopped(self) -> Result<(), Box<dyn std::error::Error>> {
        self.server_handle.await??;
        Ok(())
    }
}
