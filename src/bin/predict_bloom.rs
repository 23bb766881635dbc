use clap::Parser;
use std::time::Duration;

use bloomwatch_service::catalog::SpeciesCatalog;
use bloomwatch_service::fetcher::HistogramFetcher;
use bloomwatch_service::models::PredictionRequest;
use bloomwatch_service::services::phenology_service::DEFAULT_RADIUS_KM;
use bloomwatch_service::services::PhenologyService;

#[derive(Parser)]
#[command(name = "predict-bloom")]
#[command(about = "Predict the next flowering month for a catalog species", long_about = None)]
struct Cli {
    /// Species ID from the catalog
    species_id: String,

    /// Latitude of the observer (requires --lng)
    #[arg(long, allow_negative_numbers = true, requires = "lng")]
    lat: Option<f64>,

    /// Longitude of the observer (requires --lat)
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    lng: Option<f64>,

    /// Search radius around the coordinates, in km
    #[arg(long, default_value_t = DEFAULT_RADIUS_KM)]
    radius_km: u32,

    /// Path to the species catalog JSON
    #[arg(long, env, default_value = "data/flowers.json")]
    catalog_path: String,

    /// Observation API base URL
    #[arg(long, env, default_value = "https://api.inaturalist.org/v1")]
    inat_base_url: String,

    /// Timeout for the observation API request, in seconds
    #[arg(long, env, default_value_t = 10)]
    upstream_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let catalog = SpeciesCatalog::new(&cli.catalog_path);
    let fetcher = HistogramFetcher::new(
        cli.inat_base_url,
        Duration::from_secs(cli.upstream_timeout_secs),
        Duration::ZERO,
    );
    let service = PhenologyService::new(catalog, fetcher, cli.radius_km);

    let mut request = PredictionRequest::new(cli.species_id);
    if let (Some(lat), Some(lng)) = (cli.lat, cli.lng) {
        request = request.with_coordinates(lat, lng);
    }

    let result = service.predict(&request).await?;

    println!("{} ({})", result.id, result.sci);
    match result.next_bloom {
        Some(next) => println!(
            "Next bloom: month {} in {} days (source: {:?})",
            next.month, next.days_until, result.source
        ),
        None => println!("No bloom prediction available"),
    }
    println!("\n{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
