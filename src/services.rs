pub mod phenology_service;
pub mod species_service;

pub use phenology_service::{HistogramOutcome, PhenologyError, PhenologyService};
pub use species_service::SpeciesService;
