pub mod error;
pub mod models;
pub mod species_catalog;

pub use error::CatalogError;
pub use models::*;
pub use species_catalog::SpeciesCatalog;
