use crate::catalog::{CatalogError, SpeciesCatalog, SpeciesRecord, SpeciesSummary};
use crate::pollination::{self, PollinationInfo};

#[derive(Clone)]
pub struct SpeciesService {
    catalog: SpeciesCatalog,
}

impl SpeciesService {
    pub fn new(catalog: SpeciesCatalog) -> Self {
        Self { catalog }
    }

    /// List all species in catalog order
    pub async fn list_species(&self) -> Result<Vec<SpeciesSummary>, CatalogError> {
        let records = self.catalog.all().await?;
        Ok(records.iter().map(SpeciesSummary::from).collect())
    }

    /// Get single species by ID
    pub async fn get_species(&self, id: &str) -> Result<SpeciesRecord, CatalogError> {
        self.catalog.lookup(id).await
    }

    /// Cultivation hints derived from the species' biome
    pub async fn get_pollination(&self, id: &str) -> Result<PollinationInfo, CatalogError> {
        let species = self.catalog.lookup(id).await?;
        Ok(pollination::infer_pollination(species.biome.as_deref()))
    }
}
