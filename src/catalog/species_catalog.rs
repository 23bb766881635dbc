use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

use crate::catalog::{CatalogError, SpeciesRecord};

struct CatalogTable {
    records: Vec<SpeciesRecord>,
    index: HashMap<String, usize>,
}

impl CatalogTable {
    fn new(records: Vec<SpeciesRecord>) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if index.contains_key(&record.id) {
                warn!("Duplicate species id {} in catalog, keeping first entry", record.id);
                continue;
            }
            index.insert(record.id.clone(), position);
        }
        Self { records, index }
    }

    fn get(&self, id: &str) -> Option<&SpeciesRecord> {
        self.index.get(id).map(|&position| &self.records[position])
    }
}

struct CatalogInner {
    path: PathBuf,
    table: OnceCell<CatalogTable>,
}

/// Read-only species catalog backed by a JSON file
///
/// The file is read on first lookup. Concurrent first callers wait on a
/// single read; a failed read is not cached so the next call tries again.
/// Cloning shares the same loaded table.
#[derive(Clone)]
pub struct SpeciesCatalog {
    inner: Arc<CatalogInner>,
}

impl SpeciesCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(CatalogInner {
                path: path.into(),
                table: OnceCell::new(),
            }),
        }
    }

    /// Catalog that is already loaded with `records`
    pub fn from_records(records: Vec<SpeciesRecord>) -> Self {
        Self {
            inner: Arc::new(CatalogInner {
                path: PathBuf::new(),
                table: OnceCell::new_with(Some(CatalogTable::new(records))),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    #[instrument(skip(self))]
    pub async fn lookup(&self, id: &str) -> Result<SpeciesRecord, CatalogError> {
        let table = self.table().await?;
        table.get(id).cloned().ok_or_else(|| {
            debug!("Species {} not in catalog", id);
            CatalogError::NotFound(id.to_string())
        })
    }

    /// Every record, in file order
    pub async fn all(&self) -> Result<Vec<SpeciesRecord>, CatalogError> {
        Ok(self.table().await?.records.clone())
    }

    async fn table(&self) -> Result<&CatalogTable, CatalogError> {
        self.inner
            .table
            .get_or_try_init(|| load_table(&self.inner.path))
            .await
    }
}

#[instrument(skip(path), fields(path = %path.display()))]
async fn load_table(path: &Path) -> Result<CatalogTable, CatalogError> {
    debug!("Reading species catalog");
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;

    let records: Vec<SpeciesRecord> = serde_json::from_str(&contents)?;
    info!("Loaded {} species from catalog", records.len());

    Ok(CatalogTable::new(records))
}
