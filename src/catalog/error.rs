#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Species not found: {0}")]
    NotFound(String),
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}
