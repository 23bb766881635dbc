use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

// Catalog entity, one per element of the flowers.json array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SpeciesRecord {
    pub id: String,
    #[serde(default)]
    pub common: String,
    /// Scientific name, used as the upstream taxon query
    pub sci: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biome: Option<String>,
    /// Free-text flowering season, e.g. "floração: abr–jun"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Illustration palette, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub colors: Option<Map<String, Value>>,
}

impl SpeciesRecord {
    pub fn season_text(&self) -> &str {
        self.season.as_deref().unwrap_or("")
    }
}

// API response DTO for the species listing
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SpeciesSummary {
    pub id: String,
    pub common: String,
    pub sci: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biome: Option<String>,
}

impl From<&SpeciesRecord> for SpeciesSummary {
    fn from(record: &SpeciesRecord) -> Self {
        Self {
            id: record.id.clone(),
            common: record.common.clone(),
            sci: record.sci.clone(),
            emoji: record.emoji.clone(),
            biome: record.biome.clone(),
        }
    }
}
