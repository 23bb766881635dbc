//! Cultivation and pollination hints inferred from a species' biome.
//!
//! These are rough, biome-level defaults used by the growth chart and the
//! species detail view. Nothing here is species-specific.

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum SoilTexture {
    #[serde(rename = "arenoso")]
    Sandy,
    #[serde(rename = "argiloso")]
    Clay,
    #[serde(rename = "franco")]
    Loam,
    #[serde(rename = "rochoso")]
    Rocky,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum Drainage {
    #[serde(rename = "baixa")]
    Low,
    #[serde(rename = "média")]
    Medium,
    #[serde(rename = "alta")]
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum Light {
    #[serde(rename = "sombra")]
    Shade,
    #[serde(rename = "meia-sombra")]
    PartialShade,
    #[serde(rename = "sol-pleno")]
    FullSun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum Pollinator {
    #[serde(rename = "abelhas")]
    Bees,
    #[serde(rename = "borboletas")]
    Butterflies,
    #[serde(rename = "beija-flores")]
    Hummingbirds,
    #[serde(rename = "morcegos")]
    Bats,
    #[serde(rename = "moscas")]
    Flies,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SoilSpec {
    pub ph_min: f64,
    pub ph_max: f64,
    pub texture: SoilTexture,
    pub drainage: Drainage,
    pub light: Light,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PollinationInfo {
    pub soil: SoilSpec,
    pub likely_pollinators: Vec<Pollinator>,
    /// Rough seed-to-flower estimate in days
    pub total_days_to_bloom: u32,
}

impl PollinationInfo {
    fn new(
        soil: SoilSpec,
        likely_pollinators: &[Pollinator],
        total_days_to_bloom: u32,
    ) -> Self {
        Self {
            soil,
            likely_pollinators: likely_pollinators.to_vec(),
            total_days_to_bloom,
        }
    }
}

/// Known biomes in match order, each with its profile
const BIOMES: [(&str, fn() -> PollinationInfo); 6] = [
    ("Cerrado", cerrado),
    ("Mata Atlântica", mata_atlantica),
    ("Amazônia", amazonia),
    ("Caatinga", caatinga),
    ("Pantanal", pantanal),
    ("Restinga", restinga),
];

/// Hints for the first known biome named in `biome_text`, or a generic default
pub fn infer_pollination(biome_text: Option<&str>) -> PollinationInfo {
    let normalized = biome_text.map(str::to_lowercase).unwrap_or_default();
    if normalized.is_empty() {
        return default_profile();
    }

    BIOMES
        .iter()
        .find(|(name, _)| normalized.contains(&name.to_lowercase()))
        .map(|(_, profile)| profile())
        .unwrap_or_else(default_profile)
}

fn cerrado() -> PollinationInfo {
    use Pollinator::*;
    PollinationInfo::new(
        soil(5.0, 6.5, SoilTexture::Sandy, Drainage::High, Light::FullSun),
        &[Bees, Butterflies, Hummingbirds],
        90,
    )
}

fn mata_atlantica() -> PollinationInfo {
    use Pollinator::*;
    PollinationInfo::new(
        soil(5.5, 6.8, SoilTexture::Loam, Drainage::Medium, Light::PartialShade),
        &[Bees, Butterflies, Hummingbirds],
        110,
    )
}

fn amazonia() -> PollinationInfo {
    use Pollinator::*;
    PollinationInfo::new(
        soil(5.0, 6.5, SoilTexture::Clay, Drainage::Medium, Light::PartialShade),
        &[Bees, Bats, Butterflies],
        120,
    )
}

fn caatinga() -> PollinationInfo {
    use Pollinator::*;
    PollinationInfo::new(
        soil(6.0, 7.0, SoilTexture::Rocky, Drainage::High, Light::FullSun),
        &[Bees, Bats],
        80,
    )
}

fn pantanal() -> PollinationInfo {
    use Pollinator::*;
    PollinationInfo::new(
        soil(5.5, 7.0, SoilTexture::Loam, Drainage::Medium, Light::FullSun),
        &[Bees, Butterflies],
        100,
    )
}

fn restinga() -> PollinationInfo {
    use Pollinator::*;
    PollinationInfo::new(
        soil(6.0, 7.0, SoilTexture::Sandy, Drainage::High, Light::FullSun),
        &[Bees, Butterflies, Hummingbirds],
        95,
    )
}

// Most plants are fine around pH 6-7 with decent drainage
fn default_profile() -> PollinationInfo {
    use Pollinator::*;

    PollinationInfo::new(
        soil(6.0, 7.0, SoilTexture::Loam, Drainage::Medium, Light::FullSun),
        &[Bees, Butterflies, Hummingbirds],
        90,
    )
}

fn soil(ph_min: f64, ph_max: f64, texture: SoilTexture, drainage: Drainage, light: Light) -> SoilSpec {
    SoilSpec {
        ph_min,
        ph_max,
        texture,
        drainage,
        light,
    }
}
