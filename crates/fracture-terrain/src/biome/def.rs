//! Biome table entries: terrain types, biomes, and height-banded categories.

use serde::{Deserialize, Serialize};

/// Terrain classification carried by categories and biomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainType {
    DeepOcean,
    ShallowWater,
    Beach,
    Plains,
    Desert,
    Forest,
    Jungle,
    Hills,
    Mountains,
    Snow,
}

impl TerrainType {
    /// Water terrain is never walkable.
    pub fn is_water(self) -> bool {
        matches!(self, TerrainType::DeepOcean | TerrainType::ShallowWater)
    }
}

/// A temperature band within a [`BiomeCategory`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Biome {
    /// Display name (e.g. "Temperate Forest").
    pub name: String,
    /// Terrain tag of this biome, used for rendering.
    pub terrain_type: TerrainType,
    /// Lower temperature bound (inclusive).
    pub min_temperature: f64,
    /// Upper temperature bound (exclusive).
    pub max_temperature: f64,
}

impl Biome {
    /// `min_temperature <= t < max_temperature`.
    #[inline]
    pub fn contains(&self, temperature: f64) -> bool {
        temperature >= self.min_temperature && temperature < self.max_temperature
    }
}

/// A height band holding an ordered list of temperature-banded biomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomeCategory {
    /// Terrain tag of the whole band. Decides walkability.
    pub terrain_type: TerrainType,
    /// Lower height bound (inclusive).
    pub min_height: f64,
    /// Upper height bound (exclusive).
    pub max_height: f64,
    /// Biomes in lookup order; the first containing band wins.
    pub biomes: Vec<Biome>,
}

impl BiomeCategory {
    /// `min_height <= h < max_height`.
    #[inline]
    pub fn contains(&self, height: f64) -> bool {
        height >= self.min_height && height < self.max_height
    }
}
