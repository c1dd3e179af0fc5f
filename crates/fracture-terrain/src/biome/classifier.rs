//! First-match lookup of `(height, temperature)` pairs in a [`BiomeTable`].

use super::{BiomeId, BiomeTable};

/// Outcome of classifying one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Both a category and a biome matched.
    Matched(BiomeId),
    /// A category matched by height but none of its biomes by temperature.
    NoBiome {
        /// Index of the matched category.
        category: usize,
    },
    /// No category's height band contains the height.
    NoCategory,
}

impl Classification {
    /// The matched biome, if any.
    pub fn biome_id(self) -> Option<BiomeId> {
        match self {
            Classification::Matched(id) => Some(id),
            _ => None,
        }
    }

    /// Index of the matched category, whether or not a biome matched.
    pub fn category(self) -> Option<usize> {
        match self {
            Classification::Matched(id) => Some(id.category),
            Classification::NoBiome { category } => Some(category),
            Classification::NoCategory => None,
        }
    }
}

impl BiomeTable {
    /// Classify a height/temperature pair.
    ///
    /// Takes the first category in declaration order whose `[min, max)` height
    /// band contains `height`, then the first biome of that category whose
    /// `[min, max)` temperature band contains `temperature`. Overlapping bands
    /// resolve to the earlier entry.
    pub fn classify(&self, height: f64, temperature: f64) -> Classification {
        let Some((ci, category)) = self
            .categories
            .iter()
            .enumerate()
            .find(|(_, c)| c.contains(height))
        else {
            return Classification::NoCategory;
        };

        match category.biomes.iter().position(|b| b.contains(temperature)) {
            Some(bi) => Classification::Matched(BiomeId {
                category: ci,
                biome: bi,
            }),
            None => Classification::NoBiome { category: ci },
        }
    }

    /// Whether a classification lands on walkable ground: a biome matched and
    /// its category's terrain is not water. Any classification gap is unwalkable.
    pub fn is_walkable(&self, classification: Classification) -> bool {
        classification
            .biome_id()
            .and_then(|id| self.category(id.category))
            .is_some_and(|c| !c.terrain_type.is_water())
    }
}
