//! Biome table: ordered height categories, loading, and validation.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Biome, BiomeCategory, TerrainType};
use crate::error::BiomeTableError;

/// Identifies a biome by its position in a [`BiomeTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BiomeId {
    /// Index of the category in declaration order.
    pub category: usize,
    /// Index of the biome within its category.
    pub biome: usize,
}

/// Ordered list of height categories. Lookup is first-match in declaration
/// order, so the table is never re-sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomeTable {
    /// Categories in lookup order.
    pub categories: Vec<BiomeCategory>,
}

/// A coverage problem that does not prevent generation but leaves some
/// values unclassified or shadowed.
#[derive(Debug, Clone, PartialEq)]
pub enum CoverageIssue {
    /// Values in `[from, to)` match no band.
    Gap {
        /// Which band list (e.g. "height", "temperature in DeepOcean").
        scope: String,
        /// Start of the uncovered range.
        from: f64,
        /// End of the uncovered range.
        to: f64,
    },
    /// Values in `[from, to)` match more than one band; the earlier one wins.
    Overlap {
        /// Which band list.
        scope: String,
        /// Start of the shadowed range.
        from: f64,
        /// End of the shadowed range.
        to: f64,
    },
    /// The highest band ends exactly at `1.0`, so a value of `1.0` is unclassified.
    ExcludesOne {
        /// Which band list.
        scope: String,
    },
}

impl fmt::Display for CoverageIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverageIssue::Gap { scope, from, to } => {
                write!(f, "{scope}: no band covers [{from}, {to})")
            }
            CoverageIssue::Overlap { scope, from, to } => {
                write!(f, "{scope}: bands overlap on [{from}, {to}), first match wins")
            }
            CoverageIssue::ExcludesOne { scope } => {
                write!(f, "{scope}: highest band ends at 1.0, so 1.0 itself is unclassified")
            }
        }
    }
}

fn check_band(what: impl FnOnce() -> String, min: f64, max: f64) -> Result<(), BiomeTableError> {
    // Also rejects NaN on either side.
    if min <= max {
        Ok(())
    } else {
        Err(BiomeTableError::MalformedBand {
            what: what(),
            min,
            max,
        })
    }
}

/// Find gaps and overlaps of a band list over `[0, 1]`.
fn band_issues(scope: &str, bands: &[(f64, f64)]) -> Vec<CoverageIssue> {
    let mut sorted: Vec<(f64, f64)> = bands.iter().copied().filter(|(lo, hi)| lo < hi).collect();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut issues = Vec::new();
    let mut reach = 0.0_f64;
    for (lo, hi) in sorted {
        if lo > reach && reach < 1.0 {
            issues.push(CoverageIssue::Gap {
                scope: scope.to_string(),
                from: reach,
                to: lo.min(1.0),
            });
        } else if lo < reach && lo < 1.0 {
            issues.push(CoverageIssue::Overlap {
                scope: scope.to_string(),
                from: lo.max(0.0),
                to: reach.min(hi),
            });
        }
        reach = reach.max(hi);
    }

    if reach < 1.0 {
        issues.push(CoverageIssue::Gap {
            scope: scope.to_string(),
            from: reach,
            to: 1.0,
        });
    } else if reach == 1.0 {
        issues.push(CoverageIssue::ExcludesOne {
            scope: scope.to_string(),
        });
    }
    issues
}

impl BiomeTable {
    /// Build a table, rejecting structurally malformed data.
    pub fn new(categories: Vec<BiomeCategory>) -> Result<Self, BiomeTableError> {
        let table = Self { categories };
        table.validate()?;
        Ok(table)
    }

    /// Parse a RON document.
    pub fn from_ron_str(text: &str) -> Result<Self, BiomeTableError> {
        let table: BiomeTable = ron::from_str(text).map_err(BiomeTableError::ParseRon)?;
        table.validate()?;
        Ok(table)
    }

    /// Parse a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, BiomeTableError> {
        let table: BiomeTable =
            serde_json::from_str(text).map_err(BiomeTableError::ParseJson)?;
        table.validate()?;
        Ok(table)
    }

    /// Load a table from disk. `.json` files are parsed as JSON, anything else as RON.
    pub fn load(path: &Path) -> Result<Self, BiomeTableError> {
        let text = std::fs::read_to_string(path).map_err(BiomeTableError::Read)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let table = if is_json {
            Self::from_json_str(&text)?
        } else {
            Self::from_ron_str(&text)?
        };
        tracing::info!(
            path = %path.display(),
            categories = table.categories.len(),
            "Loaded biome table"
        );
        Ok(table)
    }

    /// Reject tables the classifier cannot work with: no categories, empty
    /// categories, or bands with `min > max` or NaN bounds.
    ///
    /// Gaps and overlaps are accepted; see [`BiomeTable::coverage_issues`].
    pub fn validate(&self) -> Result<(), BiomeTableError> {
        if self.categories.is_empty() {
            return Err(BiomeTableError::Empty);
        }
        for (ci, category) in self.categories.iter().enumerate() {
            check_band(
                || format!("height of category {ci} ({:?})", category.terrain_type),
                category.min_height,
                category.max_height,
            )?;
            if category.biomes.is_empty() {
                return Err(BiomeTableError::EmptyCategory {
                    category: ci,
                    terrain: format!("{:?}", category.terrain_type),
                });
            }
            for biome in &category.biomes {
                check_band(
                    || format!("temperature of biome `{}` in category {ci}", biome.name),
                    biome.min_temperature,
                    biome.max_temperature,
                )?;
            }
        }
        Ok(())
    }

    /// Gaps and overlaps over `[0, 1]`, for heights across categories and for
    /// temperatures within each category.
    pub fn coverage_issues(&self) -> Vec<CoverageIssue> {
        let heights: Vec<(f64, f64)> = self
            .categories
            .iter()
            .map(|c| (c.min_height, c.max_height))
            .collect();
        let mut issues = band_issues("height", &heights);

        for (ci, category) in self.categories.iter().enumerate() {
            let temps: Vec<(f64, f64)> = category
                .biomes
                .iter()
                .map(|b| (b.min_temperature, b.max_temperature))
                .collect();
            let scope = format!("temperature in category {ci} ({:?})", category.terrain_type);
            issues.extend(band_issues(&scope, &temps));
        }
        issues
    }

    /// Log every coverage issue as a warning.
    pub fn warn_coverage_issues(&self) {
        for issue in self.coverage_issues() {
            tracing::warn!("Biome table coverage: {issue}");
        }
    }

    /// Category at `index`.
    pub fn category(&self, index: usize) -> Option<&BiomeCategory> {
        self.categories.get(index)
    }

    /// Biome for an id.
    pub fn biome(&self, id: BiomeId) -> Option<&Biome> {
        self.categories.get(id.category)?.biomes.get(id.biome)
    }

    /// Total number of biomes across all categories.
    pub fn biome_count(&self) -> usize {
        self.categories.iter().map(|c| c.biomes.len()).sum()
    }
}

fn biome(name: &str, terrain_type: TerrainType, min: f64, max: f64) -> Biome {
    Biome {
        name: name.to_string(),
        terrain_type,
        min_temperature: min,
        max_temperature: max,
    }
}

fn category(terrain_type: TerrainType, min: f64, max: f64, biomes: Vec<Biome>) -> BiomeCategory {
    BiomeCategory {
        terrain_type,
        min_height: min,
        max_height: max,
        biomes,
    }
}

/// Upper bound of the highest bands. Above one so that a clamped value of
/// exactly `1.0` still classifies.
const TOP: f64 = 1.01;

impl Default for BiomeTable {
    /// Built-in table: seven height bands from deep ocean to mountains.
    fn default() -> Self {
        use TerrainType::*;
        Self {
            categories: vec![
                category(
                    DeepOcean,
                    0.0,
                    0.45,
                    vec![
                        biome("Polar Deep", DeepOcean, 0.0, 0.45),
                        biome("Deep Ocean", DeepOcean, 0.45, TOP),
                    ],
                ),
                category(
                    ShallowWater,
                    0.45,
                    0.55,
                    vec![
                        biome("Ice Shelf", Snow, 0.0, 0.45),
                        biome("Shallows", ShallowWater, 0.45, 0.8),
                        biome("Coral Reef", ShallowWater, 0.8, TOP),
                    ],
                ),
                category(
                    Beach,
                    0.55,
                    0.6,
                    vec![
                        biome("Shingle", Beach, 0.0, 0.5),
                        biome("Beach", Beach, 0.5, TOP),
                    ],
                ),
                category(
                    Plains,
                    0.6,
                    0.72,
                    vec![
                        biome("Tundra", Snow, 0.0, 0.5),
                        biome("Grassland", Plains, 0.5, 0.8),
                        biome("Desert", Desert, 0.8, TOP),
                    ],
                ),
                category(
                    Forest,
                    0.72,
                    0.84,
                    vec![
                        biome("Taiga", Forest, 0.0, 0.55),
                        biome("Temperate Forest", Forest, 0.55, 0.8),
                        biome("Jungle", Jungle, 0.8, TOP),
                    ],
                ),
                category(
                    Hills,
                    0.84,
                    0.93,
                    vec![
                        biome("Frozen Hills", Snow, 0.0, 0.6),
                        biome("Hills", Hills, 0.6, TOP),
                    ],
                ),
                category(
                    Mountains,
                    0.93,
                    TOP,
                    vec![
                        biome("Glacier", Snow, 0.0, 0.65),
                        biome("Mountains", Mountains, 0.65, TOP),
                    ],
                ),
            ],
        }
    }
}
