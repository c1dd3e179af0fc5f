//! Biome system: table definitions, loading, and height/temperature lookup.
//!
//! A [`BiomeTable`] is an ordered list of height-banded [`BiomeCategory`]s, each
//! holding temperature-banded [`Biome`]s. Classification is a first-match scan
//! in declaration order over half-open `[min, max)` bands.

mod classifier;
mod def;
mod table;

pub use classifier::Classification;
pub use def::{Biome, BiomeCategory, TerrainType};
pub use table::{BiomeId, BiomeTable, CoverageIssue};
