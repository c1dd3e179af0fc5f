//! Map generator service holding the current map.

use std::sync::{Arc, RwLock};

use crate::biome::BiomeTable;
use crate::error::MapGenError;
use crate::map::MapData;
use crate::params::{MapSettings, NoiseParameters};
use crate::pipeline::generate_map;

/// Generates maps against a fixed biome table and keeps the latest one.
///
/// The current-map slot is only written by a completed generation and is
/// replaced whole, so concurrent readers see either the previous map or the
/// new one. Failed generations leave the slot untouched.
pub struct MapGeneratorService {
    table: Arc<BiomeTable>,
    settings: MapSettings,
    current: RwLock<Option<Arc<MapData>>>,
}

impl MapGeneratorService {
    /// Create a service. The table is validated once here and its coverage
    /// issues are logged.
    pub fn new(table: BiomeTable, settings: MapSettings) -> Result<Self, MapGenError> {
        table.validate()?;
        settings.validate()?;
        table.warn_coverage_issues();
        Ok(Self {
            table: Arc::new(table),
            settings,
            current: RwLock::new(None),
        })
    }

    /// Generate a new map and make it the current one.
    pub fn get_map(&self, params: &NoiseParameters) -> Result<Arc<MapData>, MapGenError> {
        let map = Arc::new(generate_map(params, &self.settings, &self.table)?);
        let mut slot = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(Arc::clone(&map));
        Ok(map)
    }

    /// The most recently generated map, if any.
    pub fn current_map(&self) -> Option<Arc<MapData>> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// The biome table maps are classified against.
    pub fn biome_table(&self) -> &BiomeTable {
        &self.table
    }

    /// Map-level settings.
    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }
}
