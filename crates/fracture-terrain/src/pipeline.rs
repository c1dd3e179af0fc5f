//! Map generation pipeline: noise fields to classified grid.
//!
//! One call runs every stage in order and returns a complete [`MapData`] or an
//! error, never a partial grid:
//!
//! 1. resolve the seed
//! 2. synthesize the height (`seed`) and temperature (`seed + 1`) fields
//! 3. shape both fields with the sharpness curve and boost
//! 4. blend both fields with one shared falloff mask
//! 5. classify every cell against the biome table
//! 6. assemble the grid

use std::sync::Arc;
use std::time::Instant;

use crate::biome::{BiomeTable, Classification};
use crate::error::MapGenError;
use crate::falloff::generate_falloff_map;
use crate::field::try_alloc;
use crate::fractal::{FractalParams, generate_noise_map};
use crate::map::{Cell, ClassificationGap, GapKind, MapData};
use crate::params::{MapSettings, NoiseParameters};
use crate::seed::{resolve_seed, temperature_seed};
use crate::shaping::{blend_falloff, shape_value};

/// Generate one map.
///
/// Parameters, settings, and the table are validated before any noise is
/// computed. Cells outside the table's coverage are kept with no biome, marked
/// unwalkable, and listed in [`MapData::gaps`].
pub fn generate_map(
    params: &NoiseParameters,
    settings: &MapSettings,
    table: &Arc<BiomeTable>,
) -> Result<MapData, MapGenError> {
    params.validate()?;
    settings.validate()?;
    table.validate()?;

    let start = Instant::now();
    let size = settings.size;
    let seed = resolve_seed(params.seed);

    let fractal = FractalParams::from(params);
    let mut heights = generate_noise_map(size, seed, &fractal)?;
    let mut temperatures = generate_noise_map(size, temperature_seed(seed), &fractal)?;

    let (sharpness, boost) = (params.sharpness, params.boost);
    heights.map_in_place(|v| shape_value(v, sharpness, boost));
    temperatures.map_in_place(|v| shape_value(v, sharpness, boost));

    let mask = generate_falloff_map(size, settings.falloff_shape)?;
    let (strength, mode) = (params.falloff_strength, params.falloff_mode);
    heights.zip_in_place(&mask, |v, f| blend_falloff(v, f, strength, mode));
    temperatures.zip_in_place(&mask, |v, f| blend_falloff(v, f, strength, mode));

    let mut cells = try_alloc(size * size)?;
    let mut gaps = Vec::new();
    for (i, (&height, &temperature)) in heights
        .values()
        .iter()
        .zip(temperatures.values())
        .enumerate()
    {
        let (x, y) = (i % size, i / size);
        let classification = table.classify(height, temperature);

        match classification {
            Classification::Matched(_) => {}
            Classification::NoCategory => {
                tracing::debug!("No biome category found for height {height} at ({x}, {y})");
                gaps.push(ClassificationGap {
                    x,
                    y,
                    kind: GapKind::NoCategory { height },
                });
            }
            Classification::NoBiome { category } => {
                tracing::debug!(
                    "No biome found for temperature {temperature} at ({x}, {y}) within category {category}"
                );
                gaps.push(ClassificationGap {
                    x,
                    y,
                    kind: GapKind::NoBiome {
                        category,
                        temperature,
                    },
                });
            }
        }

        cells.push(Cell {
            x,
            y,
            noise_value: height,
            temperature,
            biome: classification.biome_id(),
            walkable: table.is_walkable(classification),
        });
    }

    if !gaps.is_empty() {
        tracing::warn!(
            gaps = gaps.len(),
            cells = cells.len(),
            "Biome table left cells unclassified"
        );
    }

    let map = MapData::new(size, seed, cells, gaps, Arc::clone(table));
    tracing::info!(
        seed,
        size,
        walkable = map.walkable_count(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "Generated map"
    );
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::{Biome, BiomeCategory, TerrainType};
    use crate::error::ParameterError;
    use crate::falloff::FalloffShape;
    use crate::fractal::{FractalSampler, cell_coord};
    use crate::params::SeedChoice;
    use crate::shaping::BlendMode;

    fn settings(size: usize) -> MapSettings {
        MapSettings {
            size,
            ..Default::default()
        }
    }

    fn flat_params(seed: u64) -> NoiseParameters {
        NoiseParameters {
            seed: SeedChoice::Fixed(seed),
            octaves: 1,
            persistence: 0.5,
            lacunarity: 2.0,
            scale: 1.0,
            sharpness: 1.0,
            boost: 0.0,
            falloff_strength: 0.0,
            falloff_mode: BlendMode::Interpolate,
        }
    }

    fn band_table(bands: &[(TerrainType, f64, f64)]) -> Arc<BiomeTable> {
        let categories = bands
            .iter()
            .map(|&(terrain_type, min, max)| BiomeCategory {
                terrain_type,
                min_height: min,
                max_height: max,
                biomes: vec![Biome {
                    name: format!("{terrain_type:?}"),
                    terrain_type,
                    min_temperature: 0.0,
                    max_temperature: 1.0,
                }],
            })
            .collect();
        Arc::new(BiomeTable::new(categories).unwrap())
    }

    #[test]
    fn test_same_seed_same_map() {
        let table = Arc::new(BiomeTable::default());
        let params = NoiseParameters::with_seed(1234);
        let a = generate_map(&params, &settings(32), &table).unwrap();
        let b = generate_map(&params, &settings(32), &table).unwrap();
        assert_eq!(a.cells(), b.cells());
        assert_eq!(a.seed(), 1234);
    }

    #[test]
    fn test_different_seed_different_map() {
        let table = Arc::new(BiomeTable::default());
        let a = generate_map(&NoiseParameters::with_seed(1), &settings(32), &table).unwrap();
        let b = generate_map(&NoiseParameters::with_seed(2), &settings(32), &table).unwrap();
        assert_ne!(a.cells(), b.cells());
    }

    #[test]
    fn test_values_in_range_for_extreme_shaping() {
        let table = Arc::new(BiomeTable::default());
        for (sharpness, boost) in [(0.05, 3.0), (25.0, -2.0), (1.0, 0.99)] {
            for mode in [BlendMode::Interpolate, BlendMode::Subtract] {
                let params = NoiseParameters {
                    sharpness,
                    boost,
                    falloff_mode: mode,
                    falloff_strength: 0.7,
                    ..NoiseParameters::with_seed(3)
                };
                let map = generate_map(&params, &settings(24), &table).unwrap();
                for cell in map.cells() {
                    assert!((0.0..=1.0).contains(&cell.noise_value));
                    assert!((0.0..=1.0).contains(&cell.temperature));
                }
            }
        }
    }

    #[test]
    fn test_single_octave_no_falloff_equals_raw_sample() {
        let params = flat_params(42);
        let map = generate_map(&params, &settings(4), &Arc::new(BiomeTable::default())).unwrap();

        let sampler = FractalSampler::new(42, FractalParams::from(&params)).unwrap();
        for cell in map.cells() {
            let raw = sampler
                .sample_octave(0, cell_coord(cell.x, 4), cell_coord(cell.y, 4))
                .clamp(0.0, 1.0);
            assert_eq!(cell.noise_value, raw, "cell ({}, {})", cell.x, cell.y);
        }
    }

    #[test]
    fn test_single_full_band_matches_every_cell() {
        let table = band_table(&[(TerrainType::Plains, 0.0, 1.0)]);
        // Subtracting a mask that is below 1 everywhere keeps every value under 1.0.
        let params = NoiseParameters {
            falloff_strength: 0.5,
            falloff_mode: BlendMode::Subtract,
            ..flat_params(9)
        };
        let map = generate_map(&params, &settings(16), &table).unwrap();
        assert!(map.gaps().is_empty());
        assert!(map.cells().iter().all(|c| c.biome.is_some() && c.walkable));
        assert_eq!(map.walkable_count(), 256);
    }

    #[test]
    fn test_height_on_boundary_goes_to_upper_category() {
        let table = band_table(&[
            (TerrainType::ShallowWater, 0.0, 0.5),
            (TerrainType::Plains, 0.5, 1.0),
        ]);
        // No octaves: every cell sits at exactly 0.5.
        let params = NoiseParameters {
            octaves: 0,
            ..flat_params(5)
        };
        let map = generate_map(&params, &settings(8), &table).unwrap();
        for cell in map.cells() {
            assert_eq!(cell.noise_value, 0.5);
            assert_eq!(cell.biome.map(|id| id.category), Some(1));
            assert!(cell.walkable);
        }
    }

    #[test]
    fn test_water_is_never_walkable() {
        let table = Arc::new(BiomeTable::default());
        let map = generate_map(&NoiseParameters::with_seed(77), &settings(64), &table).unwrap();
        let mut water = 0;
        for cell in map.cells() {
            match map.category_of(cell) {
                Some(category) if category.terrain_type.is_water() => {
                    water += 1;
                    assert!(!cell.walkable);
                }
                Some(_) => assert!(cell.walkable),
                None => assert!(!cell.walkable),
            }
        }
        assert!(water > 0, "Falloff should leave some water at the edges");
    }

    #[test]
    fn test_gaps_are_recorded_and_generation_continues() {
        let table = band_table(&[(TerrainType::Plains, 0.0, 0.3)]);
        let params = NoiseParameters {
            octaves: 0,
            ..flat_params(1)
        };
        let map = generate_map(&params, &settings(4), &table).unwrap();
        assert_eq!(map.cells().len(), 16);
        assert_eq!(map.gaps().len(), 16);
        assert_eq!(
            map.gaps()[0],
            ClassificationGap {
                x: 0,
                y: 0,
                kind: GapKind::NoCategory { height: 0.5 },
            }
        );
        assert!(map.cells().iter().all(|c| c.biome.is_none() && !c.walkable));
    }

    #[test]
    fn test_temperature_gap_recorded_with_category() {
        let table = Arc::new(
            BiomeTable::new(vec![BiomeCategory {
                terrain_type: TerrainType::Plains,
                min_height: 0.0,
                max_height: 1.01,
                biomes: vec![Biome {
                    name: "cold only".into(),
                    terrain_type: TerrainType::Snow,
                    min_temperature: 0.0,
                    max_temperature: 0.2,
                }],
            }])
            .unwrap(),
        );
        let params = NoiseParameters {
            octaves: 0,
            ..flat_params(1)
        };
        let map = generate_map(&params, &settings(2), &table).unwrap();
        assert_eq!(map.gaps().len(), 4);
        assert!(matches!(
            map.gaps()[3].kind,
            GapKind::NoBiome { category: 0, .. }
        ));
        assert!(!map.is_walkable(1, 1));
    }

    #[test]
    fn test_temperature_is_shaped_and_stored() {
        let params = NoiseParameters {
            boost: 1.0,
            ..flat_params(8)
        };
        let map = generate_map(&params, &settings(8), &Arc::new(BiomeTable::default())).unwrap();
        assert!(map.cells().iter().all(|c| c.temperature == 1.0));
    }

    #[test]
    fn test_height_and_temperature_are_decorrelated() {
        let params = NoiseParameters {
            octaves: 4,
            ..flat_params(100)
        };
        let map = generate_map(&params, &settings(16), &Arc::new(BiomeTable::default())).unwrap();
        let identical = map
            .cells()
            .iter()
            .filter(|c| c.noise_value == c.temperature)
            .count();
        assert!(identical < 4, "{identical} cells share height and temperature");
    }

    #[test]
    fn test_falloff_pulls_edges_down() {
        let params = NoiseParameters {
            octaves: 0,
            falloff_strength: 1.0,
            ..flat_params(1)
        };
        for shape in [FalloffShape::EuclideanSquared, FalloffShape::Custom] {
            let settings = MapSettings {
                size: 16,
                falloff_shape: shape,
            };
            let map = generate_map(&params, &settings, &Arc::new(BiomeTable::default())).unwrap();
            let corner = map.get(0, 0).unwrap().noise_value;
            let center = map.get(8, 8).unwrap().noise_value;
            assert!(corner < center, "{shape}: corner {corner} >= center {center}");
        }
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let table = Arc::new(BiomeTable::default());
        let params = NoiseParameters {
            scale: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            generate_map(&params, &settings(8), &table),
            Err(MapGenError::Parameters(ParameterError::InvalidScale(_)))
        ));
    }

    #[test]
    fn test_oversized_map_rejected() {
        let table = Arc::new(BiomeTable::default());
        let result = generate_map(&NoiseParameters::default(), &settings(1 << 20), &table);
        assert!(matches!(result, Err(MapGenError::MapTooLarge { .. })));
    }

    #[test]
    fn test_rows_and_coordinates() {
        let map = generate_map(
            &NoiseParameters::with_seed(4),
            &settings(5),
            &Arc::new(BiomeTable::default()),
        )
        .unwrap();
        assert_eq!((map.width(), map.height()), (5, 5));
        for (y, row) in map.rows().enumerate() {
            assert_eq!(row.len(), 5);
            for (x, cell) in row.iter().enumerate() {
                assert_eq!((cell.x, cell.y), (x, y));
            }
        }
        assert!(map.get(5, 0).is_none());
        assert!(!map.is_walkable(9, 9));
    }

    #[test]
    fn test_excessive_octaves_return_error() {
        let table = Arc::new(BiomeTable::default());
        let params = NoiseParameters {
            octaves: 64,
            ..NoiseParameters::with_seed(1)
        };
        assert!(matches!(
            generate_map(&params, &settings(8), &table),
            Err(MapGenError::Parameters(
                ParameterError::FrequencyTooHigh { .. } | ParameterError::TooManyOctaves { .. }
            ))
        ));
    }
}
