//! Map renderers: heightmap, biome map, and ASCII.

use super::image::DebugImage;
use crate::biome::TerrainType;
use crate::map::MapData;

/// Color of cells the biome table did not classify.
pub const UNCLASSIFIED_COLOR: (u8, u8, u8) = (255, 0, 255);

/// Map a height in `[0, 1]` to a terrain color ramp.
///
/// Below `0.5` the color fades from dark to light blue. From `0.5` to `0.8` it
/// goes from green to brown, and above `0.8` it runs from gray to white.
pub fn height_to_color(normalized: f64) -> (u8, u8, u8) {
    let v = normalized.clamp(0.0, 1.0);
    if v < 0.5 {
        let t = v / 0.5;
        (
            (10.0 + t * 40.0) as u8,
            (20.0 + t * 100.0) as u8,
            (90.0 + t * 130.0) as u8,
        )
    } else if v < 0.8 {
        let t = (v - 0.5) / 0.3;
        (
            (40.0 + t * 90.0) as u8,
            (150.0 - t * 50.0) as u8,
            (40.0 + t * 30.0) as u8,
        )
    } else {
        let base = (130.0 + (v - 0.8) / 0.2 * 125.0).round() as u8;
        (base, base, base)
    }
}

/// Return an RGB color for a terrain type.
pub fn terrain_color(terrain: TerrainType) -> (u8, u8, u8) {
    match terrain {
        TerrainType::DeepOcean => (20, 40, 140),
        TerrainType::ShallowWater => (40, 110, 210),
        TerrainType::Beach => (230, 210, 140),
        TerrainType::Plains => (110, 180, 70),
        TerrainType::Desert => (220, 190, 80),
        TerrainType::Forest => (30, 120, 40),
        TerrainType::Jungle => (10, 80, 20),
        TerrainType::Hills => (130, 140, 80),
        TerrainType::Mountains => (120, 100, 90),
        TerrainType::Snow => (235, 240, 245),
    }
}

/// One-character symbol for a terrain type.
pub fn terrain_glyph(terrain: TerrainType) -> char {
    match terrain {
        TerrainType::DeepOcean => '~',
        TerrainType::ShallowWater => '-',
        TerrainType::Beach => '.',
        TerrainType::Plains => ',',
        TerrainType::Desert => ':',
        TerrainType::Forest => 'T',
        TerrainType::Jungle => '%',
        TerrainType::Hills => 'n',
        TerrainType::Mountains => '^',
        TerrainType::Snow => '*',
    }
}

/// Render the final height of every cell, one pixel per cell.
pub fn render_heightmap(map: &MapData) -> DebugImage {
    let mut image = DebugImage::new(map.width() as u32, map.height() as u32);
    for cell in map.cells() {
        image.set_pixel(
            cell.x as u32,
            cell.y as u32,
            height_to_color(cell.noise_value),
        );
    }
    image
}

/// Render every cell in the color of its biome's terrain type.
/// Unclassified cells use [`UNCLASSIFIED_COLOR`].
pub fn render_biome_map(map: &MapData) -> DebugImage {
    let mut image = DebugImage::new(map.width() as u32, map.height() as u32);
    for cell in map.cells() {
        let color = map
            .biome_of(cell)
            .map_or(UNCLASSIFIED_COLOR, |b| terrain_color(b.terrain_type));
        image.set_pixel(cell.x as u32, cell.y as u32, color);
    }
    image
}

/// One line per row, one glyph per cell; `?` marks unclassified cells.
pub fn render_ascii(map: &MapData) -> String {
    let mut out = String::with_capacity((map.width() + 1) * map.height());
    for row in map.rows() {
        for cell in row {
            out.push(
                map.biome_of(cell)
                    .map_or('?', |b| terrain_glyph(b.terrain_type)),
            );
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::biome::{Biome, BiomeCategory, BiomeTable};
    use crate::params::{MapSettings, NoiseParameters};
    use crate::pipeline::generate_map;

    fn map(size: usize, table: BiomeTable) -> MapData {
        generate_map(
            &NoiseParameters::with_seed(21),
            &MapSettings {
                size,
                ..Default::default()
            },
            &Arc::new(table),
        )
        .unwrap()
    }

    #[test]
    fn test_heightmap_image_has_correct_dimensions() {
        let image = render_heightmap(&map(20, BiomeTable::default()));
        assert_eq!(image.dimensions(), (20, 20));
    }

    #[test]
    fn test_heightmap_has_multiple_colors() {
        let image = render_heightmap(&map(32, BiomeTable::default()));
        assert!(image.unique_color_count() > 10);
    }

    #[test]
    fn test_height_to_color_covers_full_range() {
        let low = height_to_color(0.0);
        let mid = height_to_color(0.6);
        let high = height_to_color(1.0);
        assert!(low.2 > low.0, "Low ground should be blue");
        assert!(mid.1 > mid.2, "Mid ground should be green");
        assert_eq!(high, (255, 255, 255));
        assert_eq!(height_to_color(0.8), (130, 130, 130));
    }

    #[test]
    fn test_biome_map_uses_terrain_colors() {
        let map = map(16, BiomeTable::default());
        let image = render_biome_map(&map);
        for cell in map.cells() {
            let expected = terrain_color(map.biome_of(cell).unwrap().terrain_type);
            let (r, g, b, _) = image.get_pixel(cell.x as u32, cell.y as u32);
            assert_eq!((r, g, b), expected);
        }
    }

    #[test]
    fn test_unclassified_cells_render_magenta_and_question_mark() {
        let table = BiomeTable::new(vec![BiomeCategory {
            terrain_type: TerrainType::Plains,
            min_height: 2.0,
            max_height: 3.0,
            biomes: vec![Biome {
                name: "unreachable".into(),
                terrain_type: TerrainType::Plains,
                min_temperature: 0.0,
                max_temperature: 1.0,
            }],
        }])
        .unwrap();
        let map = map(4, table);

        let image = render_biome_map(&map);
        assert_eq!(image.unique_color_count(), 1);
        let (r, g, b, _) = image.get_pixel(0, 0);
        assert_eq!((r, g, b), UNCLASSIFIED_COLOR);

        assert_eq!(render_ascii(&map), "????\n????\n????\n????\n");
    }

    #[test]
    fn test_ascii_has_one_line_per_row() {
        let text = render_ascii(&map(10, BiomeTable::default()));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines.iter().all(|l| l.chars().count() == 10));
        assert!(!text.contains('?'));
    }
}
