//! Debug visualization of generated maps.
//!
//! Provides [`DebugImage`] plus renderers for the height field and the biome
//! map, PNG encoding for saving them, and an ASCII dump for terminals.

mod image;
mod renderers;

pub use self::image::{DebugImage, VizError};
pub use renderers::{
    UNCLASSIFIED_COLOR, height_to_color, render_ascii, render_biome_map, render_heightmap,
    terrain_color, terrain_glyph,
};
