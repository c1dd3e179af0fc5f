//! A 2D debug image represented as a flat array of RGBA pixels.

use std::io::Cursor;
use std::path::Path;

/// Errors from encoding or saving a debug image.
#[derive(Debug, thiserror::Error)]
pub enum VizError {
    /// PNG encoding failed.
    #[error("failed to encode png: {0}")]
    Encode(#[from] png::EncodingError),

    /// Writing the file failed.
    #[error("failed to write image: {0}")]
    Write(#[source] std::io::Error),
}

/// A 2D debug image, stored as row-major RGBA pixels.
#[derive(Clone, Debug)]
pub struct DebugImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data in row-major RGBA format. Length = `width * height * 4`.
    pub pixels: Vec<u8>,
}

impl DebugImage {
    /// Create a new black (all-zero) image with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    /// Set a single pixel's RGB value, fully opaque.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn set_pixel(&mut self, x: u32, y: u32, (r, g, b): (u8, u8, u8)) {
        let idx = ((y * self.width + x) * 4) as usize;
        self.pixels[idx..idx + 4].copy_from_slice(&[r, g, b, 255]);
    }

    /// Get a pixel's RGBA value.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn get_pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let idx = ((y * self.width + x) * 4) as usize;
        (
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        )
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Count the number of unique colors (ignoring alpha) in the image.
    pub fn unique_color_count(&self) -> usize {
        let mut colors = std::collections::HashSet::new();
        for chunk in self.pixels.chunks_exact(4) {
            colors.insert((chunk[0], chunk[1], chunk[2]));
        }
        colors.len()
    }

    /// Encode as an 8-bit RGBA PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, VizError> {
        let mut png_buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(Cursor::new(&mut png_buf), self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.pixels)?;
            writer.finish()?;
        }
        Ok(png_buf)
    }

    /// Encode as PNG and write to `path`.
    pub fn save_png(&self, path: &Path) -> Result<(), VizError> {
        let bytes = self.to_png()?;
        std::fs::write(path, bytes).map_err(VizError::Write)
    }
}
