//! Output raster for completed renders.

use astra_core::Rgb8;

/// A width x height grid of RGBA pixels, written row by row.
///
/// Only fully populated once the frame driver has completed the last
/// row; it is then handed off read-only to the image encoder.
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Raster {
    /// Create a raster with every pixel cleared to transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 0]; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Write a shaded color at (x, y), always fully opaque.
    pub fn set(&mut self, x: u32, y: u32, color: Rgb8) {
        self.pixels[(y * self.width + x) as usize] = [color.r, color.g, color.b, 255];
    }

    /// Flatten to raw RGBA bytes, row-major.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            bytes.extend_from_slice(pixel);
        }
        bytes
    }

    /// Convert to an [`image::RgbaImage`] for the encoder collaborator.
    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| image::Rgba(self.get(x, y)))
    }
}
