//! Image sinks that receive rendered pixels.
//!
//! Colors stay unclamped linear values until they are quantized for output.

use crate::RenderError;
use glint_core::Color;
use image::RgbImage;
use std::path::{Path, PathBuf};

/// Destination for rendered pixels.
///
/// The renderer writes each pixel once and never reads it back.
pub trait ImageSink {
    /// Image size as `(width, height)` in pixels.
    fn resolution(&self) -> (u32, u32);

    /// Store the color of pixel `(x, y)`, with `(0, 0)` at the top left.
    fn write_pixel(&mut self, x: u32, y: u32, color: Color);

    /// Flush the image to its final destination.
    fn finish(&mut self) -> Result<(), RenderError>;
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Convert a color to 8-bit RGBA. Channels above 1 saturate.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * clamp_01(color.x)) as u8;
    let g = (255.0 * clamp_01(color.y)) as u8;
    let b = (255.0 * clamp_01(color.z)) as u8;
    [r, g, b, 255]
}

/// In-memory image that can be inspected after rendering.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Convert to an 8-bit RGB image.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let [r, g, b, _] = color_to_rgba(self.get(x, y));
            image::Rgb([r, g, b])
        })
    }
}

impl ImageSink for ImageBuffer {
    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn write_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.set(x, y, color);
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Sink that encodes the finished image as a PNG file.
#[derive(Debug, Clone)]
pub struct PngWriter {
    path: PathBuf,
    buffer: ImageBuffer,
}

impl PngWriter {
    pub fn new(path: impl AsRef<Path>, width: u32, height: u32) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            buffer: ImageBuffer::new(width, height),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn buffer(&self) -> &ImageBuffer {
        &self.buffer
    }
}

impl ImageSink for PngWriter {
    fn resolution(&self) -> (u32, u32) {
        self.buffer.resolution()
    }

    fn write_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.buffer.set(x, y, color);
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        self.buffer
            .to_rgb_image()
            .save_with_format(&self.path, image::ImageFormat::Png)?;
        log::info!(
            "Wrote {}x{} image to {}",
            self.buffer.width,
            self.buffer.height,
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_rgba_clamps() {
        assert_eq!(color_to_rgba(Color::ZERO), [0, 0, 0, 255]);
        assert_eq!(color_to_rgba(Color::ONE), [255, 255, 255, 255]);
        assert_eq!(color_to_rgba(Color::new(2.0, -1.0, 0.5)), [255, 0, 127, 255]);
    }

    #[test]
    fn test_image_buffer_keeps_unclamped_colors() {
        let mut buffer = ImageBuffer::new(4, 3);
        assert_eq!(buffer.resolution(), (4, 3));

        buffer.write_pixel(3, 2, Color::splat(1.5));
        assert_eq!(buffer.get(3, 2), Color::splat(1.5));
        assert_eq!(buffer.get(0, 0), Color::ZERO);

        let rgba = buffer.to_rgba();
        assert_eq!(rgba.len(), 4 * 3 * 4);
        assert_eq!(&rgba[rgba.len() - 4..], &[255, 255, 255, 255]);
    }

    #[test]
    fn test_rgb_image_layout() {
        let mut buffer = ImageBuffer::new(2, 2);
        buffer.set(1, 0, Color::new(1.0, 0.0, 0.0));
        let img = buffer.to_rgb_image();

        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(1, 0).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(0, 1).0, [0, 0, 0]);
    }

    #[test]
    fn test_png_writer_writes_file() {
        let path = std::env::temp_dir().join(format!("glint_png_writer_{}.png", std::process::id()));
        let mut writer = PngWriter::new(&path, 3, 2);
        writer.write_pixel(0, 0, Color::ONE);
        writer.finish().unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 255, 255]);
        std::fs::remove_file(&path).unwrap();
    }
}
