//! Decoded tile raster.

use image::{Rgba, RgbaImage};

/// A decoded RGBA tile owned by the loader and shared with callers by `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct TileBitmap {
    image: RgbaImage,
    placeholder: bool,
}

impl TileBitmap {
    /// Wraps a decoded image.
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image,
            placeholder: false,
        }
    }

    /// Decodes an encoded raster (PNG, JPEG, ...) into a bitmap.
    ///
    /// The format is sniffed from the payload.
    pub fn decode(data: &[u8]) -> Result<Self, image::ImageError> {
        let image = image::load_from_memory(data)?.to_rgba8();
        Ok(Self::new(image))
    }

    /// Creates a solid-colour square bitmap marked as a placeholder.
    pub fn placeholder(size: u32, color: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(size, size, color),
            placeholder: true,
        }
    }

    /// Whether this bitmap stands in for a tile that has not loaded.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel buffer size in bytes, used to weigh cache entries.
    pub fn byte_size(&self) -> usize {
        self.image.as_raw().len()
    }

    /// Borrow the underlying image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}
