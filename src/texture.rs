use std::path::Path;

use image::{DynamicImage, GenericImageView};

use crate::point2d::Point2D;
use crate::point3d::Point3D;

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to decode texture image")]
    Decode(#[from] image::ImageError),
    #[error("texture has zero size ({width}x{height})")]
    Empty { width: u32, height: u32 },
    #[error("texture needs at least 3 channels per texel, got {0}")]
    TooFewChannels(u32),
    #[error("texture buffer holds {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Decoded texture kept in loader row order. Only the first three channels of each
/// texel are ever read.
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub channels: u32,
    data: Vec<u8>,
}

impl Texture {
    pub fn from_raw(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty { width, height });
        }
        if channels < 3 {
            return Err(TextureError::TooFewChannels(channels));
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(TextureError::SizeMismatch { expected, actual: data.len() });
        }
        Ok(Self { width, height, channels, data })
    }

    /// Single-texel texture of one color.
    pub fn solid(r: u8, g: u8, b: u8) -> Self {
        Self { width: 1, height: 1, channels: 3, data: vec![r, g, b] }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let img: DynamicImage = image::open(path)?;
        Self::from_image(img)
    }

    /// Images with alpha keep 4 channels, everything else is expanded to RGB.
    pub fn from_image(img: DynamicImage) -> Result<Self, TextureError> {
        let (width, height) = img.dimensions();
        if img.color().has_alpha() {
            Self::from_raw(width, height, 4, img.to_rgba8().into_raw())
        } else {
            Self::from_raw(width, height, 3, img.to_rgb8().into_raw())
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline(always)]
    fn texel(&self, x: u32, y: u32) -> Point3D {
        let idx = self.channels as usize * (y as usize * self.width as usize + x as usize);
        let rgb = &self.data[idx..idx + 3];
        Point3D { x: rgb[0] as f32, y: rgb[1] as f32, z: rgb[2] as f32 }
    }

    /// Bilinear lookup with wrap-around addressing; returns unclamped RGB in 0..=255 units.
    ///
    /// A negative scaled coordinate is wrapped forward by one texture size only. Integer
    /// corners are clamped into the texture before any read, so arbitrary input is
    /// memory-safe. The vertical blend factor is measured from the wrapped `+1` row.
    pub fn sample_bilinear(&self, uv: Point2D) -> Point3D {
        let width = self.width as f32;
        let height = self.height as f32;
        let mut t = Point2D { x: uv.x * width - 0.5, y: uv.y * height - 0.5 };
        if t.x < 0.0 {
            t.x += width;
        }
        if t.y < 0.0 {
            t.y += height;
        }

        let x0 = (t.x as i64).clamp(0, self.width as i64 - 1) as u32;
        let y0 = (t.y as i64).clamp(0, self.height as i64 - 1) as u32;
        let x1 = (x0 + 1) % self.width;
        let y1 = (y0 + 1) % self.height;

        let top_left = self.texel(x0, y0);
        let top_right = self.texel(x1, y0);
        let bottom_left = self.texel(x0, y1);
        let bottom_right = self.texel(x1, y1);

        let fx = t.x - x0 as f32;
        let fy = t.y - y1 as f32;
        let top = top_left * (1.0 - fx) + top_right * fx;
        let bottom = bottom_left * (1.0 - fx) + bottom_right * fx;
        top * (1.0 - fy) + bottom * fy
    }
}
