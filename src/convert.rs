// Adapter between the host's `image` crate buffers and our rasters.
// Both sides are row-major 8-bit. An `ImageBuffer` may carry spare bytes past
// the last pixel, so only the first w*h*channels bytes are taken.

use image::{DynamicImage, ImageBuffer, Rgb, RgbImage, Rgba, RgbaImage};

use crate::error::{Error, Result};
use crate::types::{Color, Raster, RgbRaster};

// Drop trailing bytes beyond the pixel data; `from_raw` checks the rest.
fn pixel_bytes(mut raw: Vec<u8>, width: u32, height: u32, channels: usize) -> Vec<u8> {
    let len = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(channels);
    raw.truncate(len);
    raw
}

// Our buffers are exact, so `ImageBuffer::from_raw` only fails if that breaks.
fn mismatch(width: u32, height: u32, channels: usize, actual: usize) -> Error {
    Error::DimensionMismatch {
        width,
        height,
        channels,
        expected: (width as usize).saturating_mul(height as usize).saturating_mul(channels),
        actual,
    }
}

impl TryFrom<RgbaImage> for Raster {
    type Error = Error;

    fn try_from(img: RgbaImage) -> Result<Self> {
        let (w, h) = img.dimensions();
        Raster::from_raw(w, h, pixel_bytes(img.into_raw(), w, h, Raster::CHANNELS))
    }
}

impl TryFrom<Raster> for RgbaImage {
    type Error = Error;

    fn try_from(r: Raster) -> Result<Self> {
        let (w, h) = r.dimensions();
        let raw = r.into_raw();
        let len = raw.len();
        ImageBuffer::from_raw(w, h, raw).ok_or_else(|| mismatch(w, h, Raster::CHANNELS, len))
    }
}

impl TryFrom<RgbImage> for RgbRaster {
    type Error = Error;

    fn try_from(img: RgbImage) -> Result<Self> {
        let (w, h) = img.dimensions();
        RgbRaster::from_raw(w, h, pixel_bytes(img.into_raw(), w, h, RgbRaster::CHANNELS))
    }
}

impl TryFrom<RgbRaster> for RgbImage {
    type Error = Error;

    fn try_from(r: RgbRaster) -> Result<Self> {
        let (w, h) = r.dimensions();
        let raw = r.into_raw();
        let len = raw.len();
        ImageBuffer::from_raw(w, h, raw).ok_or_else(|| mismatch(w, h, RgbRaster::CHANNELS, len))
    }
}

impl Raster {
    /// Any decoded image, converted to RGBA8 (e.g. a mask layer loaded by the host).
    pub fn from_dynamic(img: &DynamicImage) -> Result<Self> {
        img.to_rgba8().try_into()
    }

    pub fn into_rgba_image(self) -> Result<RgbaImage> {
        self.try_into()
    }
}

impl RgbRaster {
    /// Any decoded image, converted to RGB8 (e.g. a saved binary mask).
    pub fn from_dynamic(img: &DynamicImage) -> Result<Self> {
        img.to_rgb8().try_into()
    }

    pub fn into_rgb_image(self) -> Result<RgbImage> {
        self.try_into()
    }
}

impl From<Rgba<u8>> for Color {
    fn from(p: Rgba<u8>) -> Self {
        Color::from(p.0)
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        Rgba([c.r, c.g, c.b, c.a])
    }
}

impl From<Rgb<u8>> for Color {
    fn from(Rgb([r, g, b]): Rgb<u8>) -> Self {
        Color::rgb(r, g, b)
    }
}
