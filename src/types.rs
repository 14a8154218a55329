// Core types shared by every mask algorithm.
// A mask lives in the alpha channel of an RGBA raster: painted pixels carry
// alpha=255 and the pen RGB, unpainted pixels carry alpha=0.

use crate::error::{Error, Result};

/// RGBA color, one byte per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Transparency class: `a == 0`.
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Same RGB at full opacity. This is how a pen paints into the mask.
    #[inline]
    pub fn opaque(self) -> Self {
        Self { a: 255, ..self }
    }

    #[inline]
    pub(crate) fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

/// Integer pixel coordinate. May lie outside the raster; algorithms check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Truncate a view-space position (e.g. a scaled mouse position) toward zero.
    pub fn from_f32(x: f32, y: f32) -> Self {
        Self { x: x as i32, y: y as i32 }
    }

    pub fn from_f64(x: f64, y: f64) -> Self {
        Self { x: x as i32, y: y as i32 }
    }
}

/// Row-major RGBA8 raster. `pixels.len() == width * height * 4` always holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>, // r,g,b,a per pixel
}

impl Raster {
    pub const CHANNELS: usize = 4;

    /// Fully transparent raster (nothing painted). Fails when the size cannot
    /// be addressed.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = byte_len(width, height, Self::CHANNELS)?;
        Ok(Self { width, height, pixels: vec![0u8; len] })
    }

    /// Every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self> {
        let len = byte_len(width, height, Self::CHANNELS)?;
        Ok(Self { width, height, pixels: color.to_bytes().repeat(len / Self::CHANNELS) })
    }

    /// Wrap an existing buffer, rejecting one whose length disagrees with the
    /// declared dimensions.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        check_len(width, height, Self::CHANNELS, pixels.len())?;
        Ok(Self { width, height, pixels })
    }

    /// Blank raster with the size of one that already exists, so the length
    /// is known to be in range.
    pub(crate) fn zeroed_like(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * Self::CHANNELS],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// A raster with no pixels is the "absent image" case.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width && (p.y as u32) < self.height
    }

    /// Byte offset of pixel (x, y). Caller guarantees bounds.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * Self::CHANNELS
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        let p = &self.pixels[i..i + Self::CHANNELS];
        Some(Color::rgba(p[0], p[1], p[2], p[3]))
    }

    #[inline]
    pub fn alpha(&self, x: u32, y: u32) -> Option<u8> {
        self.pixel(x, y).map(|c| c.a)
    }

    /// Returns false (and writes nothing) when (x, y) is outside the raster.
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Color) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let i = self.index(x, y);
        self.pixels[i..i + Self::CHANNELS].copy_from_slice(&color.to_bytes());
        true
    }

    /// Alpha channel only, one byte per pixel.
    pub fn alpha_channel(&self) -> impl Iterator<Item = u8> + '_ {
        self.pixels.chunks_exact(Self::CHANNELS).map(|p| p[3])
    }

    /// Number of painted (alpha > 0) pixels.
    pub fn painted_count(&self) -> usize {
        self.alpha_channel().filter(|&a| a > 0).count()
    }

    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable bytes; the length cannot change, so the invariant survives.
    #[inline]
    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Paint `color` (forced opaque) wherever `on` is true, transparent elsewhere.
    /// `on` is indexed per pixel, row-major.
    pub(crate) fn from_predicate(
        width: u32,
        height: u32,
        pen: Color,
        mut on: impl FnMut(usize) -> bool,
    ) -> Self {
        let mut out = Raster::zeroed_like(width, height);
        let pen = pen.opaque().to_bytes();
        for (i, px) in out.pixels.chunks_exact_mut(Self::CHANNELS).enumerate() {
            if on(i) {
                px.copy_from_slice(&pen);
            }
        }
        out
    }
}

/// Row-major RGB8 raster without alpha. Produced by binary export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbRaster {
    width: u32,
    height: u32,
    pixels: Vec<u8>, // r,g,b per pixel
}

impl RgbRaster {
    pub const CHANNELS: usize = 3;

    /// All black.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = byte_len(width, height, Self::CHANNELS)?;
        Ok(Self { width, height, pixels: vec![0u8; len] })
    }

    /// All black, sized like an existing raster.
    pub(crate) fn zeroed_like(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * Self::CHANNELS],
        }
    }

    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        check_len(width, height, Self::CHANNELS, pixels.len())?;
        Ok(Self { width, height, pixels })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * Self::CHANNELS;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]])
    }

    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }
}

/// Mask coverage in [0,1] per pixel, derived from a raster's alpha channel.
/// Never stored; rebuilt for each call.
pub struct Mask {
    pub width: usize,
    pub height: usize,
    pub coverage: Vec<f32>, // length = width * height
}

impl Mask {
    /// 1.0 where alpha > 0, else 0.0.
    pub fn from_alpha(raster: &Raster) -> Self {
        Self {
            width: raster.width() as usize,
            height: raster.height() as usize,
            coverage: raster
                .alpha_channel()
                .map(|a| if a > 0 { 1.0 } else { 0.0 })
                .collect(),
        }
    }

    pub fn zeros(width: usize, height: usize) -> Self {
        Self { width, height, coverage: vec![0.0; width * height] }
    }
}

/// Bytes needed for `width x height x channels`. Every raster, RGB or RGBA,
/// must also fit as RGBA within `isize::MAX` bytes (the `Vec` limit), so
/// converting between the two layouts never overflows.
fn byte_len(width: u32, height: u32, channels: usize) -> Result<usize> {
    let pixels = (width as usize).checked_mul(height as usize);
    let rgba = pixels.and_then(|n| n.checked_mul(Raster::CHANNELS));
    match (pixels, rgba) {
        (Some(n), Some(r)) if r <= isize::MAX as usize => Ok(n * channels),
        _ => Err(Error::DimensionOverflow { width, height, channels }),
    }
}

fn check_len(width: u32, height: u32, channels: usize, actual: usize) -> Result<()> {
    let expected = byte_len(width, height, channels)?;
    if actual != expected {
        return Err(Error::DimensionMismatch { width, height, channels, expected, actual });
    }
    Ok(())
}
