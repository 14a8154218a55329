// Mask-over-photo preview with gamma-correct mixing.
// Visual: painted mask pixels tint the photo by the chosen opacity; edges
// between mask colors and the photo show no dark halos.

use crate::config::OverlayOptions;
use crate::error::{Error, Result};
use crate::types::Raster;

// Encoded intensities that map to one linear bucket on the way back.
const LINEAR_STEPS: usize = 4096;
const LINEAR_MAX: f32 = (LINEAR_STEPS - 1) as f32;

/// sRGB transfer curve, encoded [0,1] -> linear [0,1].
fn decode(e: f32) -> f32 {
    match e {
        e if e <= 0.040_45 => e / 12.92,
        e => ((e + 0.055) / 1.055).powf(2.4),
    }
}

/// Inverse of [`decode`].
fn encode(l: f32) -> f32 {
    match l {
        l if l <= 0.003_130_8 => l * 12.92,
        l => l.powf(2.4f32.recip()) * 1.055 - 0.055,
    }
}

/// Precomputed [`decode`] for every byte and [`encode`] for every linear
/// bucket, so the blend loop does no `powf`.
pub struct LinearLut {
    decoded: [f32; 256],
    encoded: [u8; LINEAR_STEPS],
}

impl Default for LinearLut {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearLut {
    pub fn new() -> Self {
        Self {
            decoded: std::array::from_fn(|byte| decode(byte as f32 / 255.0)),
            encoded: std::array::from_fn(|bucket| {
                (encode(bucket as f32 / LINEAR_MAX) * 255.0).round().clamp(0.0, 255.0) as u8
            }),
        }
    }

    #[inline]
    pub fn linear(&self, byte: u8) -> f32 {
        self.decoded[usize::from(byte)]
    }

    /// Nearest byte for a linear value; out-of-range input saturates.
    #[inline]
    pub fn srgb(&self, l: f32) -> u8 {
        let bucket = (l.clamp(0.0, 1.0) * LINEAR_MAX).round() as usize;
        self.encoded[bucket]
    }

    /// `a*over + (1-a)*under`, mixed in linear light.
    #[inline]
    fn mix(&self, under: u8, over: u8, a: f32) -> u8 {
        self.srgb(a * self.linear(over) + (1.0 - a) * self.linear(under))
    }
}

/// Composite `mask` over `background`. The result is fully opaque.
/// Errors when the two rasters differ in size.
pub fn overlay_mask(background: &Raster, mask: &Raster, options: &OverlayOptions) -> Result<Raster> {
    if background.dimensions() != mask.dimensions() {
        return Err(Error::SizeMismatch { expected: background.dimensions(), actual: mask.dimensions() });
    }
    let (width, height) = background.dimensions();
    let a = options.weight();
    let lut = LinearLut::new();

    let mut out = background.clone();
    for (dst, m) in out
        .as_raw_mut()
        .chunks_exact_mut(Raster::CHANNELS)
        .zip(mask.as_raw().chunks_exact(Raster::CHANNELS))
    {
        dst[3] = 255;
        if m[3] == 0 || a <= 0.0 {
            continue; // photo shows through
        }
        if a >= 1.0 {
            dst[..3].copy_from_slice(&m[..3]);
            continue;
        }
        for c in 0..3 {
            dst[c] = lut.mix(dst[c], m[c], a);
        }
    }

    log::debug!("overlay {}x{} at {}% opacity", width, height, options.opacity());
    Ok(out)
}
