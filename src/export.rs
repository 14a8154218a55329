// Binary save format: white where painted, black elsewhere, no alpha.
// Loading a saved mask reverses it onto the pen color.

use crate::types::{Color, Raster, RgbRaster};

/// Red channel above this reads back as painted.
pub const LOAD_THRESHOLD: u8 = 125;

/// Two-value quantization of the mask: alpha > 0 -> (255,255,255), else (0,0,0).
/// `None` for an empty raster.
pub fn create_binary_save_image(image: &Raster) -> Option<RgbRaster> {
    if image.is_empty() {
        return None;
    }
    let (width, height) = image.dimensions();
    let mut out = RgbRaster::zeroed_like(width, height);

    for (dst, a) in out.as_raw_mut().chunks_exact_mut(RgbRaster::CHANNELS).zip(image.alpha_channel()) {
        if a > 0 {
            dst.fill(255);
        }
    }

    log::debug!("binary export {}x{}: {} white px", width, height, image.painted_count());
    Some(out)
}

/// Turn a saved black/white mask back into an overlay painted with `pen`.
pub fn load_binary_mask(saved: &RgbRaster, pen: Color) -> Option<Raster> {
    if saved.is_empty() {
        return None;
    }
    let (width, height) = saved.dimensions();
    let raw = saved.as_raw();
    let out = Raster::from_predicate(width, height, pen, |i| raw[i * RgbRaster::CHANNELS] > LOAD_THRESHOLD);
    log::debug!("binary load {}x{}: {} painted px", width, height, out.painted_count());
    Some(out)
}
