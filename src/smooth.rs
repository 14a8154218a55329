// Gaussian smoothing of a mask: blur the 0/1 coverage, then re-threshold.
// Visual: jagged stroke edges round off and the mask grows by roughly a pixel;
// specks narrower than the kernel can disappear.

use crate::config::SmoothParams;
use crate::error::Result;
use crate::types::{Color, Mask, Raster};

/// Kernel extends this many sigmas each side (radius = trunc(4*sigma + 0.5)).
const TRUNCATE: f32 = 4.0;

/// 1D Gaussian weights for offsets `-radius..=radius`, normalized to sum 1.
pub struct Kernel {
    pub radius: usize,
    pub weights: Vec<f32>, // 2*radius + 1 taps, centered
}

/// Build the separable kernel for `sigma`.
pub fn make_gaussian_kernel(sigma: f32) -> Kernel {
    let radius = (TRUNCATE * sigma + 0.5) as usize;
    let s2 = 2.0 * sigma * sigma;
    let r = radius as i64;

    let mut weights: Vec<f32> = (-r..=r)
        .map(|x| {
            let x = x as f32;
            (-(x * x) / s2).exp()
        })
        .collect();

    // Sum to 1 so a uniform field stays uniform.
    let sum: f32 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }

    Kernel { radius, weights }
}

/// Separable Gaussian blur of mask coverage. Samples past the border repeat
/// the edge value, so a fully painted raster stays at 1.0 everywhere.
pub fn gaussian_blur(src: &Mask, kernel: &Kernel) -> Mask {
    let (w, h) = (src.width, src.height);
    let mut tmp = Mask::zeros(w, h);
    let mut dst = Mask::zeros(w, h);
    if w == 0 || h == 0 {
        return dst;
    }
    let r = kernel.radius as isize;

    /* ---- Pass 1: vertical (src -> tmp) ---- */
    for y in 0..h as isize {
        let row_ofs = y as usize * w;
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, wt) in kernel.weights.iter().enumerate() {
                let sy = (y + k as isize - r).clamp(0, h as isize - 1) as usize;
                acc += wt * src.coverage[sy * w + x];
            }
            tmp.coverage[row_ofs + x] = acc;
        }
    }

    /* ---- Pass 2: horizontal (tmp -> dst) ---- */
    for y in 0..h {
        let row = &tmp.coverage[y * w..(y + 1) * w];
        for x in 0..w as isize {
            let mut acc = 0.0f32;
            for (k, wt) in kernel.weights.iter().enumerate() {
                let sx = (x + k as isize - r).clamp(0, w as isize - 1) as usize;
                acc += wt * row[sx];
            }
            dst.coverage[y * w + x as usize] = acc;
        }
    }

    dst
}

/// Smooth with sigma 1 and threshold 0.1. `None` for an empty raster.
pub fn smooth_image(image: &Raster, pen: Color) -> Option<Raster> {
    smooth_with_kernel(image, pen, &make_gaussian_kernel(1.0), 0.1)
}

/// [`smooth_image`] with caller-chosen parameters.
pub fn smooth_image_with(image: &Raster, pen: Color, params: &SmoothParams) -> Result<Option<Raster>> {
    params.validate()?;
    Ok(smooth_with_kernel(image, pen, &make_gaussian_kernel(params.sigma), params.threshold))
}

pub(crate) fn smooth_with_kernel(
    image: &Raster,
    pen: Color,
    kernel: &Kernel,
    threshold: f32,
) -> Option<Raster> {
    if image.is_empty() {
        return None;
    }
    let (width, height) = image.dimensions();

    let mask = Mask::from_alpha(image);
    let blurred = gaussian_blur(&mask, kernel);
    let out = Raster::from_predicate(width, height, pen, |i| blurred.coverage[i] > threshold);

    log::debug!(
        "smooth {}x{}: {} -> {} painted px (radius {}, threshold {})",
        width,
        height,
        image.painted_count(),
        out.painted_count(),
        kernel.radius,
        threshold
    );
    Some(out)
}
