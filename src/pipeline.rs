// Composite clean-up filter: smooth x2 -> thin -> smooth x4.
// Visual: a hand-drawn, jagged stroke turns into an even stroke of about
// constant width that follows the drawn centerline.

use crate::config::FilterConfig;
use crate::error::Result;
use crate::smooth::{Kernel, make_gaussian_kernel, smooth_with_kernel};
use crate::thin::thin_image;
use crate::types::{Color, Raster};

/// Default pipeline (two smoothing passes, thinning, four smoothing passes).
pub fn smooth_thin_smooth_image(image: &Raster, pen: Color) -> Option<Raster> {
    let config = FilterConfig::default();
    run(image, pen, &config, &make_gaussian_kernel(config.smooth.sigma))
}

/// [`smooth_thin_smooth_image`] with caller-chosen pass counts and smoothing.
pub fn smooth_thin_smooth_image_with(
    image: &Raster,
    pen: Color,
    config: &FilterConfig,
) -> Result<Option<Raster>> {
    config.smooth.validate()?;
    Ok(run(image, pen, config, &make_gaussian_kernel(config.smooth.sigma)))
}

fn run(image: &Raster, pen: Color, config: &FilterConfig, kernel: &Kernel) -> Option<Raster> {
    if image.is_empty() {
        return None;
    }
    let threshold = config.smooth.threshold;

    // Each stage reads the previous raster; the first reads the input itself.
    let mut smoothed: Option<Raster> = None;
    for _ in 0..config.pre_smooth {
        let src = smoothed.as_ref().unwrap_or(image);
        smoothed = Some(smooth_with_kernel(src, pen, kernel, threshold)?);
    }
    let mut current = thin_image(smoothed.as_ref().unwrap_or(image), pen)?;
    for _ in 0..config.post_smooth {
        current = smooth_with_kernel(&current, pen, kernel, threshold)?;
    }

    log::debug!(
        "smooth-thin-smooth {:?}: {} -> {} painted px",
        image.dimensions(),
        image.painted_count(),
        current.painted_count()
    );
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smooth::smooth_image;

    const PEN: Color = Color::rgb(0, 120, 255);

    fn bar() -> Raster {
        let mut r = Raster::new(30, 15).unwrap();
        for y in 5..10 {
            for x in 3..27 {
                r.put_pixel(x, y, Color::rgb(1, 1, 1));
            }
        }
        r
    }

    #[test]
    fn matches_manual_chain() {
        let r = bar();
        let mut manual = r.clone();
        for _ in 0..2 {
            manual = smooth_image(&manual, PEN).unwrap();
        }
        manual = thin_image(&manual, PEN).unwrap();
        for _ in 0..4 {
            manual = smooth_image(&manual, PEN).unwrap();
        }
        assert_eq!(smooth_thin_smooth_image(&r, PEN).unwrap(), manual);
    }

    #[test]
    fn zero_passes_is_plain_thinning() {
        let r = bar();
        let config = FilterConfig { pre_smooth: 0, post_smooth: 0, ..FilterConfig::default() };
        let out = smooth_thin_smooth_image_with(&r, PEN, &config).unwrap().unwrap();
        assert_eq!(out, thin_image(&r, PEN).unwrap());
    }

    #[test]
    fn input_is_left_untouched() {
        let r = bar();
        let before = r.clone();
        let config = FilterConfig { pre_smooth: 1, post_smooth: 0, ..FilterConfig::default() };
        let out = smooth_thin_smooth_image_with(&r, PEN, &config).unwrap().unwrap();
        assert_eq!(r, before);
        assert_eq!(out, thin_image(&smooth_image(&r, PEN).unwrap(), PEN).unwrap());
    }

    #[test]
    fn clear_mask_stays_clear() {
        let r = Raster::new(8, 8).unwrap();
        let out = smooth_thin_smooth_image(&r, PEN).unwrap();
        assert_eq!(out.painted_count(), 0);
    }

    #[test]
    fn empty_input_is_no_result() {
        assert!(smooth_thin_smooth_image(&Raster::new(0, 0).unwrap(), PEN).is_none());
    }
}
