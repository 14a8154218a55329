// Tool and filter settings the host passes in with each call.
// Replaces the editor's loose per-tool dictionaries with typed structs.

use crate::error::{Error, Result};
use crate::types::Color;

pub const MIN_BRUSH_SIZE: u32 = 4;
pub const MAX_BRUSH_SIZE: u32 = 100;
pub const DEFAULT_BRUSH_SIZE: u32 = 8;
/// Quick-pick sizes offered next to the size slider.
pub const BRUSH_SIZE_PRESETS: [u32; 4] = [4, 8, 16, 32];
pub const DEFAULT_PEN_COLOR: Color = Color::rgb(255, 165, 0); // orange

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Pencil,
    Line,
    Fill,
    Eraser,
}

/// `{size, color, tool}` for the active tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToolSettings {
    size: u32,
    pub color: Color,
    pub tool: Tool,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self { size: DEFAULT_BRUSH_SIZE, color: DEFAULT_PEN_COLOR, tool: Tool::default() }
    }
}

impl ToolSettings {
    pub fn new(tool: Tool, size: u32, color: Color) -> Self {
        let mut s = Self { size: DEFAULT_BRUSH_SIZE, color, tool };
        s.set_size(size);
        s
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Clamped to `MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE`.
    pub fn set_size(&mut self, size: u32) {
        let clamped = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
        if clamped != size {
            log::warn!("brush size {size} out of range, using {clamped}");
        }
        self.size = clamped;
    }

    /// Color actually written by the tool. The eraser paints transparency.
    pub fn effective_color(&self) -> Color {
        match self.tool {
            Tool::Eraser => Color::TRANSPARENT,
            _ => self.color,
        }
    }
}

/// Gaussian smoothing knobs. Defaults: sigma 1 px, threshold 0.1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothParams {
    pub sigma: f32,
    /// Blurred coverage strictly above this is painted.
    pub threshold: f32,
}

impl Default for SmoothParams {
    fn default() -> Self {
        Self { sigma: 1.0, threshold: 0.1 }
    }
}

impl SmoothParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(Error::InvalidParameter {
                name: "sigma",
                value: self.sigma.to_string(),
                reason: "must be finite and > 0",
            });
        }
        if !(0.0..1.0).contains(&self.threshold) {
            return Err(Error::InvalidParameter {
                name: "threshold",
                value: self.threshold.to_string(),
                reason: "must be in [0, 1)",
            });
        }
        Ok(())
    }
}

/// Pass counts for smooth -> thin -> smooth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterConfig {
    pub pre_smooth: usize,
    pub post_smooth: usize,
    pub smooth: SmoothParams,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { pre_smooth: 2, post_smooth: 4, smooth: SmoothParams::default() }
    }
}

/// Mask opacity over the photo, percent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayOptions {
    opacity: u8,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self { opacity: 50 }
    }
}

impl OverlayOptions {
    pub fn new(opacity: u8) -> Self {
        Self { opacity: opacity.min(100) }
    }

    #[inline]
    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    /// Opacity as a blend weight in [0,1].
    #[inline]
    pub fn weight(&self) -> f32 {
        self.opacity as f32 / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brush_size_is_clamped() {
        let s = ToolSettings::new(Tool::Pencil, 1, DEFAULT_PEN_COLOR);
        assert_eq!(s.size(), MIN_BRUSH_SIZE);
        let s = ToolSettings::new(Tool::Line, 500, DEFAULT_PEN_COLOR);
        assert_eq!(s.size(), MAX_BRUSH_SIZE);
        assert!(BRUSH_SIZE_PRESETS.contains(&ToolSettings::default().size()));
    }

    #[test]
    fn eraser_paints_transparent() {
        let s = ToolSettings::new(Tool::Eraser, 16, Color::rgb(10, 20, 30));
        assert!(s.effective_color().is_transparent());
        let s = ToolSettings::new(Tool::Fill, 16, Color::rgb(10, 20, 30));
        assert_eq!(s.effective_color(), Color::rgb(10, 20, 30));
    }

    #[test]
    fn smooth_params_validation() {
        assert!(SmoothParams::default().validate().is_ok());
        assert!(SmoothParams { sigma: 0.0, threshold: 0.1 }.validate().is_err());
        assert!(SmoothParams { sigma: f32::NAN, threshold: 0.1 }.validate().is_err());
        assert!(SmoothParams { sigma: 1.0, threshold: 1.0 }.validate().is_err());
    }

    #[test]
    fn overlay_opacity_clamped() {
        assert_eq!(OverlayOptions::new(250).opacity(), 100);
        assert_eq!(OverlayOptions::default().opacity(), 50);
        assert!((OverlayOptions::new(25).weight() - 0.25).abs() < f32::EPSILON);
    }
}
