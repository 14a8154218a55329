// Mask editing engine for hand-correcting generated masks.
// The mask lives in the alpha channel of an RGBA raster overlaid on a photo.
// What each call does to the picture:
// • smooth_image: rounds jagged edges, grows the mask ~1px, drops specks.
// • thin_image: collapses strokes to a 1-pixel centerline.
// • smooth_thin_smooth_image: clean, even stroke along the old centerline.
// • create_binary_save_image / load_binary_mask: black/white file form and back.
// • flood_fill: paints a transparent hole in one click.
// • overlay_mask: the preview of mask over photo at some opacity.
//
// Every call is synchronous and pure: a fresh raster comes back, the input is
// never touched. An empty input raster gives `None`.

mod config;
mod convert;
mod error;
mod export;
mod fill;
mod overlay;
mod pipeline;
mod smooth;
mod thin;
mod types;

pub use config::{
    BRUSH_SIZE_PRESETS, DEFAULT_BRUSH_SIZE, DEFAULT_PEN_COLOR, FilterConfig, MAX_BRUSH_SIZE,
    MIN_BRUSH_SIZE, OverlayOptions, SmoothParams, Tool, ToolSettings,
};
pub use error::{Error, Result};
pub use export::{LOAD_THRESHOLD, create_binary_save_image, load_binary_mask};
pub use fill::flood_fill;
pub use overlay::{LinearLut, overlay_mask};
pub use pipeline::{smooth_thin_smooth_image, smooth_thin_smooth_image_with};
pub use smooth::{Kernel, gaussian_blur, make_gaussian_kernel, smooth_image, smooth_image_with};
pub use thin::{ThinningLut, thin_binary, thin_image};
pub use types::{Color, Mask, Point, Raster, RgbRaster};
