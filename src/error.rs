// Crate error type. Every variant states *what* contract was broken.
// Ordinary mask content (all clear, all painted, odd colors) never errors.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Buffer length disagrees with the declared width/height.
    #[error(
        "raster dimension mismatch: {width}x{height}x{channels} needs {expected} bytes, got {actual}"
    )]
    DimensionMismatch {
        width: u32,
        height: u32,
        channels: usize,
        expected: usize,
        actual: usize,
    },

    /// Width x height too large to address as an RGBA buffer.
    #[error("raster dimension overflow: {width}x{height}x{channels} does not fit in memory")]
    DimensionOverflow { width: u32, height: u32, channels: usize },

    /// Two rasters that must line up pixel-for-pixel do not.
    #[error("raster size mismatch: expected {expected:?}, got {actual:?}")]
    SizeMismatch { expected: (u32, u32), actual: (u32, u32) },

    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
