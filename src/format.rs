//! Pixel format model: maps file types to decoded-buffer byte costs.
//!
//! The solver reasons about *decoded* memory, not file size. Every supported
//! extension maps to exactly one [`PixelFormat`], and each format has a fixed
//! bytes-per-pixel used to size the uncompressed raster. Unrecognized
//! extensions are rejected with a typed error before any pixel work happens.

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Unsupported image extension: {0:?}")]
    UnsupportedExtension(String),
}

/// Extensions accepted as batch input, matched case-insensitively.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Pixel layout of a decoded image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8-bit palette-indexed, one byte per pixel.
    Indexed8,
    /// 24-bit RGB. Decoded surfaces are 32-bit aligned, so this still
    /// costs four bytes per pixel.
    Rgb24,
    /// 32-bit RGB with alpha.
    Argb32,
}

impl PixelFormat {
    /// Derive the pixel format from a file's extension.
    ///
    /// `.png` decodes to an alpha surface, `.jpg`/`.jpeg` to an opaque one.
    /// Anything else is a configuration error, surfaced to the caller
    /// instead of aborting the run.
    pub fn from_path(path: &Path) -> Result<Self, FormatError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "png" => Ok(PixelFormat::Argb32),
            "jpg" | "jpeg" => Ok(PixelFormat::Rgb24),
            _ => Err(FormatError::UnsupportedExtension(ext)),
        }
    }

    /// Bytes one pixel occupies in the decoded buffer.
    pub fn bytes_per_pixel(self) -> u32 {
        match self {
            PixelFormat::Indexed8 => 1,
            PixelFormat::Rgb24 | PixelFormat::Argb32 => 4,
        }
    }
}

/// Whether a path's extension is in the supported input set.
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| ext.eq_ignore_ascii_case(s))
        })
}
