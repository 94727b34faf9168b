//! DPI resolution: explicit override, EXIF metadata, or the 72 default.
//!
//! An explicit nonzero override always wins and metadata is not consulted.
//! Otherwise the X/Y resolution tags are read from the file's EXIF block;
//! any failure — no EXIF, missing tags, zero denominators, mismatched
//! horizontal/vertical resolution — degrades to [`DEFAULT_DPI`]. Extraction
//! never surfaces a fatal error: the worst outcome is the default plus a
//! diagnostic explaining why.

use rexif::{ExifData, ExifTag, TagValue, parse_buffer_quiet};
use std::path::Path;
use thiserror::Error;

/// Fallback when no override is given and extraction fails.
pub const DEFAULT_DPI: u32 = 72;

#[derive(Error, Debug)]
pub enum DpiError {
    #[error("failed to open file: {0}")]
    Io(#[from] std::io::Error),
    #[error("no EXIF data or corrupted EXIF data: {0}")]
    Exif(String),
    #[error("missing XResolution/YResolution tags")]
    MissingResolution,
    #[error("degenerate resolution value")]
    Degenerate,
    #[error("horizontal resolution {x} does not match vertical {y}")]
    AxisMismatch { x: u32, y: u32 },
}

/// Where a resolved DPI value came from.
#[derive(Debug)]
pub enum DpiSource {
    /// Caller supplied a nonzero override.
    Override,
    /// Extracted from the file's EXIF resolution tags.
    Metadata,
    /// Extraction failed; the default was used.
    Fallback(DpiError),
}

/// Resolve the DPI for one file.
///
/// Returns the value together with its provenance so the caller can log
/// extracted values and fallback reasons.
pub fn resolve(override_dpi: u32, path: &Path) -> (u32, DpiSource) {
    if override_dpi != 0 {
        return (override_dpi, DpiSource::Override);
    }
    match extract(path) {
        Ok(dpi) => (dpi, DpiSource::Metadata),
        Err(err) => (DEFAULT_DPI, DpiSource::Fallback(err)),
    }
}

/// Read the DPI from a file's EXIF resolution tags.
fn extract(path: &Path) -> Result<u32, DpiError> {
    let bytes = std::fs::read(path)?;
    let exif = parse_buffer_quiet(&bytes)
        .0
        .map_err(|e| DpiError::Exif(e.to_string()))?;

    let x = rational_tag(&exif, ExifTag::XResolution).ok_or(DpiError::MissingResolution)?;
    let y = rational_tag(&exif, ExifTag::YResolution).ok_or(DpiError::MissingResolution)?;
    validate_resolution(x, y)
}

/// Validate a parsed X/Y resolution pair.
///
/// Sub-1 values are degenerate, and an anisotropic pair is rejected rather
/// than averaged: the solver assumes square pixels.
fn validate_resolution(x: f64, y: f64) -> Result<u32, DpiError> {
    if x < 1.0 || y < 1.0 {
        return Err(DpiError::Degenerate);
    }
    let (x, y) = (x as u32, y as u32);
    if x != y {
        return Err(DpiError::AxisMismatch { x, y });
    }
    Ok(x)
}

/// First value of an unsigned-rational tag, skipping zero denominators.
fn rational_tag(exif: &ExifData, tag: ExifTag) -> Option<f64> {
    exif.entries
        .iter()
        .find(|entry| entry.tag == tag)
        .and_then(|entry| match &entry.value {
            TagValue::URational(values) => values
                .first()
                .filter(|r| r.denominator != 0)
                .map(|r| r.numerator as f64 / r.denominator as f64),
            _ => None,
        })
}
