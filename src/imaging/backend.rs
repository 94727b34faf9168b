//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the batch pipeline
//! needs from a codec: identify (header-only dimension read) and resize
//! (decode, resample, encode). The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust, statically
//! linked. Tests swap in the recording [`MockBackend`](tests::MockBackend).

use super::params::ResizeParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// `Sync` because the orchestrator shares one backend across rayon workers.
pub trait ImageBackend: Sync {
    /// Get image dimensions without decoding pixel data.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode, resample to the exact target dimensions, and encode.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;
}
