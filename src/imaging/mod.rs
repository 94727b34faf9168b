//! Image codec seam — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Resize** | `resize_exact` with Lanczos3 / Triangle / Nearest |
//! | **Encode** | `JpegEncoder::new_with_quality`, `PngEncoder` |
//!
//! The module is split into:
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use params::{Quality, ResizeFilter, ResizeParams};
pub use rust_backend::RustBackend;
