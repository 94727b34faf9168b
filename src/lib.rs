//! # memfit
//!
//! Batch image resizer that keeps decoded pixel buffers within a memory
//! budget. Give it a byte ceiling and a set of images; for each one it
//! computes the largest dimensions whose *uncompressed* raster — row
//! alignment padding included — fits the ceiling, and resizes down to
//! them. Images that already fit are left alone; memfit never upscales.
//!
//! # Architecture: Solve, Then Fan Out
//!
//! The interesting work is split between a pure numeric core and a
//! concurrent shell around it:
//!
//! ```text
//! 1. Discover   root path        →  ordered file list
//! 2. Dispatch   one rayon task per file
//! 3. Per file   resolve DPI → solve dimensions → decode/resize/encode
//! 4. Join       all tasks, then flush buffered diagnostics
//! ```
//!
//! Workers share three things: the immutable batch options, an atomic
//! progress counter (one increment per file, on every exit path), and the
//! diagnostic sink. Nothing else crosses a worker boundary — per-file
//! failures become log lines where they happen and never abort siblings.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`format`] | Extension → pixel format → decoded bytes-per-pixel |
//! | [`solver`] | Iterative search for maximal dimensions under the budget |
//! | [`dpi`] | DPI from override, EXIF metadata, or the 72 default |
//! | [`discover`] | Expands a root path into a stable candidate file list |
//! | [`batch`] | Concurrent orchestration, skip policy, progress, join |
//! | [`sink`] | Order-preserving diagnostic buffer, flushed post-join |
//! | [`progress`] | Progress-rendering seam (`tick` per completed file) |
//! | [`imaging`] | Codec seam: `ImageBackend` trait + pure-Rust backend |
//!
//! # Design Decisions
//!
//! ## Stride-Aware Solving
//!
//! The decoded footprint of an image is `stride × height`, where the
//! stride pads each row to an alignment boundary. A naive
//! `width × height × bpp` estimate under-counts that padding, so the
//! solver seeds from the ideal and iterates with the measured stride
//! until the footprint fits. See [`solver::solve`].
//!
//! ## Buffered Diagnostics
//!
//! Direct console output from concurrent workers produces torn lines.
//! All user-visible text goes through [`sink::DiagnosticSink`], which is
//! flushed only after the batch joins; each worker appends its file's
//! lines as one contiguous group.
//!
//! ## Pure-Rust Imaging (No ImageMagick, No FFmpeg)
//!
//! The [`imaging`] module uses the `image` crate for decode, Lanczos3
//! resampling, and JPEG/PNG encoding — all pure Rust, statically linked.
//! The codec sits behind the [`imaging::ImageBackend`] trait, so
//! orchestration tests run against a recording mock instead of pixels.
//!
//! ## Bounded Fan-Out
//!
//! One task per file, scheduled on rayon's thread pool. That bounds real
//! concurrency to the available cores instead of spawning one OS thread
//! (and one open decoder) per file, while keeping the per-file unit of
//! work independent.

pub mod batch;
pub mod discover;
pub mod dpi;
pub mod format;
pub mod imaging;
pub mod progress;
pub mod sink;
pub mod solver;
