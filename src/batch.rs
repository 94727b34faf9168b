//! Batch orchestration: fan work out per file, join, then flush.
//!
//! One root path is one batch. Discovery produces the file list, rayon's
//! thread pool runs one unit of work per file (bounding concurrency to
//! available cores), and `par_iter().map(..).collect()` is the full-barrier
//! join — the function cannot return, and the sink cannot flush, before
//! every worker has finished.
//!
//! ## Per-file contract
//!
//! Every worker terminates in exactly one [`FileOutcome`] and increments
//! the shared progress counter exactly once, on every exit path. Failures
//! (open, decode, encode, directory creation) never cross the worker
//! boundary as errors: they are converted to diagnostic lines where they
//! are detected. A worker buffers all of its lines locally and hands them
//! to the sink in one call, so one file's messages stay contiguous in the
//! flushed log.
//!
//! ## Skip policy
//!
//! The output path is deterministic (`<stem>-resized.<ext>` in the output
//! directory). If it already exists the unit is a no-op success: logged,
//! counted toward progress, never re-resized. Running the same batch twice
//! therefore changes nothing on the second run.

use crate::discover;
use crate::dpi::{self, DEFAULT_DPI, DpiSource};
use crate::format::PixelFormat;
use crate::imaging::{ImageBackend, Quality, ResizeFilter, ResizeParams};
use crate::progress::ProgressReporter;
use crate::sink::DiagnosticSink;
use crate::solver::{ROW_ALIGNMENT, ResizeSpec};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("cannot access {path}: {source}")]
    RootAccess {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Run-wide parameters, shared read-only across all workers.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Ceiling on the decoded pixel buffer, in bytes.
    pub memory_budget: u64,
    /// Where resized variants are written. Created if absent.
    pub output_dir: PathBuf,
    pub filter: ResizeFilter,
    pub quality: Quality,
    /// Compute and log everything, write nothing.
    pub dry_run: bool,
    pub recursive: bool,
    /// Nonzero forces this DPI; zero extracts it from metadata per file.
    pub dpi_override: u32,
}

/// What one batch did, aggregated after the join.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Files that passed extension filtering.
    pub discovered: usize,
    /// Workers that ran to a terminal state. Always equals `discovered`.
    pub completed: usize,
    pub resized: usize,
    /// Output already existed, or the original fit the budget, or dry-run.
    pub skipped: usize,
    pub failed: usize,
}

/// Terminal state of one file's unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileOutcome {
    Resized,
    /// Solver produced a reduction; dry-run suppressed the write.
    DryRun,
    /// Original already fits the budget; nothing to produce.
    WithinBudget,
    SkippedExisting,
    Failed,
}

/// Process one root path end to end and flush diagnostics to stdout.
pub fn run(
    root: &Path,
    options: &BatchOptions,
    backend: &dyn ImageBackend,
    progress: &dyn ProgressReporter,
) -> Result<BatchReport, BatchError> {
    let sink = DiagnosticSink::new();
    let report = run_with_sink(root, options, backend, progress, &sink)?;
    sink.flush();
    Ok(report)
}

/// [`run`] with an externally owned sink. Diagnostics are buffered but not
/// flushed, which lets callers (and tests) inspect them.
pub fn run_with_sink(
    root: &Path,
    options: &BatchOptions,
    backend: &dyn ImageBackend,
    progress: &dyn ProgressReporter,
    sink: &DiagnosticSink,
) -> Result<BatchReport, BatchError> {
    let files = discover::discover(root, options.recursive).map_err(|source| {
        BatchError::RootAccess {
            path: root.to_path_buf(),
            source,
        }
    })?;

    if files.is_empty() {
        if root.is_file() {
            sink.append(format!(
                "Rejected {}: unsupported file extension",
                root.display()
            ));
        } else {
            sink.append(format!("No supported images found in {}", root.display()));
        }
        return Ok(BatchReport::default());
    }

    let total = files.len();
    progress.begin(total);
    let completed = AtomicUsize::new(0);

    let outcomes: Vec<FileOutcome> = files
        .par_iter()
        .map(|file| {
            let outcome = process_file(file, options, backend, sink);
            let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
            progress.tick(done, total);
            outcome
        })
        .collect();

    progress.finish();

    let mut report = BatchReport {
        discovered: total,
        completed: completed.load(Ordering::SeqCst),
        ..Default::default()
    };
    for outcome in outcomes {
        match outcome {
            FileOutcome::Resized => report.resized += 1,
            FileOutcome::DryRun | FileOutcome::WithinBudget | FileOutcome::SkippedExisting => {
                report.skipped += 1
            }
            FileOutcome::Failed => report.failed += 1,
        }
    }
    Ok(report)
}

/// Deterministic output path: `<stem>-resized.<ext>` inside `output_dir`,
/// same extension as the input.
pub fn resized_output_path(source: &Path, output_dir: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match source.extension() {
        Some(ext) => format!("{}-resized.{}", stem, ext.to_string_lossy()),
        None => format!("{}-resized", stem),
    };
    output_dir.join(name)
}

/// One unit of work. Buffers its diagnostics and appends them as a single
/// contiguous group.
fn process_file(
    path: &Path,
    options: &BatchOptions,
    backend: &dyn ImageBackend,
    sink: &DiagnosticSink,
) -> FileOutcome {
    let mut lines = Vec::new();
    let outcome = process_file_inner(path, options, backend, &mut lines);
    sink.extend(lines);
    outcome
}

fn process_file_inner(
    path: &Path,
    options: &BatchOptions,
    backend: &dyn ImageBackend,
    lines: &mut Vec<String>,
) -> FileOutcome {
    if let Err(e) = std::fs::create_dir_all(&options.output_dir) {
        lines.push(format!(
            "Error creating output directory {}: {}",
            options.output_dir.display(),
            e
        ));
        return FileOutcome::Failed;
    }

    let output_path = resized_output_path(path, &options.output_dir);
    if output_path.exists() {
        lines.push(format!("Skipping existing file: {}", output_path.display()));
        return FileOutcome::SkippedExisting;
    }

    let (dpi, source) = dpi::resolve(options.dpi_override, path);
    match source {
        DpiSource::Override => {}
        DpiSource::Metadata => {
            lines.push(format!("Extracted DPI for {}: {}", path.display(), dpi));
        }
        DpiSource::Fallback(err) => {
            lines.push(format!(
                "Failed to extract DPI for {}: {}. Using default input DPI: {}",
                path.display(),
                err,
                DEFAULT_DPI
            ));
        }
    }

    lines.push(format!("Processing {}", path.display()));

    // Discovery filters by extension, so this only fails if a caller hands
    // the worker an unfiltered path.
    let format = match PixelFormat::from_path(path) {
        Ok(format) => format,
        Err(e) => {
            lines.push(format!("Error processing {}: {}", path.display(), e));
            return FileOutcome::Failed;
        }
    };

    let original = match backend.identify(path) {
        Ok(dims) => dims,
        Err(e) => {
            lines.push(format!("Error reading {}: {}", path.display(), e));
            return FileOutcome::Failed;
        }
    };

    let spec = ResizeSpec::for_image(original, format, ROW_ALIGNMENT, options.memory_budget, dpi);
    if !spec.shrinks(original) {
        lines.push(format!(
            "{} already fits within the memory budget",
            path.display()
        ));
        return FileOutcome::WithinBudget;
    }

    lines.push(format!(
        "Rescaled to {}x{} with DPI {}",
        spec.width, spec.height, spec.dpi
    ));

    if options.dry_run {
        return FileOutcome::DryRun;
    }

    let params = ResizeParams {
        source: path.to_path_buf(),
        output: output_path,
        width: spec.width,
        height: spec.height,
        quality: options.quality,
        filter: options.filter,
    };
    match backend.resize(&params) {
        Ok(()) => FileOutcome::Resized,
        Err(e) => {
            lines.push(format!("Error resizing image: {}", e));
            FileOutcome::Failed
        }
    }
}
