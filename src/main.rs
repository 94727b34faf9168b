use clap::{Parser, ValueEnum};
use memfit::batch::{self, BatchOptions};
use memfit::imaging::{Quality, ResizeFilter, RustBackend};
use memfit::progress::ConsoleProgress;
use std::path::PathBuf;
use std::process::ExitCode;

/// CLI-facing names for the resize interpolation strategies.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    Lanczos,
    Bilinear,
    Nearest,
}

impl Algorithm {
    fn filter(self) -> ResizeFilter {
        match self {
            Algorithm::Lanczos => ResizeFilter::Lanczos,
            Algorithm::Bilinear => ResizeFilter::Bilinear,
            Algorithm::Nearest => ResizeFilter::Nearest,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "memfit")]
#[command(about = "Resize images to fit within a memory limit")]
#[command(long_about = "\
Resize images to fit within a memory limit

For each input image, memfit computes the largest dimensions whose decoded
(uncompressed) pixel buffer — row alignment padding included — stays within
the memory budget, then resizes the image down to them. Images that already
fit are left alone; memfit never upscales.

Inputs may be files or directories (jpg, jpeg, png). Each resized variant
is written as <name>-resized.<ext> in the output directory; existing
variants are skipped, so re-running a batch is a no-op.

Per-file problems (unreadable files, decode failures) are reported after
the batch finishes and never abort the other files.")]
#[command(version)]
struct Cli {
    /// Image files or directories to process
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Maximum decoded-image memory in bytes
    #[arg(short, long, default_value_t = 2 * 1024 * 1024 * 1024)]
    memory: u64,

    /// Directory to save resized images, created if missing
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Resize algorithm to use
    #[arg(short, long, value_enum, default_value_t = Algorithm::Lanczos)]
    algorithm: Algorithm,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value_t = 75)]
    quality: u32,

    /// Simulate resizing without saving files
    #[arg(long)]
    dry_run: bool,

    /// Process directories recursively
    #[arg(short, long)]
    recursive: bool,

    /// DPI for the output image; 0 extracts it from EXIF when available
    #[arg(short, long, default_value_t = 0)]
    dpi: u32,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let options = BatchOptions {
        memory_budget: cli.memory,
        output_dir: cli.output,
        filter: cli.algorithm.filter(),
        quality: Quality::new(cli.quality),
        dry_run: cli.dry_run,
        recursive: cli.recursive,
        dpi_override: cli.dpi,
    };

    let backend = RustBackend::new();
    let progress = ConsoleProgress::new();

    // Per-file errors are diagnostics, not exit-code material. An
    // inaccessible root is reported and the remaining roots still run.
    for root in &cli.paths {
        match batch::run(root, &options, &backend, &progress) {
            Ok(report) => {
                println!(
                    "{}: {} file(s), {} resized, {} skipped, {} failed",
                    root.display(),
                    report.discovered,
                    report.resized,
                    report.skipped,
                    report.failed
                );
            }
            Err(e) => {
                eprintln!("Error accessing path: {}", e);
            }
        }
    }

    ExitCode::SUCCESS
}
