//! CLI binary for pdf2long.
//!
//! A thin shim over the library crate that maps CLI flags (or interactive
//! prompts) to `ConversionConfig` and prints results. This is the sole
//! error boundary: any pipeline error's message is printed as plain text
//! and the process exits normally.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2long::{
    convert, normalize_path_input, ConversionConfig, ConversionProgressCallback, PageRange,
    ProgressCallback,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress: one bar restyled per phase (render, then stitch).
/// The pipeline is strictly sequential, so the phases never overlap.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set per phase

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Opening PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }

    fn activate_phase(&self, prefix: &'static str, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len}  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_position(0);
        self.bar.set_style(progress_style);
        self.bar.set_prefix(prefix);
        self.bar.set_message("");
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_rasterize_start(&self, total_pages: usize) {
        self.activate_phase("Rendering", total_pages);
    }

    fn on_page_rendered(&self, page_num: usize, _completed: usize, _total: usize) {
        self.bar.set_message(format!("page {page_num}"));
        self.bar.inc(1);
    }

    fn on_stitch_start(&self, total_images: usize) {
        self.activate_phase("Stitching", total_images);
    }

    fn on_image_stitched(&self, _completed: usize, _total: usize) {
        self.bar.inc(1);
    }

    fn on_complete(&self, pages: usize, composite_path: &Path) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {} pages stitched into {}",
            green("✔"),
            bold(&pages.to_string()),
            bold(&composite_path.display().to_string()),
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Interactive: prompts for the PDF path and page range
  pdf2long

  # Whole document at default 3x resolution
  pdf2long document.pdf

  # Pages 2-9, double resolution, custom output name
  pdf2long --first-page 2 --last-page 9 --zoom 2 -o chapter.png document.pdf

OUTPUT:
  Per-page PNGs land in the pages directory (default: imgs/), named by
  zero-padded 1-based page number. The directory is emptied before every
  run. The composite (default: long.png) is overwritten unconditionally.

SETUP:
  pdfium is loaded as a shared library at runtime. Place libpdfium next to
  the pdf2long binary or install it system-wide; prebuilt binaries are at
  github.com/bblanchon/pdfium-binaries.
"#;

/// Render PDF pages to PNGs and stitch them into one tall image.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2long",
    version,
    about = "Render PDF pages to PNGs and stitch them into one tall image",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the PDF document. Prompts interactively when omitted.
    input: Option<String>,

    /// Write the composite image to this path.
    #[arg(short, long, env = "PDF2LONG_OUTPUT", default_value = "long.png")]
    output: PathBuf,

    /// Directory receiving the per-page PNGs (emptied on every run).
    #[arg(long, env = "PDF2LONG_PAGES_DIR", default_value = "imgs")]
    pages_dir: PathBuf,

    /// Horizontal and vertical scale factor (shorthand for both axes).
    #[arg(short, long)]
    zoom: Option<f32>,

    /// Horizontal scale factor applied to each page's native width.
    #[arg(long, default_value_t = 3.0)]
    zoom_x: f32,

    /// Vertical scale factor applied to each page's native height.
    #[arg(long, default_value_t = 3.0)]
    zoom_y: f32,

    /// First page to render (1-based, inclusive).
    #[arg(long)]
    first_page: Option<i64>,

    /// Last page to render (1-based, inclusive).
    #[arg(long)]
    last_page: Option<i64>,

    /// Disable the progress bar.
    #[arg(long, env = "PDF2LONG_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2LONG_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2LONG_QUIET")]
    quiet: bool,
}

fn main() {
    // Sole error boundary: print the message as plain text and exit
    // normally. The error also goes to tracing so -v runs keep the detail.
    if let Err(e) = run() {
        tracing::error!("{e:?}");
        println!("{e}");
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Collect input ────────────────────────────────────────────────────
    let (input, pages) = match cli.input {
        Some(ref path) => (
            path.clone(),
            PageRange::from_one_based(cli.first_page, cli.last_page),
        ),
        None => prompt_for_input(cli.first_page, cli.last_page)?,
    };

    // ── Build config ─────────────────────────────────────────────────────
    let mut builder = ConversionConfig::builder()
        .zoom_x(cli.zoom.unwrap_or(cli.zoom_x))
        .zoom_y(cli.zoom.unwrap_or(cli.zoom_y))
        .pages(pages)
        .pages_dir(cli.pages_dir.clone())
        .composite_path(cli.output.clone());

    if show_progress {
        let cb = CliProgressCallback::new();
        builder = builder.progress_callback(cb as ProgressCallback);
    }

    let config = builder.build()?;

    // ── Run conversion ───────────────────────────────────────────────────
    let summary = convert(&input, &config)?;

    if !cli.quiet {
        eprintln!(
            "   {} render  /  {} stitch  —  {}x{} px",
            dim(&format!("{}ms", summary.render_duration_ms)),
            dim(&format!("{}ms", summary.stitch_duration_ms)),
            summary.composite_width,
            summary.composite_height,
        );
    }

    Ok(())
}

/// Interactive fallback matching the classic prompt flow: ask for the PDF
/// path and the 1-based page range; empty input keeps the defaults.
fn prompt_for_input(
    default_first: Option<i64>,
    default_last: Option<i64>,
) -> Result<(String, PageRange)> {
    let path = prompt("Please input the path of the PDF document: ")?;
    let path = normalize_path_input(&path);

    let first = prompt_page("Page range begins at (empty = first page): ", default_first)?;
    let last = prompt_page("Page range ends at (empty = last page): ", default_last)?;

    Ok((path, PageRange::from_one_based(first, last)))
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush().context("Failed to flush stdout")?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}

fn prompt_page(message: &str, default: Option<i64>) -> Result<Option<i64>> {
    let answer = prompt(message)?;
    if answer.is_empty() {
        return Ok(default);
    }
    let page: i64 = answer
        .parse()
        .with_context(|| format!("Invalid page number: '{answer}'"))?;
    Ok(Some(page))
}
