//! Top-level conversion entry point.
//!
//! Runs the pipeline stages strictly in sequence: resolve the input path,
//! rasterise the selected pages into the per-page directory, then stitch
//! that directory into the composite. The on-disk page directory is the
//! only interface between the two transformations.

use crate::config::ConversionConfig;
use crate::error::Pdf2LongError;
use crate::pipeline::stitch::CompositeInfo;
use crate::pipeline::{input, render, stitch};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// What a completed run produced, with per-stage timings.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of pages rendered (zero is impossible here: an empty page
    /// range makes the stitch stage fail on the empty directory).
    pub pages_rendered: usize,
    /// Width of the composite in pixels.
    pub composite_width: u32,
    /// Height of the composite in pixels.
    pub composite_height: u32,
    /// Where the composite was written.
    pub composite_path: PathBuf,
    /// Time spent rasterising pages.
    pub render_duration_ms: u64,
    /// Time spent loading, rescaling, and stitching images.
    pub stitch_duration_ms: u64,
    /// Total wall-clock time.
    pub total_duration_ms: u64,
}

/// Convert a PDF into per-page PNGs plus one tall composite image.
///
/// `input` is the PDF path as typed by the user; surrounding quotes and
/// backslashes are normalised before use.
///
/// # Errors
/// Any stage failure propagates unmodified: unreadable or non-PDF input,
/// an uncreatable output directory, a page that fails to render (pages
/// already written stay on disk), an empty page selection (surfacing as
/// [`Pdf2LongError::EmptyImageDir`] from the stitch stage), or an
/// unwritable composite.
pub fn convert(
    input: impl AsRef<str>,
    config: &ConversionConfig,
) -> Result<RunSummary, Pdf2LongError> {
    let total_start = Instant::now();
    info!("Starting conversion: {}", input.as_ref());

    let pdf_path = input::resolve_pdf(input.as_ref())?;

    let render_start = Instant::now();
    let pages = render::rasterize_pages(&pdf_path, config)?;
    let render_duration_ms = render_start.elapsed().as_millis() as u64;
    info!("Rendered {} pages in {}ms", pages.len(), render_duration_ms);

    let stitch_start = Instant::now();
    let composite: CompositeInfo =
        stitch::composite_vertically(&config.pages_dir, &config.composite_path, config)?;
    let stitch_duration_ms = stitch_start.elapsed().as_millis() as u64;
    info!(
        "Stitched {} images in {}ms",
        composite.images, stitch_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_complete(pages.len(), &config.composite_path);
    }

    Ok(RunSummary {
        pages_rendered: pages.len(),
        composite_width: composite.width,
        composite_height: composite.height,
        composite_path: config.composite_path.clone(),
        render_duration_ms,
        stitch_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    })
}
