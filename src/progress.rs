//! Progress-callback trait for per-page and per-image events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the pipeline renders each page and stitches each image.
//!
//! The callback approach keeps the library free of any terminal knowledge:
//! the CLI forwards events to an indicatif bar, but callers can just as
//! well log them or count them. Execution is strictly single-threaded, so
//! events always arrive in order; the trait is still `Send + Sync` so a
//! callback can be shared with other threads of the host application.

use std::path::Path;
use std::sync::Arc;

/// Called by the pipeline as it processes each page and each image.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once before any page is rendered, after the page range has
    /// been clamped to the document.
    fn on_rasterize_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called after a page has been rendered and written to disk.
    ///
    /// `page_num` is the 1-based page number within the document;
    /// `completed`/`total` count progress through the selected range.
    fn on_page_rendered(&self, page_num: usize, completed: usize, total: usize) {
        let _ = (page_num, completed, total);
    }

    /// Called once before stitching, after all images have been loaded.
    fn on_stitch_start(&self, total_images: usize) {
        let _ = total_images;
    }

    /// Called after each image has been pasted onto the canvas.
    fn on_image_stitched(&self, completed: usize, total: usize) {
        let _ = (completed, total);
    }

    /// Called once after the composite has been written.
    fn on_complete(&self, pages: usize, composite_path: &Path) {
        let _ = (pages, composite_path);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in
/// [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
