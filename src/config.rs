//! Configuration types for PDF-to-composite conversion.
//!
//! All behaviour is controlled through [`ConversionConfig`], built via its
//! [`ConversionConfigBuilder`]. Keeping every knob in one struct keeps the
//! pipeline functions' signatures stable and makes two runs easy to diff.

use crate::error::Pdf2LongError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;

/// Configuration for one PDF-to-composite run.
///
/// Built via [`ConversionConfig::builder()`] or
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2long::{ConversionConfig, PageRange};
///
/// let config = ConversionConfig::builder()
///     .zoom(2.0)
///     .pages(PageRange::new(0, Some(5)))
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Horizontal scale multiplier applied to each page's native width.
    /// Values above 1 increase resolution. Default: 3.0.
    pub zoom_x: f32,

    /// Vertical scale multiplier applied to each page's native height.
    /// Default: 3.0.
    pub zoom_y: f32,

    /// Page range to rasterise, as a half-open interval of zero-based
    /// indices. Default: the full document.
    pub pages: PageRange,

    /// Directory receiving the per-page PNGs. Recursively deleted and
    /// recreated before rendering, so it never mixes output of two runs.
    /// Default: `imgs`.
    pub pages_dir: PathBuf,

    /// Path of the final composite image. Overwritten unconditionally.
    /// Default: `long.png` in the working directory.
    pub composite_path: PathBuf,

    /// Optional progress callback invoked per rendered page and per
    /// stitched image.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            zoom_x: 3.0,
            zoom_y: 3.0,
            pages: PageRange::full(),
            pages_dir: PathBuf::from("imgs"),
            composite_path: PathBuf::from("long.png"),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("zoom_x", &self.zoom_x)
            .field("zoom_y", &self.zoom_y)
            .field("pages", &self.pages)
            .field("pages_dir", &self.pages_dir)
            .field("composite_path", &self.composite_path)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    /// Set both zoom factors at once.
    pub fn zoom(mut self, factor: f32) -> Self {
        self.config.zoom_x = factor;
        self.config.zoom_y = factor;
        self
    }

    pub fn zoom_x(mut self, factor: f32) -> Self {
        self.config.zoom_x = factor;
        self
    }

    pub fn zoom_y(mut self, factor: f32) -> Self {
        self.config.zoom_y = factor;
        self
    }

    pub fn pages(mut self, range: PageRange) -> Self {
        self.config.pages = range;
        self
    }

    pub fn pages_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.pages_dir = dir.into();
        self
    }

    pub fn composite_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.composite_path = path.into();
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Pdf2LongError> {
        let c = &self.config;
        if !(c.zoom_x.is_finite() && c.zoom_x > 0.0) {
            return Err(Pdf2LongError::InvalidConfig(format!(
                "zoom_x must be a positive number, got {}",
                c.zoom_x
            )));
        }
        if !(c.zoom_y.is_finite() && c.zoom_y > 0.0) {
            return Err(Pdf2LongError::InvalidConfig(format!(
                "zoom_y must be a positive number, got {}",
                c.zoom_y
            )));
        }
        if c.pages_dir.as_os_str().is_empty() {
            return Err(Pdf2LongError::InvalidConfig(
                "pages_dir must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Page range ────────────────────────────────────────────────────────────

/// The pages selected for rasterisation: a half-open interval
/// `[begin, end)` of zero-based page indices.
///
/// `end == None` means "to the end of the document". Both bounds are
/// clamped to the document's real page count by [`PageRange::clamp_to`];
/// an interval that is empty after clamping yields zero pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    /// First page index (zero-based, inclusive).
    pub begin: usize,
    /// One past the last page index, or `None` for unbounded.
    pub end: Option<usize>,
}

impl Default for PageRange {
    fn default() -> Self {
        Self::full()
    }
}

impl PageRange {
    /// Every page of the document.
    pub fn full() -> Self {
        Self {
            begin: 0,
            end: None,
        }
    }

    pub fn new(begin: usize, end: Option<usize>) -> Self {
        Self { begin, end }
    }

    /// Convert 1-based inclusive bounds (the user-facing form) to the
    /// internal zero-based half-open interval. Only the first-page value
    /// is shifted: a 1-based inclusive last page is numerically identical
    /// to a zero-based exclusive end. Values below 1 clamp to page 1.
    pub fn from_one_based(first: Option<i64>, last: Option<i64>) -> Self {
        let begin = first.map_or(0, |f| f.max(1) as usize - 1);
        let end = last.map(|l| l.max(0) as usize);
        Self { begin, end }
    }

    /// Clamp to a document with `page_count` pages, yielding the concrete
    /// index range to render.
    pub fn clamp_to(&self, page_count: usize) -> std::ops::Range<usize> {
        let end = self.end.unwrap_or(page_count).min(page_count);
        let begin = self.begin.min(end);
        begin..end
    }
}
