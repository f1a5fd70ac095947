//! # pdf2long
//!
//! Render the pages of a PDF to PNG images and stitch them, in page order,
//! into one tall composite image.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input   normalise the user-typed path, check %PDF magic bytes
//!  ├─ 2. Render  rasterise the selected page range via pdfium into a
//!  │             fresh directory of zero-padded per-page PNGs
//!  └─ 3. Stitch  rescale every page image to the widest page's width and
//!                concatenate them vertically into long.png
//! ```
//!
//! Execution is single-threaded and blocking throughout; the render
//! stage's on-disk output is the only interface the stitch stage consumes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2long::{convert, ConversionConfig, PageRange};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder()
//!         .zoom(3.0)
//!         .pages(PageRange::from_one_based(Some(1), Some(5)))
//!         .build()?;
//!     let summary = convert("document.pdf", &config)?;
//!     println!(
//!         "{} pages → {} ({}x{} px)",
//!         summary.pages_rendered,
//!         summary.composite_path.display(),
//!         summary.composite_width,
//!         summary.composite_height,
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2long` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pdf2long = { version = "0.1", default-features = false }
//! ```
//!
//! ## Runtime requirement
//!
//! pdfium is loaded as a shared library at runtime: either place
//! `libpdfium` next to the executable or install it as a system library
//! (prebuilt binaries: github.com/bblanchon/pdfium-binaries).

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, PageRange};
pub use convert::{convert, RunSummary};
pub use error::Pdf2LongError;
pub use pipeline::input::normalize_path_input;
pub use pipeline::render::rasterize_pages;
pub use pipeline::stitch::{composite_vertically, CompositeInfo};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
