//! Pipeline stages for PDF-to-composite conversion.
//!
//! Each submodule implements exactly one transformation step. Keeping the
//! stages separate makes each independently testable; the rasteriser's
//! on-disk output is the only interface the compositor consumes.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ render ──▶ stitch
//! (path)    (pdfium     (rescale + vertical
//!            → PNGs)     paste → long.png)
//! ```
//!
//! 1. [`input`]  — normalise and validate the user-supplied PDF path
//! 2. [`render`] — rasterise the selected page range into a fresh
//!    directory of zero-padded per-page PNGs
//! 3. [`stitch`] — rescale every image in that directory to a common
//!    width and concatenate them vertically into one composite

pub mod input;
pub mod render;
pub mod stitch;
