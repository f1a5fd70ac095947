//! Error types for the pdf2long library.
//!
//! A single [`Pdf2LongError`] enum covers every failure the pipeline can
//! hit. Everything propagates unmodified up to the caller; the CLI binary
//! is the only error boundary, where the message is printed and the run
//! stops. No retries happen anywhere.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdf2long library.
#[derive(Debug, Error)]
pub enum Pdf2LongError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and pdfium cannot parse it.
    #[error("PDF '{path}' is corrupt: {detail}\nTry repairing with: qpdf --decrypt input.pdf output.pdf")]
    CorruptPdf { path: PathBuf, detail: String },

    /// pdfium-render returned an error while rendering a specific page.
    #[error("Rasterisation failed for page {page}: {detail}")]
    RasterisationFailed { page: usize, detail: String },

    /// A rendered page could not be encoded/written as a PNG file.
    #[error("Failed to write page {page} to '{path}': {detail}")]
    PageWriteFailed {
        page: usize,
        path: PathBuf,
        detail: String,
    },

    // ── Resource errors ───────────────────────────────────────────────────
    /// The per-page output directory could not be emptied or created.
    #[error("Failed to prepare output directory '{path}': {source}")]
    OutputDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The final composite image could not be written.
    #[error("Failed to write composite image '{path}': {detail}")]
    CompositeWriteFailed { path: PathBuf, detail: String },

    // ── Data errors ───────────────────────────────────────────────────────
    /// The compositor was given a directory with no entries; there is
    /// nothing to determine the canvas width from.
    #[error("No images found in '{path}': nothing to composite.\nDid the selected page range contain any pages?")]
    EmptyImageDir { path: PathBuf },

    /// A directory entry could not be decoded as an image.
    #[error("Failed to decode image '{path}': {detail}")]
    ImageDecodeFailed { path: PathBuf, detail: String },

    /// The input directory itself could not be listed.
    #[error("Failed to read image directory '{path}': {source}")]
    ImageDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
pdf2long needs the pdfium shared library at runtime. You can:\n\
  • Place libpdfium next to the pdf2long binary.\n\
  • Install pdfium as a system library.\n\
  • Download a build from github.com/bblanchon/pdfium-binaries.\n"
    )]
    PdfiumBindingFailed(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
