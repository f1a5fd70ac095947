//! PDF rasterisation: render the selected page range to PNG files.
//!
//! The output directory is wiped and recreated on every run, so its
//! contents are always exactly one run's pages. Filenames are the 1-based
//! page number, zero-padded to the digit width of the number of selected
//! pages, which makes lexicographic filename order equal page order for
//! the compositor.
//!
//! Rendering is synchronous and strictly in increasing page order; a
//! failure mid-range leaves the pages already written on disk (no
//! rollback). The pdfium document handle is released when it drops at the
//! end of the call, on error paths included.

use crate::config::ConversionConfig;
use crate::error::Pdf2LongError;
use pdfium_render::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Rasterise the configured page range of `pdf_path` into
/// `config.pages_dir`, one PNG per page.
///
/// Returns the written file paths in page order. An empty clamped range
/// returns an empty vector after still resetting the output directory.
pub fn rasterize_pages(
    pdf_path: &Path,
    config: &ConversionConfig,
) -> Result<Vec<PathBuf>, Pdf2LongError> {
    prepare_output_dir(&config.pages_dir)?;

    let pdfium = bind_pdfium()?;

    let document = pdfium
        .load_pdf_from_file(pdf_path, None)
        .map_err(|e| Pdf2LongError::CorruptPdf {
            path: pdf_path.to_path_buf(),
            detail: format!("{e:?}"),
        })?;

    let pages = document.pages();
    let page_count = pages.len() as usize;
    info!("PDF loaded: {} pages", page_count);

    let range = config.pages.clamp_to(page_count);
    let selected = range.len();
    let width = pad_width(selected);
    debug!(
        "Rendering pages {}..{} (zoom {}x{})",
        range.start, range.end, config.zoom_x, config.zoom_y
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_rasterize_start(selected);
    }

    let render_config = PdfRenderConfig::new()
        .scale_page_width_by_factor(config.zoom_x)
        .scale_page_height_by_factor(config.zoom_y);

    let mut written = Vec::with_capacity(selected);

    for (done, idx) in range.enumerate() {
        let page_num = idx + 1;

        let page = pages
            .get(idx as u16)
            .map_err(|e| Pdf2LongError::RasterisationFailed {
                page: page_num,
                detail: format!("{e:?}"),
            })?;

        let bitmap =
            page.render_with_config(&render_config)
                .map_err(|e| Pdf2LongError::RasterisationFailed {
                    page: page_num,
                    detail: format!("{e:?}"),
                })?;

        let image = bitmap.as_image();
        let file_path = config
            .pages_dir
            .join(format!("{page_num:0width$}.png", width = width));

        image
            .save(&file_path)
            .map_err(|e| Pdf2LongError::PageWriteFailed {
                page: page_num,
                path: file_path.clone(),
                detail: e.to_string(),
            })?;

        debug!(
            "Rendered page {} → {}x{} px → {}",
            page_num,
            image.width(),
            image.height(),
            file_path.display()
        );

        if let Some(ref cb) = config.progress_callback {
            cb.on_page_rendered(page_num, done + 1, selected);
        }

        written.push(file_path);
    }

    info!(
        "Wrote {} page images to {}",
        written.len(),
        config.pages_dir.display()
    );

    Ok(written)
}

/// Bind to a pdfium shared library: one placed next to the executable
/// first, falling back to the system library.
fn bind_pdfium() -> Result<Pdfium, Pdf2LongError> {
    Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map(Pdfium::new)
        .map_err(|e| Pdf2LongError::PdfiumBindingFailed(format!("{e:?}")))
}

/// Wipe and recreate the per-page output directory.
///
/// A missing directory is fine; any other removal failure propagates,
/// since leftover files would mix two runs' output.
fn prepare_output_dir(dir: &Path) -> Result<(), Pdf2LongError> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(Pdf2LongError::OutputDirFailed {
                path: dir.to_path_buf(),
                source: e,
            })
        }
    }
    fs::create_dir_all(dir).map_err(|e| Pdf2LongError::OutputDirFailed {
        path: dir.to_path_buf(),
        source: e,
    })
}

/// Digit width used to zero-pad page filenames: the digit count of the
/// number of selected pages.
fn pad_width(selected_pages: usize) -> usize {
    selected_pages.to_string().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn pad_width_matches_digit_count() {
        assert_eq!(pad_width(0), 1);
        assert_eq!(pad_width(3), 1);
        assert_eq!(pad_width(9), 1);
        assert_eq!(pad_width(10), 2);
        assert_eq!(pad_width(99), 2);
        assert_eq!(pad_width(100), 3);
    }

    #[test]
    fn padded_names_sort_in_page_order() {
        let width = pad_width(12);
        let names: Vec<String> = (1..=12)
            .map(|n| format!("{n:0width$}.png", width = width))
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn prepare_output_dir_discards_prior_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("imgs");

        std::fs::create_dir(&dir).unwrap();
        File::create(dir.join("stale.png"))
            .unwrap()
            .write_all(b"old run")
            .unwrap();
        std::fs::create_dir(dir.join("nested")).unwrap();

        prepare_output_dir(&dir).unwrap();

        assert!(dir.exists());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn prepare_output_dir_creates_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("fresh").join("imgs");
        prepare_output_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }
}
