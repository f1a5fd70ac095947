//! Image compositing: stitch a directory of images into one tall PNG.
//!
//! Every entry of the input directory is treated as an image — there is no
//! extension filtering, and a single undecodable file fails the whole
//! stitch. Entries are composited in lexicographic filename order (the
//! rasteriser's zero-padded names make that equal page order; arbitrary
//! directories stack in whatever order their names sort to).
//!
//! Each image is proportionally rescaled to the widest input's width, then
//! pasted at accumulating vertical offsets onto a canvas whose colour mode
//! is taken from the first image.

use crate::config::ConversionConfig;
use crate::error::Pdf2LongError;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Dimensions and input count of a written composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeInfo {
    /// Number of images stitched.
    pub images: usize,
    /// Canvas width: the maximum width among the inputs.
    pub width: u32,
    /// Canvas height: the sum of the rescaled input heights.
    pub height: u32,
}

/// Stitch every image in `input_dir` vertically into `output_path`.
///
/// The output file is overwritten unconditionally if present.
pub fn composite_vertically(
    input_dir: &Path,
    output_path: &Path,
    config: &ConversionConfig,
) -> Result<CompositeInfo, Pdf2LongError> {
    let entries = list_entries(input_dir)?;
    if entries.is_empty() {
        return Err(Pdf2LongError::EmptyImageDir {
            path: input_dir.to_path_buf(),
        });
    }

    let mut images = Vec::with_capacity(entries.len());
    for path in &entries {
        let img = image::open(path).map_err(|e| Pdf2LongError::ImageDecodeFailed {
            path: path.clone(),
            detail: e.to_string(),
        })?;
        images.push(img);
    }

    let max_width = images
        .iter()
        .map(|img| img.width())
        .max()
        .expect("entries is non-empty");

    // Proportional rescale to the common width. A lossy resize, never a
    // crop; heights are rounded with a 1 px floor.
    let mut total_height: u64 = 0;
    let resized: Vec<DynamicImage> = images
        .iter()
        .map(|img| {
            let new_height = rescaled_height(img.width(), img.height(), max_width);
            total_height += u64::from(new_height);
            img.resize_exact(max_width, new_height, FilterType::CatmullRom)
        })
        .collect();

    let total_height = u32::try_from(total_height).map_err(|_| {
        Pdf2LongError::Internal(format!(
            "composite height {total_height} exceeds the maximum image size"
        ))
    })?;

    if let Some(ref cb) = config.progress_callback {
        cb.on_stitch_start(resized.len());
    }

    let mut canvas = blank_like(&resized[0], max_width, total_height);
    let mut y_offset: i64 = 0;
    for (i, img) in resized.iter().enumerate() {
        imageops::replace(&mut canvas, img, 0, y_offset);
        y_offset += i64::from(img.height());
        debug!("Pasted {} at y={}", entries[i].display(), y_offset);
        if let Some(ref cb) = config.progress_callback {
            cb.on_image_stitched(i + 1, resized.len());
        }
    }

    canvas
        .save(output_path)
        .map_err(|e| Pdf2LongError::CompositeWriteFailed {
            path: output_path.to_path_buf(),
            detail: e.to_string(),
        })?;

    info!(
        "Composite written: {} ({}x{} px from {} images)",
        output_path.display(),
        max_width,
        total_height,
        resized.len()
    );

    Ok(CompositeInfo {
        images: resized.len(),
        width: max_width,
        height: total_height,
    })
}

/// List the directory's entries, sorted lexicographically by file name so
/// the stacking order is deterministic across file systems.
fn list_entries(dir: &Path) -> Result<Vec<PathBuf>, Pdf2LongError> {
    let read_dir = std::fs::read_dir(dir).map_err(|e| Pdf2LongError::ImageDirUnreadable {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| Pdf2LongError::ImageDirUnreadable {
            path: dir.to_path_buf(),
            source: e,
        })?;
        entries.push(entry.path());
    }
    entries.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));
    Ok(entries)
}

/// Height after proportional rescale to `target_width`:
/// `round(target_width / (width / height))`, floored at 1 px.
fn rescaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    let aspect_ratio = f64::from(width) / f64::from(height);
    let new_height = (f64::from(target_width) / aspect_ratio).round();
    (new_height as u32).max(1)
}

/// A blank canvas in the same colour mode as `template`.
fn blank_like(template: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    match template {
        DynamicImage::ImageLuma8(_) => DynamicImage::new_luma8(width, height),
        DynamicImage::ImageLumaA8(_) => DynamicImage::new_luma_a8(width, height),
        DynamicImage::ImageRgb8(_) => DynamicImage::new_rgb8(width, height),
        DynamicImage::ImageLuma16(_) => DynamicImage::new_luma16(width, height),
        DynamicImage::ImageLumaA16(_) => DynamicImage::new_luma_a16(width, height),
        DynamicImage::ImageRgb16(_) => DynamicImage::new_rgb16(width, height),
        DynamicImage::ImageRgba16(_) => DynamicImage::new_rgba16(width, height),
        // PNG output cannot carry float pixels; everything else gets RGBA8.
        _ => DynamicImage::new_rgba8(width, height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_solid_png(path: &Path, width: u32, height: u32, color: [u8; 3]) {
        RgbImage::from_pixel(width, height, Rgb(color))
            .save(path)
            .unwrap();
    }

    fn test_config() -> ConversionConfig {
        ConversionConfig::default()
    }

    #[test]
    fn rescaled_height_rounds() {
        // 30x20 rescaled to width 40: aspect 1.5, 40/1.5 = 26.67 → 27.
        assert_eq!(rescaled_height(30, 20, 40), 27);
        // Same width: height unchanged.
        assert_eq!(rescaled_height(40, 25, 40), 25);
        // Extreme aspect ratio still yields at least 1 px.
        assert_eq!(rescaled_height(10_000, 1, 10), 1);
    }

    #[test]
    fn composite_dimensions_follow_max_width_and_height_sum() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("imgs");
        std::fs::create_dir(&dir).unwrap();

        write_solid_png(&dir.join("1.png"), 10, 30, [255, 0, 0]);
        write_solid_png(&dir.join("2.png"), 20, 10, [0, 255, 0]);
        write_solid_png(&dir.join("3.png"), 15, 15, [0, 0, 255]);

        let out = tmp.path().join("long.png");
        let info = composite_vertically(&dir, &out, &test_config()).unwrap();

        // max width is 20; heights: 10x30→20x60, 20x10→20x10, 15x15→20x20.
        assert_eq!(info.width, 20);
        assert_eq!(info.height, 60 + 10 + 20);
        assert_eq!(info.images, 3);

        let composite = image::open(&out).unwrap();
        assert_eq!(composite.dimensions(), (20, 90));
    }

    #[test]
    fn stacking_order_is_lexicographic() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("imgs");
        std::fs::create_dir(&dir).unwrap();

        write_solid_png(&dir.join("a.png"), 8, 8, [255, 0, 0]);
        write_solid_png(&dir.join("b.png"), 8, 8, [0, 0, 255]);

        let out = tmp.path().join("long.png");
        composite_vertically(&dir, &out, &test_config()).unwrap();

        let composite = image::open(&out).unwrap().to_rgb8();
        assert_eq!(composite.get_pixel(4, 2).0, [255, 0, 0], "top = a.png");
        assert_eq!(composite.get_pixel(4, 12).0, [0, 0, 255], "bottom = b.png");
    }

    #[test]
    fn renaming_inputs_changes_stacking_order() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("imgs");
        std::fs::create_dir(&dir).unwrap();

        // Same images as above with swapped names: order must flip.
        write_solid_png(&dir.join("b.png"), 8, 8, [255, 0, 0]);
        write_solid_png(&dir.join("a.png"), 8, 8, [0, 0, 255]);

        let out = tmp.path().join("long.png");
        composite_vertically(&dir, &out, &test_config()).unwrap();

        let composite = image::open(&out).unwrap().to_rgb8();
        assert_eq!(composite.get_pixel(4, 2).0, [0, 0, 255]);
        assert_eq!(composite.get_pixel(4, 12).0, [255, 0, 0]);
    }

    #[test]
    fn unpadded_numeric_names_stack_lexicographically() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("imgs");
        std::fs::create_dir(&dir).unwrap();

        write_solid_png(&dir.join("2.png"), 8, 8, [0, 255, 0]);
        write_solid_png(&dir.join("10.png"), 8, 8, [255, 0, 0]);

        let out = tmp.path().join("long.png");
        composite_vertically(&dir, &out, &test_config()).unwrap();

        // "10.png" sorts before "2.png", so page 10 ends up on top.
        let composite = image::open(&out).unwrap().to_rgb8();
        assert_eq!(composite.get_pixel(4, 2).0, [255, 0, 0]);
    }

    #[test]
    fn empty_directory_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("imgs");
        std::fs::create_dir(&dir).unwrap();

        let out = tmp.path().join("long.png");
        let err = composite_vertically(&dir, &out, &test_config()).unwrap_err();
        assert!(matches!(err, Pdf2LongError::EmptyImageDir { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn undecodable_entry_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("imgs");
        std::fs::create_dir(&dir).unwrap();

        write_solid_png(&dir.join("1.png"), 8, 8, [255, 0, 0]);
        std::fs::write(dir.join("2.png"), b"not an image at all").unwrap();

        let out = tmp.path().join("long.png");
        let err = composite_vertically(&dir, &out, &test_config()).unwrap_err();
        assert!(matches!(err, Pdf2LongError::ImageDecodeFailed { .. }));
    }

    #[test]
    fn canvas_mode_comes_from_first_image() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("imgs");
        std::fs::create_dir(&dir).unwrap();

        // First (by name) is greyscale, second is RGB.
        image::GrayImage::from_pixel(8, 8, image::Luma([128]))
            .save(dir.join("1.png"))
            .unwrap();
        write_solid_png(&dir.join("2.png"), 8, 8, [255, 0, 0]);

        let out = tmp.path().join("long.png");
        composite_vertically(&dir, &out, &test_config()).unwrap();

        let composite = image::open(&out).unwrap();
        assert_eq!(composite.color(), image::ColorType::L8);
    }

    #[test]
    fn composite_overwrites_existing_output() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("imgs");
        std::fs::create_dir(&dir).unwrap();
        write_solid_png(&dir.join("1.png"), 5, 5, [1, 2, 3]);

        let out = tmp.path().join("long.png");
        std::fs::write(&out, b"stale bytes").unwrap();

        composite_vertically(&dir, &out, &test_config()).unwrap();
        let composite = image::open(&out).unwrap();
        assert_eq!(composite.dimensions(), (5, 5));
    }

    #[test]
    fn blank_like_preserves_colour_mode() {
        let rgb = DynamicImage::ImageRgb8(RgbImage::new(2, 2));
        assert_eq!(blank_like(&rgb, 4, 4).color(), image::ColorType::Rgb8);

        let luma = DynamicImage::ImageLuma8(image::GrayImage::new(2, 2));
        assert_eq!(blank_like(&luma, 4, 4).color(), image::ColorType::L8);

        let float = DynamicImage::ImageRgb32F(image::Rgb32FImage::new(2, 2));
        assert_eq!(blank_like(&float, 4, 4).color(), image::ColorType::Rgba8);
    }
}
