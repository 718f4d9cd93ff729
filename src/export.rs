//! PNG export of filtered results.

use crate::filter::FilterOutput;
use anyhow::Context as _;
use image::ImageFormat;
use std::io::Cursor;
use std::path::Path;

/// Default file name offered in the save dialog.
pub const EXPORT_FILE_NAME: &str = "filtered_image.png";
/// MIME type of the exported buffer.
pub const EXPORT_MIME_TYPE: &str = "image/png";

/// Encode a filter result as a lossless PNG byte buffer.
///
/// Every output variant is already 8-bit; the Canny mask arrives as 0/255,
/// so no extra normalization pass is needed before encoding.
pub fn encode_png(output: &FilterOutput) -> anyhow::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut cursor = Cursor::new(&mut bytes);
    match output {
        FilterOutput::Color(buf) => buf.write_to(&mut cursor, ImageFormat::Png),
        FilterOutput::Gray(buf) | FilterOutput::EdgeMask(buf) => {
            buf.write_to(&mut cursor, ImageFormat::Png)
        }
    }
    .context("Failed to encode PNG data")?;
    Ok(bytes)
}

/// Write an already-encoded PNG buffer to disk.
pub fn write_png(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterKind, FilterRequest, apply_filter};
    use image::{DynamicImage, GrayImage, Luma, Rgba, RgbaImage};

    #[test]
    fn png_round_trip_preserves_shape_and_pixels() {
        let mut buf = RgbaImage::new(9, 7);
        for (x, y, pixel) in buf.enumerate_pixels_mut() {
            *pixel = Rgba([x as u8 * 20, y as u8 * 30, 120, 255]);
        }
        let bytes = encode_png(&FilterOutput::Color(buf.clone())).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.to_rgba8().as_raw(), buf.as_raw());
    }

    #[test]
    fn edge_mask_round_trips_as_8_bit_gray() {
        let mut mask = GrayImage::new(6, 6);
        mask.put_pixel(2, 3, Luma([255]));
        mask.put_pixel(4, 1, Luma([255]));
        let bytes = encode_png(&FilterOutput::EdgeMask(mask.clone())).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.to_luma8().as_raw(), mask.as_raw());
    }

    #[test]
    fn mean_filtered_red_square_survives_export() {
        // 100x100 solid red through Mean stays near-uniform red and decodes
        // back at the same size.
        let source =
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(100, 100, Rgba([255, 0, 0, 255])));
        let output = apply_filter(
            &source,
            FilterRequest {
                kind: FilterKind::Mean,
                sigma: 1.0,
            },
        );
        let bytes = encode_png(&output).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (100, 100));
        let center = decoded.get_pixel(50, 50).0;
        assert!(center[0] >= 254 && center[1] <= 1 && center[2] <= 1);
    }

    #[test]
    fn write_png_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);
        let buf = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]));
        let bytes = encode_png(&FilterOutput::Color(buf)).unwrap();
        write_png(&path, &bytes).unwrap();
        let decoded = image::load_from_memory(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(decoded.to_rgba8().dimensions(), (4, 4));
    }
}
