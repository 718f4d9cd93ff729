use crate::config::AppConfig;
use anyhow::Context as _;
use image::{DynamicImage, GenericImageView, ImageReader, Limits};
use std::io::{BufRead, Cursor, Read, Seek};
use std::path::Path;

fn decode_reader<R>(cfg: &AppConfig, mut reader: ImageReader<R>) -> anyhow::Result<DynamicImage>
where
    R: Read + Seek + BufRead,
{
    let il = cfg.effective_image_limits();
    let mut limits = Limits::default();
    limits.max_image_width = Some(il.image_dim);
    limits.max_image_height = Some(il.image_dim);
    limits.max_alloc = Some(il.alloc_bytes);
    reader.limits(limits);
    let img = reader.decode().context("Failed to decode image data")?;

    let (w, h) = img.dimensions();
    let total_pixels = u64::from(w) * u64::from(h);
    if total_pixels > il.total_pixels {
        anyhow::bail!(
            "Image too large: {}x{} (~{} MP) exceeds limit (~{} MP)",
            w,
            h,
            total_pixels / 1_000_000,
            il.total_pixels / 1_000_000
        );
    }

    // Keep the container's native color mode; filters decide per kind
    // whether a grayscale reduction is needed.
    Ok(img)
}

/// Load and decode an image from a filesystem path using configured limits.
pub fn decode_image_from_path(cfg: &AppConfig, path: &Path) -> anyhow::Result<DynamicImage> {
    let reader = ImageReader::open(path)
        .with_context(|| format!("Failed to read {}", path.display()))?
        .with_guessed_format()
        .context("Failed to detect image format")?;
    decode_reader(cfg, reader)
}

/// Load and decode an image from raw bytes using configured limits.
pub fn decode_image_from_bytes(cfg: &AppConfig, bytes: Vec<u8>) -> anyhow::Result<DynamicImage> {
    let cursor = Cursor::new(bytes);
    let reader = ImageReader::new(cursor)
        .with_guessed_format()
        .context("Failed to detect image format")?;
    decode_reader(cfg, reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let buf = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        buf.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn decoded_shape_matches_the_source() {
        let cfg = AppConfig::default();
        let decoded = decode_image_from_bytes(&cfg, png_bytes(3, 2)).unwrap();
        assert_eq!(decoded.dimensions(), (3, 2));
    }

    #[test]
    fn corrupt_bytes_error_instead_of_panicking() {
        let cfg = AppConfig::default();
        let result = decode_image_from_bytes(&cfg, b"definitely not an image".to_vec());
        assert!(result.is_err());
    }

    #[test]
    fn oversized_image_is_rejected_by_limits() {
        let cfg = AppConfig {
            image_limits: crate::config::ImageLimits {
                image_dim: 1, // sanitized up to the 64 px floor
                ..crate::config::ImageLimits::default()
            },
            ..AppConfig::default()
        };
        let result = decode_image_from_bytes(&cfg, png_bytes(70, 70));
        assert!(result.is_err());
    }

    #[test]
    fn missing_path_reports_the_file_name() {
        let cfg = AppConfig::default();
        let err = decode_image_from_path(&cfg, Path::new("/nonexistent/pic.png")).unwrap_err();
        assert!(err.to_string().contains("pic.png"));
    }
}
