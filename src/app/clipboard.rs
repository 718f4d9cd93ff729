use super::{FilterlabApp, SourceImage};
use crate::config::AppConfig;
use crate::filter::FilterOutput;
use crate::image::{ImageMeta, LoadedImage, color_image_from_dynamic, human_readable_bytes};
use arboard::{Clipboard, Error as ClipboardError, ImageData};
use egui::Context;
use image::{DynamicImage, RgbaImage};
use std::borrow::Cow;

impl FilterlabApp {
    /// Treat a clipboard image as an upload.
    pub(crate) fn paste_image_from_clipboard(&mut self, ctx: &Context) {
        self.pending_image_task = None;
        match capture_clipboard_image(&self.config) {
            Ok(image) => {
                let byte_len = u64::try_from(image.as_bytes().len()).ok();
                let meta = ImageMeta::from_clipboard(byte_len);
                let name = meta.display_name();
                let preview = color_image_from_dynamic(&image);
                let view = LoadedImage::from_color_image(ctx, "source_image", preview);
                self.set_loaded_image(SourceImage { image, view, meta });
                self.set_status(format!("Loaded {name}"));
            }
            Err(err) => self.set_status(format!("Paste failed: {err}")),
        }
    }

    /// Put the filtered result on the clipboard as RGBA pixels.
    pub(crate) fn copy_filtered_to_clipboard(&mut self) {
        let Some(filtered) = self.filtered.as_ref() else {
            self.set_status("Apply a filter before copying.");
            return;
        };
        match copy_output_to_clipboard(&filtered.output) {
            Ok(()) => self.set_status("Filtered image copied to clipboard."),
            Err(err) => self.set_status(format!("Copy failed: {err}")),
        }
    }
}

fn capture_clipboard_image(cfg: &AppConfig) -> Result<DynamicImage, String> {
    let mut clipboard = Clipboard::new().map_err(describe_clipboard_error)?;
    let data = clipboard.get_image().map_err(describe_clipboard_error)?;
    let (width, height) = validate_clipboard_dimensions(cfg, data.width, data.height)?;
    let expected_len = width as usize * height as usize * 4;
    let mut bytes = data.bytes.into_owned();
    if bytes.len() < expected_len {
        return Err("clipboard image data is truncated".to_string());
    }
    bytes.truncate(expected_len);
    RgbaImage::from_raw(width, height, bytes)
        .map(DynamicImage::ImageRgba8)
        .ok_or_else(|| "clipboard image could not be converted".to_string())
}

fn validate_clipboard_dimensions(
    cfg: &AppConfig,
    width: usize,
    height: usize,
) -> Result<(u32, u32), String> {
    if width == 0 || height == 0 {
        return Err("clipboard image is empty".to_string());
    }
    let limits = cfg.effective_image_limits();
    let width_u32 = u32::try_from(width).unwrap_or(u32::MAX);
    let height_u32 = u32::try_from(height).unwrap_or(u32::MAX);
    if width_u32 > limits.image_dim || height_u32 > limits.image_dim {
        return Err(format!(
            "clipboard image {width}x{height} exceeds the per-side limit ({} px)",
            limits.image_dim
        ));
    }
    let total_pixels = u64::from(width_u32) * u64::from(height_u32);
    if total_pixels > limits.total_pixels {
        return Err(format!(
            "clipboard image too large: {width}x{height} (~{} MP) exceeds limit (~{} MP)",
            total_pixels / 1_000_000,
            limits.total_pixels / 1_000_000
        ));
    }
    let rgba_bytes = total_pixels * 4;
    if rgba_bytes > limits.alloc_bytes {
        return Err(format!(
            "clipboard image needs about {} of RGBA data, over the configured limit ({})",
            human_readable_bytes(rgba_bytes),
            human_readable_bytes(limits.alloc_bytes)
        ));
    }
    Ok((width_u32, height_u32))
}

fn copy_output_to_clipboard(output: &FilterOutput) -> Result<(), String> {
    let (width, height) = output.dimensions();
    let rgba: Vec<u8> = match output {
        FilterOutput::Color(buf) => buf.as_raw().clone(),
        FilterOutput::Gray(buf) | FilterOutput::EdgeMask(buf) => buf
            .pixels()
            .flat_map(|p| {
                let v = p.0[0];
                [v, v, v, 255]
            })
            .collect(),
    };
    let mut clipboard = Clipboard::new().map_err(describe_clipboard_error)?;
    clipboard
        .set_image(ImageData {
            width: width as usize,
            height: height as usize,
            bytes: Cow::Owned(rgba),
        })
        .map_err(describe_clipboard_error)?;
    Ok(())
}

fn describe_clipboard_error(err: ClipboardError) -> String {
    match err {
        ClipboardError::ContentNotAvailable => {
            "clipboard does not contain an image".to_string()
        }
        ClipboardError::ClipboardNotSupported => {
            "clipboard access is not supported in this environment".to_string()
        }
        ClipboardError::ClipboardOccupied => {
            "clipboard is busy; try again in a moment".to_string()
        }
        ClipboardError::ConversionFailure => {
            "clipboard image could not be converted".to_string()
        }
        other => other.to_string(),
    }
}
