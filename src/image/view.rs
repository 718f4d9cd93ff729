use crate::filter::FilterOutput;
use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use image::{DynamicImage, GenericImageView};

/// Pixel size plus the egui texture handle that mirrors it.
pub struct LoadedImage {
    pub size: [usize; 2],
    pub texture: TextureHandle,
}

impl LoadedImage {
    /// Upload pixels as a texture and keep the handle.
    pub fn from_color_image(ctx: &Context, name: &str, pixels: ColorImage) -> Self {
        let size = pixels.size;
        let texture = ctx.load_texture(name, pixels, TextureOptions::LINEAR);
        Self { size, texture }
    }

    pub fn aspect_ratio(&self) -> f32 {
        let [w, h] = self.size;
        if h == 0 {
            1.0
        } else {
            w as f32 / h as f32
        }
    }
}

/// Displayable pixels for a decoded image, whatever its native color mode.
pub fn color_image_from_dynamic(image: &DynamicImage) -> ColorImage {
    let (w, h) = image.dimensions();
    let rgba = image.to_rgba8();
    ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &rgba)
}

/// Displayable pixels for a filter result. Gray and edge-mask outputs are
/// widened to opaque gray on the fly.
pub fn color_image_from_output(output: &FilterOutput) -> ColorImage {
    match output {
        FilterOutput::Color(buf) => {
            let (w, h) = buf.dimensions();
            ColorImage::from_rgba_unmultiplied([w as usize, h as usize], buf)
        }
        FilterOutput::Gray(buf) | FilterOutput::EdgeMask(buf) => {
            let (w, h) = buf.dimensions();
            ColorImage::from_gray([w as usize, h as usize], buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgba, RgbaImage};

    #[test]
    fn dynamic_image_preview_has_matching_size() {
        let source =
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(5, 3, Rgba([1, 2, 3, 255])));
        let preview = color_image_from_dynamic(&source);
        assert_eq!(preview.size, [5, 3]);
    }

    #[test]
    fn edge_mask_preview_widens_to_gray() {
        let mut mask = GrayImage::new(4, 4);
        mask.put_pixel(1, 1, Luma([255]));
        let preview = color_image_from_output(&FilterOutput::EdgeMask(mask));
        assert_eq!(preview.size, [4, 4]);
        let lit = preview.pixels[1 + 4];
        assert_eq!((lit.r(), lit.g(), lit.b()), (255, 255, 255));
    }
}
