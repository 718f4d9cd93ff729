use super::super::FilterlabApp;
use crate::image::LoadedImage;
use egui::RichText;

/// Display size for a preview: fill the panel width, keep aspect ratio,
/// never upscale beyond native resolution.
fn preview_size(view: &LoadedImage, available_width: f32) -> egui::Vec2 {
    #[allow(clippy::cast_precision_loss)]
    let native_width = view.size[0].min(u32::MAX as usize) as f32;
    let width = available_width.min(native_width).max(1.0);
    egui::vec2(width, width / view.aspect_ratio())
}

fn preview(ui: &mut egui::Ui, heading: &str, view: &LoadedImage) {
    ui.heading(heading);
    let size = preview_size(view, ui.available_width());
    ui.add(egui::Image::new((view.texture.id(), size)));
}

impl FilterlabApp {
    pub(crate) fn ui_central_previews(&mut self, ui: &mut egui::Ui) {
        // Handle drag & drop regardless of whether an image is already loaded
        let dropped_files = ui.input(|i| i.raw.dropped_files.clone());
        if !dropped_files.is_empty() {
            let mut loaded = false;
            for f in &dropped_files {
                if let Some(path) = &f.path {
                    self.start_loading_image_from_path(path.clone());
                    loaded = true;
                    break;
                }
                if let Some(bytes) = &f.bytes {
                    self.start_loading_image_from_bytes(
                        (!f.name.is_empty()).then(|| f.name.clone()),
                        bytes.to_vec(),
                        f.last_modified,
                    );
                    loaded = true;
                    break;
                }
            }
            if !loaded {
                self.set_status("Drop failed: no readable bytes/path");
            }
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let Some(source) = self.source.as_ref() else {
                    ui.add_space(24.0);
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new("No image to display.").heading());
                        ui.add_space(8.0);
                        ui.label("Open a jpg, jpeg, or png file — or drop one here.");
                    });
                    return;
                };

                preview(ui, "Original Image", &source.view);

                if let Some(filtered) = self.filtered.as_ref() {
                    ui.add_space(16.0);
                    preview(ui, &filtered.heading(), &filtered.view);
                }
            });
    }
}
