use super::super::FilterlabApp;
use crate::image::{format_system_time, human_readable_bytes};
use egui::{Color32, RichText};
use image::GenericImageView;

impl FilterlabApp {
    pub(crate) fn ui_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let dims = self.source.as_ref().map_or_else(
                || "No image".to_string(),
                |s| {
                    let (w, h) = s.image.dimensions();
                    format!("{w}x{h}")
                },
            );
            ui.label(RichText::new(dims).small().color(Color32::from_gray(180)));
            if let Some(msg) = &self.last_status {
                ui.separator();
                ui.label(
                    RichText::new(msg.as_str())
                        .small()
                        .color(Color32::from_gray(200)),
                );
            }
        });
    }

    pub(crate) fn ui_image_info_window(&mut self, ctx: &egui::Context) {
        if !self.info_window_open {
            return;
        }

        egui::Window::new("Image info")
            .open(&mut self.info_window_open)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                let Some(source) = self.source.as_ref() else {
                    ui.label("No image loaded.");
                    return;
                };

                ui.heading("Source");
                ui.label(format!("Origin: {}", source.meta.source_label()));
                ui.label(format!("Name: {}", source.meta.display_name()));
                if let Some(path) = source.meta.path() {
                    ui.label(format!("Path: {}", path.display()));
                }
                if let Some(bytes) = source.meta.byte_len() {
                    ui.label(format!(
                        "Size: {} ({bytes} bytes)",
                        human_readable_bytes(bytes)
                    ));
                } else {
                    ui.label("Size: Unknown");
                }
                if let Some(modified) = source.meta.last_modified() {
                    ui.label(format!("Modified: {}", format_system_time(modified)));
                }

                ui.separator();
                ui.heading("Pixels");
                let (w, h) = source.image.dimensions();
                ui.label(format!("Dimensions: {w}x{h}"));
                let megapixels = f64::from(w) * f64::from(h) / 1_000_000.0;
                ui.label(format!("Pixel count: {megapixels:.2} MP"));
                ui.label(format!("Native color mode: {:?}", source.image.color()));

                if let Some(filtered) = self.filtered.as_ref() {
                    ui.separator();
                    ui.heading("Filtered");
                    ui.label(format!("Filter: {}", filtered.request.kind.label()));
                    if filtered.request.kind.uses_sigma() {
                        ui.label(format!("Sigma: {:.1}", filtered.request.sigma));
                    }
                    let (fw, fh) = filtered.output.dimensions();
                    ui.label(format!("Dimensions: {fw}x{fh}"));
                    if filtered.output.is_edge_mask() {
                        ui.label("Output: boolean edge mask (255 = edge)");
                    }
                }
            });
    }
}
