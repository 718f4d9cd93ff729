//! Side panel UI: filter selection and export controls.

use super::super::FilterlabApp;
use super::icons;
use crate::export::{EXPORT_FILE_NAME, EXPORT_MIME_TYPE};
use crate::filter::{FilterKind, FilterRequest, SIGMA_MAX, SIGMA_MIN, SIGMA_STEP};
use egui::RichText;

impl FilterlabApp {
    pub(crate) fn ui_side_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Filter");
        ui.add_space(4.0);

        let has_image = self.source.is_some();
        ui.add_enabled_ui(has_image, |ui| {
            egui::ComboBox::from_label("Select Filter")
                .selected_text(self.filter_kind.label())
                .show_ui(ui, |ui| {
                    for kind in FilterKind::ALL {
                        ui.selectable_value(&mut self.filter_kind, kind, kind.label());
                    }
                });

            ui.spacing_mut().slider_width = 150.0;
            let sigma_slider = egui::Slider::new(&mut self.sigma, SIGMA_MIN..=SIGMA_MAX)
                .step_by(SIGMA_STEP)
                .fixed_decimals(1)
                .text("Sigma");
            ui.add_enabled(self.filter_kind.uses_sigma(), sigma_slider)
                .on_disabled_hover_text("Mean uses a fixed 5x5 window; sigma is ignored.");

            ui.add_space(8.0);
            if ui
                .button(format!("{} Apply Filter", icons::ICON_APPLY))
                .on_hover_text("Filtering runs only on this click, never on selection changes.")
                .clicked()
            {
                self.apply_selected_filter(ui.ctx());
            }
        });

        if !has_image {
            ui.label(RichText::new("Load an image to filter.").small());
        } else if let Some(filtered) = self.filtered.as_ref() {
            let current = FilterRequest {
                kind: self.filter_kind,
                sigma: self.sigma,
            }
            .sanitized();
            if current != filtered.request {
                ui.label(
                    RichText::new("Controls changed; the preview still shows the last apply.")
                        .small(),
                );
            }
        }

        ui.separator();
        ui.heading("Export");
        ui.add_space(4.0);

        let has_result = self.filtered.is_some();
        ui.add_enabled_ui(has_result, |ui| {
            if ui
                .button(format!("{} Save filtered image…", icons::ICON_SAVE))
                .on_hover_text("Save the result as a lossless PNG (Ctrl+S)")
                .clicked()
            {
                self.start_save_filtered();
            }
            if ui
                .button("Copy to clipboard")
                .on_hover_text("Put the filtered pixels on the system clipboard")
                .clicked()
            {
                self.copy_filtered_to_clipboard();
            }
        });
        ui.label(
            RichText::new(format!("Saves as {EXPORT_FILE_NAME} ({EXPORT_MIME_TYPE}).")).small(),
        );
    }
}
