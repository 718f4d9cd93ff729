use super::super::FilterlabApp;
use super::icons;

impl FilterlabApp {
    pub(crate) fn ui_top(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            // Use egui's built-in theme toggle so icon matches current mode.
            egui::widgets::global_theme_preference_switch(ui);
            ui.separator();

            self.ui_file_menu(ui);
            ui.separator();

            let side_label = if self.side_open {
                "Hide controls"
            } else {
                "Show controls"
            };
            if ui
                .button(format!("{} {side_label}", icons::ICON_SIDE_TOGGLE))
                .on_hover_text("Toggle the filter controls panel (Ctrl+B)")
                .clicked()
            {
                self.side_open = !self.side_open;
            }
            ui.separator();

            let info_button = egui::Button::new(format!("{} Image info", icons::ICON_INFO));
            if ui
                .add_enabled(self.source.is_some(), info_button)
                .on_hover_text("Show provenance and pixel facts (Ctrl+I)")
                .clicked()
            {
                self.info_window_open = true;
            }
        });
    }

    fn ui_file_menu(&mut self, ui: &mut egui::Ui) {
        let can_save = self.filtered.is_some();
        ui.menu_button(format!("{} File", icons::ICON_MENU), |ui| {
            if ui
                .add(egui::Button::new("Open image…").shortcut_text("Ctrl+O"))
                .on_hover_text("Open a jpg, jpeg, or png file. You can also drag & drop one.")
                .clicked()
            {
                self.open_image_dialog();
                ui.close();
            }

            if ui
                .add(egui::Button::new("Paste image").shortcut_text("Ctrl+V"))
                .on_hover_text("Paste an image from the clipboard")
                .clicked()
            {
                self.paste_image_from_clipboard(ui.ctx());
                ui.close();
            }

            ui.separator();

            if ui
                .add_enabled(
                    can_save,
                    egui::Button::new("Save filtered PNG…").shortcut_text("Ctrl+S"),
                )
                .on_hover_text("Save the filtered result as a PNG file")
                .clicked()
            {
                self.start_save_filtered();
                ui.close();
            }
        });
    }
}
