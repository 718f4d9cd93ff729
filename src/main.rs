mod app;
mod config;
mod export;
mod filter;
mod image;

use app::FilterlabApp;
use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    let initial_image_path: Option<PathBuf> = std::env::args_os().nth(1).map(PathBuf::from);
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 1000.0])
            .with_min_inner_size([640.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Filterlab — Image Filters",
        native_options,
        Box::new(move |_cc| {
            Ok(Box::new(FilterlabApp::new_with_initial_path(
                initial_image_path.as_deref(),
            )))
        }),
    )
}
