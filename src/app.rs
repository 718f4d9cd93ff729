//! Main egui/eframe application state and UI orchestration.

use crate::config::AppConfig;
use crate::export;
use crate::filter::{FilterKind, FilterOutput, FilterRequest, apply_filter};
use crate::image::{ImageMeta, LoadedImage, color_image_from_output};
use egui::{ColorImage, Context, Key};
use egui_file_dialog::{DialogState, FileDialog};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::time::SystemTime;

mod clipboard;
mod image_loader;
mod ui;

enum ImageLoadRequest {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

struct PendingImageTask {
    rx: Receiver<ImageLoadResult>,
    meta: PendingImageMeta,
}

enum ImageLoadResult {
    Success {
        image: DynamicImage,
        preview: ColorImage,
    },
    Error(String),
}

#[derive(Clone)]
enum PendingImageMeta {
    Path {
        path: PathBuf,
    },
    DroppedBytes {
        name: Option<String>,
        byte_len: usize,
        last_modified: Option<SystemTime>,
    },
}

impl PendingImageMeta {
    fn description(&self) -> String {
        match self {
            Self::Path { path } => path
                .file_name()
                .and_then(|s| s.to_str())
                .map_or_else(|| path.display().to_string(), str::to_string),
            Self::DroppedBytes { name, .. } => name
                .as_deref()
                .map_or_else(|| "dropped bytes".to_string(), str::to_string),
        }
    }

    fn into_image_meta(self) -> ImageMeta {
        match self {
            Self::Path { path } => ImageMeta::from_path(&path),
            Self::DroppedBytes {
                name,
                byte_len,
                last_modified,
            } => ImageMeta::from_dropped_bytes(name.as_deref(), byte_len, last_modified),
        }
    }
}

/// Decoded source image, its display texture, and where it came from.
struct SourceImage {
    image: DynamicImage,
    view: LoadedImage,
    meta: ImageMeta,
}

/// Last filter result with the request that produced it.
struct FilteredImage {
    output: FilterOutput,
    view: LoadedImage,
    request: FilterRequest,
}

impl FilteredImage {
    fn heading(&self) -> String {
        format!("{} Filtered Image", self.request.kind.label())
    }
}

#[derive(Debug)]
enum NativeDialog {
    Open(FileDialog),
    SavePng { dialog: FileDialog, bytes: Vec<u8> },
}

/// Top-level application state for the Filterlab UI. All widget values live
/// here for the duration of the session; nothing persists across runs.
pub struct FilterlabApp {
    source: Option<SourceImage>,
    filtered: Option<FilteredImage>,
    filter_kind: FilterKind,
    sigma: f32,
    pending_image_task: Option<PendingImageTask>,
    active_dialog: Option<NativeDialog>,
    last_image_dir: Option<PathBuf>,
    last_export_dir: Option<PathBuf>,
    last_status: Option<String>,
    side_open: bool,
    info_window_open: bool,
    config: AppConfig,
}

impl FilterlabApp {
    pub fn new_with_initial_path(initial_image_path: Option<&Path>) -> Self {
        let config = AppConfig::load();
        let sigma = config.initial_sigma();
        let mut app = Self {
            source: None,
            filtered: None,
            filter_kind: FilterKind::Mean,
            sigma,
            pending_image_task: None,
            active_dialog: None,
            last_image_dir: None,
            last_export_dir: None,
            last_status: None,
            side_open: true,
            info_window_open: false,
            config,
        };
        if let Some(path) = initial_image_path {
            app.start_loading_image_from_path(path.to_path_buf());
        }
        app
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.last_status = Some(msg.into());
    }

    /// Install a freshly decoded image; any previous filter result is stale.
    fn set_loaded_image(&mut self, source: SourceImage) {
        self.filtered = None;
        self.source = Some(source);
    }

    /// Dispatch the currently selected filter over the loaded image.
    /// Only called from the explicit Apply trigger; selection or slider
    /// changes never recompute on their own.
    pub(crate) fn apply_selected_filter(&mut self, ctx: &Context) {
        let Some(source) = self.source.as_ref() else {
            self.set_status("No image uploaded.");
            return;
        };
        let request = FilterRequest {
            kind: self.filter_kind,
            sigma: self.sigma,
        }
        .sanitized();
        let output = apply_filter(&source.image, request);
        let preview = color_image_from_output(&output);
        let view = LoadedImage::from_color_image(ctx, "filtered_image", preview);
        self.filtered = Some(FilteredImage {
            output,
            view,
            request,
        });
        self.set_status(format!("{} filter applied.", request.kind.label()));
    }

    /// Encode the filter result and open the save dialog over the bytes.
    pub(crate) fn start_save_filtered(&mut self) {
        let Some(filtered) = self.filtered.as_ref() else {
            self.set_status("Apply a filter before saving.");
            return;
        };
        match export::encode_png(&filtered.output) {
            Ok(bytes) => {
                let mut dialog = Self::make_save_dialog(
                    "Save filtered image",
                    export::EXPORT_FILE_NAME,
                    &["png"],
                    self.last_export_dir.as_deref(),
                );
                dialog.save_file();
                self.active_dialog = Some(NativeDialog::SavePng { dialog, bytes });
            }
            Err(err) => self.set_status(format!("PNG encoding failed: {err}")),
        }
    }

    pub(crate) fn remember_image_dir_from_path(&mut self, path: &Path) {
        let dir = path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        self.last_image_dir = Some(dir);
    }

    fn remember_export_dir_from_path(&mut self, path: &Path) {
        let dir = path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        self.last_export_dir = Some(dir);
    }
}

impl eframe::App for FilterlabApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_image_loader(ctx);

        // Global hotkeys (ignored while typing in text fields)
        if !ctx.wants_keyboard_input() {
            // Ctrl/Cmd + O: open image
            if self.active_dialog.is_none()
                && ctx.input(|i| i.key_pressed(Key::O) && i.modifiers.command)
            {
                self.open_image_dialog();
            }
            // Ctrl/Cmd + V: paste image from clipboard
            if self.active_dialog.is_none()
                && ctx.input(|i| i.key_pressed(Key::V) && i.modifiers.command)
            {
                self.paste_image_from_clipboard(ctx);
            }
            // Ctrl/Cmd + S: save the filtered result
            if self.active_dialog.is_none()
                && self.filtered.is_some()
                && ctx.input(|i| i.key_pressed(Key::S) && i.modifiers.command)
            {
                self.start_save_filtered();
            }
            // Ctrl/Cmd + B: toggle side panel
            if ctx.input(|i| i.key_pressed(Key::B) && i.modifiers.command) {
                self.side_open = !self.side_open;
            }
            // Ctrl/Cmd + I: show image info
            if self.source.is_some() && ctx.input(|i| i.key_pressed(Key::I) && i.modifiers.command)
            {
                self.info_window_open = true;
            }
        }

        egui::TopBottomPanel::top("top").show(ctx, |ui| self.ui_top(ui));
        egui::SidePanel::right("side")
            .resizable(true)
            .default_width(260.0)
            .show_animated(ctx, self.side_open, |ui| self.ui_side_controls(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.ui_status_bar(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.ui_central_previews(ui));
        self.ui_image_info_window(ctx);

        let mut close_dialog = false;
        let mut saved_to_path: Option<PathBuf> = None;

        if let Some(dialog_state) = self.active_dialog.as_mut() {
            match dialog_state {
                NativeDialog::Open(dialog) => {
                    dialog.update(ctx);
                    if let Some(path) = dialog.take_picked() {
                        self.start_loading_image_from_path(path);
                        close_dialog = true;
                    } else {
                        match dialog.state() {
                            DialogState::Cancelled => {
                                self.set_status("Open canceled.");
                                close_dialog = true;
                            }
                            DialogState::Closed => close_dialog = true,
                            _ => {}
                        }
                    }
                }
                NativeDialog::SavePng { dialog, bytes } => {
                    dialog.update(ctx);
                    if let Some(path) = dialog.take_picked() {
                        match export::write_png(&path, bytes) {
                            Ok(()) => {
                                saved_to_path = Some(path);
                            }
                            Err(e) => self.set_status(format!("Save failed: {e}")),
                        }
                        close_dialog = true;
                    } else {
                        match dialog.state() {
                            DialogState::Cancelled => {
                                self.set_status("Save canceled.");
                                close_dialog = true;
                            }
                            DialogState::Closed => close_dialog = true,
                            _ => {}
                        }
                    }
                }
            }
        }

        if let Some(path) = saved_to_path {
            self.remember_export_dir_from_path(&path);
            self.set_status(format!("Saved {}", path.display()));
        }

        if close_dialog {
            self.active_dialog = None;
        }
    }
}
