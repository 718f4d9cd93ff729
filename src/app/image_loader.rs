use super::{
    FilterlabApp, ImageLoadRequest, ImageLoadResult, PendingImageMeta, PendingImageTask,
    SourceImage,
};
use crate::image::{
    LoadedImage, color_image_from_dynamic, decode_image_from_bytes, decode_image_from_path,
};
use egui::Context;
use std::sync::mpsc::{self, TryRecvError};
use std::thread;

impl FilterlabApp {
    pub(crate) fn start_loading_image_from_path(&mut self, path: std::path::PathBuf) {
        self.remember_image_dir_from_path(&path);
        let meta = PendingImageMeta::Path { path: path.clone() };
        self.start_image_load(ImageLoadRequest::Path(path), meta);
    }

    pub(crate) fn start_loading_image_from_bytes(
        &mut self,
        name: Option<String>,
        bytes: Vec<u8>,
        last_modified: Option<std::time::SystemTime>,
    ) {
        let meta = PendingImageMeta::DroppedBytes {
            name,
            byte_len: bytes.len(),
            last_modified,
        };
        self.start_image_load(ImageLoadRequest::Bytes(bytes), meta);
    }

    fn start_image_load(&mut self, request: ImageLoadRequest, meta: PendingImageMeta) {
        let description = meta.description();
        let cfg = self.config.clone();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = match request {
                ImageLoadRequest::Path(path) => decode_image_from_path(&cfg, &path),
                ImageLoadRequest::Bytes(bytes) => decode_image_from_bytes(&cfg, bytes),
            };
            let msg = match result {
                Ok(image) => {
                    // Build the display pixels off the UI thread too.
                    let preview = color_image_from_dynamic(&image);
                    ImageLoadResult::Success { image, preview }
                }
                Err(err) => ImageLoadResult::Error(err.to_string()),
            };
            let _ = tx.send(msg);
        });
        self.pending_image_task = Some(PendingImageTask { rx, meta });
        self.set_status(format!("Loading {description}…"));
    }

    pub(crate) fn poll_image_loader(&mut self, ctx: &Context) {
        let Some(task) = self.pending_image_task.take() else {
            return;
        };
        match task.rx.try_recv() {
            Ok(ImageLoadResult::Success { image, preview }) => {
                let meta = task.meta.into_image_meta();
                let name = meta.display_name();
                let view = LoadedImage::from_color_image(ctx, "source_image", preview);
                self.set_loaded_image(SourceImage { image, view, meta });
                self.set_status(format!("Loaded {name}"));
            }
            Ok(ImageLoadResult::Error(err)) => {
                let label = task.meta.description();
                self.set_status(format!("Failed to load {label}: {err}"));
            }
            Err(TryRecvError::Empty) => {
                self.pending_image_task = Some(task);
                // Keep polling while the worker is busy.
                ctx.request_repaint();
            }
            Err(TryRecvError::Disconnected) => {
                let label = task.meta.description();
                self.set_status(format!("Loading {label} failed: worker disconnected."));
            }
        }
    }
}
