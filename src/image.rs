mod load;
mod meta;
mod view;

pub use load::{decode_image_from_bytes, decode_image_from_path};
pub use meta::{ImageMeta, format_system_time, human_readable_bytes};
pub use view::{LoadedImage, color_image_from_dynamic, color_image_from_output};
