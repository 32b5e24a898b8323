pub mod preview;

pub use preview::{encode_gray_png, preview_base64, preview_png, MAX_PREVIEW_SCALE};
