//! Document data models.

pub mod image_store;
pub mod selection;
pub mod text_buffer;

pub use image_store::{anchor_line, is_anchor, parse_anchor, HalfBlock, ImageArt, ImageStore};
pub use selection::{Granularity, Selection};
pub use text_buffer::TextBuffer;
