//! Service layer.
//!
//! - FileService: whole-file text IO
//! - SearchService: literal find / replace-all
//! - KeybindingService: key chord to command mapping
//! - ClipboardService: best-effort system clipboard
//! - ImageService: raster decode + cell rasterization
//! - ConfigService: in-memory editor configuration
//! - paths: per-platform application data directories

pub mod clipboard;
pub mod config;
pub mod file;
pub mod image;
pub mod keybinding;
pub mod paths;
pub mod search;

pub use clipboard::ClipboardService;
pub use config::{ConfigService, EditorConfig};
pub use file::{FileError, FileService};
pub use image::{ImageError, ImageService};
pub use keybinding::KeybindingService;
pub use search::{Match, SearchService};
