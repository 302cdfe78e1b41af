//! tpad - TerminalPad, a retro terminal notepad.
//!
//! Module structure:
//! - core: framework primitives (Command, Key, View)
//! - models: document data (TextBuffer, Selection, ImageStore)
//! - services: file IO, search, clipboard, keybindings, image decoding
//! - views: editor pane, menu bar, prompt bar
//! - app: the TerminalPad application shell

pub mod app;
pub mod core;
pub mod logging;
pub mod models;
pub mod services;
pub mod views;
