//! Application layer.

pub mod terminal_pad;

pub use terminal_pad::TerminalPad;
