//! View layer.

pub mod editor_view;
pub mod menu_bar;
pub mod prompt;
pub mod theme;
pub mod viewport;

pub use editor_view::EditorView;
pub use menu_bar::{MenuAction, MenuBar};
pub use prompt::{PromptBar, PromptKind, PromptOutcome};
pub use theme::Theme;
pub use viewport::Viewport;
