//! Semantic command definitions.
//!
//! Commands name what the user asked for, independent of which key or menu
//! item triggered it. Keybindings and menu items both resolve to these.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // cursor movement
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorLineStart,
    CursorLineEnd,
    CursorFileStart,
    CursorFileEnd,

    // editing
    InsertChar(char),
    InsertNewline,
    InsertTab,
    DeleteBackward,
    DeleteForward,

    // selection
    ClearSelection,
    SelectAll,

    // scrolling
    PageUp,
    PageDown,

    // file
    Open,
    Save,
    SaveAs,

    // edit menu
    Copy,
    Find,
    ReplaceAll,

    // media
    InsertImage,

    // system
    Quit,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::CursorLeft => "cursorLeft",
            Command::CursorRight => "cursorRight",
            Command::CursorUp => "cursorUp",
            Command::CursorDown => "cursorDown",
            Command::CursorLineStart => "cursorLineStart",
            Command::CursorLineEnd => "cursorLineEnd",
            Command::CursorFileStart => "cursorFileStart",
            Command::CursorFileEnd => "cursorFileEnd",
            Command::InsertChar(_) => "insertChar",
            Command::InsertNewline => "insertNewline",
            Command::InsertTab => "insertTab",
            Command::DeleteBackward => "deleteBackward",
            Command::DeleteForward => "deleteForward",
            Command::ClearSelection => "clearSelection",
            Command::SelectAll => "selectAll",
            Command::PageUp => "pageUp",
            Command::PageDown => "pageDown",
            Command::Open => "open",
            Command::Save => "save",
            Command::SaveAs => "saveAs",
            Command::Copy => "copy",
            Command::Find => "find",
            Command::ReplaceAll => "replaceAll",
            Command::InsertImage => "insertImage",
            Command::Quit => "quit",
        }
    }

    /// Commands the editor view handles itself (cursor, typing, scrolling).
    pub fn is_editor_command(&self) -> bool {
        !matches!(
            self,
            Command::Open
                | Command::Save
                | Command::SaveAs
                | Command::Copy
                | Command::Find
                | Command::ReplaceAll
                | Command::InsertImage
                | Command::Quit
        )
    }

    pub fn is_edit_command(&self) -> bool {
        matches!(
            self,
            Command::InsertChar(_)
                | Command::InsertNewline
                | Command::InsertTab
                | Command::DeleteBackward
                | Command::DeleteForward
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names() {
        assert_eq!(Command::CursorLeft.name(), "cursorLeft");
        assert_eq!(Command::InsertChar('a').name(), "insertChar");
        assert_eq!(Command::ReplaceAll.name(), "replaceAll");
        assert_eq!(Command::Quit.name(), "quit");
    }

    #[test]
    fn test_is_editor_command() {
        assert!(Command::CursorLeft.is_editor_command());
        assert!(Command::SelectAll.is_editor_command());
        assert!(!Command::Save.is_editor_command());
        assert!(!Command::InsertImage.is_editor_command());
    }

    #[test]
    fn test_is_edit_command() {
        assert!(Command::InsertChar('a').is_edit_command());
        assert!(Command::DeleteBackward.is_edit_command());
        assert!(!Command::CursorLeft.is_edit_command());
        assert!(!Command::Copy.is_edit_command());
    }
}
