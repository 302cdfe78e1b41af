//! Editor configuration.
//!
//! Held in memory only; there is no persisted configuration.

#[derive(Clone, Debug)]
pub struct EditorConfig {
    pub tab_size: u8,
    pub double_click_ms: u64,
    pub triple_click_ms: u64,
    pub click_slop: u16,
    /// Lines moved per wheel notch.
    pub scroll_lines: usize,
    pub show_line_numbers: bool,
    /// Widest cell-art an inserted image may occupy.
    pub image_max_cols: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: 4,
            double_click_ms: 300,
            triple_click_ms: 450,
            click_slop: 2,
            scroll_lines: 1,
            show_line_numbers: true,
            image_max_cols: 60,
        }
    }
}

impl EditorConfig {
    pub fn scroll_step(&self) -> usize {
        self.scroll_lines
    }
}

pub struct ConfigService {
    editor: EditorConfig,
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            editor: EditorConfig::default(),
        }
    }

    pub fn with_editor_config(editor: EditorConfig) -> Self {
        Self { editor }
    }

    pub fn editor(&self) -> &EditorConfig {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorConfig {
        &mut self.editor
    }

    pub fn set_show_line_numbers(&mut self, show: bool) {
        self.editor.show_line_numbers = show;
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.tab_size, 4);
        assert!(config.show_line_numbers);
        assert_eq!(config.image_max_cols, 60);
    }

    #[test]
    fn test_config_service() {
        let mut service = ConfigService::new();
        assert!(service.editor().show_line_numbers);

        service.set_show_line_numbers(false);
        assert!(!service.editor().show_line_numbers);

        service.editor_mut().tab_size = 2;
        assert_eq!(service.editor().tab_size, 2);
    }
}
