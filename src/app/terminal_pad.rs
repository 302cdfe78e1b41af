//! The TerminalPad application shell.
//!
//! Owns the views and services, routes input (prompt first, then the open
//! menu, then global keybindings, then the editor) and draws the frame
//! layout: menu bar, editor pane, optional prompt line, status line.

use crate::core::event::{InputEvent, Key};
use crate::core::view::View;
use crate::core::Command;
use crate::services::{
    ClipboardService, ConfigService, FileService, ImageService, KeybindingService,
};
use crate::views::{EditorView, MenuAction, MenuBar, PromptBar, PromptKind, PromptOutcome, Theme};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::path::{Path, PathBuf};

struct StatusLine {
    text: String,
    is_error: bool,
}

pub struct TerminalPad {
    editor: EditorView,
    menu: MenuBar,
    prompt: Option<PromptBar>,
    status: Option<StatusLine>,
    theme: Theme,
    config: ConfigService,
    file_service: FileService,
    keybindings: KeybindingService,
    clipboard: ClipboardService,
    should_quit: bool,
}

impl TerminalPad {
    pub fn new() -> Self {
        let theme = Theme::default();
        let config = ConfigService::new();
        Self {
            editor: EditorView::new(config.editor().clone(), theme.clone()),
            menu: MenuBar::new(theme.clone()),
            prompt: None,
            status: None,
            theme,
            config,
            file_service: FileService::new(),
            keybindings: KeybindingService::new(),
            clipboard: ClipboardService::new(),
            should_quit: false,
        }
    }

    /// Starts with a file already loaded, as from the command line.
    pub fn with_file(path: &Path) -> Self {
        let mut app = Self::new();
        app.open_path(path);
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn editor(&self) -> &EditorView {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorView {
        &mut self.editor
    }

    // ==================== input routing ====================

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key(key_event) => {
                if key_event.kind == KeyEventKind::Release {
                    return;
                }
                self.status = None;
                self.handle_key(&key_event);
            }
            InputEvent::Mouse(mouse_event) => {
                if self.prompt.is_some() {
                    return;
                }
                let action = self.menu.handle_mouse(&mouse_event);
                match action {
                    MenuAction::Command(cmd) => self.run_command(cmd),
                    MenuAction::Consumed => {}
                    MenuAction::Ignored => {
                        self.editor.handle_input(&InputEvent::Mouse(mouse_event));
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, event: &KeyEvent) {
        if self.prompt.is_some() {
            self.handle_prompt_key(event);
            return;
        }

        if self.menu.is_open() {
            if let MenuAction::Command(cmd) = self.menu.handle_key(event) {
                self.run_command(cmd);
            }
            return;
        }

        if event.code == KeyCode::F(10) {
            self.menu.activate();
            return;
        }

        if let Some(cmd) = self.keybindings.get(&Key::from(*event)).copied() {
            self.run_command(cmd);
            return;
        }

        if self
            .editor
            .handle_input(&InputEvent::Key(*event))
            .is_quit()
        {
            self.should_quit = true;
        }
    }

    fn handle_prompt_key(&mut self, event: &KeyEvent) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        match prompt.handle_key(event) {
            PromptOutcome::Pending => {}
            PromptOutcome::Cancelled => {
                self.prompt = None;
            }
            PromptOutcome::Submitted { kind, input } => {
                self.prompt = None;
                self.on_prompt_submit(kind, input);
            }
        }
    }

    // ==================== commands ====================

    pub fn run_command(&mut self, command: Command) {
        tracing::debug!(command = command.name(), "command");
        match command {
            Command::Open => {
                self.prompt = Some(PromptBar::new(PromptKind::Open, ""));
            }
            Command::Save => match self.editor.file_path().cloned() {
                Some(path) => self.save_to(path),
                None => self.prompt = Some(PromptBar::new(PromptKind::SaveAs, "")),
            },
            Command::SaveAs => {
                self.prompt = Some(PromptBar::new(PromptKind::SaveAs, ""));
            }
            Command::Find => {
                let prefill = self.editor.find_pattern().to_string();
                self.prompt = Some(PromptBar::new(PromptKind::Find, &prefill));
            }
            Command::ReplaceAll => {
                self.prompt = Some(PromptBar::new(PromptKind::ReplaceFind, ""));
            }
            Command::Copy => self.copy_selection(),
            Command::InsertImage => {
                self.prompt = Some(PromptBar::new(PromptKind::InsertImage, ""));
            }
            Command::Quit => {
                self.should_quit = true;
            }
            other => self.editor.execute(other),
        }
    }

    fn on_prompt_submit(&mut self, kind: PromptKind, input: String) {
        match kind {
            PromptKind::Open => {
                let input = input.trim();
                if input.is_empty() {
                    return;
                }
                self.open_path(Path::new(input));
            }
            PromptKind::SaveAs => {
                if input.trim().is_empty() {
                    return;
                }
                let path = self.file_service.normalize_save_path(&input);
                self.save_to(path);
            }
            PromptKind::Find => {
                if input.is_empty() {
                    return;
                }
                let count = self.editor.set_find_pattern(&input);
                self.set_status(format!("{} match(es) for \"{}\"", count, input));
            }
            PromptKind::ReplaceFind => {
                if input.is_empty() {
                    return;
                }
                self.prompt = Some(PromptBar::new(
                    PromptKind::ReplaceWith { pattern: input },
                    "",
                ));
            }
            PromptKind::ReplaceWith { pattern } => {
                let count = self.editor.replace_all(&pattern, &input);
                self.set_status(format!("Replaced {} occurrence(s)", count));
            }
            PromptKind::InsertImage => {
                let input = input.trim();
                if input.is_empty() {
                    return;
                }
                let max_cols = self.config.editor().image_max_cols;
                match ImageService::load_art(Path::new(input), max_cols) {
                    Ok(art) => {
                        let name = self.editor.insert_image(art);
                        self.set_status(format!("Inserted {}", name));
                    }
                    Err(e) => {
                        tracing::warn!(path = input, error = %e, "image insert failed");
                        self.set_error(format!("Failed to insert image: {}", e));
                    }
                }
            }
        }
    }

    fn open_path(&mut self, path: &Path) {
        match self.file_service.read_file(path) {
            Ok(content) => {
                self.editor.set_content(&content);
                self.editor.set_file_path(path.to_path_buf());
                self.set_status(format!("Opened {}", path.display()));
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "open failed");
                self.set_error(format!("Failed to open: {}", e));
            }
        }
    }

    fn save_to(&mut self, path: PathBuf) {
        let content = self.editor.document_text();
        match self.file_service.write_file(&path, &content) {
            Ok(()) => {
                self.editor.set_dirty(false);
                self.editor.set_file_path(path.clone());
                self.set_status(format!("Saved {}", path.display()));
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "save failed");
                self.set_error(format!("Failed to save: {}", e));
            }
        }
    }

    /// Copy is silently ignored when nothing is selected or the clipboard
    /// is unavailable.
    fn copy_selection(&mut self) {
        let Some(text) = self.editor.selected_document_text() else {
            return;
        };
        self.clipboard.set_text(&text);
    }

    fn set_status(&mut self, text: String) {
        self.status = Some(StatusLine {
            text,
            is_error: false,
        });
    }

    fn set_error(&mut self, text: String) {
        self.status = Some(StatusLine {
            text,
            is_error: true,
        });
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }

    // ==================== rendering ====================

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let prompt_height = if self.prompt.is_some() { 1 } else { 0 };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(prompt_height),
                Constraint::Length(1),
            ])
            .split(area);

        self.editor.render(frame, rows[1]);
        self.render_status(frame, rows[3]);
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.render(frame, rows[2], &self.theme);
        }
        // Menu last so an open drop-down overlays the editor pane.
        self.menu.render(frame, rows[0], area);

        let cursor = if let Some(prompt) = self.prompt.as_ref() {
            prompt.cursor_position()
        } else if self.menu.is_open() {
            None
        } else {
            self.editor.cursor_position()
        };
        if let Some((x, y)) = cursor {
            frame.set_cursor_position((x, y));
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let style = Style::default().bg(self.theme.status_bg).fg(self.theme.status_fg);

        let name = self
            .editor
            .file_path()
            .and_then(|p| p.file_name())
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Untitled".to_string());
        let dirty = if self.editor.is_dirty() { " [+]" } else { "" };
        let left = format!(" {}{}", name, dirty);

        let middle = match &self.status {
            Some(status) => status.text.clone(),
            None if self.editor.match_count() > 0 => {
                format!("{} found", self.editor.match_count())
            }
            None => "F10 menu".to_string(),
        };

        let (row, col) = self.editor.cursor();
        let right = format!("Ln {}, Col {} ", row + 1, col + 1);

        let total = area.width as usize;
        let used = left.chars().count() + right.chars().count();
        let pad_total = total.saturating_sub(used + middle.chars().count());
        let pad_left = pad_total / 2;
        let pad_right = pad_total - pad_left;

        let middle_style = if self.status.as_ref().is_some_and(|s| s.is_error) {
            Style::default().bg(self.theme.status_bg).fg(self.theme.error_fg)
        } else {
            Style::default().bg(self.theme.status_bg).fg(self.theme.hint_fg)
        };

        let line = Line::from(vec![
            Span::styled(left, style),
            Span::styled(" ".repeat(pad_left), style),
            Span::styled(middle, middle_style),
            Span::styled(" ".repeat(pad_right), style),
            Span::styled(right, style),
        ]);
        frame.render_widget(Paragraph::new(line).style(style), area);
    }
}

impl Default for TerminalPad {
    fn default() -> Self {
        Self::new()
    }
}
