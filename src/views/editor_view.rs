//! Editor view.
//!
//! Renders the document with its line-number gutter and handles keyboard
//! and mouse interaction. The gutter is regenerated from the line count on
//! every frame, so it can never drift from the buffer.

use super::theme::Theme;
use super::viewport::Viewport;
use crate::core::event::InputEvent;
use crate::core::view::{EventResult, View};
use crate::core::Command;
use crate::models::{anchor_line, is_anchor, parse_anchor, Granularity, ImageArt, ImageStore, TextBuffer};
use crate::services::search::{Match, SearchService};
use crate::services::EditorConfig;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;
use std::path::PathBuf;
use std::time::Instant;
use unicode_segmentation::UnicodeSegmentation;

/// Gutter label for 1-based line `n`, right-aligned to `width` digits.
pub fn overlay_line(n: usize, width: usize) -> String {
    format!("{:>width$} >", n)
}

pub struct EditorView {
    buffer: TextBuffer,
    viewport: Viewport,
    config: EditorConfig,
    theme: Theme,
    images: ImageStore,
    file_path: Option<PathBuf>,
    dirty: bool,
    find_pattern: String,
    matches: Vec<Match>,
    mouse_state: MouseState,
}

struct MouseState {
    last_click: Option<(u16, u16, Instant)>,
    click_count: u8,
    dragging: bool,
}

impl MouseState {
    fn new() -> Self {
        Self {
            last_click: None,
            click_count: 0,
            dragging: false,
        }
    }

    fn on_click(&mut self, x: u16, y: u16, config: &EditorConfig) -> Granularity {
        let now = Instant::now();

        if let Some((lx, ly, lt)) = self.last_click {
            let dx = (x as i32 - lx as i32).abs();
            let dy = (y as i32 - ly as i32).abs();
            let dt = now.duration_since(lt).as_millis() as u64;

            if dx <= config.click_slop as i32
                && dy <= config.click_slop as i32
                && dt < config.triple_click_ms
            {
                self.click_count = (self.click_count % 3) + 1;
            } else {
                self.click_count = 1;
            }
        } else {
            self.click_count = 1;
        }

        self.last_click = Some((x, y, now));
        self.dragging = true;

        match self.click_count {
            1 => Granularity::Char,
            2 => Granularity::Word,
            _ => Granularity::Line,
        }
    }

    fn on_release(&mut self) {
        self.dragging = false;
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CellClass {
    Plain,
    Matched,
    Selected,
}

impl EditorView {
    pub fn new(config: EditorConfig, theme: Theme) -> Self {
        Self {
            buffer: TextBuffer::new(),
            viewport: Viewport::new(config.tab_size),
            config,
            theme,
            images: ImageStore::new(),
            file_path: None,
            dirty: false,
            find_pattern: String::new(),
            matches: Vec::new(),
            mouse_state: MouseState::new(),
        }
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    pub fn file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    pub fn set_file_path(&mut self, path: PathBuf) {
        self.file_path = Some(path);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.buffer.cursor()
    }

    /// Replaces the document, as after opening a file.
    pub fn set_content(&mut self, text: &str) {
        self.buffer = TextBuffer::from_text(text);
        self.dirty = false;
        self.viewport.enable_follow_cursor();
        self.refresh_matches();
    }

    /// Document text with image anchor lines stripped; this is what gets
    /// saved and copied (images themselves are not text).
    pub fn document_text(&self) -> String {
        let mut out = String::new();
        let mut first = true;
        for line in self.buffer.lines() {
            if is_anchor(line) {
                continue;
            }
            if !first {
                out.push('\n');
            }
            out.push_str(line);
            first = false;
        }
        out
    }

    pub fn selected_document_text(&self) -> Option<String> {
        let raw = self.buffer.selected_text()?;
        let text: Vec<&str> = raw.split('\n').filter(|l| !is_anchor(l)).collect();
        let text = text.join("\n");
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    // ==================== find / replace ====================

    /// Sets the highlight pattern and returns the number of matches.
    pub fn set_find_pattern(&mut self, pattern: &str) -> usize {
        self.find_pattern = pattern.to_string();
        self.refresh_matches();
        self.matches.len()
    }

    pub fn clear_find(&mut self) {
        self.find_pattern.clear();
        self.matches.clear();
    }

    pub fn find_pattern(&self) -> &str {
        &self.find_pattern
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    fn refresh_matches(&mut self) {
        if self.find_pattern.is_empty() {
            self.matches.clear();
            return;
        }
        let lines = self.buffer.lines();
        self.matches = SearchService::find_all(lines, &self.find_pattern);
        self.matches.retain(|m| !is_anchor(&lines[m.line]));
    }

    /// Whole-buffer replace with `str::replace` semantics, then a full
    /// buffer reset. Returns the number of occurrences replaced.
    pub fn replace_all(&mut self, pattern: &str, replacement: &str) -> usize {
        let text = self.document_text();
        let count = SearchService::count(&text, pattern);
        let replaced = SearchService::replace_all(&text, pattern, replacement);
        self.buffer = TextBuffer::from_text(&replaced);
        self.dirty = true;
        self.viewport.enable_follow_cursor();
        self.refresh_matches();
        count
    }

    // ==================== images ====================

    /// Registers the art and splices its anchor block in at the cursor.
    /// Returns the generated image name.
    pub fn insert_image(&mut self, art: ImageArt) -> String {
        let rows = art.cell_rows();
        let name = self.images.insert(art);
        let block: Vec<String> = (0..rows).map(|r| anchor_line(&name, r)).collect();
        self.buffer.insert_lines_at_cursor(&block);
        self.dirty = true;
        self.refresh_matches();
        name
    }

    // ==================== command execution ====================

    pub fn execute(&mut self, command: Command) {
        match command {
            Command::CursorLeft => self.cursor_left(),
            Command::CursorRight => self.cursor_right(),
            Command::CursorUp => self.cursor_up(),
            Command::CursorDown => self.cursor_down(),
            Command::CursorLineStart => {
                let (row, _) = self.buffer.cursor();
                self.buffer.set_cursor(row, 0);
            }
            Command::CursorLineEnd => {
                let (row, _) = self.buffer.cursor();
                let len = self.buffer.line_grapheme_len(row);
                self.buffer.set_cursor(row, len);
            }
            Command::CursorFileStart => {
                self.buffer.set_cursor(0, 0);
            }
            Command::CursorFileEnd => {
                let last = self.buffer.len_lines().saturating_sub(1);
                let len = self.buffer.line_grapheme_len(last);
                self.buffer.set_cursor(last, len);
            }
            Command::PageUp => {
                let height = self.viewport.height();
                self.viewport
                    .scroll_vertical(-(height as isize), self.buffer.len_lines());
                let (row, col) = self.buffer.cursor();
                let new_row = row.saturating_sub(height);
                let len = self.buffer.line_grapheme_len(new_row);
                self.buffer.set_cursor(new_row, col.min(len));
            }
            Command::PageDown => {
                let height = self.viewport.height();
                self.viewport
                    .scroll_vertical(height as isize, self.buffer.len_lines());
                let (row, col) = self.buffer.cursor();
                let new_row = (row + height).min(self.buffer.len_lines().saturating_sub(1));
                let len = self.buffer.line_grapheme_len(new_row);
                self.buffer.set_cursor(new_row, col.min(len));
            }
            Command::InsertChar(c) => {
                self.buffer.delete_selection();
                self.buffer.insert_char(c);
                self.dirty = true;
                self.refresh_matches();
            }
            Command::InsertNewline => {
                self.buffer.delete_selection();
                self.buffer.insert_newline();
                self.dirty = true;
                self.refresh_matches();
            }
            Command::InsertTab => {
                self.buffer.delete_selection();
                self.buffer.insert_char('\t');
                self.dirty = true;
                self.refresh_matches();
            }
            Command::DeleteBackward => {
                if self.buffer.delete_selection() || self.buffer.delete_backward() {
                    self.dirty = true;
                    self.refresh_matches();
                }
            }
            Command::DeleteForward => {
                if self.buffer.delete_selection() || self.buffer.delete_forward() {
                    self.dirty = true;
                    self.refresh_matches();
                }
            }
            Command::ClearSelection => {
                self.buffer.clear_selection();
            }
            Command::SelectAll => {
                self.buffer.select_all();
            }
            _ => {}
        }
    }

    fn cursor_left(&mut self) {
        let (row, col) = self.buffer.cursor();
        if col > 0 {
            self.buffer.set_cursor(row, col - 1);
        } else if row > 0 {
            let prev_len = self.buffer.line_grapheme_len(row - 1);
            self.buffer.set_cursor(row - 1, prev_len);
        }
    }

    fn cursor_right(&mut self) {
        let (row, col) = self.buffer.cursor();
        let line_len = self.buffer.line_grapheme_len(row);
        if col < line_len {
            self.buffer.set_cursor(row, col + 1);
        } else if row + 1 < self.buffer.len_lines() {
            self.buffer.set_cursor(row + 1, 0);
        }
    }

    fn cursor_up(&mut self) {
        let (row, col) = self.buffer.cursor();
        if row > 0 {
            let new_len = self.buffer.line_grapheme_len(row - 1);
            self.buffer.set_cursor(row - 1, col.min(new_len));
        }
    }

    fn cursor_down(&mut self) {
        let (row, col) = self.buffer.cursor();
        if row + 1 < self.buffer.len_lines() {
            let new_len = self.buffer.line_grapheme_len(row + 1);
            self.buffer.set_cursor(row + 1, col.min(new_len));
        }
    }

    // ==================== input ====================

    fn handle_key(&mut self, event: &crossterm::event::KeyEvent) -> EventResult {
        self.viewport.enable_follow_cursor();

        match (event.code, event.modifiers) {
            (KeyCode::Left, KeyModifiers::NONE) => self.execute(Command::CursorLeft),
            (KeyCode::Right, KeyModifiers::NONE) => self.execute(Command::CursorRight),
            (KeyCode::Up, KeyModifiers::NONE) => self.execute(Command::CursorUp),
            (KeyCode::Down, KeyModifiers::NONE) => self.execute(Command::CursorDown),
            (KeyCode::Home, KeyModifiers::NONE) => self.execute(Command::CursorLineStart),
            (KeyCode::End, KeyModifiers::NONE) => self.execute(Command::CursorLineEnd),
            (KeyCode::Home, KeyModifiers::CONTROL) => self.execute(Command::CursorFileStart),
            (KeyCode::End, KeyModifiers::CONTROL) => self.execute(Command::CursorFileEnd),
            (KeyCode::PageUp, KeyModifiers::NONE) => self.execute(Command::PageUp),
            (KeyCode::PageDown, KeyModifiers::NONE) => self.execute(Command::PageDown),
            (KeyCode::Enter, KeyModifiers::NONE) => self.execute(Command::InsertNewline),
            (KeyCode::Tab, KeyModifiers::NONE) => self.execute(Command::InsertTab),
            (KeyCode::Backspace, KeyModifiers::NONE) => self.execute(Command::DeleteBackward),
            (KeyCode::Delete, KeyModifiers::NONE) => self.execute(Command::DeleteForward),
            (KeyCode::Esc, KeyModifiers::NONE) => {
                self.buffer.clear_selection();
                self.clear_find();
            }
            (KeyCode::Char(c), mods) if mods.is_empty() || mods == KeyModifiers::SHIFT => {
                self.execute(Command::InsertChar(c))
            }
            _ => return EventResult::Ignored,
        }

        EventResult::Consumed
    }

    fn handle_mouse(&mut self, event: &crossterm::event::MouseEvent) -> EventResult {
        let area = match self.viewport.area() {
            Some(a) => a,
            None => return EventResult::Ignored,
        };

        match event.kind {
            MouseEventKind::ScrollUp => {
                let step = self.config.scroll_step();
                self.viewport
                    .scroll_vertical(-(step as isize), self.buffer.len_lines());
                return EventResult::Consumed;
            }
            MouseEventKind::ScrollDown => {
                let step = self.config.scroll_step();
                self.viewport
                    .scroll_vertical(step as isize, self.buffer.len_lines());
                return EventResult::Consumed;
            }
            _ => {}
        }

        let inside = event.column >= area.x
            && event.column < area.x + area.width
            && event.row >= area.y
            && event.row < area.y + area.height;

        let x = event.column.saturating_sub(area.x);
        let y = event.row.saturating_sub(area.y);

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) if inside => {
                self.viewport.enable_follow_cursor();
                let granularity = self.mouse_state.on_click(x, y, &self.config);

                if let Some(pos) = self.viewport.screen_to_pos(x, y, &self.buffer) {
                    self.buffer.set_cursor(pos.0, pos.1);
                    let selection = self.buffer.selection_from_pos(pos, granularity);
                    self.buffer.set_selection(Some(selection));
                }
                EventResult::Consumed
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.mouse_state.dragging {
                    if let Some(pos) = self.viewport.screen_to_pos(x, y, &self.buffer) {
                        self.buffer.update_selection_cursor(pos);
                        self.buffer.set_cursor(pos.0, pos.1);
                    }
                }
                EventResult::Consumed
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.mouse_state.on_release();
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    // ==================== rendering ====================

    fn selection_cols_for_row(&self, row: usize) -> Option<(usize, usize)> {
        let sel = self.buffer.selection()?;
        if sel.is_empty() {
            return None;
        }
        let ((sr, sc), (er, ec)) = sel.range();
        if row < sr || row > er {
            return None;
        }
        let start = if row == sr { sc } else { 0 };
        let end = if row == er { ec } else { usize::MAX };
        Some((start, end))
    }

    fn render_text_line(&self, row: usize, line: &str) -> Line<'static> {
        let selection = self.selection_cols_for_row(row);
        let match_ranges: Vec<(usize, usize)> = self
            .matches
            .iter()
            .filter(|m| m.line == row)
            .map(|m| (m.start, m.end))
            .collect();

        let horiz = self.viewport.horiz_offset();
        let plain = Style::default().fg(self.theme.fg);
        let selected = Style::default()
            .bg(self.theme.selection_bg)
            .fg(self.theme.selection_fg);
        let matched = Style::default()
            .bg(self.theme.match_bg)
            .fg(self.theme.match_fg);

        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut run = String::new();
        let mut run_class = CellClass::Plain;
        let mut display_col = 0u32;

        let mut flush = |run: &mut String, class: CellClass, spans: &mut Vec<Span<'static>>| {
            if run.is_empty() {
                return;
            }
            let style = match class {
                CellClass::Plain => plain,
                CellClass::Selected => selected,
                CellClass::Matched => matched,
            };
            spans.push(Span::styled(std::mem::take(run), style));
        };

        for (gi, (byte_idx, g)) in line.grapheme_indices(true).enumerate() {
            let w = self.viewport.grapheme_display_width(g, display_col);
            display_col += w;
            if display_col <= horiz {
                continue;
            }

            let class = if selection.is_some_and(|(s, e)| gi >= s && gi < e) {
                CellClass::Selected
            } else if match_ranges.iter().any(|&(s, e)| byte_idx >= s && byte_idx < e) {
                CellClass::Matched
            } else {
                CellClass::Plain
            };

            if class != run_class {
                flush(&mut run, run_class, &mut spans);
                run_class = class;
            }

            if g == "\t" {
                for _ in 0..w {
                    run.push(' ');
                }
            } else {
                run.push_str(g);
            }
        }
        flush(&mut run, run_class, &mut spans);

        Line::from(spans)
    }

    fn render_image_line(&self, name: &str, art_row: usize) -> Line<'static> {
        let Some(art) = self.images.get(name) else {
            return Line::from("");
        };
        let Some(cells) = art.rows.get(art_row) else {
            return Line::from("");
        };

        let horiz = self.viewport.horiz_offset() as usize;
        let mut spans: Vec<Span<'static>> = Vec::new();
        for cell in cells.iter().skip(horiz) {
            let span = match (cell.top, cell.bottom) {
                (Some(t), Some(b)) => Span::styled(
                    "\u{2580}",
                    Style::default().fg(rgb(t)).bg(rgb(b)),
                ),
                (Some(t), None) => Span::styled("\u{2580}", Style::default().fg(rgb(t))),
                (None, Some(b)) => Span::styled("\u{2584}", Style::default().fg(rgb(b))),
                (None, None) => Span::raw(" "),
            };
            spans.push(span);
        }
        Line::from(spans)
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

impl View for EditorView {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult {
        match event {
            InputEvent::Key(key_event) => self.handle_key(key_event),
            InputEvent::Mouse(mouse_event) => self.handle_mouse(mouse_event),
            _ => EventResult::Ignored,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let base = Style::default().bg(self.theme.bg).fg(self.theme.fg);
        frame.render_widget(Block::default().style(base), area);

        let total_lines = self.buffer.len_lines();
        let digits = total_lines.to_string().len();
        let gutter_width = if self.config.show_line_numbers {
            (digits + 3) as u16
        } else {
            0
        };

        let content_area = Rect::new(
            area.x + gutter_width,
            area.y,
            area.width.saturating_sub(gutter_width),
            area.height,
        );

        self.viewport.set_area(content_area);
        self.viewport.update(
            &self.buffer,
            content_area.height as usize,
            content_area.width as usize,
        );

        let (visible_start, visible_end) = self.viewport.visible_range(total_lines);

        if gutter_width > 0 {
            let gutter_lines: Vec<Line> = (visible_start..visible_end)
                .map(|i| {
                    Line::from(Span::styled(
                        overlay_line(i + 1, digits),
                        Style::default().fg(self.theme.gutter_fg),
                    ))
                })
                .collect();
            let gutter_area = Rect::new(area.x, area.y, gutter_width, area.height);
            frame.render_widget(Paragraph::new(gutter_lines).style(base), gutter_area);
        }

        let content_lines: Vec<Line> = (visible_start..visible_end)
            .map(|i| {
                let line = self.buffer.line(i).unwrap_or_default();
                match parse_anchor(line) {
                    Some((name, art_row)) => self.render_image_line(name, art_row),
                    None => self.render_text_line(i, line),
                }
            })
            .collect();

        frame.render_widget(Paragraph::new(content_lines).style(base), content_area);
    }

    fn cursor_position(&self) -> Option<(u16, u16)> {
        let area = self.viewport.area()?;
        let (row, _) = self.buffer.cursor();
        let offset = self.viewport.offset();

        if row < offset || row >= offset + self.viewport.height() {
            return None;
        }

        let x = area.x + self.viewport.cursor_screen_x(&self.buffer);
        let y = area.y + (row - offset) as u16;
        Some((x.min(area.x + area.width.saturating_sub(1)), y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HalfBlock;

    fn editor() -> EditorView {
        EditorView::new(EditorConfig::default(), Theme::default())
    }

    fn editor_with(text: &str) -> EditorView {
        let mut view = editor();
        view.set_content(text);
        view
    }

    fn art(cols: usize, rows: usize) -> ImageArt {
        let cell = HalfBlock {
            top: Some((10, 20, 30)),
            bottom: Some((40, 50, 60)),
        };
        ImageArt {
            source_width: cols as u32,
            source_height: (rows * 2) as u32,
            rows: vec![vec![cell; cols]; rows],
        }
    }

    #[test]
    fn test_overlay_line_format() {
        assert_eq!(overlay_line(1, 1), "1 >");
        assert_eq!(overlay_line(7, 3), "  7 >");
        assert_eq!(overlay_line(42, 2), "42 >");
    }

    #[test]
    fn test_cursor_movement() {
        let mut view = editor_with("hello\nworld");

        view.execute(Command::CursorRight);
        assert_eq!(view.cursor(), (0, 1));

        view.execute(Command::CursorDown);
        assert_eq!(view.cursor(), (1, 1));

        view.execute(Command::CursorLineEnd);
        assert_eq!(view.cursor(), (1, 5));

        view.execute(Command::CursorFileStart);
        assert_eq!(view.cursor(), (0, 0));
    }

    #[test]
    fn test_insert_marks_dirty() {
        let mut view = editor();
        assert!(!view.is_dirty());
        view.execute(Command::InsertChar('a'));
        assert_eq!(view.buffer().to_text(), "a");
        assert!(view.is_dirty());
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut view = editor_with("hello");
        view.execute(Command::SelectAll);
        view.execute(Command::InsertChar('x'));
        assert_eq!(view.buffer().to_text(), "x");
    }

    #[test]
    fn test_find_pattern_counts_matches() {
        let mut view = editor_with("cat\ndog\ncatalog");
        assert_eq!(view.set_find_pattern("cat"), 2);
        assert_eq!(view.match_count(), 2);

        view.clear_find();
        assert_eq!(view.match_count(), 0);
    }

    #[test]
    fn test_matches_refresh_on_edit() {
        let mut view = editor_with("aaa");
        assert_eq!(view.set_find_pattern("a"), 3);
        view.execute(Command::DeleteForward);
        assert_eq!(view.match_count(), 2);
    }

    #[test]
    fn test_replace_all_banana() {
        let mut view = editor_with("banana");
        let count = view.replace_all("a", "b");
        assert_eq!(count, 3);
        assert_eq!(view.buffer().to_text(), "bbnbnb");
        assert!(view.is_dirty());
    }

    #[test]
    fn test_insert_image_adds_anchor_block() {
        let mut view = editor_with("ab");
        view.buffer_mut().set_cursor(0, 1);
        let name = view.insert_image(art(4, 3));
        assert_eq!(name, "image_0");

        // "a", three anchor rows, then the remainder "b".
        assert_eq!(view.buffer().len_lines(), 5);
        assert_eq!(view.document_text(), "a\nb");
        assert!(view.images().get("image_0").is_some());
    }

    #[test]
    fn test_document_text_skips_anchors_on_save() {
        let mut view = editor_with("hello");
        view.execute(Command::CursorFileEnd);
        view.insert_image(art(2, 2));
        assert_eq!(view.document_text(), "hello\n");
    }

    #[test]
    fn test_find_ignores_anchor_lines() {
        let mut view = editor_with("image_0");
        view.execute(Command::CursorFileEnd);
        view.insert_image(art(2, 1));
        // The literal text matches once; the anchor line does not count.
        assert_eq!(view.set_find_pattern("image_0"), 1);
    }

    #[test]
    fn test_selected_document_text_filters_anchors() {
        let mut view = editor_with("top");
        view.execute(Command::CursorFileEnd);
        view.insert_image(art(2, 2));
        view.execute(Command::SelectAll);
        assert_eq!(view.selected_document_text().as_deref(), Some("top\n"));
    }

    #[test]
    fn test_overlay_matches_line_count_after_edits() {
        let mut view = editor_with("a\nb");
        view.execute(Command::CursorFileEnd);
        view.execute(Command::InsertNewline);
        view.execute(Command::InsertChar('c'));

        let total = view.buffer().len_lines();
        let digits = total.to_string().len();
        let overlay: Vec<String> = (1..=total).map(|n| overlay_line(n, digits)).collect();
        assert_eq!(overlay.len(), total);
        assert_eq!(overlay.last().unwrap(), "3 >");
    }
}
