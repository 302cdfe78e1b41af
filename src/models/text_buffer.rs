//! Text buffer model.
//!
//! The buffer is the single source of truth for document content: a vector
//! of lines plus a grapheme-indexed cursor and an optional selection. Views
//! render from it every frame.

use super::selection::{Granularity, Selection};
use std::io::{self, Write};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone)]
pub struct TextBuffer {
    lines: Vec<String>,
    cursor: (usize, usize),
    selection: Option<Selection>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: (0, 0),
            selection: None,
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(|l| l.to_string()).collect(),
            cursor: (0, 0),
            selection: None,
        }
    }

    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Streams the buffer to a writer without building one big string.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                writer.write_all(b"\n")?;
            }
            writer.write_all(line.as_bytes())?;
        }
        Ok(())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|l| l.as_str())
    }

    pub fn len_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn set_cursor(&mut self, row: usize, col: usize) {
        self.cursor = (row, col);
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn has_selection(&self) -> bool {
        self.selection
            .as_ref()
            .map(|s| !s.is_empty())
            .unwrap_or(false)
    }

    pub fn update_selection_cursor(&mut self, pos: (usize, usize)) {
        let Self {
            lines, selection, ..
        } = self;
        if let Some(sel) = selection.as_mut() {
            sel.update_cursor(pos, lines);
        }
    }

    /// Selects the whole buffer and moves the cursor to the end.
    pub fn select_all(&mut self) {
        let last = self.lines.len() - 1;
        let end = (last, self.line_grapheme_len(last));
        self.selection = Some(Selection::span((0, 0), end));
        self.cursor = end;
    }

    pub fn selected_text(&self) -> Option<String> {
        let sel = self.selection.as_ref()?;
        if sel.is_empty() {
            return None;
        }

        let ((sr, sc), (er, ec)) = sel.range();
        let er = er.min(self.lines.len() - 1);

        if sr == er {
            let line = &self.lines[sr];
            let a = Self::byte_index(line, sc);
            let b = Self::byte_index(line, ec);
            return Some(line[a.min(b)..a.max(b)].to_string());
        }

        let mut out = String::new();
        let first = &self.lines[sr];
        out.push_str(&first[Self::byte_index(first, sc)..]);
        for row in sr + 1..er {
            out.push('\n');
            out.push_str(&self.lines[row]);
        }
        let last = &self.lines[er];
        out.push('\n');
        out.push_str(&last[..Self::byte_index(last, ec)]);
        Some(out)
    }

    pub fn line_grapheme_len(&self, row: usize) -> usize {
        self.lines
            .get(row)
            .map(|l| l.graphemes(true).count())
            .unwrap_or(0)
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.insert_newline();
            return;
        }
        let (row, col) = self.cursor;
        let idx = Self::byte_index(&self.lines[row], col);
        self.lines[row].insert(idx, c);
        self.cursor = (row, col + 1);
    }

    pub fn insert_newline(&mut self) {
        let (row, col) = self.cursor;
        let idx = Self::byte_index(&self.lines[row], col);
        let tail = self.lines[row].split_off(idx);
        self.lines.insert(row + 1, tail);
        self.cursor = (row + 1, 0);
    }

    /// Deletes the grapheme before the cursor, joining lines at column zero.
    /// Returns false at the very start of the buffer.
    pub fn delete_backward(&mut self) -> bool {
        let (row, col) = self.cursor;
        if col > 0 {
            let line = &mut self.lines[row];
            let a = Self::byte_index(line, col - 1);
            let b = Self::byte_index(line, col);
            line.replace_range(a..b, "");
            self.cursor = (row, col - 1);
            true
        } else if row > 0 {
            let current = self.lines.remove(row);
            let prev_len = self.line_grapheme_len(row - 1);
            self.lines[row - 1].push_str(&current);
            self.cursor = (row - 1, prev_len);
            true
        } else {
            false
        }
    }

    /// Deletes the grapheme after the cursor, joining lines at line end.
    /// Returns false at the very end of the buffer.
    pub fn delete_forward(&mut self) -> bool {
        let (row, col) = self.cursor;
        let line_len = self.line_grapheme_len(row);
        if col < line_len {
            let line = &mut self.lines[row];
            let a = Self::byte_index(line, col);
            let b = Self::byte_index(line, col + 1);
            line.replace_range(a..b, "");
            true
        } else if row + 1 < self.lines.len() {
            let next = self.lines.remove(row + 1);
            self.lines[row].push_str(&next);
            true
        } else {
            false
        }
    }

    /// Removes the selected range. Returns false if nothing was selected.
    pub fn delete_selection(&mut self) -> bool {
        let Some(sel) = self.selection.as_ref() else {
            return false;
        };
        if sel.is_empty() {
            self.selection = None;
            return false;
        }

        let ((sr, sc), (er, ec)) = sel.range();
        let er = er.min(self.lines.len() - 1);

        if sr == er {
            let line = &mut self.lines[sr];
            let a = Self::byte_index(line, sc);
            let b = Self::byte_index(line, ec);
            line.replace_range(a.min(b)..a.max(b), "");
        } else {
            let tail_idx = Self::byte_index(&self.lines[er], ec);
            let tail = self.lines[er][tail_idx..].to_string();
            let a = Self::byte_index(&self.lines[sr], sc);
            self.lines[sr].truncate(a);
            self.lines[sr].push_str(&tail);
            self.lines.drain(sr + 1..=er);
        }

        self.cursor = (sr, sc);
        self.selection = None;
        true
    }

    /// Splits the cursor line and splices `block` in between; the cursor
    /// lands at the start of the split-off remainder.
    pub fn insert_lines_at_cursor(&mut self, block: &[String]) {
        if block.is_empty() {
            return;
        }
        let (row, col) = self.cursor;
        let idx = Self::byte_index(&self.lines[row], col);
        let tail = self.lines[row].split_off(idx);

        let mut at = row + 1;
        for line in block {
            self.lines.insert(at, line.clone());
            at += 1;
        }
        self.lines.insert(at, tail);
        self.cursor = (at, 0);
        self.selection = None;
    }

    /// Word/line-granularity selection helpers need raw line access.
    pub fn selection_from_pos(&self, pos: (usize, usize), granularity: Granularity) -> Selection {
        Selection::from_pos(pos, granularity, &self.lines)
    }

    fn byte_index(line: &str, col: usize) -> usize {
        line.grapheme_indices(true)
            .nth(col)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}
