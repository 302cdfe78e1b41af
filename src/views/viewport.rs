//! Editor viewport: scroll state, layout metrics, coordinate mapping.

use crate::models::TextBuffer;
use ratatui::layout::Rect;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

pub struct Viewport {
    offset: usize,
    height: usize,
    horiz_offset: u32,
    width: usize,
    tab_size: u8,
    area: Option<Rect>,
    /// Wheel scrolling detaches the view from the cursor until the next
    /// keyboard interaction.
    follow_cursor: bool,
}

impl Viewport {
    pub fn new(tab_size: u8) -> Self {
        Self {
            offset: 0,
            height: 20,
            horiz_offset: 0,
            width: 80,
            tab_size,
            area: None,
            follow_cursor: true,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn horiz_offset(&self) -> u32 {
        self.horiz_offset
    }

    pub fn area(&self) -> Option<Rect> {
        self.area
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = Some(area);
    }

    /// Records the pane size and, in follow mode, scrolls the cursor into
    /// view.
    pub fn update(&mut self, buffer: &TextBuffer, height: usize, width: usize) {
        self.height = height;
        self.width = width;

        if !self.follow_cursor {
            return;
        }

        let (row, _) = buffer.cursor();
        if row < self.offset {
            self.offset = row;
        } else if height > 0 && row >= self.offset + height {
            self.offset = row.saturating_sub(height - 1);
        }

        let cursor_x = self.cursor_display_col(buffer);
        if cursor_x < self.horiz_offset {
            self.horiz_offset = cursor_x;
        } else if width > 0 && cursor_x >= self.horiz_offset + width as u32 {
            self.horiz_offset = cursor_x.saturating_sub(width as u32 - 1);
        }
    }

    pub fn scroll_vertical(&mut self, delta: isize, total_lines: usize) {
        self.follow_cursor = false;

        if delta > 0 {
            let max_offset = total_lines.saturating_sub(self.height);
            self.offset = (self.offset + delta as usize).min(max_offset);
        } else {
            self.offset = self.offset.saturating_sub((-delta) as usize);
        }
    }

    pub fn enable_follow_cursor(&mut self) {
        self.follow_cursor = true;
    }

    pub fn visible_range(&self, total_lines: usize) -> (usize, usize) {
        let start = self.offset.min(total_lines.saturating_sub(1));
        let end = (start + self.height).min(total_lines);
        (start, end)
    }

    /// Cursor column in display cells, before horizontal scrolling.
    fn cursor_display_col(&self, buffer: &TextBuffer) -> u32 {
        let (row, col) = buffer.cursor();
        let Some(line) = buffer.line(row) else {
            return 0;
        };

        let mut x = 0u32;
        for (i, g) in line.graphemes(true).enumerate() {
            if i >= col {
                break;
            }
            x += self.grapheme_display_width(g, x);
        }
        x
    }

    /// Cursor x within the pane, after horizontal scrolling.
    pub fn cursor_screen_x(&self, buffer: &TextBuffer) -> u16 {
        self.cursor_display_col(buffer)
            .saturating_sub(self.horiz_offset) as u16
    }

    /// Maps a pane-relative cell position to a buffer (row, grapheme col).
    pub fn screen_to_pos(&self, x: u16, y: u16, buffer: &TextBuffer) -> Option<(usize, usize)> {
        let area = self.area?;
        if x >= area.width || y >= area.height {
            return None;
        }

        let row = (self.offset + y as usize).min(buffer.len_lines().saturating_sub(1));
        let line = buffer.line(row)?;

        let target = self.horiz_offset + x as u32;
        let mut acc = 0u32;
        let mut col = 0;
        for (i, g) in line.graphemes(true).enumerate() {
            let w = self.grapheme_display_width(g, acc);
            if acc + w / 2 >= target {
                col = i;
                return Some((row, col));
            }
            acc += w;
            col = i + 1;
        }

        Some((row, col))
    }

    /// Width of one grapheme at a display column; tabs run to the next stop.
    pub fn grapheme_display_width(&self, g: &str, display_col: u32) -> u32 {
        if g == "\t" {
            let tab = self.tab_size.max(1) as u32;
            tab - (display_col % tab)
        } else {
            g.width() as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str) -> TextBuffer {
        TextBuffer::from_text(text)
    }

    #[test]
    fn test_visible_range() {
        let mut vp = Viewport::new(4);
        vp.update(&buffer("a\nb\nc"), 2, 80);
        assert_eq!(vp.visible_range(3), (0, 2));
    }

    #[test]
    fn test_follow_cursor_scrolls_down() {
        let mut vp = Viewport::new(4);
        let mut buf = buffer("0\n1\n2\n3\n4\n5\n6\n7");
        buf.set_cursor(6, 0);
        vp.update(&buf, 3, 80);
        assert_eq!(vp.visible_range(8), (4, 7));
    }

    #[test]
    fn test_wheel_scroll_detaches_then_key_reattaches() {
        let mut vp = Viewport::new(4);
        let buf = buffer("0\n1\n2\n3\n4\n5\n6\n7");

        vp.update(&buf, 3, 80);
        vp.scroll_vertical(3, 8);
        assert_eq!(vp.offset(), 3);

        // Still detached: updating does not snap back to the cursor.
        vp.update(&buf, 3, 80);
        assert_eq!(vp.offset(), 3);

        vp.enable_follow_cursor();
        vp.update(&buf, 3, 80);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_scroll_clamps_at_bottom() {
        let mut vp = Viewport::new(4);
        vp.update(&buffer("a\nb\nc"), 2, 80);
        vp.scroll_vertical(100, 3);
        assert_eq!(vp.offset(), 1);
        vp.scroll_vertical(-100, 3);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_screen_to_pos() {
        let mut vp = Viewport::new(4);
        let buf = buffer("hello\nworld");
        vp.set_area(Rect::new(0, 0, 80, 10));
        vp.update(&buf, 10, 80);

        assert_eq!(vp.screen_to_pos(0, 0, &buf), Some((0, 0)));
        assert_eq!(vp.screen_to_pos(3, 1, &buf), Some((1, 3)));
        // Past the end of a line clamps to the line end.
        assert_eq!(vp.screen_to_pos(40, 0, &buf), Some((0, 5)));
    }

    #[test]
    fn test_tab_display_width() {
        let vp = Viewport::new(4);
        assert_eq!(vp.grapheme_display_width("\t", 0), 4);
        assert_eq!(vp.grapheme_display_width("\t", 2), 2);
        assert_eq!(vp.grapheme_display_width("a", 0), 1);
    }
}
