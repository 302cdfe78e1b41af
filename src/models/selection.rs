//! Selection model with char, word and line granularity.

use unicode_segmentation::UnicodeSegmentation;
use unicode_xid::UnicodeXID;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Char,
    Word,
    Line,
}

#[derive(Debug, Clone)]
pub struct Selection {
    anchor: (usize, usize),
    cursor: (usize, usize),
    granularity: Granularity,
}

impl Selection {
    pub fn new(pos: (usize, usize), granularity: Granularity) -> Self {
        Self {
            anchor: pos,
            cursor: pos,
            granularity,
        }
    }

    /// Char-granularity selection spanning two positions.
    pub fn span(anchor: (usize, usize), cursor: (usize, usize)) -> Self {
        Self {
            anchor,
            cursor,
            granularity: Granularity::Char,
        }
    }

    /// Selection seeded at `pos`, expanded to its initial word/line bounds.
    pub fn from_pos(pos: (usize, usize), granularity: Granularity, lines: &[String]) -> Self {
        let mut selection = Self::new(pos, granularity);
        selection.normalize_initial_bounds(lines);
        selection
    }

    pub fn anchor(&self) -> (usize, usize) {
        self.anchor
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn update_cursor(&mut self, pos: (usize, usize), lines: &[String]) {
        self.cursor = match self.granularity {
            Granularity::Char => pos,
            Granularity::Word => Self::snap_to_word(pos, lines),
            Granularity::Line => Self::snap_to_line(pos, lines),
        };
    }

    fn normalize_initial_bounds(&mut self, lines: &[String]) {
        let row = self.anchor.0;
        match self.granularity {
            Granularity::Char => {}
            Granularity::Word => {
                if let Some(line) = lines.get(row) {
                    let (start, end) = Self::word_bounds_at(line, self.anchor.1);
                    self.anchor = (row, start);
                    self.cursor = (row, end);
                }
            }
            Granularity::Line => {
                self.anchor = (row, 0);
                self.cursor = (row, Self::grapheme_len(lines, row));
            }
        }
    }

    fn snap_to_word(pos: (usize, usize), lines: &[String]) -> (usize, usize) {
        let Some(line) = lines.get(pos.0) else {
            return pos;
        };
        let (start, end) = Self::word_bounds_at(line, pos.1);

        if start == end {
            return (pos.0, end);
        }

        // Snap to whichever word edge is nearer to the pointer.
        let left_dist = pos.1.saturating_sub(start);
        let right_dist = end.saturating_sub(pos.1);
        if left_dist < right_dist {
            (pos.0, start)
        } else {
            (pos.0, end)
        }
    }

    fn snap_to_line(pos: (usize, usize), lines: &[String]) -> (usize, usize) {
        (pos.0, Self::grapheme_len(lines, pos.0))
    }

    /// Bounds of the run of same-class graphemes around `col`.
    ///
    /// Classes are identifier characters, whitespace, and everything else;
    /// a column past the end of the line yields an empty range at the end.
    pub fn word_bounds_at(line: &str, col: usize) -> (usize, usize) {
        #[derive(PartialEq, Eq, Clone, Copy)]
        enum CharClass {
            Identifier,
            Whitespace,
            Other,
        }

        let classify = |g: &str| -> CharClass {
            match g.chars().next() {
                Some(c) if c.is_whitespace() => CharClass::Whitespace,
                Some(c) if c.is_xid_start() || c.is_xid_continue() || c == '_' => {
                    CharClass::Identifier
                }
                _ => CharClass::Other,
            }
        };

        let classes: Vec<CharClass> = line.graphemes(true).map(classify).collect();
        if col >= classes.len() {
            return (classes.len(), classes.len());
        }

        let class = classes[col];
        let mut start = col;
        while start > 0 && classes[start - 1] == class {
            start -= 1;
        }
        let mut end = col + 1;
        while end < classes.len() && classes[end] == class {
            end += 1;
        }
        (start, end)
    }

    fn grapheme_len(lines: &[String], row: usize) -> usize {
        lines
            .get(row)
            .map(|l| l.graphemes(true).count())
            .unwrap_or(0)
    }

    pub fn range(&self) -> ((usize, usize), (usize, usize)) {
        if self.anchor <= self.cursor {
            (self.anchor, self.cursor)
        } else {
            (self.cursor, self.anchor)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.cursor
    }

    pub fn contains(&self, pos: (usize, usize)) -> bool {
        let (start, end) = self.range();
        start <= pos && pos < end
    }
}
