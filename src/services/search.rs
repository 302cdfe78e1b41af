//! Literal substring search and whole-text replace.

use memchr::memmem::Finder;

/// One occurrence, as byte offsets into a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

pub struct SearchService;

impl SearchService {
    /// All non-overlapping, case-sensitive occurrences of `pattern`,
    /// scanned line by line; matches never span newlines.
    pub fn find_all(lines: &[String], pattern: &str) -> Vec<Match> {
        if pattern.is_empty() {
            return Vec::new();
        }

        let finder = Finder::new(pattern);
        let mut matches = Vec::new();
        for (row, line) in lines.iter().enumerate() {
            for start in finder.find_iter(line.as_bytes()) {
                matches.push(Match {
                    line: row,
                    start,
                    end: start + pattern.len(),
                });
            }
        }
        matches
    }

    /// Non-overlapping occurrence count over raw text (newlines included).
    pub fn count(text: &str, pattern: &str) -> usize {
        if pattern.is_empty() {
            return 0;
        }
        memchr::memmem::find_iter(text.as_bytes(), pattern.as_bytes()).count()
    }

    /// `str::replace` semantics over the whole document text.
    pub fn replace_all(text: &str, pattern: &str, replacement: &str) -> String {
        if pattern.is_empty() {
            return text.to_string();
        }
        text.replace(pattern, replacement)
    }
}
