//! Bottom-line prompt for path and search input.
//!
//! While a prompt is open it consumes all keys; Enter submits, Esc cancels
//! (a cancelled prompt is always a no-op for the document).

use super::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    Open,
    SaveAs,
    Find,
    ReplaceFind,
    /// Second stage of replace-all; carries the pattern from the first.
    ReplaceWith { pattern: String },
    InsertImage,
}

impl PromptKind {
    pub fn label(&self) -> &'static str {
        match self {
            PromptKind::Open => "Open: ",
            PromptKind::SaveAs => "Save as: ",
            PromptKind::Find => "Find: ",
            PromptKind::ReplaceFind => "Find text: ",
            PromptKind::ReplaceWith { .. } => "Replace with: ",
            PromptKind::InsertImage => "Image path: ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Pending,
    Cancelled,
    Submitted { kind: PromptKind, input: String },
}

pub struct PromptBar {
    kind: PromptKind,
    input: String,
    cursor: usize,
    area: Option<Rect>,
}

impl PromptBar {
    pub fn new(kind: PromptKind, initial: &str) -> Self {
        let cursor = initial.graphemes(true).count();
        Self {
            kind,
            input: initial.to_string(),
            cursor,
            area: None,
        }
    }

    pub fn kind(&self) -> &PromptKind {
        &self.kind
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn handle_key(&mut self, event: &KeyEvent) -> PromptOutcome {
        match (event.code, event.modifiers) {
            (KeyCode::Esc, _) => PromptOutcome::Cancelled,
            (KeyCode::Enter, _) => PromptOutcome::Submitted {
                kind: self.kind.clone(),
                input: self.input.clone(),
            },
            (KeyCode::Backspace, _) => {
                if self.cursor > 0 {
                    let a = self.byte_index(self.cursor - 1);
                    let b = self.byte_index(self.cursor);
                    self.input.replace_range(a..b, "");
                    self.cursor -= 1;
                }
                PromptOutcome::Pending
            }
            (KeyCode::Delete, _) => {
                if self.cursor < self.len() {
                    let a = self.byte_index(self.cursor);
                    let b = self.byte_index(self.cursor + 1);
                    self.input.replace_range(a..b, "");
                }
                PromptOutcome::Pending
            }
            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                PromptOutcome::Pending
            }
            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(self.len());
                PromptOutcome::Pending
            }
            (KeyCode::Home, _) => {
                self.cursor = 0;
                PromptOutcome::Pending
            }
            (KeyCode::End, _) => {
                self.cursor = self.len();
                PromptOutcome::Pending
            }
            (KeyCode::Char(c), mods)
                if mods.is_empty() || mods == KeyModifiers::SHIFT =>
            {
                let at = self.byte_index(self.cursor);
                self.input.insert(at, c);
                self.cursor += 1;
                PromptOutcome::Pending
            }
            _ => PromptOutcome::Pending,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.area = Some(area);
        let style = Style::default().bg(theme.status_bg).fg(theme.status_fg);
        let line = Line::from(vec![
            Span::styled(self.kind.label(), style),
            Span::styled(self.input.clone(), style),
        ]);
        frame.render_widget(Paragraph::new(line).style(style), area);
    }

    pub fn cursor_position(&self) -> Option<(u16, u16)> {
        let area = self.area?;
        let label_w = self.kind.label().width() as u16;
        let before: String = self.input.graphemes(true).take(self.cursor).collect();
        let x = area.x + label_w + before.width() as u16;
        Some((x.min(area.x + area.width.saturating_sub(1)), area.y))
    }

    fn len(&self) -> usize {
        self.input.graphemes(true).count()
    }

    fn byte_index(&self, col: usize) -> usize {
        self.input
            .grapheme_indices(true)
            .nth(col)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_typing_and_submit() {
        let mut prompt = PromptBar::new(PromptKind::Find, "");
        prompt.handle_key(&key(KeyCode::Char('h')));
        prompt.handle_key(&key(KeyCode::Char('i')));

        let outcome = prompt.handle_key(&key(KeyCode::Enter));
        assert_eq!(
            outcome,
            PromptOutcome::Submitted {
                kind: PromptKind::Find,
                input: "hi".to_string(),
            }
        );
    }

    #[test]
    fn test_cancel() {
        let mut prompt = PromptBar::new(PromptKind::Open, "");
        prompt.handle_key(&key(KeyCode::Char('x')));
        assert_eq!(prompt.handle_key(&key(KeyCode::Esc)), PromptOutcome::Cancelled);
    }

    #[test]
    fn test_prefill_and_edit() {
        let mut prompt = PromptBar::new(PromptKind::Find, "cat");
        prompt.handle_key(&key(KeyCode::Backspace));
        assert_eq!(prompt.input(), "ca");

        prompt.handle_key(&key(KeyCode::Home));
        prompt.handle_key(&key(KeyCode::Delete));
        assert_eq!(prompt.input(), "a");
    }

    #[test]
    fn test_cursor_movement_bounds() {
        let mut prompt = PromptBar::new(PromptKind::Find, "ab");
        prompt.handle_key(&key(KeyCode::Left));
        prompt.handle_key(&key(KeyCode::Left));
        prompt.handle_key(&key(KeyCode::Left));
        prompt.handle_key(&key(KeyCode::Char('x')));
        assert_eq!(prompt.input(), "xab");

        prompt.handle_key(&key(KeyCode::End));
        prompt.handle_key(&key(KeyCode::Char('y')));
        assert_eq!(prompt.input(), "xaby");
    }

    #[test]
    fn test_replace_with_carries_pattern() {
        let kind = PromptKind::ReplaceWith {
            pattern: "old".to_string(),
        };
        let mut prompt = PromptBar::new(kind, "");
        prompt.handle_key(&key(KeyCode::Char('n')));
        let outcome = prompt.handle_key(&key(KeyCode::Enter));
        match outcome {
            PromptOutcome::Submitted {
                kind: PromptKind::ReplaceWith { pattern },
                input,
            } => {
                assert_eq!(pattern, "old");
                assert_eq!(input, "n");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
