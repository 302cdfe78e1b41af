//! Menu bar with drop-down menus (File, Edit, Media).

use super::theme::Theme;
use crate::core::Command;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

enum Item {
    Action {
        label: &'static str,
        hint: &'static str,
        command: Command,
    },
    Separator,
}

struct MenuDef {
    title: &'static str,
    items: &'static [Item],
}

static MENUS: &[MenuDef] = &[
    MenuDef {
        title: "File",
        items: &[
            Item::Action {
                label: "Open",
                hint: "Ctrl+O",
                command: Command::Open,
            },
            Item::Action {
                label: "Save",
                hint: "Ctrl+S",
                command: Command::Save,
            },
            Item::Action {
                label: "Save As",
                hint: "",
                command: Command::SaveAs,
            },
            Item::Separator,
            Item::Action {
                label: "Exit",
                hint: "Ctrl+Q",
                command: Command::Quit,
            },
        ],
    },
    MenuDef {
        title: "Edit",
        items: &[
            Item::Action {
                label: "Find",
                hint: "Ctrl+F",
                command: Command::Find,
            },
            Item::Action {
                label: "Replace All",
                hint: "Ctrl+H",
                command: Command::ReplaceAll,
            },
            Item::Separator,
            Item::Action {
                label: "Select All",
                hint: "Ctrl+A",
                command: Command::SelectAll,
            },
            Item::Action {
                label: "Copy",
                hint: "Ctrl+C",
                command: Command::Copy,
            },
        ],
    },
    MenuDef {
        title: "Media",
        items: &[Item::Action {
            label: "Insert Image",
            hint: "Ctrl+G",
            command: Command::InsertImage,
        }],
    },
];

const TITLE_GAP: u16 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Ignored,
    Consumed,
    Command(Command),
}

pub struct MenuBar {
    theme: Theme,
    open: Option<usize>,
    selected: usize,
    bar_area: Option<Rect>,
    dropdown_area: Option<Rect>,
}

impl MenuBar {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            open: None,
            selected: 0,
            bar_area: None,
            dropdown_area: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn activate(&mut self) {
        self.open = Some(0);
        self.selected = self.first_action(0);
    }

    pub fn close(&mut self) {
        self.open = None;
        self.dropdown_area = None;
    }

    fn open_menu(&mut self, index: usize) {
        self.open = Some(index.min(MENUS.len() - 1));
        self.selected = self.first_action(index);
    }

    fn first_action(&self, menu: usize) -> usize {
        MENUS[menu]
            .items
            .iter()
            .position(|i| matches!(i, Item::Action { .. }))
            .unwrap_or(0)
    }

    fn step_selection(&mut self, menu: usize, down: bool) {
        let items = MENUS[menu].items;
        let len = items.len();
        let mut idx = self.selected;
        for _ in 0..len {
            idx = if down {
                (idx + 1) % len
            } else {
                (idx + len - 1) % len
            };
            if matches!(items[idx], Item::Action { .. }) {
                self.selected = idx;
                return;
            }
        }
    }

    pub fn handle_key(&mut self, event: &KeyEvent) -> MenuAction {
        let Some(menu) = self.open else {
            return MenuAction::Ignored;
        };

        match event.code {
            KeyCode::Esc | KeyCode::F(10) => {
                self.close();
                MenuAction::Consumed
            }
            KeyCode::Left => {
                self.open_menu((menu + MENUS.len() - 1) % MENUS.len());
                MenuAction::Consumed
            }
            KeyCode::Right => {
                self.open_menu((menu + 1) % MENUS.len());
                MenuAction::Consumed
            }
            KeyCode::Up => {
                self.step_selection(menu, false);
                MenuAction::Consumed
            }
            KeyCode::Down => {
                self.step_selection(menu, true);
                MenuAction::Consumed
            }
            KeyCode::Enter => {
                if let Item::Action { command, .. } = &MENUS[menu].items[self.selected] {
                    let command = *command;
                    self.close();
                    MenuAction::Command(command)
                } else {
                    MenuAction::Consumed
                }
            }
            _ => MenuAction::Consumed,
        }
    }

    pub fn handle_mouse(&mut self, event: &MouseEvent) -> MenuAction {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return if self.is_open() {
                MenuAction::Consumed
            } else {
                MenuAction::Ignored
            };
        }

        // Title row click toggles the menu under the pointer.
        if let Some(bar) = self.bar_area {
            if event.row == bar.y {
                if let Some(index) = self.title_at(event.column.saturating_sub(bar.x)) {
                    if self.open == Some(index) {
                        self.close();
                    } else {
                        self.open_menu(index);
                    }
                    return MenuAction::Consumed;
                }
            }
        }

        let Some(menu) = self.open else {
            return MenuAction::Ignored;
        };

        if let Some(drop) = self.dropdown_area {
            let inside = event.column >= drop.x
                && event.column < drop.x + drop.width
                && event.row >= drop.y
                && event.row < drop.y + drop.height;
            if inside {
                let item_idx = (event.row - drop.y) as usize;
                // Rows inside the border map 1:1 onto items.
                if item_idx >= 1 && item_idx <= MENUS[menu].items.len() {
                    let idx = item_idx - 1;
                    if let Item::Action { command, .. } = &MENUS[menu].items[idx] {
                        let command = *command;
                        self.close();
                        return MenuAction::Command(command);
                    }
                }
                return MenuAction::Consumed;
            }
        }

        // Click anywhere else dismisses the open menu.
        self.close();
        MenuAction::Consumed
    }

    /// Menu index whose title covers bar-relative column `x`.
    fn title_at(&self, x: u16) -> Option<usize> {
        let mut start = TITLE_GAP;
        for (i, menu) in MENUS.iter().enumerate() {
            let w = menu.title.width() as u16;
            if x >= start && x < start + w {
                return Some(i);
            }
            start += w + TITLE_GAP;
        }
        None
    }

    pub fn render(&mut self, frame: &mut Frame, bar_area: Rect, screen: Rect) {
        self.bar_area = Some(bar_area);

        let bar_style = Style::default().bg(self.theme.menu_bg).fg(self.theme.menu_fg);
        let open_style = Style::default()
            .bg(self.theme.menu_selected_bg)
            .fg(self.theme.menu_selected_fg);

        let mut spans: Vec<Span> = vec![Span::styled(" ".repeat(TITLE_GAP as usize), bar_style)];
        for (i, menu) in MENUS.iter().enumerate() {
            let style = if self.open == Some(i) {
                open_style
            } else {
                bar_style
            };
            spans.push(Span::styled(menu.title, style));
            spans.push(Span::styled(" ".repeat(TITLE_GAP as usize), bar_style));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(bar_style),
            bar_area,
        );

        let Some(menu) = self.open else {
            self.dropdown_area = None;
            return;
        };

        let items = MENUS[menu].items;
        let label_w = items
            .iter()
            .map(|i| match i {
                Item::Action { label, hint, .. } => label.width() + 2 + hint.width(),
                Item::Separator => 0,
            })
            .max()
            .unwrap_or(0) as u16;

        let width = (label_w + 4).min(screen.width);
        let height = (items.len() as u16 + 2).min(screen.height.saturating_sub(bar_area.y + 1));

        let mut x = bar_area.x + TITLE_GAP;
        for m in MENUS.iter().take(menu) {
            x += m.title.width() as u16 + TITLE_GAP;
        }
        let x = x.min(screen.width.saturating_sub(width));
        let drop = Rect::new(x, bar_area.y + 1, width, height);
        self.dropdown_area = Some(drop);

        let inner_w = width.saturating_sub(2) as usize;
        let lines: Vec<Line> = items
            .iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Item::Separator => Line::from(Span::styled("\u{2500}".repeat(inner_w), bar_style)),
                Item::Action { label, hint, .. } => {
                    let style = if idx == self.selected {
                        open_style
                    } else {
                        bar_style
                    };
                    let pad = inner_w
                        .saturating_sub(label.width())
                        .saturating_sub(hint.width());
                    let text = format!("{label}{}{hint}", " ".repeat(pad));
                    Line::from(Span::styled(text, style))
                }
            })
            .collect();

        frame.render_widget(Clear, drop);
        frame.render_widget(
            Paragraph::new(lines)
                .style(bar_style)
                .block(Block::default().borders(Borders::ALL).style(bar_style)),
            drop,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_activate_and_close() {
        let mut bar = MenuBar::new(Theme::default());
        assert!(!bar.is_open());

        bar.activate();
        assert!(bar.is_open());

        assert_eq!(bar.handle_key(&key(KeyCode::Esc)), MenuAction::Consumed);
        assert!(!bar.is_open());
    }

    #[test]
    fn test_enter_dispatches_first_item() {
        let mut bar = MenuBar::new(Theme::default());
        bar.activate();
        // File menu, first item is Open.
        assert_eq!(
            bar.handle_key(&key(KeyCode::Enter)),
            MenuAction::Command(Command::Open)
        );
        assert!(!bar.is_open());
    }

    #[test]
    fn test_navigation_skips_separators() {
        let mut bar = MenuBar::new(Theme::default());
        bar.activate();
        // Open -> Save -> Save As -> (skip separator) -> Exit
        bar.handle_key(&key(KeyCode::Down));
        bar.handle_key(&key(KeyCode::Down));
        bar.handle_key(&key(KeyCode::Down));
        assert_eq!(
            bar.handle_key(&key(KeyCode::Enter)),
            MenuAction::Command(Command::Quit)
        );
    }

    #[test]
    fn test_right_switches_to_edit_menu() {
        let mut bar = MenuBar::new(Theme::default());
        bar.activate();
        bar.handle_key(&key(KeyCode::Right));
        assert_eq!(
            bar.handle_key(&key(KeyCode::Enter)),
            MenuAction::Command(Command::Find)
        );
    }

    #[test]
    fn test_keys_ignored_when_closed() {
        let mut bar = MenuBar::new(Theme::default());
        assert_eq!(bar.handle_key(&key(KeyCode::Enter)), MenuAction::Ignored);
    }
}
