use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::{env, io, path::Path};

use tpad::app::TerminalPad;
use tpad::logging;

/// Restores the terminal on drop, so a panic never leaves raw mode behind.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
    }
}

fn main() -> io::Result<()> {
    let _logging = logging::init();

    let mut app = match env::args().nth(1) {
        Some(path) => TerminalPad::with_file(Path::new(&path)),
        None => TerminalPad::new(),
    };

    let _guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    run(&mut terminal, &mut app)
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut TerminalPad) -> io::Result<()> {
    while !app.should_quit() {
        terminal.draw(|frame| app.render(frame))?;
        let event = event::read()?;
        app.handle_event(event.into());
    }
    Ok(())
}
