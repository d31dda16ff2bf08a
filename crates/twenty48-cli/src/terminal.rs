//! Terminal display and keyboard input for manual play.
//!
//! These are the concrete implementations of the abstract
//! display/input capabilities the core exposes; nothing outside this
//! module touches the terminal.

use std::io::{self, Write as _};

use anyhow::Context as _;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{self, Clear, ClearType},
};
use twenty48_ai::{ActionSource, GameObserver};
use twenty48_engine::{Action, Game};

/// Keeps the terminal in raw mode for its lifetime.
pub(crate) struct RawModeGuard;

impl RawModeGuard {
    pub(crate) fn enable() -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw terminal mode")?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Renders every game state as a plain text grid.
pub(crate) struct TerminalDisplay {
    out: io::Stdout,
}

impl TerminalDisplay {
    pub(crate) fn new() -> Self {
        Self { out: io::stdout() }
    }

    fn render(&mut self, game: &Game) -> io::Result<()> {
        execute!(self.out, cursor::MoveTo(0, 0), Clear(ClearType::All))?;
        write!(self.out, "Score: {}\r\n\r\n", game.score())?;
        // Raw mode needs explicit carriage returns.
        for line in game.board().to_string().lines() {
            write!(self.out, "{line}\r\n")?;
        }
        write!(self.out, "\r\narrows: move   esc/q: quit\r\n")?;
        self.out.flush()
    }
}

impl GameObserver for TerminalDisplay {
    fn frame(&mut self, game: &Game) {
        // A failed redraw is not worth aborting the game over.
        let _ = self.render(game);
    }

    fn finished(&mut self, game: &Game) {
        let _ = self.render(game);
        let _ = write!(
            self.out,
            "\r\nGame over. Final score {} with highest tile {}.\r\n",
            game.score(),
            game.highest_tile()
        );
        let _ = self.out.flush();
    }
}

/// Blocks on the keyboard until an arrow key or a quit key arrives.
pub(crate) struct KeyboardSource;

impl ActionSource for KeyboardSource {
    fn next_action(&mut self) -> Action {
        loop {
            let Ok(next) = event::read() else {
                return Action::Quit;
            };
            if let Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) = next
            {
                match code {
                    KeyCode::Left => return Action::Left,
                    KeyCode::Right => return Action::Right,
                    KeyCode::Up => return Action::Up,
                    KeyCode::Down => return Action::Down,
                    KeyCode::Esc | KeyCode::Char('q') => return Action::Quit,
                    _ => {}
                }
            }
        }
    }
}
