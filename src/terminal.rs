//! Terminal lifecycle and the shared redraw discipline.
//!
//! Two resources live here:
//! - [`RawSession`]: exclusive raw (non-canonical, non-echoing) input mode,
//!   released exactly once on every exit path
//! - [`Surface`]: the line-counted frame every prompt draws through
//!
//! The surface never asks the terminal for its width. A logical line longer
//! than the terminal wraps, and the recorded line count no longer matches
//! what is on screen.

use std::io::{self, IsTerminal, Write};

use crossterm::QueueableCommand;
use crossterm::cursor::{Hide, MoveToColumn, MoveUp, Show};
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode};
use tracing::debug;

use crate::error::Result;

/// True when stdout is attached to a terminal.
pub fn is_terminal() -> bool {
    io::stdout().is_terminal()
}

// ============================================================================
// RAW MODE
// ============================================================================

/// Switches the input stream between canonical and raw mode.
pub trait ModeSwitch {
    fn enter(&mut self) -> io::Result<()>;
    fn leave(&mut self) -> io::Result<()>;
}

/// The process's controlling terminal, switched through crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct Crossterm;

impl ModeSwitch for Crossterm {
    fn enter(&mut self) -> io::Result<()> {
        if !io::stdin().is_terminal() {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "stdin is not an interactive terminal",
            ));
        }
        enable_raw_mode()
    }

    fn leave(&mut self) -> io::Result<()> {
        disable_raw_mode()
    }
}

/// Raw mode lifetime guard.
///
/// [`RawSession::release`] restores the previous mode and reports failure.
/// If the session is dropped without being released (early return, panic)
/// the mode is restored on drop and any error is discarded.
pub struct RawSession<M: ModeSwitch> {
    mode: M,
    active: bool,
}

impl<M: ModeSwitch> RawSession<M> {
    /// Enter raw mode. On failure nothing was changed.
    pub fn acquire(mut mode: M) -> io::Result<Self> {
        mode.enter()?;
        debug!("raw mode acquired");
        Ok(RawSession { mode, active: true })
    }

    /// Restore the previous mode.
    pub fn release(mut self) -> io::Result<()> {
        self.active = false;
        debug!("raw mode released");
        self.mode.leave()
    }
}

impl<M: ModeSwitch> Drop for RawSession<M> {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            let _ = self.mode.leave();
        }
    }
}

/// Run `body` with the terminal in raw mode.
///
/// If entering raw mode fails, `body` never runs. Otherwise the mode is
/// restored before returning, whatever `body` returned. A body error takes
/// precedence over a restoration error.
pub fn with_raw_session<M, T, F>(mode: M, body: F) -> Result<T>
where
    M: ModeSwitch,
    F: FnOnce() -> Result<T>,
{
    let session = RawSession::acquire(mode)?;
    let outcome = body();
    let restored = session.release();
    let value = outcome?;
    restored?;
    Ok(value)
}

// ============================================================================
// REDRAW SURFACE
// ============================================================================

/// A region of the terminal that is erased and reprinted as a whole.
///
/// Every frame line ends in `\r\n`, so the cursor always rests at column 0
/// of the line below the frame. Clearing moves up one line at a time and
/// erases it, exactly as many times as the previous frame printed.
pub struct Surface<W: Write> {
    out: W,
    previous_lines: usize,
    cursor_hidden: bool,
}

impl<W: Write> Surface<W> {
    pub fn new(out: W) -> Self {
        Surface {
            out,
            previous_lines: 0,
            cursor_hidden: false,
        }
    }

    /// Lines printed by the most recent frame.
    pub fn previous_lines(&self) -> usize {
        self.previous_lines
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Hide the cursor until the surface is dropped.
    pub fn hide_cursor(&mut self) -> io::Result<()> {
        self.out.queue(Hide)?;
        self.out.flush()?;
        self.cursor_hidden = true;
        Ok(())
    }

    /// Erase the previous frame, one cursor-up and line-clear per line.
    pub fn clear_previous(&mut self) -> io::Result<()> {
        for _ in 0..self.previous_lines {
            self.out
                .queue(MoveUp(1))?
                .queue(MoveToColumn(0))?
                .queue(Clear(ClearType::CurrentLine))?;
        }
        Ok(())
    }

    /// Print a frame and remember how many lines it took.
    pub fn draw_frame<S: AsRef<str>>(&mut self, lines: &[S]) -> io::Result<()> {
        for line in lines {
            self.out.queue(Print(line.as_ref()))?.queue(Print("\r\n"))?;
        }
        self.previous_lines = lines.len();
        self.out.flush()
    }

    /// Replace the previous frame with a new one.
    pub fn redraw<S: AsRef<str>>(&mut self, lines: &[S]) -> io::Result<()> {
        self.clear_previous()?;
        self.draw_frame(lines)
    }

    /// Erase the previous frame, leaving nothing behind.
    pub fn clear(&mut self) -> io::Result<()> {
        self.redraw::<&str>(&[])
    }

    /// Replace the live frame with lines that stay on screen.
    ///
    /// Nothing drawn before this call is erased by a later frame.
    pub fn finish<S: AsRef<str>>(&mut self, lines: &[S]) -> io::Result<()> {
        self.redraw(lines)?;
        self.previous_lines = 0;
        Ok(())
    }
}

impl<W: Write> Drop for Surface<W> {
    fn drop(&mut self) {
        if self.cursor_hidden {
            let _ = self.out.queue(Show);
            let _ = self.out.flush();
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
