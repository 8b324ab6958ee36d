//! Effect boundary: the interaction loop.
//!
//! Reads one key, feeds it to the model, resolves any requested effect and
//! redraws. This is the only place prompt state meets the terminal. The
//! loop itself is generic over the input stream and the output writer so
//! it can be driven from a script in tests.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::error::{Error, Result};
use crate::keys::{Key, KeyReader};
use crate::listing;
use crate::style::Context;
use crate::terminal::{Crossterm, ModeSwitch, Surface, with_raw_session};

use super::state::{Browser, Confirm, Effect, Input, Outcome, Select, TextEditor, Widget};

// ============================================================================
// WIDGET IMPLEMENTATIONS
// ============================================================================

impl Widget for Confirm {
    type Output = bool;

    fn update(&mut self, key: &Key) -> Outcome<bool> {
        Confirm::update(self, key)
    }

    fn view(&self, ctx: &Context) -> Vec<String> {
        Confirm::view(self, ctx)
    }

    fn summary(&self, ctx: &Context, output: &bool) -> Vec<String> {
        Confirm::summary(self, ctx, *output)
    }
}

impl Widget for Input {
    type Output = String;

    fn update(&mut self, key: &Key) -> Outcome<String> {
        Input::update(self, key)
    }

    fn view(&self, ctx: &Context) -> Vec<String> {
        Input::view(self, ctx)
    }

    fn summary(&self, ctx: &Context, output: &String) -> Vec<String> {
        Input::summary(self, ctx, output)
    }
}

impl Widget for TextEditor {
    type Output = String;

    fn update(&mut self, key: &Key) -> Outcome<String> {
        TextEditor::update(self, key)
    }

    fn view(&self, ctx: &Context) -> Vec<String> {
        TextEditor::view(self, ctx)
    }

    fn summary(&self, ctx: &Context, output: &String) -> Vec<String> {
        TextEditor::summary(self, ctx, output)
    }
}

impl Widget for Select {
    type Output = (usize, String);

    fn update(&mut self, key: &Key) -> Outcome<(usize, String)> {
        Select::update(self, key)
    }

    fn view(&self, ctx: &Context) -> Vec<String> {
        Select::view(self, ctx)
    }

    fn summary(&self, ctx: &Context, output: &(usize, String)) -> Vec<String> {
        Select::summary(self, ctx, output)
    }
}

impl Widget for Browser {
    type Output = PathBuf;

    fn update(&mut self, key: &Key) -> Outcome<PathBuf> {
        Browser::update(self, key)
    }

    fn view(&self, ctx: &Context) -> Vec<String> {
        Browser::view(self, ctx)
    }

    fn summary(&self, ctx: &Context, output: &PathBuf) -> Vec<String> {
        Browser::summary(self, ctx, output)
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::ChangeDir(dir) => change_dir(self, dir),
        }
    }
}

/// List `dir` and make it the browser's current directory.
fn change_dir(browser: &mut Browser, dir: PathBuf) {
    let dir = listing::absolute(&dir);
    let entries = listing::read_entries(&dir, &browser.extensions);
    debug!(dir = %dir.display(), entries = entries.len(), "browser changed directory");
    browser.enter(dir, entries);
}

// ============================================================================
// INTERACTION LOOP
// ============================================================================

/// Drive `widget` until it submits or aborts.
///
/// On submit the live frame is replaced by the widget's summary; on abort
/// it is erased and [`Error::UserAborted`] is returned. Read and write
/// failures end the loop as [`Error::Io`].
pub fn drive<W, R, O>(
    widget: &mut W,
    ctx: &Context,
    keys: &mut KeyReader<R>,
    surface: &mut Surface<O>,
) -> Result<W::Output>
where
    W: Widget,
    R: Read,
    O: Write,
{
    surface.hide_cursor()?;
    surface.draw_frame(&widget.view(ctx))?;

    loop {
        let key = keys.read_key()?;
        match widget.update(&key) {
            Outcome::Continue => {}
            Outcome::Effect(effect) => widget.apply(effect),
            Outcome::Submit(value) => {
                surface.finish(&widget.summary(ctx, &value))?;
                return Ok(value);
            }
            Outcome::Abort => {
                surface.clear()?;
                return Err(Error::UserAborted);
            }
        }
        surface.redraw(&widget.view(ctx))?;
    }
}

/// Run `widget` on the process terminal, in raw mode for its whole lifetime.
pub fn run_prompt<W: Widget>(ctx: &Context, widget: &mut W) -> Result<W::Output> {
    run_prompt_with(Crossterm, ctx, widget, io::stdin().lock(), io::stdout().lock())
}

/// Run `widget` over `input` and `output` while `mode` holds raw mode.
///
/// The surface is dropped, showing the cursor again, before the mode is
/// left. The mode is left on every exit path, abort included.
pub fn run_prompt_with<M, W, R, O>(
    mode: M,
    ctx: &Context,
    widget: &mut W,
    input: R,
    output: O,
) -> Result<W::Output>
where
    M: ModeSwitch,
    W: Widget,
    R: Read,
    O: Write,
{
    with_raw_session(mode, || {
        let mut keys = KeyReader::new(input);
        let mut surface = Surface::new(output);
        drive(widget, ctx, &mut keys, &mut surface)
    })
}

// ============================================================================
// TESTS
// ============================================================================
