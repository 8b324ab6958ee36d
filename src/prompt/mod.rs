//! Interactive prompts.
//!
//! Split along the same line as any model/update/view program:
//! - `state`: models, the [`Outcome`] of a key, and the [`Widget`] contract
//! - `update`: pure key transitions
//! - `view`: pure line rendering
//! - `run`: the loop that reads keys and draws frames
//!
//! The functions below are the usual entry points. Each one owns the
//! terminal for its duration and returns [`Error::UserAborted`] on Ctrl-C.
//! For builder knobs (scroll height, start directory) construct the model
//! directly and hand it to [`run_prompt`].
//!
//! [`Error::UserAborted`]: crate::Error::UserAborted

pub mod run;
pub mod state;
pub mod update;
pub mod view;

use std::path::PathBuf;

use crate::error::Result;
use crate::style::Context;

pub use run::{drive, run_prompt, run_prompt_with};
pub use state::{
    Browser, Confirm, Effect, FilterView, Input, ListWindow, Outcome, Select, TextEditor, Widget,
};

/// Ask a yes/no question. Enter takes `default`.
pub fn confirm(ctx: &Context, label: &str, default: bool) -> Result<bool> {
    run_prompt(ctx, &mut Confirm::new(label, default))
}

/// Read one line. An empty submission yields `placeholder`, if any.
pub fn input(ctx: &Context, label: &str, placeholder: &str) -> Result<String> {
    run_prompt(ctx, &mut Input::new(label, placeholder))
}

/// Read several lines, submitted with Ctrl-D and joined with `\n`.
pub fn text(ctx: &Context, label: &str, placeholder: &str) -> Result<String> {
    run_prompt(ctx, &mut TextEditor::new(label, placeholder))
}

/// Pick one of `items`. Returns its index and text.
///
/// Fails with `EmptyInput` before touching the terminal if `items` is empty.
pub fn select<S: AsRef<str>>(ctx: &Context, label: &str, items: &[S]) -> Result<(usize, String)> {
    let mut model = Select::new(label, items)?;
    run_prompt(ctx, &mut model)
}

/// Browse from the working directory and pick a file.
///
/// `extensions` restricts which files are listed (`".json"` or `"json"`);
/// an empty slice lists every file.
pub fn file<S: AsRef<str>>(ctx: &Context, label: &str, extensions: &[S]) -> Result<PathBuf> {
    run_prompt(ctx, &mut Browser::new(label, extensions))
}
