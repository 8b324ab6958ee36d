//! termask: interactive terminal prompts.
//!
//! Confirm, line input, multi-line text, filterable select, file browser,
//! a spinner around long-running work, and boxed tables for the results.
//! Every prompt renders through an explicit [`Context`] (theme plus color
//! capability) and returns [`Error::UserAborted`] on Ctrl-C.

pub mod color;
pub mod error;
pub mod keys;
pub mod listing;
pub mod output;
pub mod prompt;
pub mod spinner;
pub mod style;
pub mod table;
pub mod terminal;
pub mod theme;

pub use color::{ColorCapability, Rgb};
pub use error::{Error, Result};
pub use prompt::{confirm, file, input, select, text};
pub use style::Context;
pub use theme::Theme;
