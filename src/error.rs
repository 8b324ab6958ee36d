//! Error taxonomy shared by every prompt.
//!
//! Three outcomes reach the caller: the operator aborted, the prompt had
//! nothing to offer, or the terminal failed underneath us. None of them are
//! recovered internally.

use std::io;

use thiserror::Error;

/// Everything a prompt can fail with.
#[derive(Debug, Error)]
pub enum Error {
    /// Ctrl-C was pressed inside a prompt loop.
    #[error("user aborted")]
    UserAborted,

    /// `select` was called with zero items. Raw mode is never entered.
    #[error("no items to select")]
    EmptyInput,

    /// Reading keys, writing frames, or switching terminal modes failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// True when the operator cancelled with Ctrl-C.
    pub fn is_aborted(&self) -> bool {
        matches!(self, Error::UserAborted)
    }
}

/// Result alias used by every prompt entry point.
pub type Result<T> = std::result::Result<T, Error>;
