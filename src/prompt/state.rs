//! Prompt state algebra: models, outcomes and the widget contract.
//!
//! Every prompt is a model plus a transition function. A model is created
//! fresh per invocation and dropped on return. Transitions live in
//! `update`, rendering in `view`, and the effects boundary in `run`.
//!
//! Invariant for list-like models: `selected < indices.len()` whenever the
//! filtered view is non-empty, and `selected == 0` when it is empty.

use std::env;
use std::ops::Range;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::keys::Key;
use crate::listing::{self, Entry};
use crate::style::Context;

/// Rows shown by list prompts before scrolling kicks in.
pub const DEFAULT_VISIBLE_ROWS: usize = 12;

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of feeding one key to a model.
#[derive(Debug, PartialEq)]
pub enum Outcome<T> {
    /// Keep going; redraw the frame.
    Continue,
    /// Terminal state: the prompt produced its value.
    Submit(T),
    /// Terminal state: Ctrl-C.
    Abort,
    /// The model needs the outside world before it can continue.
    Effect(Effect),
}

/// Side effect requested by a pure transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// List this directory and make it current.
    ChangeDir(PathBuf),
}

/// What the interaction loop needs from a prompt.
pub trait Widget {
    type Output;

    /// Apply one key.
    fn update(&mut self, key: &Key) -> Outcome<Self::Output>;

    /// Lines of the live frame.
    fn view(&self, ctx: &Context) -> Vec<String>;

    /// Lines left on screen after a successful submit.
    fn summary(&self, ctx: &Context, output: &Self::Output) -> Vec<String>;

    /// Carry out an effect requested by [`Widget::update`].
    fn apply(&mut self, _effect: Effect) {}
}

// ============================================================================
// SHARED LIST STATE
// ============================================================================

/// Bounded window over a list, scrolled to keep the selection visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListWindow {
    pub offset: usize,
    pub rows: usize,
}

impl ListWindow {
    pub fn new(rows: usize) -> Self {
        ListWindow {
            offset: 0,
            rows: rows.max(1),
        }
    }

    /// Range of list indices currently on screen.
    pub fn visible(&self, len: usize) -> Range<usize> {
        let start = self.offset.min(len);
        start..(self.offset + self.rows).min(len)
    }
}

/// Type-to-filter view over an immutable list of names.
///
/// `indices` holds positions in the full list that contain `query`
/// case-insensitively, in original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterView {
    pub query: String,
    pub indices: Vec<usize>,
    pub selected: usize,
    pub window: ListWindow,
}

impl FilterView {
    /// A view showing all `len` items.
    pub fn new(len: usize, rows: usize) -> Self {
        FilterView {
            query: String::new(),
            indices: (0..len).collect(),
            selected: 0,
            window: ListWindow::new(rows),
        }
    }

    /// Position of the selected row in the full list.
    pub fn current(&self) -> Option<usize> {
        self.indices.get(self.selected).copied()
    }
}

// ============================================================================
// MODELS
// ============================================================================

/// Yes/no question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirm {
    pub label: String,
    pub default: bool,
}

impl Confirm {
    pub fn new(label: impl Into<String>, default: bool) -> Self {
        Confirm {
            label: label.into(),
            default,
        }
    }
}

/// Single-line text entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub label: String,
    /// Shown while empty; submitted if Enter is pressed on an empty buffer.
    pub placeholder: String,
    pub buffer: String,
}

impl Input {
    pub fn new(label: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Input {
            label: label.into(),
            placeholder: placeholder.into(),
            buffer: String::new(),
        }
    }
}

/// Multi-line text editor. `lines` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEditor {
    pub label: String,
    /// Display-only hint shown while the document is empty.
    pub placeholder: String,
    pub lines: Vec<String>,
    pub current: usize,
}

impl TextEditor {
    pub fn new(label: impl Into<String>, placeholder: impl Into<String>) -> Self {
        TextEditor {
            label: label.into(),
            placeholder: placeholder.into(),
            lines: vec![String::new()],
            current: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }
}

/// Filterable single-choice list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    pub label: String,
    pub items: Vec<String>,
    pub view: FilterView,
}

impl Select {
    /// Fails with [`Error::EmptyInput`] when there is nothing to choose.
    pub fn new<S: AsRef<str>>(label: impl Into<String>, items: &[S]) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::EmptyInput);
        }
        let items: Vec<String> = items.iter().map(|s| s.as_ref().to_string()).collect();
        Ok(Select {
            label: label.into(),
            view: FilterView::new(items.len(), DEFAULT_VISIBLE_ROWS),
            items,
        })
    }

    pub fn max_visible(mut self, rows: usize) -> Self {
        self.view.window = ListWindow::new(rows);
        self
    }
}

/// Filesystem browser that submits a file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Browser {
    pub label: String,
    /// Allowed file extensions; empty means any file.
    pub extensions: Vec<String>,
    pub dir: PathBuf,
    pub home: Option<PathBuf>,
    pub entries: Vec<Entry>,
    pub view: FilterView,
}

impl Browser {
    /// Browse from the current working directory.
    pub fn new<S: AsRef<str>>(label: impl Into<String>, extensions: &[S]) -> Self {
        let dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let extensions: Vec<String> = extensions.iter().map(|s| s.as_ref().to_string()).collect();
        let entries = listing::read_entries(&dir, &extensions);
        Browser::with_listing(label, extensions, dir, entries).with_home(dirs::home_dir())
    }

    /// A browser over an already-read listing. No filesystem access.
    pub fn with_listing(
        label: impl Into<String>,
        extensions: Vec<String>,
        dir: PathBuf,
        entries: Vec<Entry>,
    ) -> Self {
        Browser {
            label: label.into(),
            extensions,
            dir,
            home: None,
            view: FilterView::new(entries.len(), DEFAULT_VISIBLE_ROWS),
            entries,
        }
    }

    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    /// Start somewhere other than the working directory. A relative `dir`
    /// is anchored at the working directory.
    pub fn start_in(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = listing::absolute(&dir.into());
        let entries = listing::read_entries(&dir, &self.extensions);
        self.enter(dir, entries);
        self
    }

    pub fn max_visible(mut self, rows: usize) -> Self {
        self.view.window = ListWindow::new(rows);
        self
    }

    /// The entry under the cursor, if the filtered view is non-empty.
    pub fn selected_entry(&self) -> Option<&Entry> {
        self.view.current().map(|i| &self.entries[i])
    }
}

// ============================================================================
// TESTS
// ============================================================================
