//! Pure rendering: model in, styled lines out.
//!
//! Each prompt produces two things: the live frame redrawn after every key,
//! and the summary left on screen once it submits. Nothing here writes to
//! the terminal; the surface in `run` does that.

use std::path::Path;

use crate::style::Context;

use super::state::{Browser, Confirm, FilterView, Input, Select, TextEditor};

/// Block shown where typing will land.
const CURSOR: &str = "█";

/// Longest text preview kept in a summary, in characters.
const PREVIEW_WIDTH: usize = 60;

const BROWSER_HELP: &str =
    "↑/↓ navigate • Enter select • ← parent • → enter dir • Type to filter • Esc clear";

// ============================================================================
// HELPERS
// ============================================================================

/// Collapse text to one line and cut it to [`PREVIEW_WIDTH`] characters.
fn preview(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= PREVIEW_WIDTH {
        return flat;
    }
    let mut cut: String = flat.chars().take(PREVIEW_WIDTH - 3).collect();
    cut.push_str("...");
    cut
}

/// `dir` with the home prefix shortened to `~`.
pub fn display_dir(dir: &Path, home: Option<&Path>) -> String {
    match home.and_then(|h| dir.strip_prefix(h).ok()) {
        Some(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Some(rest) => format!("~/{}", rest.display()),
        None => dir.display().to_string(),
    }
}

/// The `> value` line every list-like summary ends with.
fn chosen(ctx: &Context, value: &str) -> String {
    format!("{}{}", ctx.success("> "), ctx.text(value))
}

/// Rows of a filtered list inside its scroll window, with indicators.
///
/// `row` renders one entry given its position in the full list and whether
/// it is selected.
fn window_rows<F>(ctx: &Context, view: &FilterView, mut row: F) -> Vec<String>
where
    F: FnMut(usize, bool) -> String,
{
    let len = view.indices.len();
    let shown = view.window.visible(len);
    let mut lines = Vec::with_capacity(shown.len() + 2);

    if shown.start > 0 {
        lines.push(ctx.muted("  ↑ more items above"));
    }
    for pos in shown.clone() {
        lines.push(row(view.indices[pos], pos == view.selected));
    }
    if shown.end < len {
        lines.push(ctx.muted("  ↓ more items below"));
    }
    lines
}

// ============================================================================
// PER-PROMPT VIEWS
// ============================================================================

impl Confirm {
    fn prompt(&self, ctx: &Context) -> String {
        let hint = if self.default { "(Y/n)" } else { "(y/N)" };
        format!(
            "{} {}{}",
            ctx.label(&self.label),
            ctx.subtle(hint),
            ctx.accent(": ")
        )
    }

    pub fn view(&self, ctx: &Context) -> Vec<String> {
        vec![self.prompt(ctx)]
    }

    pub fn summary(&self, ctx: &Context, answer: bool) -> Vec<String> {
        let word = if answer {
            ctx.success("yes")
        } else {
            ctx.error("no")
        };
        vec![format!("{}{}", self.prompt(ctx), word)]
    }
}

impl Input {
    fn prompt(&self, ctx: &Context) -> String {
        format!("{}{}", ctx.label(&self.label), ctx.accent(": "))
    }

    pub fn view(&self, ctx: &Context) -> Vec<String> {
        let body = if self.buffer.is_empty() && !self.placeholder.is_empty() {
            format!("{}{}", ctx.subtle(CURSOR), ctx.subtle(&self.placeholder))
        } else {
            format!("{}{}", ctx.text(&self.buffer), ctx.subtle(CURSOR))
        };
        vec![format!("{}{}", self.prompt(ctx), body)]
    }

    pub fn summary(&self, ctx: &Context, value: &str) -> Vec<String> {
        vec![format!("{}{}", self.prompt(ctx), ctx.text(value))]
    }
}

impl TextEditor {
    pub fn view(&self, ctx: &Context) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.lines.len() + 1);
        if !self.label.is_empty() {
            lines.push(format!(
                "{} {}",
                ctx.label(&self.label),
                ctx.subtle("(Ctrl+D to submit)")
            ));
        }

        let show_placeholder = self.is_empty() && !self.placeholder.is_empty();
        for (i, line) in self.lines.iter().enumerate() {
            let number = ctx.muted(&format!("{:2} │ ", i + 1));
            let mut row = format!("{}{}", number, ctx.text(line));
            if i == self.current {
                row.push_str(&ctx.subtle(CURSOR));
                if show_placeholder {
                    row.push_str(&ctx.subtle(&self.placeholder));
                }
            }
            lines.push(row);
        }
        lines
    }

    pub fn summary(&self, ctx: &Context, value: &str) -> Vec<String> {
        let mut lines = Vec::with_capacity(2);
        if !self.label.is_empty() {
            lines.push(ctx.label(&self.label));
        }
        lines.push(chosen(ctx, &preview(value)));
        lines
    }
}

impl Select {
    pub fn view(&self, ctx: &Context) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.label.is_empty() {
            lines.push(ctx.label(&self.label));
        }
        if !self.view.query.is_empty() {
            lines.push(format!("{}{}", ctx.muted("Filter: "), ctx.text(&self.view.query)));
        }
        if self.view.indices.is_empty() {
            lines.push(ctx.muted("  (no matches)"));
            return lines;
        }

        lines.extend(window_rows(ctx, &self.view, |i, selected| {
            let item = &self.items[i];
            if selected {
                format!("{}{}", ctx.success("> "), ctx.success(item))
            } else {
                format!("  {}", ctx.text(item))
            }
        }));
        lines
    }

    pub fn summary(&self, ctx: &Context, choice: &(usize, String)) -> Vec<String> {
        let mut lines = Vec::with_capacity(2);
        if !self.label.is_empty() {
            lines.push(ctx.label(&self.label));
        }
        lines.push(chosen(ctx, &choice.1));
        lines
    }
}

impl Browser {
    fn heading(&self, ctx: &Context) -> String {
        let mut heading = ctx.label(&self.label);
        if !self.extensions.is_empty() {
            heading.push(' ');
            heading.push_str(&ctx.subtle(&format!("({})", self.extensions.join(", "))));
        }
        heading
    }

    pub fn view(&self, ctx: &Context) -> Vec<String> {
        let mut lines = vec![
            self.heading(ctx),
            format!(
                "{}{}",
                ctx.muted("▸ "),
                ctx.text(&display_dir(&self.dir, self.home.as_deref()))
            ),
        ];
        if !self.view.query.is_empty() {
            lines.push(format!("{}{}", ctx.muted("/ "), ctx.text(&self.view.query)));
        }

        if self.view.indices.is_empty() {
            lines.push(ctx.muted("  (empty)"));
        } else {
            lines.extend(window_rows(ctx, &self.view, |i, selected| {
                let entry = &self.entries[i];
                let icon = if entry.is_dir { "▸ " } else { "  " };
                let mut name = entry.name.clone();
                if entry.is_dir && !entry.is_parent() {
                    name.push('/');
                }
                if selected {
                    format!("{}{}{}", ctx.success("> "), icon, ctx.success(&name))
                } else if entry.is_dir {
                    format!("  {}{}", icon, ctx.accent(&name))
                } else {
                    format!("  {}{}", icon, ctx.text(&name))
                }
            }));
        }

        lines.push(ctx.muted(BROWSER_HELP));
        lines
    }

    pub fn summary(&self, ctx: &Context, path: &Path) -> Vec<String> {
        vec![self.heading(ctx), chosen(ctx, &path.display().to_string())]
    }
}

// ============================================================================
// TESTS
// ============================================================================
