//! Box-drawn tables for result output.
//!
//! Column widths are measured on the raw cell text before any styling is
//! applied, so escape sequences never throw off the alignment. Cells are
//! flattened to one line.

use crate::style::Context;

const TOP: [&str; 3] = ["┌", "┬", "┐"];
const MIDDLE: [&str; 3] = ["├", "┼", "┤"];
const BOTTOM: [&str; 3] = ["└", "┴", "┘"];
const HORIZONTAL: &str = "─";
const VERTICAL: &str = "│";

/// One line of text per cell: `\n` becomes a space, `\r` is dropped.
fn sanitize(cell: &str) -> String {
    cell.replace('\n', " ").replace('\r', "")
}

fn width(text: &str) -> usize {
    text.chars().count()
}

/// Column widths including one space of padding on each side.
fn column_widths<R: AsRef<[String]>>(headers: &[&str], rows: &[R]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| width(h)).collect();
    for row in rows {
        for (i, cell) in row.as_ref().iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(width(&sanitize(cell)));
        }
    }
    widths.iter().map(|w| w + 2).collect()
}

fn rule(ctx: &Context, widths: &[usize], [left, mid, right]: [&str; 3]) -> String {
    let inner: Vec<String> = widths.iter().map(|w| HORIZONTAL.repeat(*w)).collect();
    ctx.muted(&format!("{}{}{}", left, inner.join(mid), right))
}

fn row_line<S: AsRef<str>>(ctx: &Context, widths: &[usize], cells: &[S], header: bool) -> String {
    let mut line = ctx.muted(VERTICAL);
    for (i, w) in widths.iter().enumerate() {
        let cell = cells.get(i).map(|c| sanitize(c.as_ref())).unwrap_or_default();
        let padding = w.saturating_sub(width(&cell) + 1);
        let styled = if header {
            ctx.bold(&ctx.accent(&cell))
        } else {
            ctx.text(&cell)
        };
        line.push(' ');
        line.push_str(&styled);
        line.push_str(&" ".repeat(padding));
        line.push_str(&ctx.muted(VERTICAL));
    }
    line
}

/// Lay out a table as printable lines.
///
/// Rows shorter than `headers` are padded with empty cells; extra cells are
/// ignored. No headers means no table.
pub fn render<R: AsRef<[String]>>(ctx: &Context, headers: &[&str], rows: &[R]) -> Vec<String> {
    if headers.is_empty() {
        return Vec::new();
    }
    let widths = column_widths(headers, rows);

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(rule(ctx, &widths, TOP));
    lines.push(row_line(ctx, &widths, headers, true));
    lines.push(rule(ctx, &widths, MIDDLE));
    for row in rows {
        lines.push(row_line(ctx, &widths, row.as_ref(), false));
    }
    lines.push(rule(ctx, &widths, BOTTOM));
    lines
}

/// Print a table to stdout.
pub fn print<R: AsRef<[String]>>(ctx: &Context, headers: &[&str], rows: &[R]) {
    for line in render(ctx, headers, rows) {
        println!("{}", line);
    }
}
