//! Themed one-line messages and the exit-on-error convenience.

use std::fmt::Display;
use std::process;

use crate::style::Context;

/// Section heading: bold, underlined, highlighted.
pub fn title_line(ctx: &Context, text: &str) -> String {
    ctx.highlight(&ctx.underline(&ctx.bold(text)))
}

pub fn warn_line(ctx: &Context, text: &str) -> String {
    format!("{} {}", ctx.warning("!"), ctx.warning(text))
}

pub fn error_line(ctx: &Context, text: &str) -> String {
    format!("{} {}", ctx.error("✗"), ctx.error(text))
}

pub fn title(ctx: &Context, text: &str) {
    println!("{}", title_line(ctx, text));
}

pub fn info(ctx: &Context, text: &str) {
    println!("{}", ctx.text(text));
}

pub fn warn(ctx: &Context, text: &str) {
    eprintln!("{}", warn_line(ctx, text));
}

pub fn error(ctx: &Context, text: &str) {
    eprintln!("{}", error_line(ctx, text));
}

/// Unwrap `result`, or print the error and exit with status 1.
pub fn must<T, E: Display>(ctx: &Context, result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            error(ctx, &e.to_string());
            process::exit(1);
        }
    }
}
