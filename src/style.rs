//! Rendering context threaded through every prompt.
//!
//! A [`Context`] pairs a theme with a color capability. Prompts never read
//! global state; two call sites can render with different themes side by
//! side.

use crate::color::{ColorCapability, Rgb};
use crate::theme::Theme;

const BOLD: &str = "\x1b[1m";
const UNDERLINE: &str = "\x1b[4m";
const RESET: &str = "\x1b[0m";

/// Theme plus capability: everything needed to turn text into styled text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    pub theme: Theme,
    pub capability: ColorCapability,
}

impl Context {
    pub fn new(theme: Theme, capability: ColorCapability) -> Self {
        Context { theme, capability }
    }

    /// Default dark theme with the process's detected capability.
    pub fn from_env() -> Self {
        Context::new(Theme::default(), ColorCapability::detected())
    }

    /// Unstyled output. Useful for logs, pipes and tests.
    pub fn plain() -> Self {
        Context::new(Theme::default(), ColorCapability::None)
    }

    pub fn with_theme(self, theme: Theme) -> Self {
        Context { theme, ..self }
    }

    pub fn with_capability(self, capability: ColorCapability) -> Self {
        Context { capability, ..self }
    }

    // ------------------------------------------------------------------------
    // Semantic painters
    // ------------------------------------------------------------------------

    pub fn paint(&self, color: Rgb, text: &str) -> String {
        color.fg(self.capability, text)
    }

    /// Body text.
    pub fn text(&self, text: &str) -> String {
        self.paint(self.theme.text, text)
    }

    /// Hints and placeholders.
    pub fn subtle(&self, text: &str) -> String {
        self.paint(self.theme.subtext0, text)
    }

    /// Chrome: line numbers, scroll indicators, help lines.
    pub fn muted(&self, text: &str) -> String {
        self.paint(self.theme.overlay0, text)
    }

    pub fn accent(&self, text: &str) -> String {
        self.paint(self.theme.blue, text)
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(self.theme.green, text)
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(self.theme.yellow, text)
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(self.theme.red, text)
    }

    pub fn highlight(&self, text: &str) -> String {
        self.paint(self.theme.mauve, text)
    }

    // ------------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------------

    /// Bold. Suppressed along with color when the terminal has no color.
    pub fn bold(&self, text: &str) -> String {
        self.attribute(BOLD, text)
    }

    pub fn underline(&self, text: &str) -> String {
        self.attribute(UNDERLINE, text)
    }

    fn attribute(&self, code: &str, text: &str) -> String {
        match self.capability {
            ColorCapability::None => text.to_string(),
            _ => format!("{}{}{}", code, text, RESET),
        }
    }

    /// The bold accent label every prompt starts with.
    pub fn label(&self, text: &str) -> String {
        self.accent(&self.bold(text))
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{LATTE, MOCHA};

    #[test]
    fn plain_context_emits_no_escapes() {
        let ctx = Context::plain();
        assert_eq!(ctx.label("Name"), "Name");
        assert_eq!(ctx.underline("x"), "x");
        assert_eq!(ctx.success("ok"), "ok");
    }

    #[test]
    fn painters_use_their_theme_roles() {
        let ctx = Context::new(MOCHA, ColorCapability::TrueColor);
        assert_eq!(ctx.accent("a"), MOCHA.blue.fg(ColorCapability::TrueColor, "a"));
        assert_eq!(ctx.error("e"), MOCHA.red.fg(ColorCapability::TrueColor, "e"));
        assert_eq!(ctx.muted("m"), MOCHA.overlay0.fg(ColorCapability::TrueColor, "m"));
    }

    #[test]
    fn bold_wraps_when_color_is_available() {
        let ctx = Context::new(MOCHA, ColorCapability::Palette256);
        assert_eq!(ctx.bold("b"), "\x1b[1mb\x1b[0m");
    }

    #[test]
    fn with_theme_swaps_only_the_theme() {
        let ctx = Context::new(MOCHA, ColorCapability::Palette256).with_theme(LATTE);
        assert_eq!(ctx.theme, LATTE);
        assert_eq!(ctx.capability, ColorCapability::Palette256);
    }
}
