//! Color capability detection and RGB rendering.
//!
//! Capability is inferred from environment variables, never by querying the
//! terminal. Rendering picks one of three encodings:
//! - TrueColor: direct 24-bit SGR
//! - Palette256: nearest entry of the gray ramp or the 6×6×6 cube
//! - None: text passes through untouched

use std::env;
use std::fmt;
use std::sync::OnceLock;

use tracing::debug;

const RESET: &str = "\x1b[0m";

/// Terminal programs known to render 24-bit color.
const TRUECOLOR_PROGRAMS: &[&str] = &["iTerm.app", "Apple_Terminal", "Hyper", "vscode"];

// ============================================================================
// CAPABILITY
// ============================================================================

/// How much color the terminal can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCapability {
    None,
    Palette256,
    TrueColor,
}

impl ColorCapability {
    /// Capability of the current process, detected on first use.
    pub fn detected() -> Self {
        static DETECTED: OnceLock<ColorCapability> = OnceLock::new();
        *DETECTED.get_or_init(|| {
            let capability = detect_with(|name| env::var(name).ok());
            debug!(?capability, "detected color capability");
            capability
        })
    }
}

impl fmt::Display for ColorCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorCapability::None => write!(f, "no color"),
            ColorCapability::Palette256 => write!(f, "256 colors"),
            ColorCapability::TrueColor => write!(f, "true color"),
        }
    }
}

/// Decide capability from an environment lookup.
///
/// Signals are checked in priority order: `COLORTERM`, `TERM` hints,
/// `TERM_PROGRAM`, `WT_SESSION`. Any other non-dumb `TERM` falls back to
/// the 256-color palette.
pub fn detect_with<F>(lookup: F) -> ColorCapability
where
    F: Fn(&str) -> Option<String>,
{
    let colorterm = lookup("COLORTERM").unwrap_or_default();
    if colorterm == "truecolor" || colorterm == "24bit" {
        return ColorCapability::TrueColor;
    }

    let term = lookup("TERM").unwrap_or_default();
    if term.contains("256color") || term.contains("24bit") {
        return ColorCapability::TrueColor;
    }

    let program = lookup("TERM_PROGRAM").unwrap_or_default();
    if TRUECOLOR_PROGRAMS.contains(&program.as_str()) {
        return ColorCapability::TrueColor;
    }

    if lookup("WT_SESSION").is_some_and(|v| !v.is_empty()) {
        return ColorCapability::TrueColor;
    }

    if !term.is_empty() && term != "dumb" {
        return ColorCapability::Palette256;
    }

    ColorCapability::None
}

// ============================================================================
// RGB
// ============================================================================

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Parse `#rrggbb` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Paint `text` in this foreground color.
    pub fn fg(self, capability: ColorCapability, text: &str) -> String {
        self.paint(capability, 38, text)
    }

    /// Paint `text` on this background color.
    pub fn bg(self, capability: ColorCapability, text: &str) -> String {
        self.paint(capability, 48, text)
    }

    fn paint(self, capability: ColorCapability, layer: u8, text: &str) -> String {
        match capability {
            ColorCapability::None => text.to_string(),
            ColorCapability::TrueColor => format!(
                "\x1b[{};2;{};{};{}m{}{}",
                layer, self.r, self.g, self.b, text, RESET
            ),
            ColorCapability::Palette256 => {
                format!("\x1b[{};5;{}m{}{}", layer, self.ansi256(), text, RESET)
            }
        }
    }

    /// Nearest index in the xterm 256-color palette.
    ///
    /// Exact grays use the 24-step ramp (232–255) with black and white
    /// snapping to the cube corners; everything else goes to the cube.
    pub fn ansi256(self) -> u8 {
        let Rgb { r, g, b } = self;

        if r == g && g == b {
            if r < 8 {
                return 16;
            }
            if r > 248 {
                return 231;
            }
            return ((f64::from(r) - 8.0) / 247.0 * 24.0) as u8 + 232;
        }

        let level = |c: u8| (f64::from(c) / 255.0 * 5.0) as u8;
        16 + 36 * level(r) + 6 * level(g) + level(b)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    // -- Detection --

    #[test]
    fn colorterm_truecolor_wins() {
        let env = env_of(&[("COLORTERM", "truecolor"), ("TERM", "dumb")]);
        assert_eq!(detect_with(env), ColorCapability::TrueColor);
        let env = env_of(&[("COLORTERM", "24bit")]);
        assert_eq!(detect_with(env), ColorCapability::TrueColor);
    }

    #[test]
    fn term_hint_selects_truecolor() {
        let env = env_of(&[("TERM", "xterm-256color")]);
        assert_eq!(detect_with(env), ColorCapability::TrueColor);
    }

    #[test]
    fn known_programs_select_truecolor() {
        for program in TRUECOLOR_PROGRAMS {
            let env = env_of(&[("TERM_PROGRAM", *program), ("TERM", "xterm")]);
            assert_eq!(detect_with(env), ColorCapability::TrueColor, "{}", program);
        }
    }

    #[test]
    fn windows_terminal_session_selects_truecolor() {
        let env = env_of(&[("WT_SESSION", "abc-123")]);
        assert_eq!(detect_with(env), ColorCapability::TrueColor);
        let env = env_of(&[("WT_SESSION", "")]);
        assert_eq!(detect_with(env), ColorCapability::None);
    }

    #[test]
    fn plain_term_falls_back_to_palette() {
        let env = env_of(&[("TERM", "xterm")]);
        assert_eq!(detect_with(env), ColorCapability::Palette256);
    }

    #[test]
    fn dumb_or_missing_term_has_no_color() {
        assert_eq!(detect_with(env_of(&[("TERM", "dumb")])), ColorCapability::None);
        assert_eq!(detect_with(env_of(&[])), ColorCapability::None);
    }

    // -- Hex --

    #[test]
    fn hex_parses_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#1e1e2e"), Some(Rgb::new(0x1e, 0x1e, 0x2e)));
        assert_eq!(Rgb::from_hex("CBA6F7"), Some(Rgb::new(0xcb, 0xa6, 0xf7)));
    }

    #[test]
    fn hex_rejects_malformed_input() {
        assert_eq!(Rgb::from_hex("#123"), None);
        assert_eq!(Rgb::from_hex("#gg0000"), None);
        assert_eq!(Rgb::from_hex("#ééé"), None);
    }

    // -- Quantization --

    #[test]
    fn grays_use_the_ramp() {
        assert_eq!(Rgb::new(0, 0, 0).ansi256(), 16);
        assert_eq!(Rgb::new(7, 7, 7).ansi256(), 16);
        assert_eq!(Rgb::new(255, 255, 255).ansi256(), 231);
        assert_eq!(Rgb::new(8, 8, 8).ansi256(), 232);
        assert_eq!(Rgb::new(128, 128, 128).ansi256(), 243);
        assert_eq!(Rgb::new(248, 248, 248).ansi256(), 255);
    }

    #[test]
    fn grays_never_land_in_the_cube_interior() {
        for v in 0..=255u8 {
            let idx = Rgb::new(v, v, v).ansi256();
            assert!(idx == 16 || idx == 231 || idx >= 232, "gray {} -> {}", v, idx);
        }
    }

    #[test]
    fn colors_use_the_cube() {
        assert_eq!(Rgb::new(255, 0, 0).ansi256(), 196);
        assert_eq!(Rgb::new(0, 255, 0).ansi256(), 46);
        assert_eq!(Rgb::new(0, 0, 255).ansi256(), 21);
        assert_eq!(Rgb::new(0x89, 0xb4, 0xfa).ansi256(), 16 + 36 * 2 + 6 * 3 + 4);
    }

    // -- Rendering --

    #[test]
    fn truecolor_emits_direct_sgr() {
        let red = Rgb::new(243, 139, 168);
        assert_eq!(
            red.fg(ColorCapability::TrueColor, "x"),
            "\x1b[38;2;243;139;168mx\x1b[0m"
        );
        assert_eq!(
            red.bg(ColorCapability::TrueColor, "x"),
            "\x1b[48;2;243;139;168mx\x1b[0m"
        );
    }

    #[test]
    fn palette_emits_indexed_sgr() {
        let red = Rgb::new(255, 0, 0);
        assert_eq!(red.fg(ColorCapability::Palette256, "x"), "\x1b[38;5;196mx\x1b[0m");
        assert_eq!(red.bg(ColorCapability::Palette256, "x"), "\x1b[48;5;196mx\x1b[0m");
    }

    #[test]
    fn no_color_returns_text_unmodified() {
        let red = Rgb::new(255, 0, 0);
        assert_eq!(red.fg(ColorCapability::None, "plain"), "plain");
        assert_eq!(red.bg(ColorCapability::None, "plain"), "plain");
    }

    #[test]
    fn rendering_is_deterministic() {
        let c = Rgb::new(12, 200, 99);
        for cap in [ColorCapability::TrueColor, ColorCapability::Palette256] {
            assert_eq!(c.fg(cap, "a"), c.fg(cap, "a"));
        }
    }
}
