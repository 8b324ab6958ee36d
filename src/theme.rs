//! Color palettes.
//!
//! Pure data. Two Catppuccin flavors ship: `MOCHA` (dark, the default) and
//! `LATTE` (light). Semantic roles are assigned in [`crate::style`]:
//! - Blue: accent (labels, directories)
//! - Green: success, current selection
//! - Yellow: warning
//! - Red: error, "no"
//! - Mauve: highlight (spinner, titles)
//! - Text / Subtext0 / Overlay0: body, hints, de-emphasized chrome

use crate::color::Rgb;

/// A named color table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub rosewater: Rgb,
    pub flamingo: Rgb,
    pub pink: Rgb,
    pub mauve: Rgb,
    pub red: Rgb,
    pub maroon: Rgb,
    pub peach: Rgb,
    pub yellow: Rgb,
    pub green: Rgb,
    pub teal: Rgb,
    pub sky: Rgb,
    pub sapphire: Rgb,
    pub blue: Rgb,
    pub lavender: Rgb,

    pub text: Rgb,
    pub subtext1: Rgb,
    pub subtext0: Rgb,

    pub overlay2: Rgb,
    pub overlay1: Rgb,
    pub overlay0: Rgb,

    pub surface2: Rgb,
    pub surface1: Rgb,
    pub surface0: Rgb,

    pub base: Rgb,
    pub mantle: Rgb,
    pub crust: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        MOCHA
    }
}

/// Catppuccin Mocha.
pub const MOCHA: Theme = Theme {
    rosewater: Rgb::new(0xf5, 0xe0, 0xdc),
    flamingo: Rgb::new(0xf2, 0xcd, 0xcd),
    pink: Rgb::new(0xf5, 0xc2, 0xe7),
    mauve: Rgb::new(0xcb, 0xa6, 0xf7),
    red: Rgb::new(0xf3, 0x8b, 0xa8),
    maroon: Rgb::new(0xeb, 0xa0, 0xac),
    peach: Rgb::new(0xfa, 0xb3, 0x87),
    yellow: Rgb::new(0xf9, 0xe2, 0xaf),
    green: Rgb::new(0xa6, 0xe3, 0xa1),
    teal: Rgb::new(0x94, 0xe2, 0xd5),
    sky: Rgb::new(0x89, 0xdc, 0xeb),
    sapphire: Rgb::new(0x74, 0xc7, 0xec),
    blue: Rgb::new(0x89, 0xb4, 0xfa),
    lavender: Rgb::new(0xb4, 0xbe, 0xfe),
    text: Rgb::new(0xcd, 0xd6, 0xf4),
    subtext1: Rgb::new(0xba, 0xc2, 0xde),
    subtext0: Rgb::new(0xa6, 0xad, 0xc8),
    overlay2: Rgb::new(0x93, 0x99, 0xb2),
    overlay1: Rgb::new(0x7f, 0x84, 0x9c),
    overlay0: Rgb::new(0x6c, 0x70, 0x86),
    surface2: Rgb::new(0x58, 0x5b, 0x70),
    surface1: Rgb::new(0x45, 0x47, 0x5a),
    surface0: Rgb::new(0x31, 0x32, 0x44),
    base: Rgb::new(0x1e, 0x1e, 0x2e),
    mantle: Rgb::new(0x18, 0x18, 0x25),
    crust: Rgb::new(0x11, 0x11, 0x1b),
};

/// Catppuccin Latte.
pub const LATTE: Theme = Theme {
    rosewater: Rgb::new(0xdc, 0x8a, 0x78),
    flamingo: Rgb::new(0xdd, 0x78, 0x78),
    pink: Rgb::new(0xea, 0x76, 0xcb),
    mauve: Rgb::new(0x88, 0x39, 0xef),
    red: Rgb::new(0xd2, 0x0f, 0x39),
    maroon: Rgb::new(0xe6, 0x45, 0x53),
    peach: Rgb::new(0xfe, 0x64, 0x0b),
    yellow: Rgb::new(0xdf, 0x8e, 0x1d),
    green: Rgb::new(0x40, 0xa0, 0x2b),
    teal: Rgb::new(0x17, 0x92, 0x99),
    sky: Rgb::new(0x04, 0xa5, 0xe5),
    sapphire: Rgb::new(0x20, 0x9f, 0xb5),
    blue: Rgb::new(0x1e, 0x66, 0xf5),
    lavender: Rgb::new(0x72, 0x87, 0xfd),
    text: Rgb::new(0x4c, 0x4f, 0x69),
    subtext1: Rgb::new(0x5c, 0x5f, 0x77),
    subtext0: Rgb::new(0x6c, 0x6f, 0x85),
    overlay2: Rgb::new(0x7c, 0x7f, 0x93),
    overlay1: Rgb::new(0x8c, 0x8f, 0xa1),
    overlay0: Rgb::new(0x9c, 0xa0, 0xb0),
    surface2: Rgb::new(0xac, 0xb0, 0xbe),
    surface1: Rgb::new(0xbc, 0xc0, 0xcc),
    surface0: Rgb::new(0xcc, 0xd0, 0xda),
    base: Rgb::new(0xef, 0xf1, 0xf5),
    mantle: Rgb::new(0xe6, 0xe9, 0xef),
    crust: Rgb::new(0xdc, 0xe0, 0xe8),
};
