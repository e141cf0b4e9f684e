//! Light and dark palettes, picked by the shell's appearance flag.

use ratatui::style::Color;

use crate::shell::Appearance;

pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    /// Image generator accent (blue to purple).
    pub primary: Color,
    /// Text generator accent (purple to pink).
    pub secondary: Color,
    pub success: Color,
    pub error: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub menu_bg: Color,
    pub menu_fg: Color,
    pub code_bg: Color,
}

pub const DARK_THEME: Theme = Theme {
    bg: Color::Rgb(17, 24, 39),
    fg: Color::Rgb(243, 244, 246),
    muted: Color::Rgb(156, 163, 175),
    primary: Color::Rgb(96, 165, 250),
    secondary: Color::Rgb(192, 132, 252),
    success: Color::Rgb(74, 222, 128),
    error: Color::Rgb(248, 113, 113),
    border_focused: Color::Rgb(167, 139, 250),
    border_normal: Color::Rgb(75, 85, 99),
    menu_bg: Color::Rgb(31, 41, 55),
    menu_fg: Color::Rgb(229, 231, 235),
    code_bg: Color::Rgb(3, 7, 18),
};

pub const LIGHT_THEME: Theme = Theme {
    bg: Color::Rgb(249, 250, 251),
    fg: Color::Rgb(17, 24, 39),
    muted: Color::Rgb(107, 114, 128),
    primary: Color::Rgb(37, 99, 235),
    secondary: Color::Rgb(147, 51, 234),
    success: Color::Rgb(22, 163, 74),
    error: Color::Rgb(220, 38, 38),
    border_focused: Color::Rgb(124, 58, 237),
    border_normal: Color::Rgb(209, 213, 219),
    menu_bg: Color::Rgb(229, 231, 235),
    menu_fg: Color::Rgb(17, 24, 39),
    code_bg: Color::Rgb(243, 244, 246),
};

impl Theme {
    pub fn for_appearance(appearance: Appearance) -> &'static Theme {
        match appearance {
            Appearance::Dark => &DARK_THEME,
            Appearance::Light => &LIGHT_THEME,
        }
    }
}
