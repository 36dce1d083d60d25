//! Color constants and theme palettes for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Quadrant;

// Quadrant colors follow the matrix, red for act now down to grey for drop.

/// Used for Do First
pub const CRIMSON: Color = Color::Rgb(190, 30, 45);
/// Used for Schedule
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Used for Delegate
pub const DARK_GREEN: Color = Color::Rgb(0, 110, 60);
/// Used for Eliminate
pub const SLATE: Color = Color::Rgb(100, 110, 125);

/// Colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub muted: Color,
    pub status_fg: Color,
    pub status_bg: Color,
}

pub const DARK: Palette = Palette {
    fg: Color::White,
    bg: Color::Rgb(18, 18, 24),
    accent: GOLD,
    muted: Color::DarkGray,
    status_fg: Color::Rgb(20, 20, 20),
    status_bg: GOLD,
};

pub const LIGHT: Palette = Palette {
    fg: Color::Rgb(20, 20, 20),
    bg: Color::Rgb(245, 245, 240),
    accent: Color::Rgb(30, 80, 200),
    muted: Color::Gray,
    status_fg: Color::White,
    status_bg: Color::Rgb(30, 80, 200),
};

pub fn palette(dark_theme: bool) -> Palette {
    if dark_theme {
        DARK
    } else {
        LIGHT
    }
}

pub fn quadrant_color(quadrant: Quadrant) -> Color {
    match quadrant {
        Quadrant::DoFirst => CRIMSON,
        Quadrant::Schedule => GOLD,
        Quadrant::Delegate => DARK_GREEN,
        Quadrant::Eliminate => SLATE,
    }
}
