//! TUI color semantics: one palette per display mode.
//!
//! The whole frame renders from the active [`Theme`], so switching mode is
//! the root-level restyle. Palettes are Catppuccin (Mocha for dark, Latte
//! for light). Reveal fades interpolate from the background toward a span's
//! target color, which keeps mid-fade text legible on both palettes.

use ratatui::style::{Color, Modifier, Style};

use crate::prefs::ThemeMode;

// ============================================================================
// PALETTES
// ============================================================================

/// Semantic colors consumed by the rendering layer.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Frame background.
    pub bg: Color,
    /// Body text.
    pub fg: Color,
    /// De-emphasized text: section labels, help line, disabled button.
    pub muted: Color,
    /// Interactive / headline color.
    pub accent: Color,
    /// Sent-confirmation color.
    pub success: Color,
    /// Field underlines and separators.
    pub border: Color,
}

/// Palette for a display mode.
pub fn palette(mode: ThemeMode) -> Theme {
    match mode {
        ThemeMode::Dark => dark_theme(),
        ThemeMode::Light => light_theme(),
    }
}

/// Catppuccin Mocha.
fn dark_theme() -> Theme {
    Theme {
        bg: Color::Rgb(30, 30, 46),        // #1e1e2e
        fg: Color::Rgb(205, 214, 244),     // #cdd6f4
        muted: Color::Rgb(108, 112, 134),  // #6c7086
        accent: Color::Rgb(137, 180, 250), // #89b4fa
        success: Color::Rgb(166, 227, 161),// #a6e3a1
        border: Color::Rgb(88, 91, 112),   // #585b70
    }
}

/// Catppuccin Latte.
fn light_theme() -> Theme {
    Theme {
        bg: Color::Rgb(239, 241, 245),     // #eff1f5
        fg: Color::Rgb(76, 79, 105),       // #4c4f69
        muted: Color::Rgb(140, 143, 161),  // #8c8fa1
        accent: Color::Rgb(30, 102, 245),  // #1e66f5
        success: Color::Rgb(64, 160, 43),  // #40a02b
        border: Color::Rgb(172, 176, 190), // #acb0be
    }
}

/// Header glyph for a mode: sun for light, moon for dark.
pub fn mode_glyph(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Light => "☀",
        ThemeMode::Dark => "☾",
    }
}

// ============================================================================
// STYLES
// ============================================================================

impl Theme {
    pub fn base(&self) -> Style {
        Style::new().fg(self.fg).bg(self.bg)
    }

    pub fn title(&self) -> Style {
        Style::new().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn help(&self) -> Style {
        Style::new().fg(self.muted)
    }

    /// Style for a block's text at the given reveal opacity.
    pub fn revealed(&self, target: Color, opacity: f32, bold: bool) -> Style {
        let style = Style::new().fg(lerp(self.bg, target, opacity));
        if bold {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }
}

/// Linear interpolation between two RGB colors.
///
/// Non-RGB colors can't be mixed; those snap to the target.
pub fn lerp(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r0, g0, b0), Color::Rgb(r1, g1, b1)) => {
            let mix = |a: u8, b: u8| -> u8 {
                (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8
            };
            Color::Rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
        }
        _ => to,
    }
}

// ============================================================================
// TESTS
// ============================================================================
