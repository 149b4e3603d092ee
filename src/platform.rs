//! Terminal environment detection.
//!
//! The only environment signal the app consumes: whether the terminal is
//! running on a light background. Terminals that expose this at all do it
//! through `COLORFGBG` ("fg;bg", sometimes "fg;default;bg"), where an ANSI
//! background index of 7 or above means a light palette. Classification is
//! pure; the env read is a thin wrapper, done once at startup.

use std::fmt;

/// What the terminal reports about its background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalBackground {
    /// Background index >= 7: light palette.
    Light,
    /// Background index < 7: dark palette.
    Dark,
    /// No signal, or one we couldn't parse.
    Unknown,
}

impl fmt::Display for TerminalBackground {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminalBackground::Light => write!(f, "light background"),
            TerminalBackground::Dark => write!(f, "dark background"),
            TerminalBackground::Unknown => write!(f, "unknown background"),
        }
    }
}

impl TerminalBackground {
    /// True only for a positive light signal. Unknown is not light.
    pub fn prefers_light(self) -> bool {
        self == TerminalBackground::Light
    }
}

/// Classify a raw `COLORFGBG` value.
///
/// The background is the last `;`-separated component.
pub fn classify_colorfgbg(value: &str) -> TerminalBackground {
    match value.split(';').next_back().and_then(|s| s.trim().parse::<u8>().ok()) {
        Some(bg) if bg >= 7 => TerminalBackground::Light,
        Some(_) => TerminalBackground::Dark,
        None => TerminalBackground::Unknown,
    }
}

/// Read the terminal background signal from the environment.
pub fn detect_background() -> TerminalBackground {
    match std::env::var("COLORFGBG") {
        Ok(value) => classify_colorfgbg(&value),
        Err(_) => TerminalBackground::Unknown,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_on_black_is_dark() {
        assert_eq!(classify_colorfgbg("15;0"), TerminalBackground::Dark);
    }

    #[test]
    fn black_on_white_is_light() {
        assert_eq!(classify_colorfgbg("0;15"), TerminalBackground::Light);
    }

    #[test]
    fn background_seven_counts_as_light() {
        assert_eq!(classify_colorfgbg("0;7"), TerminalBackground::Light);
    }

    #[test]
    fn three_component_form_uses_the_last() {
        assert_eq!(classify_colorfgbg("12;default;0"), TerminalBackground::Dark);
    }

    #[test]
    fn garbage_is_unknown() {
        assert_eq!(classify_colorfgbg(""), TerminalBackground::Unknown);
        assert_eq!(classify_colorfgbg("default"), TerminalBackground::Unknown);
        assert_eq!(classify_colorfgbg("15;default"), TerminalBackground::Unknown);
    }

    #[test]
    fn only_a_positive_light_signal_prefers_light() {
        assert!(TerminalBackground::Light.prefers_light());
        assert!(!TerminalBackground::Dark.prefers_light());
        assert!(!TerminalBackground::Unknown.prefers_light());
    }
}
