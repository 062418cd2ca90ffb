//! Terminal styling for text output.
//!
//! ANSI colors are used to tint regimes and occupation bars. Color is turned
//! off by `NO_COLOR` or `TERM=dumb`, and bars fall back to ASCII unless the
//! locale advertises UTF-8.

use fermidirac_lib::Regime;

/// Raw ANSI escape sequences.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const GRAY: &str = "\x1b[90m";
    /// Degenerate regime and filled states.
    pub const CYAN: &str = "\x1b[36m";
    /// Intermediate regime.
    pub const ORANGE: &str = "\x1b[38;5;208m";
    /// Classical regime.
    pub const RED: &str = "\x1b[31m";
}

/// Resolved color codes: real escapes or empty strings.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub reset: &'static str,
    pub bold: &'static str,
    pub gray: &'static str,
    pub cyan: &'static str,
    pub orange: &'static str,
    pub red: &'static str,
}

impl Palette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            bold: colors::BOLD,
            gray: colors::GRAY,
            cyan: colors::CYAN,
            orange: colors::ORANGE,
            red: colors::RED,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            bold: "",
            gray: "",
            cyan: "",
            orange: "",
            red: "",
        }
    }

    /// Pick `colored()` or `plain()` from the environment.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Color used for a regime label.
    #[must_use]
    pub fn regime(&self, regime: Regime) -> &'static str {
        match regime {
            Regime::Degenerate => self.cyan,
            Regime::Intermediate => self.orange,
            Regime::Classical => self.red,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Whether ANSI colors should be emitted (honours `NO_COLOR` and `TERM=dumb`).
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    !matches!(std::env::var("TERM"), Ok(term) if term.eq_ignore_ascii_case("dumb"))
}

/// Whether `LANG` or `LC_ALL` advertise a UTF-8 locale.
#[must_use]
pub fn supports_unicode() -> bool {
    ["LC_ALL", "LANG"].iter().any(|key| {
        std::env::var(key)
            .map(|value| value.to_uppercase().contains("UTF"))
            .unwrap_or(false)
    })
}

/// Horizontal bar of `width` cells filled in proportion to `occupation`.
///
/// Values outside `[0, 1]` are clamped; NaN renders as an empty bar.
///
/// ```
/// # use fermidirac_cli::terminal::occupation_bar;
/// assert_eq!(occupation_bar(0.5, 10, false), "#####.....");
/// assert_eq!(occupation_bar(1.0, 4, true), "████");
/// ```
#[must_use]
pub fn occupation_bar(occupation: f64, width: usize, unicode: bool) -> String {
    let (full, empty) = if unicode { ('█', '░') } else { ('#', '.') };
    let fraction = if occupation.is_nan() {
        0.0
    } else {
        occupation.clamp(0.0, 1.0)
    };
    let filled = (fraction * width as f64).round() as usize;
    std::iter::repeat(full)
        .take(filled)
        .chain(std::iter::repeat(empty).take(width - filled))
        .collect()
}
