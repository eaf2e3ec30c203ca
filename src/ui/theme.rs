//! Theme management and ANSI escape sequence generation.
//!
//! Two themes are built in, and custom themes can be loaded from TOML files.
//! Colors are hex strings converted to 24-bit ANSI escapes.
//!
//! # Built-in Themes
//!
//! - `library-dark`: grey and blue on a dark terminal (default)
//! - `library-light`: the same palette tuned for light terminals
//!
//! # TOML Format
//!
//! Every color is optional; missing ones fall back to `library-dark`.
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#ffffff"
//! header_bg = "#4078c0"
//! selection_fg = "#ffffff"
//! selection_bg = "#6e5494"
//! text_normal = "#e0e0e0"
//! text_dim = "#8a8a8a"
//! border = "#333333"
//! search_bar_border = "#4078c0"
//! match_highlight_fg = "#222222"
//! match_highlight_bg = "#f0c674"
//! empty_state_fg = "#4078c0"
//! status_available = "#5fb85f"
//! status_out = "#d9534f"
//! status_reserved = "#f0a030"
//! bar_fg = "#4078c0"
//! error_fg = "#d9534f"
//! ```

use crate::domain::error::{LibrarianError, Result};
use crate::domain::BookStatus;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_THEME: &str = "library-dark";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    #[serde(default)]
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeColors {
    pub header_fg: String,
    /// Optional header background color.
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Dimmed text color (footer, secondary info).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    pub search_bar_border: String,
    /// Fuzzy match highlight foreground.
    pub match_highlight_fg: String,
    /// Fuzzy match highlight background.
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    pub status_available: String,
    pub status_out: String,
    pub status_reserved: String,

    /// Chart bar color.
    pub bar_fg: String,

    pub error_fg: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            header_fg: "#ffffff".into(),
            header_bg: Some("#4078c0".into()),
            selection_fg: "#ffffff".into(),
            selection_bg: "#6e5494".into(),
            text_normal: "#e0e0e0".into(),
            text_dim: "#8a8a8a".into(),
            border: "#333333".into(),
            search_bar_border: "#4078c0".into(),
            match_highlight_fg: "#222222".into(),
            match_highlight_bg: "#f0c674".into(),
            empty_state_fg: "#4078c0".into(),
            status_available: "#5fb85f".into(),
            status_out: "#d9534f".into(),
            status_reserved: "#f0a030".into(),
            bar_fg: "#4078c0".into(),
            error_fg: "#d9534f".into(),
        }
    }
}

impl Theme {
    /// Names accepted by [`Theme::from_name`].
    pub const BUILT_IN: [&'static str; 2] = ["library-dark", "library-light"];

    /// Loads a built-in theme by name. Returns `None` for an unknown name.
    ///
    /// # Example
    ///
    /// ```
    /// use librarian::ui::Theme;
    ///
    /// let theme = Theme::from_name("library-light").unwrap();
    /// assert_eq!(theme.name, "library-light");
    /// assert!(Theme::from_name("neon").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "library-dark" => include_str!("../../themes/library-dark.toml"),
            "library-light" => include_str!("../../themes/library-light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`LibrarianError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| LibrarianError::Theme(format!("failed to read theme file {}: {e}", path.display())))?;

        toml::from_str(&contents).map_err(|e| LibrarianError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Picks the theme for a configuration: a theme file wins over a name.
    ///
    /// # Errors
    ///
    /// Returns [`LibrarianError::Theme`] for an unreadable file or unknown name.
    pub fn resolve(name: Option<&str>, file: Option<&Path>) -> Result<Self> {
        if let Some(file) = file {
            return Self::from_file(file);
        }
        match name {
            None => Ok(Self::default()),
            Some(name) => Self::from_name(name).ok_or_else(|| {
                LibrarianError::Theme(format!(
                    "unknown theme {name:?}, expected one of {}",
                    Self::BUILT_IN.join(", ")
                ))
            }),
        }
    }

    /// Color for a book status badge.
    #[must_use]
    pub fn status_color(&self, status: BookStatus) -> &str {
        match status {
            BookStatus::Available => &self.colors.status_available,
            BookStatus::Out => &self.colors.status_out,
            BookStatus::Reserved => &self.colors.status_reserved,
        }
    }

    /// Converts a hex color to RGB, or white when it does not parse.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground escape, `\x1b[38;2;r;g;bm`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape, `\x1b[48;2;r;g;bm`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// The `library-dark` palette.
    fn default() -> Self {
        Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_themes_parse() {
        for name in Theme::BUILT_IN {
            assert!(Theme::from_name(name).is_some(), "{name} should parse");
        }
        assert_eq!(Theme::from_name(DEFAULT_THEME), Some(Theme::default()));
    }

    #[test]
    fn partial_theme_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mine.toml");
        std::fs::write(&path, "name = \"mine\"\n[colors]\nborder = \"#010203\"\n").unwrap();

        let theme = Theme::resolve(Some("ignored"), Some(&path)).unwrap();
        assert_eq!(theme.name, "mine");
        assert_eq!(theme.colors.border, "#010203");
        assert_eq!(theme.colors.text_dim, ThemeColors::default().text_dim);
    }

    #[test]
    fn unknown_name_is_an_error() {
        assert!(matches!(Theme::resolve(Some("neon"), None), Err(LibrarianError::Theme(_))));
    }

    #[test]
    fn escapes() {
        assert_eq!(Theme::fg("#4078c0"), "\u{1b}[38;2;64;120;192m");
        assert_eq!(Theme::bg("nonsense"), "\u{1b}[48;2;255;255;255m");
    }
}
