//! Theme management and ANSI escape sequence generation.
//!
//! This module defines the color scheme system for the plugin, supporting both
//! built-in themes (Catppuccin variants) and custom themes loaded from TOML files.
//! It provides utilities for converting hex colors to ANSI escape sequences.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//! - `catppuccin-frappe`: Cool dark theme
//! - `catppuccin-macchiato`: Warm dark theme
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! input_border = "#f5c2e7"
//! highlight_fg = "#1e1e2e"
//! highlight_bg = "#f9e2af"
//! placeholder_fg = "#89b4fa"
//! favorite_fg = "#f9e2af"
//! loading_fg = "#94e2d5"
//! tab_active_fg = "#1e1e2e"
//! tab_active_bg = "#89b4fa"
//! error_fg = "#f38ba8"
//! ```
//!
//! # Example
//!
//! ```rust
//! use eventscout::ui::theme::Theme;
//!
//! let theme = Theme::from_name("catppuccin-mocha").unwrap();
//! println!("{}", Theme::fg(&theme.colors.header_fg));
//! println!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! ```

use crate::domain::error::{EventScoutError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
///
/// Contains theme metadata and color definitions. Can be loaded from built-in
/// themes or custom TOML files.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements.
///
/// All colors are specified as hex strings (e.g., "#cdd6f4"). Optional fields
/// default to `None`, allowing themes to opt out of certain styling.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected row foreground color.
    pub selection_fg: String,
    /// Selected row background color.
    pub selection_bg: String,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, secondary info).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Search form border color.
    pub input_border: String,
    /// Keyword match highlight foreground.
    pub highlight_fg: String,
    /// Keyword match highlight background.
    pub highlight_bg: String,

    /// Empty list and field placeholder color.
    pub placeholder_fg: String,

    /// Favorite star color.
    pub favorite_fg: String,

    /// Loading and "Searching..." indicator color.
    pub loading_fg: String,

    /// Active tab foreground.
    pub tab_active_fg: String,
    /// Active tab background.
    pub tab_active_bg: String,

    /// Status line color for failures.
    #[serde(default = "default_error_fg")]
    pub error_fg: String,
}

fn default_error_fg() -> String {
    "#f38ba8".to_string()
}

/// Built-in themes, compiled into the plugin.
static BUILTIN: [(&str, &str); 4] = [
    ("catppuccin-mocha", include_str!("../../themes/catppuccin-mocha.toml")),
    ("catppuccin-latte", include_str!("../../themes/catppuccin-latte.toml")),
    ("catppuccin-frappe", include_str!("../../themes/catppuccin-frappe.toml")),
    ("catppuccin-macchiato", include_str!("../../themes/catppuccin-macchiato.toml")),
];

/// Rendered in place of any color that is not `#rrggbb`.
const FALLBACK_RGB: (u8, u8, u8) = (255, 255, 255);

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` for names outside [`Theme::builtin_names`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use eventscout::ui::theme::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-mocha").unwrap();
    /// assert_eq!(theme.name, "catppuccin-mocha");
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let (_, source) = BUILTIN.iter().find(|(builtin, _)| *builtin == name)?;
        toml::from_str(source).ok()
    }

    /// Names accepted by [`Theme::from_name`].
    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        BUILTIN.iter().map(|(name, _)| *name)
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`EventScoutError::Theme`] if the file cannot be read or is
    /// not a complete theme.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use eventscout::ui::theme::Theme;
    ///
    /// let theme = Theme::from_file("/path/to/theme.toml")?;
    /// # Ok::<(), eventscout::EventScoutError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| EventScoutError::Theme(format!("cannot read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| EventScoutError::Theme(format!("invalid theme {}: {e}", path.display())))
    }

    /// ANSI 24-bit foreground escape for a `#rrggbb` color.
    ///
    /// # Example
    ///
    /// ```rust
    /// use eventscout::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#ff0080"), "\u{1b}[38;2;255;0;128m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        sgr_color(38, hex)
    }

    /// ANSI 24-bit background escape for a `#rrggbb` color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        sgr_color(48, hex)
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears every attribute set by the other escapes.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

/// Parses `#rrggbb` (the `#` is optional).
fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Select Graphic Rendition sequence; `layer` is 38 (fg) or 48 (bg).
fn sgr_color(layer: u8, hex: &str) -> String {
    let (r, g, b) = parse_hex(hex).unwrap_or(FALLBACK_RGB);
    format!("\u{001b}[{layer};2;{r};{g};{b}m")
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the bundled Mocha theme does not parse; the
    /// `builtin_themes_parse` test guards against that.
    fn default() -> Self {
        Self::from_name(BUILTIN[0].0).expect("bundled catppuccin-mocha theme parses")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        for name in Theme::builtin_names() {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn custom_theme_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mocha = toml::to_string(&Theme::default()).unwrap();
        file.write_all(mocha.replace("catppuccin-mocha", "mine").as_bytes()).unwrap();
        assert_eq!(Theme::from_file(file.path()).unwrap().name, "mine");

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        broken.write_all(b"name = 3").unwrap();
        assert!(matches!(Theme::from_file(broken.path()), Err(EventScoutError::Theme(_))));
    }

    #[test]
    fn hex_conversion() {
        assert_eq!(Theme::fg("#ff0080"), "\u{1b}[38;2;255;0;128m");
        assert_eq!(Theme::bg("bogus"), "\u{1b}[48;2;255;255;255m");
        assert_eq!(parse_hex("12345é"), None);
        assert_eq!(parse_hex(" 0a0B0c"), Some((10, 11, 12)));
    }
}
