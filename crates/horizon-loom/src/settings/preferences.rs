//! Typed theme and font preferences.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use horizon_loom_core::Signal;
use horizon_loom_core::logging::targets;
use serde::{Deserialize, Serialize};

use super::{Settings, SettingsFormat};
use crate::error::Result;
use crate::widgets::{is_hex_color, parse_hex_color};

/// Preference keys as stored in the settings file.
pub mod keys {
    pub const THEME: &str = "theme";
    pub const SYNTAX_THEME: &str = "syntaxTheme";
    pub const PRIMARY_COLOR: &str = "primaryColor";
    pub const BORDER_RADIUS: &str = "borderRadius";
    pub const BASE_FONT_SIZE: &str = "baseFontSize";
    pub const HEADING_FONT: &str = "headingFont";
    pub const BODY_FONT: &str = "bodyFont";
    pub const LIGHT_BACKGROUND: &str = "lightBackground";
    pub const LIGHT_FOREGROUND: &str = "lightForeground";
    pub const DARK_BACKGROUND: &str = "darkBackground";
    pub const DARK_FOREGROUND: &str = "darkForeground";
}

/// Syntax highlighting themes a user can pick.
pub const SYNTAX_THEMES: &[&str] = &[
    "Atom Dark",
    "CB",
    "Coy",
    "Darcula",
    "Dark",
    "Dracula",
    "Duotone Dark",
    "Duotone Light",
    "Funky",
    "GitHub",
    "Hopscotch",
    "Okaidia",
    "One Dark",
    "One Light",
    "Solarized Light",
    "Tomorrow",
    "Twilight",
    "VS Code Dark+",
    "Xonokai",
];

/// Broad font family of a [`FontOption`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontCategory {
    SansSerif,
    Serif,
    Monospace,
}

/// A font a user can pick for headings or body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontOption {
    pub name: &'static str,
    pub category: FontCategory,
}

const fn font(name: &'static str, category: FontCategory) -> FontOption {
    FontOption { name, category }
}

/// Fonts offered by font pickers.
pub const FONT_OPTIONS: &[FontOption] = &[
    font("Inter", FontCategory::SansSerif),
    font("Urbanist", FontCategory::SansSerif),
    font("Roboto", FontCategory::SansSerif),
    font("Open Sans", FontCategory::SansSerif),
    font("Lato", FontCategory::SansSerif),
    font("Montserrat", FontCategory::SansSerif),
    font("Poppins", FontCategory::SansSerif),
    font("Playfair Display", FontCategory::Serif),
    font("Merriweather", FontCategory::Serif),
    font("Lora", FontCategory::Serif),
    font("Roboto Mono", FontCategory::Monospace),
    font("Space Mono", FontCategory::Monospace),
];

/// Light or dark color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(()),
        }
    }
}

/// The four customizable surface colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    LightBackground,
    LightForeground,
    DarkBackground,
    DarkForeground,
}

impl ColorSlot {
    pub fn key(self) -> &'static str {
        match self {
            ColorSlot::LightBackground => keys::LIGHT_BACKGROUND,
            ColorSlot::LightForeground => keys::LIGHT_FOREGROUND,
            ColorSlot::DarkBackground => keys::DARK_BACKGROUND,
            ColorSlot::DarkForeground => keys::DARK_FOREGROUND,
        }
    }
}

/// Resolved preferences with every missing or invalid value defaulted.
///
/// Serializes with the same camelCase keys as the settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub theme: Theme,
    pub syntax_theme: String,
    pub primary_color: String,
    /// Corner radius in rem.
    pub border_radius: f32,
    /// Root font size in px.
    pub base_font_size: f32,
    pub heading_font: String,
    pub body_font: String,
    pub light_background: String,
    pub light_foreground: String,
    pub dark_background: String,
    pub dark_foreground: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            syntax_theme: "One Dark".to_string(),
            primary_color: "#2563eb".to_string(),
            border_radius: 0.3,
            base_font_size: 16.0,
            heading_font: "Urbanist".to_string(),
            body_font: "Urbanist".to_string(),
            light_background: "#ffffff".to_string(),
            light_foreground: "#111827".to_string(),
            dark_background: "#030712".to_string(),
            dark_foreground: "#f9fafb".to_string(),
        }
    }
}

impl Preferences {
    /// Read preferences from a settings store.
    pub fn from_settings(settings: &Settings) -> Self {
        let defaults = Self::default();
        let color = |key: &str, default: String| {
            settings
                .get(key)
                .filter(|v| is_hex_color(v))
                .unwrap_or(default)
        };
        let positive = |key: &str, default: f32| {
            settings
                .get_parsed::<f32>(key)
                .filter(|v| v.is_finite() && *v >= 0.0)
                .unwrap_or(default)
        };
        let font = |key: &str, default: String| {
            settings
                .get(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(default)
        };

        Self {
            theme: settings.get_parsed(keys::THEME).unwrap_or(defaults.theme),
            syntax_theme: settings
                .get(keys::SYNTAX_THEME)
                .filter(|v| SYNTAX_THEMES.contains(&v.as_str()))
                .unwrap_or(defaults.syntax_theme),
            primary_color: color(keys::PRIMARY_COLOR, defaults.primary_color),
            border_radius: positive(keys::BORDER_RADIUS, defaults.border_radius),
            base_font_size: positive(keys::BASE_FONT_SIZE, defaults.base_font_size),
            heading_font: font(keys::HEADING_FONT, defaults.heading_font),
            body_font: font(keys::BODY_FONT, defaults.body_font),
            light_background: color(keys::LIGHT_BACKGROUND, defaults.light_background),
            light_foreground: color(keys::LIGHT_FOREGROUND, defaults.light_foreground),
            dark_background: color(keys::DARK_BACKGROUND, defaults.dark_background),
            dark_foreground: color(keys::DARK_FOREGROUND, defaults.dark_foreground),
        }
    }

    /// The background and foreground colors for the active theme.
    pub fn surface_colors(&self) -> (&str, &str) {
        match self.theme {
            Theme::Light => (&self.light_background, &self.light_foreground),
            Theme::Dark => (&self.dark_background, &self.dark_foreground),
        }
    }

    /// Fonts that are not bundled and must be fetched by the host.
    pub fn fonts_to_load(&self) -> Vec<&str> {
        let mut fonts = Vec::new();
        for font in [self.heading_font.as_str(), self.body_font.as_str()] {
            if font != "Urbanist" && !fonts.contains(&font) {
                fonts.push(font);
            }
        }
        fonts
    }
}

/// Preferences backed by a settings file, written on every change.
pub struct PreferenceStore {
    settings: Settings,
}

impl PreferenceStore {
    /// Open the store at `path`, reading it once.
    ///
    /// The format follows the file extension. A missing or corrupt file
    /// yields an empty store.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let format = SettingsFormat::from_path(path);
        let settings = Settings::load_or_default(path, format);
        settings.set_auto_save(path, format);
        tracing::debug!(target: targets::SETTINGS, path = %path.display(), "preferences opened");
        Self { settings }
    }

    /// Open the store at the platform default location.
    ///
    /// Returns `None` if the platform has no config directory.
    pub fn open_default() -> Option<Self> {
        Self::default_path().map(Self::open)
    }

    /// The platform config path, e.g. `~/.config/horizon-loom/preferences.json`.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "Horizon Analytic Studios", "Horizon Loom")
            .map(|dirs| dirs.config_dir().join("preferences.json"))
    }

    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            settings: Settings::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Signal emitted with the key of every changed preference.
    pub fn changed(&self) -> &Signal<String> {
        self.settings.changed()
    }

    /// The current preferences.
    pub fn preferences(&self) -> Preferences {
        Preferences::from_settings(&self.settings)
    }

    pub fn set_theme(&self, theme: Theme) {
        self.settings.set(keys::THEME, theme.as_str());
    }

    /// Switch between light and dark, returning the new theme.
    pub fn toggle_theme(&self) -> Theme {
        let theme = self.preferences().theme.toggled();
        self.set_theme(theme);
        theme
    }

    /// Set the syntax theme. Unknown names are ignored and return `false`.
    pub fn set_syntax_theme(&self, name: &str) -> bool {
        if !SYNTAX_THEMES.contains(&name) {
            return false;
        }
        self.settings.set(keys::SYNTAX_THEME, name);
        true
    }

    pub fn set_primary_color(&self, hex: &str) -> Result<()> {
        let hex = parse_hex_color(hex)?;
        self.settings.set(keys::PRIMARY_COLOR, hex);
        Ok(())
    }

    pub fn set_color(&self, slot: ColorSlot, hex: &str) -> Result<()> {
        let hex = parse_hex_color(hex)?;
        self.settings.set(slot.key(), hex);
        Ok(())
    }

    pub fn set_border_radius(&self, rem: f32) {
        self.settings.set(keys::BORDER_RADIUS, rem.to_string());
    }

    pub fn set_base_font_size(&self, px: f32) {
        self.settings.set(keys::BASE_FONT_SIZE, px.to_string());
    }

    pub fn set_heading_font(&self, name: &str) {
        self.settings.set(keys::HEADING_FONT, name);
    }

    pub fn set_body_font(&self, name: &str) {
        self.settings.set(keys::BODY_FONT, name);
    }

    /// Forget the custom colors, radius and font size.
    pub fn reset_customizations(&self) {
        for key in [
            keys::PRIMARY_COLOR,
            keys::BORDER_RADIUS,
            keys::BASE_FONT_SIZE,
            keys::LIGHT_BACKGROUND,
            keys::LIGHT_FOREGROUND,
            keys::DARK_BACKGROUND,
            keys::DARK_FOREGROUND,
        ] {
            self.settings.remove(key);
        }
    }
}

impl fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("settings", &self.settings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_empty_store() {
        let prefs = Preferences::from_settings(&Settings::new());
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.theme.as_str(), "light");
        assert_eq!(prefs.syntax_theme, "One Dark");
        assert_eq!(prefs.base_font_size, 16.0);
    }

    #[test]
    fn test_serialized_keys_match_settings_keys() {
        let value = serde_json::to_value(Preferences::default()).unwrap();
        let object = value.as_object().unwrap();
        for key in [
            keys::THEME,
            keys::SYNTAX_THEME,
            keys::PRIMARY_COLOR,
            keys::BORDER_RADIUS,
            keys::BASE_FONT_SIZE,
            keys::HEADING_FONT,
            keys::BODY_FONT,
            keys::LIGHT_BACKGROUND,
            keys::LIGHT_FOREGROUND,
            keys::DARK_BACKGROUND,
            keys::DARK_FOREGROUND,
        ] {
            assert!(object.contains_key(key), "missing {key}");
        }
        assert_eq!(object[keys::THEME], "light");

        let partial: Preferences = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(partial.theme, Theme::Dark);
        assert_eq!(partial.primary_color, "#2563eb");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let settings = Settings::new();
        settings.set(keys::THEME, "sepia");
        settings.set(keys::SYNTAX_THEME, "Nope");
        settings.set(keys::PRIMARY_COLOR, "blue");
        settings.set(keys::BORDER_RADIUS, "round");
        settings.set(keys::BASE_FONT_SIZE, "-4");
        settings.set(keys::HEADING_FONT, "  ");

        assert_eq!(Preferences::from_settings(&settings), Preferences::default());
    }

    #[test]
    fn test_store_setters() {
        let store = PreferenceStore::in_memory();
        assert_eq!(store.toggle_theme(), Theme::Dark);
        assert!(store.set_syntax_theme("Dracula"));
        assert!(!store.set_syntax_theme("Nope"));
        store.set_primary_color("#FF0000").unwrap();
        assert!(store.set_color(ColorSlot::DarkBackground, "#12345").is_err());
        store.set_base_font_size(18.0);
        store.set_heading_font("Lora");

        let prefs = store.preferences();
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.syntax_theme, "Dracula");
        assert_eq!(prefs.primary_color, "#FF0000");
        assert_eq!(prefs.dark_background, "#030712");
        assert_eq!(prefs.base_font_size, 18.0);
        assert_eq!(prefs.surface_colors(), ("#030712", "#f9fafb"));
        assert_eq!(prefs.fonts_to_load(), vec!["Lora"]);

        store.reset_customizations();
        assert_eq!(store.preferences().primary_color, "#2563eb");
        assert_eq!(store.preferences().heading_font, "Lora");
    }

    #[test]
    fn test_store_persists_every_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");

        let store = PreferenceStore::open(&path);
        store.set_theme(Theme::Dark);
        store.set_body_font("Inter");
        drop(store);

        let reopened = PreferenceStore::open(&path);
        let prefs = reopened.preferences();
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.body_font, "Inter");
    }
}
