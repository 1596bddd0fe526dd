//! Theme selection and accent-color preferences

use crate::color::{format_component, parse_color};
use crate::document::DocumentSurface;
use crate::error::ShellError;
use crate::palette::{accents_for, find_theme, AccentColor, THEMES};
use crate::preferences::{PreferenceError, PreferenceStore, ACCENT_COLOR_KEY, THEME_KEY};
use std::rc::Rc;

/// Root style property holding the accent hue
pub const ACCENT_HUE_PROPERTY: &str = "--accent-color-h";
/// Root style property holding the accent saturation
pub const ACCENT_SATURATION_PROPERTY: &str = "--accent-color-s";
/// Root style property holding the accent lightness
pub const ACCENT_LIGHTNESS_PROPERTY: &str = "--accent-color-l";

/// Source of the active theme
pub trait ThemeProvider {
    /// Name of the theme the document was loaded with
    fn theme_name(&self) -> String;

    /// Stylesheet URL of that theme
    fn theme_path(&self) -> String;
}

/// Theme provider that reads the persisted theme once, at load time
///
/// Switching themes requires a document reload, so the resolved name is
/// fixed for the lifetime of the provider.
#[derive(Debug, Clone)]
pub struct StoredThemeProvider {
    theme_name: String,
}

impl StoredThemeProvider {
    /// Resolve the theme from `store`, falling back to `default_theme` when
    /// nothing (or an unknown theme) is persisted
    pub fn load(store: &dyn PreferenceStore, default_theme: &str) -> Self {
        let theme_name = match store.get(THEME_KEY) {
            Some(name) if find_theme(&name).is_some() => name,
            Some(name) => {
                log::warn!(
                    "Ignoring unknown persisted theme '{}', using '{}'",
                    name,
                    default_theme
                );
                default_theme.to_string()
            }
            None => default_theme.to_string(),
        };

        Self { theme_name }
    }
}

impl ThemeProvider for StoredThemeProvider {
    fn theme_name(&self) -> String {
        self.theme_name.clone()
    }

    fn theme_path(&self) -> String {
        format!("themes/{}.css", self.theme_name)
    }
}

/// One entry of a selector menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub value: String,
    pub label: String,
    /// CSS color swatch shown next to the label, for accent items
    pub swatch: Option<String>,
    pub toggled: bool,
}

/// State of the sidebar's theme and accent selectors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSection {
    pub theme_items: Vec<MenuItem>,
    pub accent_items: Vec<MenuItem>,
    /// The accent selector is hidden for themes without a palette
    pub accent_hidden: bool,
}

/// Reads and writes the user's theme and accent-color preferences
pub struct ThemePreferences {
    store: Rc<dyn PreferenceStore>,
    provider: Rc<dyn ThemeProvider>,
}

impl ThemePreferences {
    pub fn new(store: Rc<dyn PreferenceStore>, provider: Rc<dyn ThemeProvider>) -> Self {
        Self { store, provider }
    }

    pub fn theme_name(&self) -> String {
        self.provider.theme_name()
    }

    pub fn theme_path(&self) -> String {
        self.provider.theme_path()
    }

    /// Persist a new theme name; it takes effect on the next document load
    pub fn set_theme(&self, theme_name: &str) -> Result<(), PreferenceError> {
        self.store.set(THEME_KEY, theme_name)
    }

    /// Persist a new accent color name
    pub fn set_accent_color_name(&self, name: &str) -> Result<(), PreferenceError> {
        self.store.set(ACCENT_COLOR_KEY, name)
    }

    /// Resolve the persisted accent color against the palette of `theme_name`
    ///
    /// A missing or foreign accent name is corrected to the first palette
    /// entry. An empty palette clears the persisted name and yields `None`.
    pub fn accent_color(&self, theme_name: &str) -> Result<Option<AccentColor>, PreferenceError> {
        let palette = accents_for(theme_name);
        let stored = self.store.get(ACCENT_COLOR_KEY);

        let Some(first) = palette.first() else {
            if stored.is_some() {
                log::debug!("Theme '{}' has no accent palette, clearing accent", theme_name);
                self.store.remove(ACCENT_COLOR_KEY)?;
            }
            return Ok(None);
        };

        if let Some(name) = stored.as_deref() {
            if let Some(accent) = palette.iter().find(|accent| accent.name == name) {
                return Ok(Some(*accent));
            }
            log::debug!(
                "Accent '{}' is not part of theme '{}', falling back to '{}'",
                name,
                theme_name,
                first.name
            );
        }

        self.store.set(ACCENT_COLOR_KEY, first.name)?;
        Ok(Some(*first))
    }

    /// Publish the resolved accent color as hue/saturation/lightness properties
    ///
    /// # Returns
    /// * `Ok(Some(AccentColor))` - The accent that was applied
    /// * `Ok(None)` - The active theme has no accent palette; nothing was written
    pub fn apply_accent_color(
        &self,
        document: &dyn DocumentSurface,
    ) -> Result<Option<AccentColor>, ShellError> {
        let theme_name = self.theme_name();
        let Some(accent) = self.accent_color(&theme_name)? else {
            return Ok(None);
        };

        let color = parse_color(accent.value)?;
        document.set_style_property(ACCENT_HUE_PROPERTY, &format_component(color.h));
        document.set_style_property(
            ACCENT_SATURATION_PROPERTY,
            &format!("{}%", format_component(color.s)),
        );
        document.set_style_property(
            ACCENT_LIGHTNESS_PROPERTY,
            &format!("{}%", format_component(color.l)),
        );

        log::info!("Applied accent color '{}' ({})", accent.name, accent.value);
        Ok(Some(accent))
    }

    /// Build the selector state for the active theme
    pub fn theme_section(&self) -> Result<ThemeSection, PreferenceError> {
        let theme_name = self.theme_name();
        let accent = self.accent_color(&theme_name)?;

        let theme_items = THEMES
            .iter()
            .map(|theme| MenuItem {
                value: theme.name.to_string(),
                label: theme.label.to_string(),
                swatch: None,
                toggled: theme.name == theme_name,
            })
            .collect();

        let accent_items: Vec<MenuItem> = accents_for(&theme_name)
            .iter()
            .map(|candidate| MenuItem {
                value: candidate.name.to_string(),
                label: capitalize(candidate.name),
                swatch: Some(candidate.value.to_string()),
                toggled: accent.is_some_and(|a| a.name == candidate.name),
            })
            .collect();

        Ok(ThemeSection {
            accent_hidden: accent_items.is_empty(),
            theme_items,
            accent_items,
        })
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
