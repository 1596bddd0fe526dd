//! Built-in themes and their accent-color palettes

/// A named accent color within a theme palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccentColor {
    /// Name persisted in preferences (e.g., "green")
    pub name: &'static str,
    /// CSS color value
    pub value: &'static str,
}

/// A theme known to the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Theme identifier (e.g., "vanilla")
    pub name: &'static str,
    /// Label shown in the theme selector
    pub label: &'static str,
    /// Ordered accent palette; empty when the theme has no accent customization
    pub accents: &'static [AccentColor],
}

const MACOS_ACCENTS: &[AccentColor] = &[
    AccentColor {
        name: "blue",
        value: "hsl(211, 96.7%, 52.9%)",
    },
    AccentColor {
        name: "green",
        value: "hsl(88, 35%, 46%)",
    },
    AccentColor {
        name: "red",
        value: "hsl(344, 65%, 45%)",
    },
    AccentColor {
        name: "purple",
        value: "hsl(290, 40%, 46%)",
    },
    AccentColor {
        name: "yellowgreen",
        value: "hsl(61, 28%, 45%)",
    },
];

const VANILLA_ACCENTS: &[AccentColor] = &[
    AccentColor {
        name: "blue",
        value: "hsl(211, 86%, 57%)",
    },
    AccentColor {
        name: "green",
        value: "hsl(88, 35%, 46%)",
    },
    AccentColor {
        name: "red",
        value: "hsl(344, 65%, 45%)",
    },
    AccentColor {
        name: "purple",
        value: "hsl(290, 40%, 46%)",
    },
    AccentColor {
        name: "yellowgreen",
        value: "hsl(61, 28%, 45%)",
    },
];

/// All themes, in selector order
pub const THEMES: &[Theme] = &[
    Theme {
        name: "macos",
        label: "MacOS",
        accents: MACOS_ACCENTS,
    },
    Theme {
        name: "material",
        label: "Material",
        accents: &[],
    },
    Theme {
        name: "vanilla",
        label: "Vanilla",
        accents: VANILLA_ACCENTS,
    },
];

/// Look up a theme by name
pub fn find_theme(name: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|theme| theme.name == name)
}

/// Accent palette of a theme; unknown themes have an empty palette
pub fn accents_for(theme_name: &str) -> &'static [AccentColor] {
    find_theme(theme_name)
        .map(|theme| theme.accents)
        .unwrap_or_default()
}
