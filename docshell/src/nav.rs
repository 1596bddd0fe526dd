//! Sidebar navigation menu

use serde::{Deserialize, Serialize};
use url::Url;

/// A link button in the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    /// Link target, absolute or relative to the current location
    pub href: String,
    /// Opens outside the shell
    #[serde(default)]
    pub external: bool,
    /// Highlighted because it points at the current location
    #[serde(skip)]
    pub toggled: bool,
}

/// A group of links, optionally under a heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSection {
    #[serde(default)]
    pub heading: Option<String>,
    pub links: Vec<NavLink>,
}

/// All sidebar link groups, top to bottom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavMenu {
    pub sections: Vec<NavSection>,
}

fn internal(label: &str, href: &str) -> NavLink {
    NavLink {
        label: label.to_string(),
        href: href.to_string(),
        external: false,
        toggled: false,
    }
}

fn external(label: &str, href: &str) -> NavLink {
    NavLink {
        external: true,
        ..internal(label, href)
    }
}

fn elements(heading: &str, names: &[&str]) -> NavSection {
    NavSection {
        heading: Some(heading.to_string()),
        links: names
            .iter()
            .map(|name| internal(name, &format!("/elements/{}", name)))
            .collect(),
    }
}

impl Default for NavMenu {
    fn default() -> Self {
        Self {
            sections: vec![
                NavSection {
                    heading: None,
                    links: vec![
                        internal("About", "/"),
                        internal("Setup", "/setup"),
                        internal("FAQ", "/faq"),
                        internal("Resources", "/resources"),
                    ],
                },
                NavSection {
                    heading: None,
                    links: vec![
                        external("Source Code", "https://github.com/jarek-foksa/xel"),
                        external("Bugs", "https://github.com/jarek-foksa/xel/issues"),
                        external("Changelog", "https://github.com/jarek-foksa/xel/commits"),
                    ],
                },
                elements(
                    "Primitives",
                    &[
                        "x-box",
                        "x-card",
                        "x-accordion",
                        "x-icon",
                        "x-label",
                        "x-shortcut",
                        "x-stepper",
                        "x-swatch",
                    ],
                ),
                elements("Buttons", &["x-button", "x-buttons"]),
                elements("Tabs", &["x-tabs", "x-doctabs"]),
                elements(
                    "Menus",
                    &["x-menu", "x-menuitem", "x-menubar", "x-contextmenu"],
                ),
                elements("Popups", &["dialog", "x-popover", "x-notification"]),
                elements(
                    "Forms",
                    &[
                        "x-checkbox",
                        "x-radio",
                        "x-switch",
                        "x-select",
                        "x-colorselect",
                        "x-dateselect",
                        "x-input",
                        "x-numberinput",
                        "x-taginput",
                        "x-textarea",
                        "x-slider",
                    ],
                ),
                elements("Progress", &["x-progressbar", "x-throbber"]),
            ],
        }
    }
}

impl NavMenu {
    pub fn links(&self) -> impl Iterator<Item = &NavLink> {
        self.sections.iter().flat_map(|section| section.links.iter())
    }

    /// Links that stay inside the shell
    pub fn internal_links(&self) -> impl Iterator<Item = &NavLink> {
        self.links().filter(|link| !link.external)
    }

    /// Toggle exactly the links whose target has the origin and pathname of `location`
    pub fn update(&mut self, location: &Url) {
        for link in self.sections.iter_mut().flat_map(|s| s.links.iter_mut()) {
            link.toggled = match location.join(&link.href) {
                Ok(target) => {
                    target.origin() == location.origin() && target.path() == location.path()
                }
                Err(e) => {
                    log::warn!("Unparseable nav link '{}': {}", link.href, e);
                    false
                }
            };
        }
    }

    /// Links currently toggled
    pub fn toggled(&self) -> impl Iterator<Item = &NavLink> {
        self.links().filter(|link| link.toggled)
    }
}
