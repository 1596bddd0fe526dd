//! Parsed documentation fragments
//!
//! A fragment is the markup of one documentation page. The shell only needs
//! a few things out of it: the page heading (for the document title) and the
//! `<section>` elements, some of which apply to specific themes only.

use regex::Regex;
use std::sync::OnceLock;

/// A `<section>` of a fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Value of the `id` attribute, if any
    pub id: Option<String>,

    /// Themes listed in `data-themes`; `None` means the section applies to all themes
    pub themes: Option<Vec<String>>,

    /// Hidden because it does not apply to the active theme
    pub hidden: bool,

    /// Last visible section of the fragment; the separator after it is suppressed
    pub last_visible: bool,
}

impl Section {
    /// Whether this section is shown under `theme_name`
    pub fn applies_to(&self, theme_name: &str) -> bool {
        match &self.themes {
            Some(themes) => themes.iter().any(|theme| theme == theme_name),
            None => true,
        }
    }
}

/// Content of a materialized view
#[derive(Debug, Clone)]
pub struct ViewContent {
    /// Raw fragment markup
    pub markup: String,

    /// Text of the first `<h2>`, with tags stripped
    pub heading: Option<String>,

    /// Sections in document order
    pub sections: Vec<Section>,
}

fn heading_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?is)<h2\b[^>]*>(.*?)</h2\s*>").expect("valid h2 regex"))
}

fn section_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?is)<section\b([^>]*)>").expect("valid section regex"))
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"))
}

fn attribute(attributes: &str, name: &str) -> Option<String> {
    let pattern = format!(r#"(?i)(?:^|\s){}\s*=\s*(?:"([^"]*)"|'([^']*)')"#, regex::escape(name));
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(attributes)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

impl ViewContent {
    /// Parse fragment markup
    pub fn parse(markup: impl Into<String>) -> Self {
        let markup = markup.into();

        let heading = heading_pattern().captures(&markup).map(|caps| {
            let text = tag_pattern().replace_all(&caps[1], "");
            decode_entities(text.split_whitespace().collect::<Vec<_>>().join(" ").as_str())
        });

        let sections = section_pattern()
            .captures_iter(&markup)
            .map(|caps| {
                let attributes = &caps[1];
                Section {
                    id: attribute(attributes, "id"),
                    themes: attribute(attributes, "data-themes").map(|list| {
                        list.split(|c: char| c.is_whitespace() || c == ',')
                            .filter(|name| !name.is_empty())
                            .map(str::to_string)
                            .collect()
                    }),
                    hidden: false,
                    last_visible: false,
                }
            })
            .collect();

        Self {
            markup,
            heading,
            sections,
        }
    }

    /// Hide sections that do not apply to `theme_name` and flag the last visible one
    pub fn apply_theme(&mut self, theme_name: &str) {
        for section in &mut self.sections {
            section.hidden = !section.applies_to(theme_name);
            section.last_visible = false;
        }

        if let Some(last) = self.sections.iter_mut().rev().find(|s| !s.hidden) {
            last.last_visible = true;
        }
    }

    /// Sections currently shown
    pub fn visible_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|section| !section.hidden)
    }
}
