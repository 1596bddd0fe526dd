//! Mapping from location pathnames to documentation resource paths

use serde::{Deserialize, Serialize};

/// Resource layout used when resolving pathnames
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Resource served for the landing page (`/`)
    pub landing: String,

    /// Pathname prefix of element documentation pages
    pub element_prefix: String,

    /// Resource subtree holding element documentation
    pub elements_dir: String,

    /// Resource root for every other documentation page
    pub docs_dir: String,

    /// Suffix appended to resolved resource paths
    pub suffix: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            landing: "docs/about.html".to_string(),
            element_prefix: "/elements/".to_string(),
            elements_dir: "docs/elements".to_string(),
            docs_dir: "docs".to_string(),
            suffix: ".html".to_string(),
        }
    }
}

/// Pure pathname to resource path resolver
#[derive(Debug, Clone, Default)]
pub struct RouteResolver {
    config: RouteConfig,
}

impl RouteResolver {
    /// Create a resolver for the given resource layout
    pub fn new(config: RouteConfig) -> Self {
        Self { config }
    }

    /// Resource layout this resolver was built with
    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Resolve a location pathname to the resource path of its fragment
    ///
    /// Total over all strings. A resource that does not exist is only
    /// detected later, when it is fetched.
    ///
    /// # Examples
    ///   "/" -> "docs/about.html"
    ///   "/elements/x-button" -> "docs/elements/x-button.html"
    ///   "/faq" -> "docs/faq.html"
    pub fn resolve(&self, pathname: &str) -> String {
        let RouteConfig {
            landing,
            element_prefix,
            elements_dir,
            docs_dir,
            suffix,
        } = &self.config;

        if pathname == "/" {
            return landing.clone();
        }

        if let Some(name) = pathname.strip_prefix(element_prefix.as_str()) {
            return format!("{}/{}{}", trim_dir(elements_dir), name, suffix);
        }

        format!(
            "{}/{}{}",
            trim_dir(docs_dir),
            pathname.trim_start_matches('/'),
            suffix
        )
    }
}

fn trim_dir(dir: &str) -> &str {
    dir.trim_end_matches('/')
}
