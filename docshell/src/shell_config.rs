//! Shell configuration from docshell.toml

use crate::nav::NavMenu;
use crate::route::RouteConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main shell configuration from docshell.toml
///
/// Every field has a default, so a partial file (or none at all) is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Title of the landing page, and prefix of every other page title
    pub site_title: String,

    /// Origin the shell is served from (scheme, host and port)
    pub origin: String,

    /// Directory resource paths are resolved against
    pub docs_root: PathBuf,

    /// Theme used when no theme is persisted
    pub default_theme: String,

    /// TOML file persisting preferences; preferences are kept in memory when unset
    pub preferences_path: Option<PathBuf>,

    /// Measured sidebar width in pixels
    pub sidebar_width: f64,

    /// Pathname to resource path mapping
    pub routes: RouteConfig,

    /// Sidebar navigation; the built-in menu is used when unset
    pub nav: Option<NavMenu>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            site_title: "Xel".to_string(),
            origin: "http://localhost:8080".to_string(),
            docs_root: PathBuf::from("."),
            default_theme: "material".to_string(),
            preferences_path: None,
            sidebar_width: 270.0,
            routes: RouteConfig::default(),
            nav: None,
        }
    }
}

impl ShellConfig {
    /// Read a shell configuration file
    ///
    /// `docs_root` and `preferences_path` may be written relative to the
    /// file; they come back anchored at its directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: ShellConfig = toml::from_str(&content).map_err(|source| {
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;

        if let Some(base) = path.parent() {
            config.anchor_paths(base);
        }

        Ok(config)
    }

    fn anchor_paths(&mut self, base: &Path) {
        if self.docs_root.is_relative() {
            self.docs_root = base.join(&self.docs_root);
        }
        if let Some(prefs) = self.preferences_path.as_mut() {
            if prefs.is_relative() {
                *prefs = base.join(&*prefs);
            }
        }
    }

    /// Write the configuration as pretty TOML, replacing any existing file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;

        fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Navigation menu to show in the sidebar
    pub fn nav_menu(&self) -> NavMenu {
        self.nav.clone().unwrap_or_default()
    }
}

/// Failure to read, parse or write a docshell.toml file
#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid shell configuration in {}: {}", path.display(), source)
            }
            ConfigError::Write { path, source } => {
                write!(f, "cannot write {}: {}", path.display(), source)
            }
            ConfigError::Serialize(e) => write!(f, "cannot encode shell configuration: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } | ConfigError::Write { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Serialize(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docshell.toml");

        let config = ShellConfig {
            site_title: "Widgets".to_string(),
            default_theme: "vanilla".to_string(),
            preferences_path: Some(PathBuf::from("session.toml")),
            ..ShellConfig::default()
        };
        config.save(&path).unwrap();

        let parsed = ShellConfig::load(&path).unwrap();
        assert_eq!(parsed.site_title, "Widgets");
        assert_eq!(parsed.default_theme, "vanilla");
        assert_eq!(parsed.docs_root, dir.path().join("."));
        assert_eq!(parsed.preferences_path, Some(dir.path().join("session.toml")));
        assert_eq!(parsed.routes, RouteConfig::default());
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_content = r#"
site_title = "Xel"
sidebar_width = 300.0

[routes]
docs_dir = "pages"

[[nav.sections]]
heading = "Guides"
links = [
  { label = "Setup", href = "/setup" },
  { label = "Repo", href = "https://example.com/repo", external = true },
]
"#;

        let config: ShellConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.sidebar_width, 300.0);
        assert_eq!(config.default_theme, "material");
        assert_eq!(config.routes.docs_dir, "pages");
        assert_eq!(config.routes.landing, "docs/about.html");

        let menu = config.nav_menu();
        assert_eq!(menu.sections.len(), 1);
        assert_eq!(menu.internal_links().count(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = ShellConfig::load("/definitely/not/here/docshell.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here/docshell.toml"));
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docshell.toml");
        fs::write(&path, "sidebar_width = \"wide\"").unwrap();

        let err = ShellConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("docshell.toml"));
    }
}
