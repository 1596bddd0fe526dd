//! Persisted, session-scoped key/value preference storage

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key holding the selected theme name
pub const THEME_KEY: &str = "theme";
/// Key holding the selected accent color name
pub const ACCENT_COLOR_KEY: &str = "accentColorName";
/// Key holding the scroll offset of the selected view at teardown
pub const SCROLL_TOP_KEY: &str = "selectedViewScrollTop";

/// Errors that can occur when reading or writing persisted preferences
#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("IO error for {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}", path = .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// String key/value storage; absent keys mean "use default"
pub trait PreferenceStore {
    /// Read a value
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;

    /// Delete a value; deleting an absent key is not an error
    fn remove(&self, key: &str) -> Result<(), PreferenceError>;
}

/// Preference storage that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: RefCell<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

/// Preference storage backed by a TOML file, written through on every change
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    values: RefCell<BTreeMap<String, String>>,
}

impl FilePreferenceStore {
    /// Open a preference file; a missing file starts out empty
    ///
    /// # Parameters
    /// * `path` - Path to the TOML preference file
    ///
    /// # Returns
    /// * `Ok(FilePreferenceStore)` - Store holding the file's current values
    /// * `Err(PreferenceError)` - The file exists but cannot be read or parsed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PreferenceError> {
        let path = path.as_ref().to_path_buf();

        let values = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|source| PreferenceError::Io {
                path: path.clone(),
                source,
            })?;
            toml::from_str(&content).map_err(|source| PreferenceError::Parse {
                path: path.clone(),
                source,
            })?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            values: RefCell::new(values),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), PreferenceError> {
        let content = toml::to_string_pretty(&*self.values.borrow())?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| PreferenceError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        fs::write(&self.path, content).map_err(|source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        let removed = self.values.borrow_mut().remove(key).is_some();
        if removed {
            self.flush()?;
        }
        Ok(())
    }
}
