//! Error type returned by the navigation controller

use crate::color::ColorError;
use crate::preferences::PreferenceError;
use crate::view_cache::FetchError;
use thiserror::Error;

/// Errors surfaced by shell operations
///
/// Accent-color inconsistencies and superseded sidebar transitions are
/// healed or skipped locally and never show up here.
#[derive(Error, Debug)]
pub enum ShellError {
    /// A documentation fragment could not be fetched
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Persisted preferences could not be read or written
    #[error(transparent)]
    Preferences(#[from] PreferenceError),

    /// An accent palette entry is not a parseable color
    #[error(transparent)]
    Color(#[from] ColorError),
}
