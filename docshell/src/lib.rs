//! docshell - client-side shell of a documentation browser
//!
//! Keeps the visible documentation view in sync with session history,
//! materializes pages on demand, applies theme and accent-color preferences,
//! and animates the collapsible sidebar.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod color;
pub mod controller;
pub mod document;
pub mod error;
pub mod fragment;
pub mod history;
pub mod nav;
pub mod palette;
pub mod preferences;
pub mod route;
pub mod shell_config;
pub mod sidebar;
pub mod theme;
pub mod view_cache;

pub use controller::{ClickEvent, ClickOutcome, Collaborators, MouseButton, NavigationController};
pub use error::ShellError;
pub use shell_config::{ConfigError, ShellConfig};
