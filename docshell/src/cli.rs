//! Command-line interface definitions for docshell

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

/// One scripted user interaction for the `browse` command
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Plain click on a same-origin link
    Visit(String),
    /// History traversal backwards
    Back,
    /// History traversal forwards
    Forward,
    /// Click on the hide-sidebar button
    HideSidebar,
    /// Click on the show-sidebar button
    ShowSidebar,
    /// Pick a theme in the theme selector
    Theme(String),
    /// Pick an accent color in the accent selector
    Accent(String),
    /// Scroll the selected view
    Scroll(i64),
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "back" => return Ok(Step::Back),
            "forward" => return Ok(Step::Forward),
            "hide" => return Ok(Step::HideSidebar),
            "show" => return Ok(Step::ShowSidebar),
            _ => {}
        }

        if s.starts_with('/') {
            return Ok(Step::Visit(s.to_string()));
        }

        match s.split_once('=') {
            Some(("theme", name)) if !name.is_empty() => Ok(Step::Theme(name.to_string())),
            Some(("accent", name)) if !name.is_empty() => Ok(Step::Accent(name.to_string())),
            Some(("scroll", offset)) => offset
                .parse()
                .map(Step::Scroll)
                .map_err(|_| format!("Invalid scroll offset '{}'", offset)),
            _ => Err(format!(
                "Unknown step '{}'. Expected a /pathname, back, forward, hide, show, theme=<name>, accent=<name> or scroll=<px>",
                s
            )),
        }
    }
}

/// CLI structure for the docshell application
#[derive(Parser)]
#[command(name = "docshell")]
#[command(version)]
#[command(about = "Headless documentation browser shell", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for docshell
#[derive(Subcommand)]
pub enum Commands {
    /// Drive the shell through a sequence of interactions
    Browse {
        /// Shell configuration file
        #[arg(short, long, default_value = "docshell.toml")]
        config: PathBuf,

        /// Pathname the session starts at
        #[arg(short, long, default_value = "/")]
        start: String,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Interactions: /pathname, back, forward, hide, show, theme=<name>, accent=<name>, scroll=<px>
        #[arg(value_name = "STEP")]
        steps: Vec<Step>,
    },

    /// Print the resource path each pathname resolves to
    Resolve {
        /// Shell configuration file
        #[arg(short, long, default_value = "docshell.toml")]
        config: PathBuf,

        /// Pathnames to resolve
        #[arg(value_name = "PATHNAME", required = true)]
        pathnames: Vec<String>,
    },

    /// Verify that every internal navigation link resolves to an existing resource
    Check {
        /// Shell configuration file
        #[arg(short, long, default_value = "docshell.toml")]
        config: PathBuf,

        /// Show every checked link, not only missing ones
        #[arg(short, long)]
        verbose: bool,
    },
}
