//! docshell - headless documentation browser shell
//!
//! Drives the navigation controller against documentation fragments on disk,
//! for scripted browsing sessions and link checking.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![allow(clippy::module_name_repetitions)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, Step};
use docshell::document::{DocumentSurface, MemoryDocument};
use docshell::history::{History, MemoryHistory};
use docshell::preferences::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
use docshell::route::RouteResolver;
use docshell::sidebar::TimedAnimationDriver;
use docshell::theme::{StoredThemeProvider, ThemeProvider};
use docshell::view_cache::FsContentSource;
use docshell::{ClickEvent, ClickOutcome, Collaborators, MouseButton, NavigationController, ShellConfig};
use std::path::Path;
use std::rc::Rc;
use url::Url;

/// Main entry point for the docshell CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Browse {
            config,
            start,
            verbose,
            steps,
        } => {
            handle_browse_command(&config, &start, verbose, steps)?;
        }

        Commands::Resolve { config, pathnames } => {
            handle_resolve_command(&config, &pathnames)?;
        }

        Commands::Check { config, verbose } => {
            handle_check_command(&config, verbose)?;
        }
    }

    Ok(())
}

/// Initialize logging; `--verbose` raises the default filter to info
fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();
}

/// Load the shell configuration, falling back to defaults when the file is absent
fn load_config(path: &Path) -> Result<ShellConfig> {
    if !path.exists() {
        log::info!(
            "No configuration at {}, using defaults",
            path.display()
        );
        return Ok(ShellConfig::default());
    }

    ShellConfig::load(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Handle the browse command
fn handle_browse_command(
    config_path: &Path,
    start: &str,
    verbose: bool,
    steps: Vec<Step>,
) -> Result<()> {
    init_logging(verbose);
    let config = load_config(config_path)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    runtime.block_on(browse(config, start, steps))
}

/// One document lifetime: a controller plus the document it renders into
struct Session {
    controller: NavigationController,
    document: Rc<MemoryDocument>,
}

impl Session {
    /// Load the document: build a controller, attach it and restore scroll
    async fn open(
        config: &ShellConfig,
        history: &Rc<MemoryHistory>,
        preferences: &Rc<dyn PreferenceStore>,
    ) -> Result<Self> {
        let document = Rc::new(MemoryDocument::new());
        let theme = Rc::new(StoredThemeProvider::load(
            preferences.as_ref(),
            &config.default_theme,
        ));
        println!("Theme: {} ({})", theme.theme_name(), theme.theme_path());

        let controller = NavigationController::new(
            config,
            Collaborators {
                history: history.clone(),
                preferences: Rc::clone(preferences),
                content: Rc::new(FsContentSource::new(&config.docs_root)),
                theme,
                document: document.clone(),
                animations: Rc::new(TimedAnimationDriver),
            },
        );

        if let Err(e) = controller.connect().await {
            println!("✗ Failed to show {}: {}", history.location().path(), e);
        }
        controller.on_load().await;

        Ok(Self {
            controller,
            document,
        })
    }
}

/// Run a scripted browsing session
async fn browse(config: ShellConfig, start: &str, steps: Vec<Step>) -> Result<()> {
    let origin = Url::parse(&config.origin)
        .with_context(|| format!("Invalid origin '{}'", config.origin))?;
    let start_url = origin
        .join(start)
        .with_context(|| format!("Invalid start pathname '{}'", start))?;

    let preferences: Rc<dyn PreferenceStore> = match &config.preferences_path {
        Some(path) => Rc::new(
            FilePreferenceStore::open(path)
                .with_context(|| format!("Failed to open preferences {}", path.display()))?,
        ),
        None => Rc::new(MemoryPreferenceStore::new()),
    };
    let history = Rc::new(MemoryHistory::new(start_url));

    println!("Browsing {} from {}", config.docs_root.display(), origin);
    let mut session = Session::open(&config, &history, &preferences).await?;
    print_state(&session, &history, "load");

    for step in steps {
        run_step(&session, &history, &step).await;

        if session.document.reload_count() > 0 {
            session
                .controller
                .on_unload()
                .context("Failed to persist scroll offset")?;
            println!("\nReloading document...");
            session = Session::open(&config, &history, &preferences).await?;
        }

        print_state(&session, &history, &format!("{:?}", step));
    }

    session
        .controller
        .on_unload()
        .context("Failed to persist scroll offset")?;

    println!("\n✓ Session finished");
    Ok(())
}

/// Apply one scripted interaction, reporting failures without aborting the session
async fn run_step(session: &Session, history: &MemoryHistory, step: &Step) {
    let controller = &session.controller;

    let result = match step {
        Step::Visit(pathname) => controller
            .on_click(ClickEvent::on_link(pathname.as_str()))
            .await
            .map(|outcome| {
                if outcome != ClickOutcome::Navigated {
                    println!("  (link {} left as {:?})", pathname, outcome);
                }
            }),
        Step::Back | Step::Forward => {
            let moved = match step {
                Step::Back => history.back(),
                _ => history.forward(),
            };
            if moved {
                controller.on_pop_state().await
            } else {
                println!("  (no history entry in that direction)");
                Ok(())
            }
        }
        Step::HideSidebar => {
            controller.on_hide_sidebar_click(MouseButton::Primary).await;
            Ok(())
        }
        Step::ShowSidebar => {
            controller.on_show_sidebar_click(MouseButton::Primary).await;
            Ok(())
        }
        Step::Theme(name) => controller.on_theme_select_change(name).await,
        Step::Accent(name) => controller.on_accent_color_select_change(name).map(|_| ()),
        Step::Scroll(offset) => {
            if !controller.scroll_selected_view(*offset) {
                println!("  (no view selected to scroll)");
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        println!("✗ {:?} failed: {}", step, e);
    }
}

/// Print the visible state of the shell after a step
fn print_state(session: &Session, history: &MemoryHistory, label: &str) {
    let controller = &session.controller;
    let views = controller.views();

    println!("\n[{}]", label);
    println!("  Location: {}", history.location());
    println!("  Title:    {}", session.document.title());
    println!(
        "  Selected: {} (scroll {})",
        views.selected_pathname().as_deref().unwrap_or("-"),
        views.with_selected(|v| v.scroll_top).unwrap_or(0)
    );
    println!("  Cached:   {}", views.pathnames().join(", "));
    println!(
        "  Sidebar:  {} (margin {}px)",
        controller.sidebar_state(),
        controller.sidebar_margin_left()
    );

    if let Some(section) = controller.theme_section() {
        let accent = section
            .accent_items
            .iter()
            .find(|item| item.toggled)
            .map_or("-", |item| item.label.as_str());
        println!("  Accent:   {}", accent);
    }
}

/// Handle the resolve command
fn handle_resolve_command(config_path: &Path, pathnames: &[String]) -> Result<()> {
    init_logging(false);
    let config = load_config(config_path)?;
    let resolver = RouteResolver::new(config.routes);

    for pathname in pathnames {
        println!("{} -> {}", pathname, resolver.resolve(pathname));
    }

    Ok(())
}

/// Handle the check command
fn handle_check_command(config_path: &Path, verbose: bool) -> Result<()> {
    init_logging(verbose);
    let config = load_config(config_path)?;
    let resolver = RouteResolver::new(config.routes.clone());
    let origin = Url::parse(&config.origin)
        .with_context(|| format!("Invalid origin '{}'", config.origin))?;

    println!("Checking navigation links...");
    println!("Docs root: {}", config.docs_root.display());

    let menu = config.nav_menu();
    let mut checked = 0;
    let mut missing = Vec::new();

    for link in menu.internal_links() {
        let target = origin
            .join(&link.href)
            .with_context(|| format!("Invalid link '{}'", link.href))?;
        if target.origin() != origin.origin() {
            continue;
        }

        let resource = resolver.resolve(target.path());
        let exists = config.docs_root.join(&resource).is_file();
        checked += 1;

        if verbose || !exists {
            println!(
                "  {} {} -> {}",
                if exists { "✓" } else { "✗" },
                link.href,
                resource
            );
        }
        if !exists {
            missing.push(resource);
        }
    }

    if !missing.is_empty() {
        anyhow::bail!(
            "{} of {} navigation links point at missing resources",
            missing.len(),
            checked
        );
    }

    println!("\n✓ All {} navigation links resolve", checked);
    Ok(())
}
