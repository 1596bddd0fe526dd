//! Navigation and view-lifecycle controller
//!
//! The controller is the only component that talks to history. It reacts to
//! link clicks, history pops, page load/teardown, selector changes and the
//! sidebar buttons, and drives the view cache, theme preferences and sidebar
//! animator in response.
//!
//! All handlers take `&self`: the controller lives on a single thread and
//! handlers interleave only at their await points (fragment fetches,
//! animation settling and fixed delays).

use crate::document::DocumentSurface;
use crate::error::ShellError;
use crate::history::{History, ScrollRestoration};
use crate::nav::NavMenu;
use crate::palette::AccentColor;
use crate::preferences::{PreferenceStore, SCROLL_TOP_KEY};
use crate::route::RouteResolver;
use crate::shell_config::ShellConfig;
use crate::sidebar::{AnimationDriver, SidebarAnimator, SidebarState};
use crate::theme::{ThemePreferences, ThemeProvider, ThemeSection};
use crate::view_cache::{ContentSource, Selection, ViewCache};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Grace delay between persisting a new theme and reloading the document
pub const RELOAD_DELAY: Duration = Duration::from_millis(800);

/// Delay before retrying a scroll restore when no view was selected yet
pub const SCROLL_RESTORE_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Mouse button of a click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// A click inside the shell
#[derive(Debug, Clone, Default)]
pub struct ClickEvent {
    pub ctrl_key: bool,
    pub shift_key: bool,
    pub meta_key: bool,
    pub button: MouseButton,
    /// `href` of the closest enclosing anchor, if the click landed in one
    pub anchor_href: Option<String>,
}

impl ClickEvent {
    /// Plain primary click on a link
    pub fn on_link(href: impl Into<String>) -> Self {
        Self {
            anchor_href: Some(href.into()),
            ..Self::default()
        }
    }
}

/// How a click was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Left to the environment's default handling
    Ignored,
    /// Default handling suppressed, but the link points at the current page
    Suppressed,
    /// A history entry was pushed and the shell navigated
    Navigated,
}

/// External collaborators injected into the controller
pub struct Collaborators {
    pub history: Rc<dyn History>,
    pub preferences: Rc<dyn PreferenceStore>,
    pub content: Rc<dyn ContentSource>,
    pub theme: Rc<dyn ThemeProvider>,
    pub document: Rc<dyn DocumentSurface>,
    pub animations: Rc<dyn AnimationDriver>,
}

/// Top-level orchestrator of the documentation shell
pub struct NavigationController {
    site_title: String,
    history: Rc<dyn History>,
    preferences: Rc<dyn PreferenceStore>,
    document: Rc<dyn DocumentSurface>,
    animations: Rc<dyn AnimationDriver>,
    theme: ThemePreferences,
    views: ViewCache,
    sidebar: RefCell<SidebarAnimator>,
    nav: RefCell<NavMenu>,
    theme_section: RefCell<Option<ThemeSection>>,
}

impl NavigationController {
    pub fn new(config: &ShellConfig, collaborators: Collaborators) -> Self {
        let Collaborators {
            history,
            preferences,
            content,
            theme,
            document,
            animations,
        } = collaborators;

        let routes = RouteResolver::new(config.routes.clone());
        let sidebar_width = (config.sidebar_width > 0.0).then_some(config.sidebar_width);

        Self {
            site_title: config.site_title.clone(),
            theme: ThemePreferences::new(Rc::clone(&preferences), theme),
            views: ViewCache::new(routes, content),
            sidebar: RefCell::new(SidebarAnimator::new(sidebar_width)),
            nav: RefCell::new(config.nav_menu()),
            theme_section: RefCell::new(None),
            history,
            preferences,
            document,
            animations,
        }
    }

    pub fn views(&self) -> &ViewCache {
        &self.views
    }

    pub fn theme(&self) -> &ThemePreferences {
        &self.theme
    }

    pub fn nav_menu(&self) -> NavMenu {
        self.nav.borrow().clone()
    }

    /// Selector state as of the last refresh; `None` before `connect`
    pub fn theme_section(&self) -> Option<ThemeSection> {
        self.theme_section.borrow().clone()
    }

    pub fn sidebar_state(&self) -> SidebarState {
        self.sidebar.borrow().state()
    }

    pub fn sidebar_hidden(&self) -> bool {
        self.sidebar.borrow().is_hidden()
    }

    pub fn sidebar_margin_left(&self) -> f64 {
        self.sidebar.borrow().margin_left()
    }

    /// Attach the shell to the document
    ///
    /// Takes over scroll restoration, gives the initial history entry a
    /// state, syncs the selectors and accent color, then shows the view for
    /// the current location.
    pub async fn connect(&self) -> Result<(), ShellError> {
        self.history
            .set_scroll_restoration(ScrollRestoration::Manual);

        if !self.history.has_state() {
            self.history.replace_state(self.history.location());
        }

        self.refresh_theme_section()?;
        self.theme.apply_accent_color(self.document.as_ref())?;
        self.navigate().await
    }

    /// Bring nav buttons, selected view and title in line with the current location
    ///
    /// A no-op when the selected view already matches. If the location moves
    /// on while the fragment is being fetched, selection is left to the newer
    /// navigation. Every completed pass evicts views that are neither selected
    /// nor animating, including a superseded one's own fetch.
    pub async fn navigate(&self) -> Result<(), ShellError> {
        self.update_nav_buttons();

        let target = self.history.location().path().to_string();
        if self.views.selected_pathname().as_deref() == Some(target.as_str()) {
            return Ok(());
        }

        self.views.ensure_loaded(&target).await?;

        if self.history.location().path() == target {
            self.update_title(&target);

            if self.views.select(&target, &self.theme.theme_name()) == Selection::NotCached {
                log::warn!("View {} disappeared before it could be selected", target);
            }
        } else {
            log::debug!("Navigation to {} superseded while loading", target);
        }

        self.views.evict_offscreen();
        Ok(())
    }

    /// Handle a click anywhere inside the shell
    pub async fn on_click(&self, event: ClickEvent) -> Result<ClickOutcome, ShellError> {
        if event.ctrl_key || event.shift_key || event.meta_key {
            return Ok(ClickOutcome::Ignored);
        }

        let Some(href) = event.anchor_href else {
            return Ok(ClickOutcome::Ignored);
        };

        let location = self.history.location();
        let url = match location.join(&href) {
            Ok(url) => url,
            Err(e) => {
                log::warn!("Leaving unparseable link '{}' to the browser: {}", href, e);
                return Ok(ClickOutcome::Ignored);
            }
        };

        if url.origin() != location.origin() {
            return Ok(ClickOutcome::Ignored);
        }

        if url.path() == location.path() {
            return Ok(ClickOutcome::Suppressed);
        }

        log::info!("Navigating to {}", url.path());
        self.history.push_state(url);
        self.navigate().await?;

        Ok(ClickOutcome::Navigated)
    }

    /// Handle a back/forward traversal; history has already moved
    pub async fn on_pop_state(&self) -> Result<(), ShellError> {
        self.navigate().await
    }

    /// Restore the persisted scroll offset onto the selected view
    ///
    /// Retries once after [`SCROLL_RESTORE_RETRY_DELAY`] when no view is
    /// selected yet.
    ///
    /// # Returns
    /// * `true` - The offset was applied to a selected view
    /// * `false` - Still no view selected after the retry
    pub async fn on_load(&self) -> bool {
        let scroll_top = self
            .preferences
            .get(SCROLL_TOP_KEY)
            .and_then(|value| value.trim().parse::<i64>().ok())
            .map_or(0, |value| value.max(0));

        if self.apply_scroll_top(scroll_top) {
            return true;
        }

        log::debug!(
            "No view selected yet, retrying scroll restore in {:?}",
            SCROLL_RESTORE_RETRY_DELAY
        );
        tokio::time::sleep(SCROLL_RESTORE_RETRY_DELAY).await;

        let restored = self.apply_scroll_top(scroll_top);
        if !restored {
            log::warn!("Could not restore scroll offset {}: no view selected", scroll_top);
        }
        restored
    }

    fn apply_scroll_top(&self, scroll_top: i64) -> bool {
        self.views
            .with_selected(|view| view.scroll_top = scroll_top)
            .is_some()
    }

    /// Persist the selected view's scroll offset before the document goes away
    pub fn on_unload(&self) -> Result<(), ShellError> {
        if let Some(scroll_top) = self.views.with_selected(|view| view.scroll_top) {
            self.preferences
                .set(SCROLL_TOP_KEY, &scroll_top.to_string())?;
        }
        Ok(())
    }

    /// Scroll the selected view; returns `false` when no view is selected
    pub fn scroll_selected_view(&self, scroll_top: i64) -> bool {
        self.apply_scroll_top(scroll_top.max(0))
    }

    /// Persist a newly selected theme and reload after a short grace delay
    pub async fn on_theme_select_change(&self, theme_name: &str) -> Result<(), ShellError> {
        self.theme.set_theme(theme_name)?;
        log::info!("Theme changed to '{}', reloading", theme_name);

        tokio::time::sleep(RELOAD_DELAY).await;
        self.document.reload();

        Ok(())
    }

    /// Persist a newly selected accent color and apply it immediately
    pub fn on_accent_color_select_change(
        &self,
        accent_name: &str,
    ) -> Result<Option<AccentColor>, ShellError> {
        self.theme.set_accent_color_name(accent_name)?;
        let applied = self.theme.apply_accent_color(self.document.as_ref())?;
        self.refresh_theme_section()?;
        Ok(applied)
    }

    pub async fn on_hide_sidebar_click(&self, button: MouseButton) {
        if button == MouseButton::Primary {
            self.hide_sidebar().await;
        }
    }

    pub async fn on_show_sidebar_click(&self, button: MouseButton) {
        if button == MouseButton::Primary {
            self.show_sidebar().await;
        }
    }

    /// Slide the sidebar out; returns whether this transition finalized the state
    pub async fn hide_sidebar(&self) -> bool {
        let transition = self.sidebar.borrow_mut().hide();
        self.animations.play(&transition).await;
        self.sidebar.borrow_mut().settle(transition.id)
    }

    /// Slide the sidebar in; returns whether this transition finalized the state
    pub async fn show_sidebar(&self) -> bool {
        let transition = self.sidebar.borrow_mut().show();
        self.animations.play(&transition).await;
        self.sidebar.borrow_mut().settle(transition.id)
    }

    fn update_nav_buttons(&self) {
        self.nav.borrow_mut().update(&self.history.location());
    }

    fn update_title(&self, pathname: &str) {
        if pathname == "/" {
            self.document.set_title(&self.site_title);
            return;
        }

        let heading = self
            .views
            .with_view(pathname, |view| view.content.heading.clone())
            .flatten();

        match heading {
            Some(heading) => self
                .document
                .set_title(&format!("{} - {}", self.site_title, heading)),
            None => {
                log::warn!("View {} has no heading, using the site title", pathname);
                self.document.set_title(&self.site_title);
            }
        }
    }

    fn refresh_theme_section(&self) -> Result<(), ShellError> {
        let section = self.theme.theme_section()?;
        *self.theme_section.borrow_mut() = Some(section);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;
    use crate::history::MemoryHistory;
    use crate::preferences::{MemoryPreferenceStore, ACCENT_COLOR_KEY, THEME_KEY};
    use crate::sidebar::TimedAnimationDriver;
    use crate::theme::{
        StoredThemeProvider, ACCENT_HUE_PROPERTY, ACCENT_LIGHTNESS_PROPERTY,
        ACCENT_SATURATION_PROPERTY,
    };
    use crate::view_cache::FetchError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use url::Url;

    const ORIGIN: &str = "http://localhost:8080";

    /// Serves fragments from memory, counting fetches per resource
    struct StubSource {
        pages: HashMap<&'static str, (&'static str, Duration)>,
        fetches: RefCell<HashMap<String, usize>>,
    }

    impl StubSource {
        fn fetches(&self, resource: &str) -> usize {
            self.fetches.borrow().get(resource).copied().unwrap_or(0)
        }
    }

    #[async_trait(?Send)]
    impl ContentSource for StubSource {
        async fn read_file(&self, resource_path: &str) -> Result<String, FetchError> {
            *self
                .fetches
                .borrow_mut()
                .entry(resource_path.to_string())
                .or_default() += 1;

            let Some((markup, delay)) = self.pages.get(resource_path).copied() else {
                return Err(FetchError::NotFound(resource_path.to_string()));
            };
            tokio::time::sleep(delay).await;
            Ok(markup.to_string())
        }
    }

    struct Harness {
        controller: NavigationController,
        history: Rc<MemoryHistory>,
        preferences: Rc<MemoryPreferenceStore>,
        document: Rc<MemoryDocument>,
        source: Rc<StubSource>,
    }

    fn url(path: &str) -> Url {
        Url::parse(ORIGIN).unwrap().join(path).unwrap()
    }

    fn harness_with(theme: &str, path: &str, setup_delay: Duration) -> Harness {
        let pages = HashMap::from([
            ("docs/about.html", ("<h1>Xel</h1>", Duration::ZERO)),
            (
                "docs/setup.html",
                (
                    "<h2>Setup</h2><section id=\"npm\"></section><section id=\"mac\" data-themes=\"macos\"></section>",
                    setup_delay,
                ),
            ),
            ("docs/faq.html", ("<h2>FAQ</h2>", Duration::ZERO)),
            (
                "docs/elements/x-button.html",
                ("<h2>x-button</h2>", Duration::ZERO),
            ),
        ]);
        let source = Rc::new(StubSource {
            pages,
            fetches: RefCell::new(HashMap::new()),
        });

        let history = Rc::new(MemoryHistory::new(url(path)));
        let preferences = Rc::new(MemoryPreferenceStore::new());
        preferences.set(THEME_KEY, theme).unwrap();
        let document = Rc::new(MemoryDocument::new());
        let theme_provider = Rc::new(StoredThemeProvider::load(preferences.as_ref(), "material"));

        let controller = NavigationController::new(
            &ShellConfig::default(),
            Collaborators {
                history: history.clone(),
                preferences: preferences.clone(),
                content: source.clone(),
                theme: theme_provider,
                document: document.clone(),
                animations: Rc::new(TimedAnimationDriver),
            },
        );

        Harness {
            controller,
            history,
            preferences,
            document,
            source,
        }
    }

    fn harness(theme: &str, path: &str) -> Harness {
        harness_with(theme, path, Duration::ZERO)
    }

    fn toggled_hrefs(controller: &NavigationController) -> Vec<String> {
        controller
            .nav_menu()
            .toggled()
            .map(|link| link.href.clone())
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_on_landing_page() {
        let h = harness("vanilla", "/");
        h.controller.connect().await.unwrap();

        assert_eq!(h.history.scroll_restoration(), ScrollRestoration::Manual);
        assert!(h.history.has_state());
        assert_eq!(h.history.len(), 1);
        assert_eq!(h.document.title(), "Xel");
        assert_eq!(h.controller.views().selected_pathname().as_deref(), Some("/"));
        assert_eq!(toggled_hrefs(&h.controller), ["/"]);
        assert!(h.controller.theme_section().is_some());
        assert_eq!(
            h.document.style_property(ACCENT_HUE_PROPERTY).as_deref(),
            Some("211")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_same_origin_link_navigates() {
        let h = harness("vanilla", "/");
        h.controller.connect().await.unwrap();

        let outcome = h
            .controller
            .on_click(ClickEvent::on_link("/setup"))
            .await
            .unwrap();

        assert_eq!(outcome, ClickOutcome::Navigated);
        assert_eq!(h.history.len(), 2);
        assert_eq!(h.source.fetches("docs/setup.html"), 1);
        assert_eq!(h.controller.views().pathnames(), ["/setup"]);
        assert_eq!(toggled_hrefs(&h.controller), ["/setup"]);
        assert_eq!(h.document.title(), "Xel - Setup");
    }

    #[tokio::test(start_paused = true)]
    async fn test_theme_pass_runs_on_selected_view() {
        let h = harness("vanilla", "/setup");
        h.controller.connect().await.unwrap();

        let flags = h
            .controller
            .views()
            .with_selected(|view| {
                view.content
                    .sections
                    .iter()
                    .map(|s| (s.hidden, s.last_visible))
                    .collect::<Vec<_>>()
            })
            .unwrap();
        assert_eq!(flags, [(false, true), (true, false)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_animating_view_survives_and_is_not_refetched() {
        let h = harness("vanilla", "/");
        h.controller.connect().await.unwrap();

        h.controller
            .on_click(ClickEvent::on_link("/setup"))
            .await
            .unwrap();
        assert!(h.controller.views().set_animating("/setup", true));

        h.controller
            .on_click(ClickEvent::on_link("/faq"))
            .await
            .unwrap();
        assert_eq!(h.controller.views().pathnames(), ["/setup", "/faq"]);

        h.controller
            .on_click(ClickEvent::on_link("/setup"))
            .await
            .unwrap();
        assert_eq!(h.source.fetches("docs/setup.html"), 1);
        assert_eq!(h.controller.views().selected_pathname().as_deref(), Some("/setup"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_evicted_view_is_refetched_on_revisit() {
        let h = harness("vanilla", "/");
        h.controller.connect().await.unwrap();

        for path in ["/setup", "/", "/setup"] {
            h.controller.on_click(ClickEvent::on_link(path)).await.unwrap();
        }

        assert_eq!(h.source.fetches("docs/setup.html"), 2);
        assert_eq!(h.source.fetches("docs/about.html"), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clicks_left_to_browser() {
        let h = harness("vanilla", "/");
        h.controller.connect().await.unwrap();

        let modified = ClickEvent {
            ctrl_key: true,
            ..ClickEvent::on_link("/setup")
        };
        let external = ClickEvent::on_link("https://github.com/jarek-foksa/xel");
        let no_anchor = ClickEvent::default();

        for event in [modified, external, no_anchor] {
            let outcome = h.controller.on_click(event).await.unwrap();
            assert_eq!(outcome, ClickOutcome::Ignored);
        }

        let same_page = h
            .controller
            .on_click(ClickEvent::on_link(format!("{}/", ORIGIN)))
            .await
            .unwrap();
        assert_eq!(same_page, ClickOutcome::Suppressed);

        assert_eq!(h.history.len(), 1);
        assert_eq!(h.source.fetches("docs/setup.html"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pop_state_navigates_without_pushing() {
        let h = harness("vanilla", "/");
        h.controller.connect().await.unwrap();
        h.controller
            .on_click(ClickEvent::on_link("/elements/x-button"))
            .await
            .unwrap();
        assert_eq!(h.document.title(), "Xel - x-button");

        assert!(h.history.back());
        h.controller.on_pop_state().await.unwrap();

        assert_eq!(h.history.len(), 2);
        assert_eq!(h.document.title(), "Xel");
        assert_eq!(h.controller.views().pathnames(), ["/"]);
        assert_eq!(toggled_hrefs(&h.controller), ["/"]);

        assert!(h.history.forward());
        h.controller.on_pop_state().await.unwrap();
        assert_eq!(
            h.controller.views().selected_pathname().as_deref(),
            Some("/elements/x-button")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_navigation_wins_over_slow_fetch() {
        let h = harness_with("vanilla", "/", Duration::from_millis(200));
        h.controller.connect().await.unwrap();

        let (slow, fast) = tokio::join!(
            h.controller.on_click(ClickEvent::on_link("/setup")),
            h.controller.on_click(ClickEvent::on_link("/faq")),
        );
        slow.unwrap();
        fast.unwrap();

        let views = h.controller.views();
        assert_eq!(views.selected_pathname().as_deref(), Some("/faq"));
        assert_eq!(h.document.title(), "Xel - FAQ");
        assert_eq!(views.pathnames(), ["/faq"]);
        assert_eq!(toggled_hrefs(&h.controller), ["/faq"]);

        assert!(h.history.back());
        h.controller.on_pop_state().await.unwrap();
        assert_eq!(h.source.fetches("docs/setup.html"), 2);
        assert_eq!(views.pathnames(), ["/setup"]);
        assert_eq!(h.document.title(), "Xel - Setup");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_propagates() {
        let h = harness("vanilla", "/");
        h.controller.connect().await.unwrap();

        let err = h
            .controller
            .on_click(ClickEvent::on_link("/changelog"))
            .await
            .unwrap_err();

        assert!(matches!(err, ShellError::Fetch(FetchError::NotFound(_))));
        assert_eq!(h.controller.views().selected_pathname().as_deref(), Some("/"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scroll_offset_round_trip() {
        let h = harness("vanilla", "/");
        h.preferences.set(SCROLL_TOP_KEY, "240").unwrap();
        h.controller.connect().await.unwrap();

        assert!(h.controller.on_load().await);
        assert_eq!(
            h.controller.views().with_selected(|v| v.scroll_top),
            Some(240)
        );

        assert!(h.controller.scroll_selected_view(75));
        h.controller.on_unload().unwrap();
        assert_eq!(h.preferences.get(SCROLL_TOP_KEY).as_deref(), Some("75"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scroll_restore_rejects_invalid_offsets() {
        let h = harness("vanilla", "/");
        h.controller.connect().await.unwrap();

        for (stored, expected) in [("-40", 0), ("NaN", 0), ("1e30", 0), (" 64 ", 64)] {
            h.preferences.set(SCROLL_TOP_KEY, stored).unwrap();
            assert!(h.controller.on_load().await);
            assert_eq!(
                h.controller.views().with_selected(|v| v.scroll_top),
                Some(expected),
                "stored offset {:?}",
                stored
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_scroll_restore_retries_while_loading() {
        let h = harness_with("vanilla", "/setup", Duration::from_millis(50));
        h.preferences.set(SCROLL_TOP_KEY, "90").unwrap();

        let (connected, restored) = tokio::join!(h.controller.connect(), h.controller.on_load());
        connected.unwrap();

        assert!(restored);
        assert_eq!(h.controller.views().with_selected(|v| v.scroll_top), Some(90));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scroll_restore_gives_up_after_one_retry() {
        let h = harness_with("vanilla", "/setup", Duration::from_millis(500));
        let start = tokio::time::Instant::now();

        assert!(!h.controller.on_load().await);
        assert!(start.elapsed() >= SCROLL_RESTORE_RETRY_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_theme_change_reloads_after_delay() {
        let h = harness("vanilla", "/");
        h.controller.connect().await.unwrap();
        let start = tokio::time::Instant::now();

        h.controller.on_theme_select_change("macos").await.unwrap();

        assert!(start.elapsed() >= RELOAD_DELAY);
        assert_eq!(h.document.reload_count(), 1);
        assert_eq!(h.preferences.get(THEME_KEY).as_deref(), Some("macos"));
        // Active theme only changes with the reload
        assert_eq!(h.controller.theme().theme_name(), "vanilla");
    }

    #[tokio::test(start_paused = true)]
    async fn test_accent_change_applies_without_reload() {
        let h = harness("vanilla", "/");
        h.controller.connect().await.unwrap();

        let applied = h.controller.on_accent_color_select_change("green").unwrap();

        assert_eq!(applied.map(|a| a.name), Some("green"));
        assert_eq!(h.preferences.get(ACCENT_COLOR_KEY).as_deref(), Some("green"));
        assert_eq!(h.document.style_property(ACCENT_HUE_PROPERTY).as_deref(), Some("88"));
        assert_eq!(
            h.document.style_property(ACCENT_SATURATION_PROPERTY).as_deref(),
            Some("35%")
        );
        assert_eq!(
            h.document.style_property(ACCENT_LIGHTNESS_PROPERTY).as_deref(),
            Some("46%")
        );
        assert_eq!(h.document.reload_count(), 0);

        let section = h.controller.theme_section().unwrap();
        let toggled: Vec<_> = section
            .accent_items
            .iter()
            .filter(|item| item.toggled)
            .map(|item| item.value.as_str())
            .collect();
        assert_eq!(toggled, ["green"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hide_then_show_leaves_sidebar_visible() {
        let h = harness("vanilla", "/");

        let (hide_finalized, show_finalized) =
            tokio::join!(h.controller.hide_sidebar(), h.controller.show_sidebar());

        assert!(!hide_finalized);
        assert!(show_finalized);
        assert!(!h.controller.sidebar_hidden());
        assert_eq!(h.controller.sidebar_state(), SidebarState::Shown);
        assert_eq!(h.controller.sidebar_margin_left(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_then_hide_leaves_sidebar_hidden() {
        let h = harness("vanilla", "/");

        let (show_finalized, hide_finalized) =
            tokio::join!(h.controller.show_sidebar(), h.controller.hide_sidebar());

        assert!(!show_finalized);
        assert!(hide_finalized);
        assert!(h.controller.sidebar_hidden());
        assert_eq!(h.controller.sidebar_state(), SidebarState::Hidden);
        assert_eq!(h.controller.sidebar_margin_left(), -270.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sidebar_buttons_ignore_non_primary_clicks() {
        let h = harness("vanilla", "/");

        h.controller
            .on_hide_sidebar_click(MouseButton::Secondary)
            .await;
        assert_eq!(h.controller.sidebar_state(), SidebarState::Shown);

        h.controller.on_hide_sidebar_click(MouseButton::Primary).await;
        assert!(h.controller.sidebar_hidden());

        h.controller.on_show_sidebar_click(MouseButton::Middle).await;
        assert!(h.controller.sidebar_hidden());

        h.controller.on_show_sidebar_click(MouseButton::Primary).await;
        assert!(!h.controller.sidebar_hidden());
    }
}
