//! Cache of materialized documentation views
//!
//! Views are keyed by location pathname. A view is fetched and parsed the
//! first time its pathname is visited, exactly one view is selected at a
//! time, and views that are neither selected nor animating are evicted after
//! each navigation.

use crate::fragment::ViewContent;
use crate::route::RouteResolver;
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::rc::Rc;
use thiserror::Error;
use tokio::sync::Notify;

/// Errors that can occur while fetching a fragment
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Where fragment markup is read from
#[async_trait(?Send)]
pub trait ContentSource {
    /// Read the markup stored at `resource_path`
    async fn read_file(&self, resource_path: &str) -> Result<String, FetchError>;
}

/// Content source reading resource paths relative to a directory
#[derive(Debug, Clone)]
pub struct FsContentSource {
    root: PathBuf,
}

impl FsContentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait(?Send)]
impl ContentSource for FsContentSource {
    async fn read_file(&self, resource_path: &str) -> Result<String, FetchError> {
        let path = self.root.join(resource_path.trim_start_matches('/'));

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => FetchError::NotFound(resource_path.to_string()),
                _ => FetchError::Io {
                    path: path.display().to_string(),
                    source,
                },
            })
    }
}

/// One materialized documentation page
#[derive(Debug, Clone)]
pub struct View {
    pathname: String,

    /// Parsed fragment
    pub content: ViewContent,

    selected: bool,

    /// Set while an external transition is running; protects against eviction
    pub animating: bool,

    /// Vertical scroll offset in pixels
    pub scroll_top: i64,
}

impl View {
    pub fn new(pathname: impl Into<String>, content: ViewContent) -> Self {
        Self {
            pathname: pathname.into(),
            content,
            selected: false,
            animating: false,
            scroll_top: 0,
        }
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }
}

/// Outcome of selecting a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The view became the selected one
    Changed,
    /// The view already was the selected one
    Unchanged,
    /// No view for the pathname is cached
    NotCached,
}

/// Removes the in-flight marker of a load and wakes its waiters, even when
/// the loading future is dropped midway
struct LoadGuard<'a> {
    loading: &'a RefCell<HashMap<String, Rc<Notify>>>,
    pathname: &'a str,
    notify: Rc<Notify>,
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        self.loading.borrow_mut().remove(self.pathname);
        self.notify.notify_waiters();
    }
}

/// Owner of every materialized view
pub struct ViewCache {
    routes: RouteResolver,
    source: Rc<dyn ContentSource>,
    views: RefCell<Vec<View>>,
    loading: RefCell<HashMap<String, Rc<Notify>>>,
}

impl ViewCache {
    pub fn new(routes: RouteResolver, source: Rc<dyn ContentSource>) -> Self {
        Self {
            routes,
            source,
            views: RefCell::new(Vec::new()),
            loading: RefCell::new(HashMap::new()),
        }
    }

    pub fn routes(&self) -> &RouteResolver {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.views.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.borrow().is_empty()
    }

    pub fn contains(&self, pathname: &str) -> bool {
        self.views.borrow().iter().any(|v| v.pathname == pathname)
    }

    /// Pathnames of all cached views, in insertion order
    pub fn pathnames(&self) -> Vec<String> {
        self.views
            .borrow()
            .iter()
            .map(|v| v.pathname.clone())
            .collect()
    }

    pub fn selected_pathname(&self) -> Option<String> {
        self.views
            .borrow()
            .iter()
            .find(|v| v.selected)
            .map(|v| v.pathname.clone())
    }

    /// Run `f` against the selected view, if any
    pub fn with_selected<R>(&self, f: impl FnOnce(&mut View) -> R) -> Option<R> {
        self.views.borrow_mut().iter_mut().find(|v| v.selected).map(f)
    }

    /// Run `f` against the view cached for `pathname`, if any
    pub fn with_view<R>(&self, pathname: &str, f: impl FnOnce(&mut View) -> R) -> Option<R> {
        self.views
            .borrow_mut()
            .iter_mut()
            .find(|v| v.pathname == pathname)
            .map(f)
    }

    /// Flag or unflag a view as mid-transition; returns `false` if not cached
    pub fn set_animating(&self, pathname: &str, animating: bool) -> bool {
        self.with_view(pathname, |view| view.animating = animating)
            .is_some()
    }

    /// Make sure a view for `pathname` is cached, fetching it if needed
    ///
    /// Requests for a pathname whose fetch is already in flight wait for that
    /// fetch instead of starting another one. If the awaited fetch fails, the
    /// waiter retries on its own. When this returns `Ok`, the view is cached.
    pub async fn ensure_loaded(&self, pathname: &str) -> Result<(), FetchError> {
        loop {
            if self.contains(pathname) {
                return Ok(());
            }

            let pending = self.loading.borrow().get(pathname).cloned();
            match pending {
                Some(notify) => {
                    log::debug!("Waiting for in-flight load of {}", pathname);
                    notify.notified().await;
                }
                None => break,
            }
        }

        let notify = Rc::new(Notify::new());
        self.loading
            .borrow_mut()
            .insert(pathname.to_string(), Rc::clone(&notify));
        let guard = LoadGuard {
            loading: &self.loading,
            pathname,
            notify,
        };

        let resource_path = self.routes.resolve(pathname);
        log::info!("Loading view {} from {}", pathname, resource_path);
        let markup = self.source.read_file(&resource_path).await?;

        let view = View::new(pathname, ViewContent::parse(markup));
        self.views.borrow_mut().push(view);
        drop(guard);

        Ok(())
    }

    /// Select the cached view for `pathname`, deselecting any other view,
    /// then run the theme visibility pass on it
    pub fn select(&self, pathname: &str, theme_name: &str) -> Selection {
        let mut views = self.views.borrow_mut();

        let Some(index) = views.iter().position(|v| v.pathname == pathname) else {
            return Selection::NotCached;
        };

        if views[index].selected {
            return Selection::Unchanged;
        }

        for view in views.iter_mut() {
            view.selected = false;
        }

        let view = &mut views[index];
        view.selected = true;
        view.content.apply_theme(theme_name);
        log::debug!("Selected view {}", pathname);

        Selection::Changed
    }

    /// Materialize the view for `pathname` if needed and select it
    pub async fn ensure_selected(
        &self,
        pathname: &str,
        theme_name: &str,
    ) -> Result<Selection, FetchError> {
        self.ensure_loaded(pathname).await?;
        Ok(self.select(pathname, theme_name))
    }

    /// Remove every view that is neither selected nor animating
    ///
    /// # Returns
    /// * `usize` - Number of views removed
    pub fn evict_offscreen(&self) -> usize {
        let mut views = self.views.borrow_mut();
        let before = views.len();
        views.retain(|v| v.selected || v.animating);
        let evicted = before - views.len();

        if evicted > 0 {
            log::debug!("Evicted {} offscreen view(s)", evicted);
        }
        evicted
    }
}
