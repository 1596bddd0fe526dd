//! Browser-style session history

use std::cell::RefCell;
use url::Url;

/// Who restores scroll offsets after a history traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollRestoration {
    /// The environment restores scroll position itself
    Auto,
    /// The shell restores scroll position
    Manual,
}

/// Push/replace/pop history of the hosting environment
pub trait History {
    /// URL of the current entry
    fn location(&self) -> Url;

    /// Whether the current entry carries a state object
    fn has_state(&self) -> bool;

    /// Add a new entry after the current one, dropping any forward entries
    fn push_state(&self, url: Url);

    /// Replace the current entry, marking it as carrying state
    fn replace_state(&self, url: Url);

    fn set_scroll_restoration(&self, mode: ScrollRestoration);
}

#[derive(Debug, Clone)]
struct Entry {
    url: Url,
    has_state: bool,
}

#[derive(Debug)]
struct Inner {
    entries: Vec<Entry>,
    index: usize,
    scroll_restoration: ScrollRestoration,
}

/// In-process history with back/forward traversal
///
/// `back` and `forward` only move the cursor; whoever calls them is
/// responsible for delivering the pop to the navigation controller.
#[derive(Debug)]
pub struct MemoryHistory {
    inner: RefCell<Inner>,
}

impl MemoryHistory {
    /// Start a history whose only entry is `url`, without state
    pub fn new(url: Url) -> Self {
        Self {
            inner: RefCell::new(Inner {
                entries: vec![Entry {
                    url,
                    has_state: false,
                }],
                index: 0,
                scroll_restoration: ScrollRestoration::Auto,
            }),
        }
    }

    /// Step back one entry; returns `false` at the start of history
    pub fn back(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.index == 0 {
            return false;
        }
        inner.index -= 1;
        true
    }

    /// Step forward one entry; returns `false` at the end of history
    pub fn forward(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.index + 1 >= inner.entries.len() {
            return false;
        }
        inner.index += 1;
        true
    }

    /// Number of entries in the session history
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    pub fn scroll_restoration(&self) -> ScrollRestoration {
        self.inner.borrow().scroll_restoration
    }
}

impl History for MemoryHistory {
    fn location(&self) -> Url {
        let inner = self.inner.borrow();
        inner.entries[inner.index].url.clone()
    }

    fn has_state(&self) -> bool {
        let inner = self.inner.borrow();
        inner.entries[inner.index].has_state
    }

    fn push_state(&self, url: Url) {
        let mut inner = self.inner.borrow_mut();
        let next = inner.index + 1;
        inner.entries.truncate(next);
        inner.entries.push(Entry {
            url,
            has_state: true,
        });
        inner.index = next;
    }

    fn replace_state(&self, url: Url) {
        let mut inner = self.inner.borrow_mut();
        let index = inner.index;
        inner.entries[index] = Entry {
            url,
            has_state: true,
        };
    }

    fn set_scroll_restoration(&self, mode: ScrollRestoration) {
        self.inner.borrow_mut().scroll_restoration = mode;
    }
}
