//! Document-level surface: title, root style properties and reload

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// The parts of the hosting document the shell writes to
pub trait DocumentSurface {
    fn title(&self) -> String;

    fn set_title(&self, title: &str);

    /// Publish a custom style property on the document root
    fn set_style_property(&self, name: &str, value: &str);

    fn style_property(&self, name: &str) -> Option<String>;

    /// Reload the whole document
    fn reload(&self);
}

/// Document surface that records every write, used headless and in tests
#[derive(Debug, Default)]
pub struct MemoryDocument {
    title: RefCell<String>,
    style: RefCell<BTreeMap<String, String>>,
    reloads: Cell<usize>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `reload` was requested
    pub fn reload_count(&self) -> usize {
        self.reloads.get()
    }
}

impl DocumentSurface for MemoryDocument {
    fn title(&self) -> String {
        self.title.borrow().clone()
    }

    fn set_title(&self, title: &str) {
        *self.title.borrow_mut() = title.to_string();
    }

    fn set_style_property(&self, name: &str, value: &str) {
        self.style
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn style_property(&self, name: &str) -> Option<String> {
        self.style.borrow().get(name).cloned()
    }

    fn reload(&self) {
        log::info!("Document reload requested");
        self.reloads.set(self.reloads.get() + 1);
    }
}
