//! Selection state and the controller that owns the store
//!
//! A `Session` is the single entry point front-ends use: it holds the store,
//! the current category selection and the search term. The selection is
//! transient and starts at [`Selection::All`] every time a session is created.
//!
//! ```text
//!            select(name)
//!   All ─────────────────────▶ Category(name)
//!    ▲                              │
//!    └──────────────────────────────┘
//!     select_all() / remove_category(name)
//! ```
//!
//! Adding a link is only allowed while a category is selected.

use crate::error::{BookmarkError, BookmarkResult};
use crate::models::{Category, Link, LinkView, NewLink};
use crate::store::Store;

/// Which links are shown and where new links go
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// No category selected; every link is shown
    #[default]
    All,
    /// A single category is selected
    Category(String),
}

impl Selection {
    /// Selected category name, if any
    pub fn category(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Category(name) => Some(name),
        }
    }

    /// Whether this selection refers to `name` (ignoring case)
    pub fn is_category(&self, name: &str) -> bool {
        self.category()
            .is_some_and(|selected| selected.to_lowercase() == name.to_lowercase())
    }
}

/// Store plus transient view state
pub struct Session {
    store: Store,
    selection: Selection,
    search: String,
}

impl Session {
    /// Start a session with nothing selected and an empty search
    pub fn new(store: Store) -> Self {
        Self {
            store,
            selection: Selection::All,
            search: String::new(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Heading for the current view
    pub fn title(&self) -> &str {
        self.selection.category().unwrap_or("All")
    }

    /// Whether the add-link action is available
    pub fn can_add_link(&self) -> bool {
        self.selection.category().is_some()
    }

    // ==================== Selection ====================

    /// Select a category by name
    pub fn select(&mut self, name: &str) -> BookmarkResult<()> {
        let category = self
            .store
            .category(name)
            .ok_or_else(|| BookmarkError::CategoryNotFound(name.trim().to_string()))?;
        self.selection = Selection::Category(category.name.clone());
        Ok(())
    }

    /// Show links from every category
    pub fn select_all(&mut self) {
        self.selection = Selection::All;
    }

    /// Replace the search term
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Links for the current selection and search term
    pub fn visible_links(&self) -> Vec<LinkView> {
        self.store.visible_links(&self.selection, &self.search)
    }

    // ==================== Mutations ====================

    pub fn add_category(&mut self, name: &str) -> BookmarkResult<Category> {
        self.store.add_category(name)
    }

    /// Remove a category; the caller is responsible for confirming first
    ///
    /// Removing the selected category moves the selection back to `All`.
    pub fn remove_category(&mut self, name: &str) -> BookmarkResult<Option<Category>> {
        let removed = self.store.remove_category(name)?;
        if let Some(category) = &removed {
            if self.selection.is_category(&category.name) {
                self.selection = Selection::All;
            }
        }
        Ok(removed)
    }

    /// Add a link to the selected category
    pub fn add_link(&mut self, input: NewLink) -> BookmarkResult<Link> {
        let Selection::Category(name) = &self.selection else {
            return Err(BookmarkError::NoCategorySelected);
        };
        let name = name.clone();
        self.store.add_link(&name, input)
    }

    pub fn remove_link_by_id(&mut self, id: &str) -> BookmarkResult<Option<Link>> {
        self.store.remove_link_by_id(id)
    }

    /// Delete everything and reset the selection
    pub fn clear(&mut self) -> BookmarkResult<()> {
        self.store.clear()?;
        self.selection = Selection::All;
        Ok(())
    }
}
