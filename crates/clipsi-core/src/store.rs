//! Bookmark store
//!
//! The `Store` owns the ordered category list and mirrors it to disk after
//! every mutation. A mutation is applied to a copy of the list and only
//! becomes visible once the copy has been saved, so a failed write never
//! leaves memory ahead of disk.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open()?;
//!
//! store.add_category("TI")?;
//! store.add_link("TI", NewLink::new("support.example.com").name("Chamados"))?;
//!
//! let links = store.visible_links(&Selection::All, "chamados");
//! ```

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::error::{BookmarkError, BookmarkResult};
use crate::models::{sample_category, Category, Link, LinkView, NewLink};
use crate::search;
use crate::session::Selection;
use crate::storage::JsonPersistence;

/// Categories and their links, backed by a JSON file
pub struct Store {
    /// Categories in creation order
    categories: Vec<Category>,
    /// JSON persistence handler
    persistence: JsonPersistence,
    /// Configuration
    config: Config,
}

impl Store {
    /// Open the store using the default configuration
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(config)
    }

    /// Open the store with a specific configuration
    ///
    /// On first run (no store file yet) the sample category is seeded and
    /// saved when `config.seed_sample` is set. Links stored without an id are
    /// given one, and the file is rewritten so the ids stay the same on the
    /// next open.
    pub fn open_with_config(config: Config) -> Result<Self> {
        let persistence = JsonPersistence::new(&config);
        let first_run = !persistence.exists();

        let loaded = persistence
            .load()
            .with_context(|| format!("Failed to load store from {:?}", persistence.path()))?;

        let mut store = Self {
            categories: loaded.categories,
            persistence,
            config,
        };

        if first_run && store.config.seed_sample {
            info!("First run, seeding sample category");
            store
                .commit(vec![sample_category()])
                .context("Failed to save sample category")?;
        } else if loaded.assigned_ids > 0 {
            store
                .persist_assigned_ids(loaded.assigned_ids)
                .context("Failed to save assigned link ids")?;
        }

        Ok(store)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the persistence handler
    pub fn persistence(&self) -> &JsonPersistence {
        &self.persistence
    }

    // ==================== Queries ====================

    /// All categories in order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Find a category by name (ignoring case)
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.has_name(name))
    }

    /// Number of categories
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Number of links across all categories
    pub fn link_count(&self) -> usize {
        self.categories.iter().map(|c| c.links.len()).sum()
    }

    /// Find a link by its full id
    pub fn find_link(&self, id: &str) -> Option<LinkView> {
        self.categories
            .iter()
            .find_map(|c| c.link(id).map(|link| LinkView::new(link, &c.name)))
    }

    /// All links whose id starts with `prefix`
    pub fn links_with_id_prefix(&self, prefix: &str) -> Vec<LinkView> {
        search::all_links(&self.categories)
            .into_iter()
            .filter(|view| view.link.id.starts_with(prefix))
            .collect()
    }

    /// Links visible for a selection and search term
    pub fn visible_links(&self, selection: &Selection, term: &str) -> Vec<LinkView> {
        search::visible_links(&self.categories, selection, term)
    }

    // ==================== Category Operations ====================

    /// Add an empty category
    ///
    /// The name is trimmed. Blank names and names already used by another
    /// category (ignoring case) are rejected without touching the store.
    pub fn add_category(&mut self, name: &str) -> BookmarkResult<Category> {
        let category = Category::new(name)?;
        if self.category(&category.name).is_some() {
            return Err(BookmarkError::DuplicateCategory(category.name));
        }

        let mut next = self.categories.clone();
        next.push(category.clone());
        self.commit(next)?;

        info!("Added category '{}'", category.name);
        Ok(category)
    }

    /// Remove a category together with all of its links
    ///
    /// Returns the removed category, or `None` if no category had that name.
    pub fn remove_category(&mut self, name: &str) -> BookmarkResult<Option<Category>> {
        let Some(index) = self.categories.iter().position(|c| c.has_name(name)) else {
            return Ok(None);
        };

        let mut next = self.categories.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        info!(
            "Removed category '{}' with {} link(s)",
            removed.name,
            removed.links.len()
        );
        Ok(Some(removed))
    }

    // ==================== Link Operations ====================

    /// Add a link at the front of a category
    pub fn add_link(&mut self, category: &str, input: NewLink) -> BookmarkResult<Link> {
        let index = self
            .categories
            .iter()
            .position(|c| c.has_name(category))
            .ok_or_else(|| BookmarkError::CategoryNotFound(category.trim().to_string()))?;
        let link = Link::from_input(input)?;

        let mut next = self.categories.clone();
        next[index].links.insert(0, link.clone());
        self.commit(next)?;

        info!("Added link {} to '{}'", link.id, self.categories[index].name);
        Ok(link)
    }

    /// Remove the first link with the given id
    ///
    /// Returns `None` without writing anything if no link has that id.
    pub fn remove_link_by_id(&mut self, id: &str) -> BookmarkResult<Option<Link>> {
        let found = self.categories.iter().enumerate().find_map(|(ci, c)| {
            c.links
                .iter()
                .position(|l| l.id == id)
                .map(|li| (ci, li))
        });
        let Some((ci, li)) = found else {
            return Ok(None);
        };

        let mut next = self.categories.clone();
        let removed = next[ci].links.remove(li);
        self.commit(next)?;

        info!("Removed link {}", removed.id);
        Ok(Some(removed))
    }

    // ==================== Maintenance ====================

    /// Delete the store file and forget every category
    pub fn clear(&mut self) -> BookmarkResult<()> {
        self.persistence.clear()?;
        self.categories.clear();
        info!("Cleared store");
        Ok(())
    }

    /// Re-read the store file, discarding in-memory state
    pub fn reload(&mut self) -> BookmarkResult<()> {
        let loaded = self.persistence.load()?;
        self.categories = loaded.categories;
        if loaded.assigned_ids > 0 {
            self.persist_assigned_ids(loaded.assigned_ids)?;
        }
        Ok(())
    }

    /// Write back ids generated while loading
    fn persist_assigned_ids(&mut self, count: usize) -> BookmarkResult<()> {
        info!("Assigned ids to {} stored link(s)", count);
        let next = self.categories.clone();
        self.commit(next)
    }

    /// Save `next` and make it the current state
    fn commit(&mut self, next: Vec<Category>) -> BookmarkResult<()> {
        self.persistence.save(&next)?;
        self.categories = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
            seed_sample: false,
            log_file: None,
        }
    }

    fn empty_store(temp_dir: &TempDir) -> Store {
        Store::open_with_config(test_config(temp_dir)).unwrap()
    }

    fn link_names(category: &Category) -> Vec<&str> {
        category.links.iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn test_open_without_seed_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = empty_store(&temp_dir);

        assert_eq!(store.category_count(), 0);
        assert!(!store.persistence().exists());
    }

    #[test]
    fn test_first_run_seeds_sample() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = test_config(&temp_dir);
        config.seed_sample = true;

        let store = Store::open_with_config(config.clone()).unwrap();
        assert_eq!(store.categories(), &[sample_category()]);
        assert!(config.store_path().exists());
    }

    #[test]
    fn test_existing_empty_store_is_not_reseeded() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = test_config(&temp_dir);
        config.seed_sample = true;

        {
            let mut store = Store::open_with_config(config.clone()).unwrap();
            store.remove_category("TI").unwrap();
        }

        let store = Store::open_with_config(config).unwrap();
        assert_eq!(store.category_count(), 0);
    }

    #[test]
    fn test_add_category_persists_trimmed_name() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        {
            let mut store = Store::open_with_config(config.clone()).unwrap();
            let category = store.add_category("  Ferramentas  ").unwrap();
            assert_eq!(category.name, "Ferramentas");
        }

        let store = Store::open_with_config(config).unwrap();
        let names: Vec<_> = store.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ferramentas"]);
    }

    #[test]
    fn test_add_category_rejects_blank() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);

        let result = store.add_category("   ");
        assert!(matches!(result, Err(BookmarkError::EmptyCategoryName)));
        assert_eq!(store.category_count(), 0);
        assert!(!store.persistence().exists());
    }

    #[test]
    fn test_add_category_rejects_case_insensitive_duplicate() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);

        store.add_category("Docs").unwrap();
        let result = store.add_category("DOCS");

        assert!(matches!(result, Err(BookmarkError::DuplicateCategory(_))));
        assert_eq!(store.category_count(), 1);
        assert_eq!(store.categories()[0].name, "Docs");

        let reopened = Store::open_with_config(store.config().clone()).unwrap();
        let names: Vec<_> = reopened.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Docs"]);
    }

    #[test]
    fn test_categories_keep_creation_order() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);

        for name in ["B", "A", "C"] {
            store.add_category(name).unwrap();
        }

        let names: Vec<_> = store.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_remove_category_cascades_to_links() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);

        store.add_category("A").unwrap();
        store.add_category("B").unwrap();
        store.add_link("A", NewLink::new("a1.com")).unwrap();
        store.add_link("A", NewLink::new("a2.com")).unwrap();
        store.add_link("B", NewLink::new("b1.com")).unwrap();
        let before = store.link_count();

        let removed = store.remove_category("a").unwrap().unwrap();
        assert_eq!(removed.links.len(), 2);
        assert_eq!(store.link_count(), before - 2);
        assert_eq!(store.categories()[0].name, "B");
        assert_eq!(store.categories()[0].links[0].url, "b1.com");
    }

    #[test]
    fn test_remove_unknown_category_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);
        store.add_category("A").unwrap();

        assert!(store.remove_category("Z").unwrap().is_none());
        assert_eq!(store.category_count(), 1);
    }

    #[test]
    fn test_add_link_prepends() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);
        store.add_category("Docs").unwrap();

        store.add_link("Docs", NewLink::new("two.com").name("L2")).unwrap();
        store.add_link("Docs", NewLink::new("one.com").name("L1")).unwrap();

        assert_eq!(link_names(store.category("Docs").unwrap()), vec!["L1", "L2"]);
    }

    #[test]
    fn test_add_link_to_missing_category() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);

        let result = store.add_link("Nowhere", NewLink::new("example.com"));
        assert!(matches!(result, Err(BookmarkError::CategoryNotFound(_))));
        assert_eq!(store.link_count(), 0);
    }

    #[test]
    fn test_add_link_requires_url() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);
        store.add_category("Docs").unwrap();

        let result = store.add_link("Docs", NewLink::new(" ").name("No url"));
        assert!(matches!(result, Err(BookmarkError::EmptyUrl)));
        assert_eq!(store.link_count(), 0);
    }

    #[test]
    fn test_remove_link_by_id() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let kept;
        {
            let mut store = Store::open_with_config(config.clone()).unwrap();
            store.add_category("A").unwrap();
            store.add_category("B").unwrap();
            kept = store.add_link("A", NewLink::new("keep.com")).unwrap();
            let gone = store.add_link("B", NewLink::new("gone.com")).unwrap();

            let removed = store.remove_link_by_id(&gone.id).unwrap().unwrap();
            assert_eq!(removed.url, "gone.com");
        }

        let store = Store::open_with_config(config).unwrap();
        assert_eq!(store.link_count(), 1);
        assert!(store.find_link(&kept.id).is_some());
    }

    #[test]
    fn test_remove_unknown_link_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);
        store.add_category("A").unwrap();
        store.add_link("A", NewLink::new("a.com")).unwrap();
        let before = store.categories().to_vec();

        assert!(store.remove_link_by_id("does-not-exist").unwrap().is_none());
        assert_eq!(store.categories(), before.as_slice());
    }

    #[test]
    fn test_find_link_and_prefix_lookup() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);
        store.add_category("Docs").unwrap();
        let link = store.add_link("Docs", NewLink::new("wiki.example.com")).unwrap();

        let view = store.find_link(&link.id).unwrap();
        assert_eq!(view.category, "Docs");

        let matches = store.links_with_id_prefix(&link.id[..6]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].link.id, link.id);
    }

    #[test]
    fn test_clear_removes_everything() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);
        store.add_category("A").unwrap();
        store.add_link("A", NewLink::new("a.com")).unwrap();

        store.clear().unwrap();
        assert_eq!(store.category_count(), 0);
        assert!(!store.persistence().exists());
    }

    #[test]
    fn test_failed_save_leaves_state_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);
        store.add_category("A").unwrap();

        // Replace the data directory with a plain file so writes fail
        std::fs::remove_dir_all(temp_dir.path()).unwrap();
        std::fs::write(temp_dir.path(), "not a directory").unwrap();

        let result = store.add_category("B");
        assert!(matches!(result, Err(BookmarkError::Storage(_))));
        assert_eq!(store.category_count(), 1);

        std::fs::remove_file(temp_dir.path()).unwrap();
    }

    #[test]
    fn test_stored_links_without_ids_keep_generated_ids() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        std::fs::write(
            config.store_path(),
            r#"[{"name":"TI","links":[{"name":"x","url":"x.com","desc":""}]}]"#,
        )
        .unwrap();

        let first = Store::open_with_config(config.clone()).unwrap();
        let first_id = first.categories()[0].links[0].id.clone();

        let mut second = Store::open_with_config(config).unwrap();
        assert_eq!(second.categories()[0].links[0].id, first_id);

        let removed = second.remove_link_by_id(&first_id).unwrap();
        assert_eq!(removed.map(|l| l.name), Some("x".to_string()));
    }

    #[test]
    fn test_reload_picks_up_external_changes() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let mut first = Store::open_with_config(config.clone()).unwrap();
        let mut second = Store::open_with_config(config).unwrap();

        second.add_category("Shared").unwrap();
        first.reload().unwrap();

        assert!(first.category("shared").is_some());
    }
}
