//! Link listing and search
//!
//! Search is a linear case-insensitive substring scan over name, url,
//! description and category name. Result order follows the base set.

use crate::models::{Category, LinkView};
use crate::session::Selection;

/// Every link tagged with its category, in category order then link order
pub fn all_links(categories: &[Category]) -> Vec<LinkView> {
    categories
        .iter()
        .flat_map(|c| c.links.iter().map(move |link| LinkView::new(link, &c.name)))
        .collect()
}

/// Links of the selected category, or of every category for `Selection::All`
///
/// An unknown category yields an empty list.
pub fn base_links(categories: &[Category], selection: &Selection) -> Vec<LinkView> {
    match selection {
        Selection::All => all_links(categories),
        Selection::Category(name) => categories
            .iter()
            .find(|c| c.has_name(name))
            .map(|c| {
                c.links
                    .iter()
                    .map(|link| LinkView::new(link, &c.name))
                    .collect()
            })
            .unwrap_or_default(),
    }
}

/// Links visible for a selection, narrowed by a search term
///
/// The term is trimmed and lower-cased; a blank term returns the base set.
pub fn visible_links(categories: &[Category], selection: &Selection, term: &str) -> Vec<LinkView> {
    let base = base_links(categories, selection);
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return base;
    }
    base.into_iter().filter(|view| view.matches(&term)).collect()
}
