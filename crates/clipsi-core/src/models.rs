//! Data models for Clipsi
//!
//! Defines the core data structures: Category, Link, and the views built
//! from them. The field names match the stored JSON document; reading it back
//! goes through the more lenient types in `storage::persistence`.

use serde::Serialize;
use uuid::Uuid;

use crate::error::{BookmarkError, BookmarkResult};

/// A named group of links
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Category {
    /// Display name, unique ignoring case
    pub name: String,
    /// Links, most recently added first
    pub links: Vec<Link>,
}

impl Category {
    /// Create an empty category, trimming the name
    pub fn new(name: &str) -> BookmarkResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BookmarkError::EmptyCategoryName);
        }
        Ok(Self {
            name: name.to_string(),
            links: Vec::new(),
        })
    }

    /// Case-insensitive name comparison
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    /// Find a link in this category by id
    pub fn link(&self, id: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }
}

/// A saved link
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Link {
    /// Unique identifier, stable for the link's lifetime
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name
    pub name: String,
    /// The URL as entered
    pub url: String,
    /// Optional description (empty when not given)
    pub desc: String,
}

impl Link {
    /// Build a link from user input
    ///
    /// Trims every field, requires a URL and falls back to the URL when the
    /// name is blank. A fresh id is generated.
    pub fn from_input(input: NewLink) -> BookmarkResult<Self> {
        let url = input.url.trim();
        if url.is_empty() {
            return Err(BookmarkError::EmptyUrl);
        }
        let name = match input.name.trim() {
            "" => url,
            name => name,
        };
        Ok(Self {
            id: generate_id(),
            name: name.to_string(),
            url: url.to_string(),
            desc: input.desc.trim().to_string(),
        })
    }

    /// Create a link with a specific ID (for fixtures and loading)
    pub fn with_id(
        id: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
        desc: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
            desc: desc.into(),
        }
    }

    /// URL suitable for handing to a browser
    pub fn open_url(&self) -> String {
        normalize_url(&self.url)
    }
}

/// User input for a new link, before validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewLink {
    pub name: String,
    pub url: String,
    pub desc: String,
}

impl NewLink {
    /// Input with only a URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set the display name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the description
    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }
}

/// A link tagged with the name of the category that owns it
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LinkView {
    #[serde(flatten)]
    pub link: Link,
    pub category: String,
}

impl LinkView {
    pub fn new(link: &Link, category: &str) -> Self {
        Self {
            link: link.clone(),
            category: category.to_string(),
        }
    }

    /// Whether any field contains an already lower-cased term
    pub fn matches(&self, term: &str) -> bool {
        [
            &self.link.name,
            &self.link.url,
            &self.link.desc,
            &self.category,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(term))
    }
}

/// Prefix a bare host with `https://`
///
/// URLs that already start with `http://` or `https://` (any case) are
/// returned unchanged.
pub fn normalize_url(url: &str) -> String {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Category seeded on first run
pub fn sample_category() -> Category {
    Category {
        name: "TI".to_string(),
        links: vec![Link::with_id(
            "l1",
            "Chamados TI",
            "https://www.jotform.com/form/240573217535657",
            "Faça seu chamada aqui",
        )],
    }
}

pub(crate) fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}
