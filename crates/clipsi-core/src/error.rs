//! Errors returned by bookmark operations
//!
//! Validation failures leave the store untouched. Storage failures carry the
//! underlying [`StorageError`] so callers can show a recovery hint.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur while creating or removing categories and links
#[derive(Error, Debug)]
pub enum BookmarkError {
    /// Category name was blank after trimming
    #[error("Category name must not be empty.")]
    EmptyCategoryName,

    /// A category with the same name (ignoring case) already exists
    #[error("Category already exists: '{0}'")]
    DuplicateCategory(String),

    /// Link URL was blank after trimming
    #[error("Link URL must not be empty.")]
    EmptyUrl,

    /// Adding a link requires a selected category
    #[error("Select a category before adding links.")]
    NoCategorySelected,

    /// The named category does not exist
    #[error("Category not found: '{0}'")]
    CategoryNotFound(String),

    /// Persisting the store failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl BookmarkError {
    /// Whether this error was caused by user input rather than storage
    pub fn is_validation(&self) -> bool {
        !matches!(self, BookmarkError::Storage(_))
    }
}

/// Result type for bookmark operations
pub type BookmarkResult<T> = Result<T, BookmarkError>;
