//! Command handlers

pub mod category;
pub mod clear;
pub mod config;
pub mod link;
pub mod status;

use clipsi_core::BookmarkError;

/// Turn a core error into a CLI error, adding a recovery hint for storage
/// failures
pub fn report(err: BookmarkError) -> anyhow::Error {
    let hint = match &err {
        BookmarkError::Storage(storage) => storage.recovery_suggestion(),
        _ => None,
    };
    match hint {
        Some(hint) => anyhow::anyhow!("{}\n{}", err, hint),
        None => anyhow::Error::new(err),
    }
}
