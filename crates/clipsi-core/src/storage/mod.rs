//! Storage layer
//!
//! The bookmark store is persisted as a single JSON document. There is no
//! incremental persistence: every mutation rewrites the whole file.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::{JsonPersistence, Loaded};
