//! Clipsi Core Library
//!
//! This crate provides the core functionality for Clipsi, a bookmark
//! organizer: named categories owning ordered lists of links, kept in a
//! single local JSON document.
//!
//! # Architecture
//!
//! State → persistence → view, all synchronous. Every mutation rewrites the
//! whole store file before returning.
//!
//! # Quick Start
//!
//! ```text
//! let mut session = Session::new(Store::open()?);
//!
//! session.add_category("TI")?;
//! session.select("TI")?;
//! session.add_link(NewLink::new("support.example.com").name("Chamados"))?;
//!
//! let links = session.visible_links();
//! ```
//!
//! # Modules
//!
//! - `session`: Selection state machine and controller (main entry point)
//! - `store`: Category and link operations with persistence
//! - `models`: Data structures for categories and links
//! - `search`: Listing and substring search
//! - `storage`: JSON file persistence
//! - `config`: Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod session;
pub mod storage;
pub mod store;

pub use config::Config;
pub use error::{BookmarkError, BookmarkResult};
pub use models::{normalize_url, Category, Link, LinkView, NewLink};
pub use session::{Selection, Session};
pub use storage::{JsonPersistence, StorageError};
pub use store::Store;
