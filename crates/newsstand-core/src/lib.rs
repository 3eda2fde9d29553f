//! Core catalog, favorites and submission handling for newsstand.
//!
//! This crate holds everything a front end needs to browse a directory of
//! news sources: loading the static catalog, filtering, favorites and
//! user-added entries persisted in a key-value store.

pub mod catalog;
pub mod directory;
pub mod error;
pub mod favorites;
pub mod icon;
pub mod messages;
pub mod models;
pub mod storage;
pub mod submission;

pub use catalog::{CatalogSource, FileSource, HttpSource};
pub use directory::Directory;
pub use error::{IconResolutionError, LoadError, PersistenceError, SubmitError, ValidationError};
pub use favorites::FavoritesStore;
pub use icon::{IconSettings, IconSource, UploadRegistry};
pub use messages::Messages;
pub use models::{Entry, Filter, Language, Theme, ViewMode, ALL_CATEGORIES};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use submission::{UserEntries, ValidatedInput};
