// Core derivation pipeline lives here - the brain of the operation
pub mod catalog;
pub mod error;
pub mod memo;
pub mod messages;
pub mod models;
pub mod pagination;
pub mod prefs;
pub mod search;
pub mod sort;

pub use catalog::CatalogEngine;
pub use error::Error;
pub use messages::{MessageEngine, ResourceRegistry};
pub use pagination::PaginationCursor;
pub use prefs::{FilePreferences, MemoryPreferences, PreferenceStore, Preferences};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
