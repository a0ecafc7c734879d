use thiserror::Error;

/// All the ways things can go wrong in addonshelf
///
/// We use thiserror here because it generates the boilerplate for us.
/// Life's too short to manually implement Display and Error traits.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid sort key: {0}")]
    InvalidSortKey(String),

    #[error("Preference store error: {0}")]
    Preferences(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
