//! Error types for the story engine.

use thiserror::Error;

/// Result type for story operations.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors that can occur while loading or running a story.
#[derive(Debug, Error)]
pub enum StoryError {
    /// The script could not be parsed.
    #[error("invalid script: {0}")]
    Script(#[source] serde_json::Error),

    /// The script parsed but is not playable.
    #[error("invalid script: {0}")]
    InvalidScript(String),

    /// A saved state blob could not be parsed.
    #[error("invalid saved state: {0}")]
    State(#[source] serde_json::Error),

    /// A saved state refers to a passage the script does not have.
    #[error("saved state refers to unknown passage '{0}'")]
    UnknownPassage(String),

    /// The state could not be serialized.
    #[error("cannot serialize state: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Choice index outside the current choice list.
    #[error("choice index {index} out of range ({available} available)")]
    ChoiceOutOfRange {
        /// Requested zero-based index.
        index: usize,
        /// Number of choices currently offered.
        available: usize,
    },
}
