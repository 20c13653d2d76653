//! Story engine interface for Fable.
//!
//! [`Story`] is the narrow set of calls a player needs to drive a branching
//! narrative: continue, read choices, choose, and save or restore state.
//! [`ScriptStory`] implements it on top of a small JSON script format made of
//! named passages with choices and diverts.

/// Reference engine implementation.
pub mod engine;
/// Error types for the story engine.
pub mod error;
/// Script format.
pub mod script;
/// Reader progress and saved-state format.
pub mod state;
/// The engine capability interface.
pub mod story;

pub use engine::ScriptStory;
pub use error::{StoryError, StoryResult};
pub use script::{Passage, Script, ScriptChoice};
pub use state::StoryState;
pub use story::{Choice, Story};
