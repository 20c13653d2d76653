//! The capability interface a story engine exposes to a player.

use crate::error::StoryResult;

/// A choice the story currently offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// The text shown to the player.
    pub text: String,
}

impl Choice {
    /// Create a choice with the given display text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A running narrative that produces text and offers choices.
///
/// Players only drive a story through these calls. Indices passed to
/// [`Story::choose_choice_index`] are zero-based positions in the list most
/// recently returned by [`Story::current_choices`].
pub trait Story {
    /// Whether more text can be produced without a choice.
    fn can_continue(&self) -> bool;

    /// Advance until blocked on a choice or exhausted, returning all text.
    fn continue_maximally(&mut self) -> StoryResult<String>;

    /// Whether the last continuation step raised runtime errors.
    fn has_error(&self) -> bool {
        !self.current_errors().is_empty()
    }

    /// Runtime errors raised by the last continuation step.
    fn current_errors(&self) -> &[String];

    /// Choices available right now, empty if none.
    fn current_choices(&self) -> Vec<Choice>;

    /// Commit a selection.
    fn choose_choice_index(&mut self, index: usize) -> StoryResult<()>;

    /// Serialize the current state to an opaque string.
    fn serialize_state(&self) -> StoryResult<String>;

    /// Replace the current state with a previously serialized one.
    ///
    /// On error the current state is left untouched.
    fn deserialize_state(&mut self, blob: &str) -> StoryResult<()>;
}
