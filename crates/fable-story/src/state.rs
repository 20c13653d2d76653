//! Mutable progress through a script.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Where the reader is and what they have seen.
///
/// This is the whole of the saved-game blob for [`crate::ScriptStory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryState {
    /// Passage the story is at.
    pub passage: String,
    /// Whether that passage still has to be continued.
    pub pending: bool,
    /// Number of times each passage has been entered.
    #[serde(default)]
    visits: BTreeMap<String, u32>,
    /// Choices taken per passage (script indices).
    #[serde(default)]
    taken: BTreeMap<String, BTreeSet<usize>>,
}

impl StoryState {
    /// Create a state poised to continue into `passage`.
    pub fn new(passage: impl Into<String>) -> Self {
        Self {
            passage: passage.into(),
            pending: true,
            visits: BTreeMap::new(),
            taken: BTreeMap::new(),
        }
    }

    /// Record entering a passage.
    pub fn mark_visit(&mut self, passage: &str) {
        *self.visits.entry(passage.to_string()).or_default() += 1;
    }

    /// How many times a passage has been entered.
    pub fn visit_count(&self, passage: &str) -> u32 {
        self.visits.get(passage).copied().unwrap_or(0)
    }

    /// Record taking a choice.
    pub fn mark_taken(&mut self, passage: &str, choice_index: usize) {
        self.taken
            .entry(passage.to_string())
            .or_default()
            .insert(choice_index);
    }

    /// Whether a choice has been taken before.
    pub fn has_taken(&self, passage: &str, choice_index: usize) -> bool {
        self.taken
            .get(passage)
            .is_some_and(|choices| choices.contains(&choice_index))
    }
}
