//! Script format for the reference story engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{StoryError, StoryResult};

/// A complete story script: named passages and the passage to start at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Name of the first passage.
    pub start: String,
    /// All passages, keyed by name.
    pub passages: BTreeMap<String, Passage>,
}

/// A block of text followed by choices, a divert, or nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Passage {
    /// Lines of text, printed in order.
    #[serde(default)]
    pub text: Vec<String>,
    /// Choices offered once the text has been shown.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<ScriptChoice>,
    /// Passage to flow into without asking the player.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divert: Option<String>,
}

impl Passage {
    /// Create a passage from lines of text.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: ScriptChoice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Set the divert target.
    pub fn with_divert(mut self, target: impl Into<String>) -> Self {
        self.divert = Some(target.into());
        self
    }
}

/// A choice as written in the script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptChoice {
    /// The text shown to the player.
    pub text: String,
    /// Passage to go to when chosen.
    pub goto: String,
    /// Hide this choice after it has been taken once.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub once: bool,
    /// Only offer this choice after the named passage has been visited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<String>,
}

impl ScriptChoice {
    /// Create a choice leading to `goto`.
    pub fn new(text: impl Into<String>, goto: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            goto: goto.into(),
            once: false,
            requires: None,
        }
    }

    /// Make the choice single-use.
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    /// Require a visited passage before offering the choice.
    pub fn requires(mut self, passage: impl Into<String>) -> Self {
        self.requires = Some(passage.into());
        self
    }
}

impl Script {
    /// Create a script starting at `start` with no passages.
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            passages: BTreeMap::new(),
        }
    }

    /// Add a passage.
    pub fn with_passage(mut self, name: impl Into<String>, passage: Passage) -> Self {
        self.passages.insert(name.into(), passage);
        self
    }

    /// Parse and validate a script from JSON text.
    pub fn from_json(json: &str) -> StoryResult<Self> {
        let script: Script = serde_json::from_str(json).map_err(StoryError::Script)?;
        script.validate()?;
        Ok(script)
    }

    /// Look up a passage by name.
    pub fn passage(&self, name: &str) -> Option<&Passage> {
        self.passages.get(name)
    }

    /// Check the structural rules a playable script must satisfy.
    ///
    /// Dangling `goto`/`divert` targets are not rejected here; they surface
    /// as runtime errors when reached.
    pub fn validate(&self) -> StoryResult<()> {
        if !self.passages.contains_key(&self.start) {
            return Err(StoryError::InvalidScript(format!(
                "start passage '{}' does not exist",
                self.start
            )));
        }
        for (name, passage) in &self.passages {
            if passage.divert.is_some() && !passage.choices.is_empty() {
                return Err(StoryError::InvalidScript(format!(
                    "passage '{name}' has both choices and a divert"
                )));
            }
        }
        Ok(())
    }
}
