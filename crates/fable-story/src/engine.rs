//! The reference engine: a [`Script`] plus a [`StoryState`].

use tracing::debug;

use crate::error::{StoryError, StoryResult};
use crate::script::{Script, ScriptChoice};
use crate::state::StoryState;
use crate::story::{Choice, Story};

/// Most passages a single continuation step may pass through.
pub const MAX_PASSAGES_PER_STEP: usize = 1000;

/// A playable story driven by a JSON [`Script`].
#[derive(Debug, Clone)]
pub struct ScriptStory {
    script: Script,
    state: StoryState,
    errors: Vec<String>,
}

impl ScriptStory {
    /// Start a story at the script's first passage.
    pub fn new(script: Script) -> StoryResult<Self> {
        script.validate()?;
        let state = StoryState::new(script.start.clone());
        Ok(Self {
            script,
            state,
            errors: Vec::new(),
        })
    }

    /// Parse a script and start it.
    pub fn from_json(json: &str) -> StoryResult<Self> {
        Self::new(Script::from_json(json)?)
    }

    /// The script being played.
    pub fn script(&self) -> &Script {
        &self.script
    }

    /// The current progress.
    pub fn state(&self) -> &StoryState {
        &self.state
    }

    /// Choices currently visible, paired with their index in the script.
    fn visible_choices(&self) -> Vec<(usize, &ScriptChoice)> {
        if self.state.pending {
            return Vec::new();
        }
        let Some(passage) = self.script.passage(&self.state.passage) else {
            return Vec::new();
        };
        passage
            .choices
            .iter()
            .enumerate()
            .filter(|(i, c)| !(c.once && self.state.has_taken(&self.state.passage, *i)))
            .filter(|(_, c)| {
                c.requires
                    .as_deref()
                    .is_none_or(|p| self.state.visit_count(p) > 0)
            })
            .collect()
    }

    fn halt(&mut self, message: String) {
        debug!(%message, "story halted");
        self.errors.push(message);
        self.state.pending = false;
    }
}

impl Story for ScriptStory {
    fn can_continue(&self) -> bool {
        self.state.pending
    }

    fn continue_maximally(&mut self) -> StoryResult<String> {
        self.errors.clear();
        let mut text = String::new();
        let mut entered = 0;

        while self.state.pending {
            if entered == MAX_PASSAGES_PER_STEP {
                self.halt(format!(
                    "divert loop: more than {MAX_PASSAGES_PER_STEP} passages without a choice"
                ));
                break;
            }
            entered += 1;

            let name = self.state.passage.clone();
            let Some(passage) = self.script.passages.get(&name) else {
                self.halt(format!("unknown passage '{name}'"));
                break;
            };
            for line in &passage.text {
                text.push_str(line);
                text.push('\n');
            }
            let divert = passage.divert.clone();
            self.state.mark_visit(&name);

            match divert {
                Some(target) if self.script.passages.contains_key(&target) => {
                    self.state.passage = target;
                }
                Some(target) => self.halt(format!("unknown passage '{target}'")),
                None => self.state.pending = false,
            }
        }

        debug!(passage = %self.state.passage, entered, "continued");
        Ok(text)
    }

    fn current_errors(&self) -> &[String] {
        &self.errors
    }

    fn current_choices(&self) -> Vec<Choice> {
        self.visible_choices()
            .into_iter()
            .map(|(_, c)| Choice::new(c.text.clone()))
            .collect()
    }

    fn choose_choice_index(&mut self, index: usize) -> StoryResult<()> {
        let visible = self.visible_choices();
        let available = visible.len();
        let (script_index, goto) = visible
            .get(index)
            .map(|(i, c)| (*i, c.goto.clone()))
            .ok_or(StoryError::ChoiceOutOfRange { index, available })?;

        let from = self.state.passage.clone();
        self.state.mark_taken(&from, script_index);
        debug!(%from, to = %goto, index, "choice taken");
        self.state.passage = goto;
        self.state.pending = true;
        Ok(())
    }

    fn serialize_state(&self) -> StoryResult<String> {
        serde_json::to_string(&self.state).map_err(StoryError::Serialize)
    }

    fn deserialize_state(&mut self, blob: &str) -> StoryResult<()> {
        let state: StoryState = serde_json::from_str(blob).map_err(StoryError::State)?;
        if !self.script.passages.contains_key(&state.passage) {
            return Err(StoryError::UnknownPassage(state.passage));
        }
        self.state = state;
        self.errors.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Passage;

    fn hall() -> ScriptStory {
        let script = Script::new("hall")
            .with_passage(
                "hall",
                Passage::new(["You stand in a hall."])
                    .with_choice(ScriptChoice::new("Go east", "east"))
                    .with_choice(ScriptChoice::new("Read the sign", "sign").once())
                    .with_choice(ScriptChoice::new("Go west", "west").requires("sign")),
            )
            .with_passage("sign", Passage::new(["It says WEST."]).with_divert("hall"))
            .with_passage("east", Passage::new(["The end."]))
            .with_passage("west", Passage::new(["Another end."]));
        ScriptStory::new(script).unwrap()
    }

    fn texts(story: &ScriptStory) -> Vec<String> {
        story.current_choices().into_iter().map(|c| c.text).collect()
    }

    #[test]
    fn continue_emits_passage_text() {
        let mut story = hall();
        assert!(story.can_continue());
        assert_eq!(story.continue_maximally().unwrap(), "You stand in a hall.\n");
        assert!(!story.can_continue());
        assert!(!story.has_error());
        assert_eq!(texts(&story), vec!["Go east", "Read the sign"]);
    }

    #[test]
    fn no_choices_while_pending() {
        let story = hall();
        assert!(story.current_choices().is_empty());
    }

    #[test]
    fn divert_flows_without_choice() {
        let mut story = hall();
        story.continue_maximally().unwrap();
        story.choose_choice_index(1).unwrap();
        let text = story.continue_maximally().unwrap();
        assert_eq!(text, "It says WEST.\nYou stand in a hall.\n");
        // sign was once-only, west is now unlocked
        assert_eq!(texts(&story), vec!["Go east", "Go west"]);
    }

    #[test]
    fn visible_index_maps_to_script_choice() {
        let mut story = hall();
        story.continue_maximally().unwrap();
        story.choose_choice_index(1).unwrap();
        story.continue_maximally().unwrap();
        story.choose_choice_index(1).unwrap();
        assert_eq!(story.continue_maximally().unwrap(), "Another end.\n");
        assert!(story.current_choices().is_empty());
        assert!(!story.can_continue());
    }

    #[test]
    fn out_of_range_choice_is_error() {
        let mut story = hall();
        story.continue_maximally().unwrap();
        let err = story.choose_choice_index(5).unwrap_err();
        assert!(matches!(
            err,
            StoryError::ChoiceOutOfRange {
                index: 5,
                available: 2
            }
        ));
    }

    #[test]
    fn unknown_divert_records_error_and_stops() {
        let script = Script::new("a")
            .with_passage("a", Passage::new(["Before."]).with_divert("missing"));
        let mut story = ScriptStory::new(script).unwrap();
        assert_eq!(story.continue_maximally().unwrap(), "Before.\n");
        assert!(story.has_error());
        assert_eq!(story.current_errors(), ["unknown passage 'missing'"]);
        assert!(!story.can_continue());
        assert!(story.current_choices().is_empty());
    }

    #[test]
    fn unknown_goto_records_error() {
        let script = Script::new("a").with_passage(
            "a",
            Passage::new(["Pick."]).with_choice(ScriptChoice::new("Jump", "void")),
        );
        let mut story = ScriptStory::new(script).unwrap();
        story.continue_maximally().unwrap();
        story.choose_choice_index(0).unwrap();
        assert_eq!(story.continue_maximally().unwrap(), "");
        assert_eq!(story.current_errors(), ["unknown passage 'void'"]);
    }

    #[test]
    fn errors_clear_on_next_step() {
        let script = Script::new("a")
            .with_passage("a", Passage::new(["x"]).with_divert("missing"));
        let mut story = ScriptStory::new(script).unwrap();
        story.continue_maximally().unwrap();
        assert!(story.has_error());
        story.continue_maximally().unwrap();
        assert!(!story.has_error());
    }

    #[test]
    fn divert_loop_is_capped() {
        let script = Script::new("a")
            .with_passage("a", Passage::new(Vec::<String>::new()).with_divert("b"))
            .with_passage("b", Passage::new(Vec::<String>::new()).with_divert("a"));
        let mut story = ScriptStory::new(script).unwrap();
        story.continue_maximally().unwrap();
        assert!(story.has_error());
        assert!(!story.can_continue());
    }

    #[test]
    fn state_round_trip_restores_choices() {
        let mut story = hall();
        story.continue_maximally().unwrap();
        story.choose_choice_index(1).unwrap();
        story.continue_maximally().unwrap();
        let saved = story.serialize_state().unwrap();

        let mut fresh = hall();
        fresh.deserialize_state(&saved).unwrap();
        assert_eq!(fresh.state(), story.state());
        assert_eq!(texts(&fresh), vec!["Go east", "Go west"]);
    }

    #[test]
    fn bad_state_keeps_current() {
        let mut story = hall();
        story.continue_maximally().unwrap();
        let before = story.state().clone();

        assert!(matches!(
            story.deserialize_state("garbage"),
            Err(StoryError::State(_))
        ));
        assert!(matches!(
            story.deserialize_state(r#"{ "passage": "attic", "pending": true }"#),
            Err(StoryError::UnknownPassage(_))
        ));
        assert_eq!(story.state(), &before);
    }
}
