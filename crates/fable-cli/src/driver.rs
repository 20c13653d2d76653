//! The continue/choose loop.

use std::io::{BufRead, Write};

use fable_story::Story;
use tracing::{debug, warn};

use crate::config::PlayerConfig;
use crate::error::PlayerResult;
use crate::prompt::{CommandPrompt, Selection};

/// How a play-through ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The story ran out of text and choices.
    Finished,
    /// The player quit.
    Quit,
}

/// Plays a story over a set of streams until it ends or the player quits.
pub struct StoryDriver<'a, S, R, W, E> {
    story: S,
    config: &'a PlayerConfig,
    input: R,
    output: W,
    errors: E,
}

impl<'a, S, R, W, E> StoryDriver<'a, S, R, W, E>
where
    S: Story,
    R: BufRead,
    W: Write,
    E: Write,
{
    /// Create a driver that owns `story` for the rest of the run.
    pub fn new(story: S, config: &'a PlayerConfig, input: R, output: W, errors: E) -> Self {
        Self {
            story,
            config,
            input,
            output,
            errors,
        }
    }

    /// Run the loop.
    ///
    /// Runtime errors the story reports are printed and play continues. Any
    /// `Err` returned is fatal.
    pub fn run(&mut self) -> PlayerResult<Outcome> {
        loop {
            let text = self.story.continue_maximally()?;
            write!(self.output, "{text}")?;
            self.output.flush()?;

            if self.story.has_error() {
                for message in self.story.current_errors() {
                    warn!(%message, "story error");
                    writeln!(self.errors, "{message}")?;
                }
                self.errors.flush()?;
            }

            let choices = self.story.current_choices();
            if choices.is_empty() {
                if self.story.can_continue() {
                    continue;
                }
                debug!("story finished");
                return Ok(Outcome::Finished);
            }

            writeln!(self.output)?;
            for (i, choice) in choices.iter().enumerate() {
                let line = format!("{}: {}", i + 1, choice.text);
                writeln!(self.output, "{}", self.config.highlight(&line))?;
            }

            let selection = CommandPrompt::new(self.config, &mut self.input, &mut self.output)
                .ask(&mut self.story, choices.len())?;
            match selection {
                Selection::Choice(number) => {
                    debug!(number, "choice selected");
                    self.story.choose_choice_index(number - 1)?;
                }
                Selection::Reloaded => debug!("state reloaded, re-rendering"),
                Selection::Quit => return Ok(Outcome::Quit),
            }
        }
    }
}
