//! The choice prompt and its command language.

use std::io::{BufRead, Write};
use std::path::Path;

use fable_story::Story;
use tracing::{debug, warn};

use crate::config::{PROMPT, PlayerConfig};
use crate::error::{PlayerError, PlayerResult};
use crate::persistence;

/// Command summary printed by `help`.
pub const HELP_TEXT: &str = "Commands:\n\tload <filename>\n\tsave <filename>\n\tquit\n";
/// Shown for input that is neither a command nor a valid choice number.
pub const INVALID_CHOICE: &str = "Invalid choice!";
/// Shown when a load or save cannot use the given filename.
pub const INVALID_FILENAME: &str = "Invalid filename!";

/// One line of player input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the command summary.
    Help,
    /// Leave the story.
    Quit,
    /// Restore state from a file (trimmed, possibly empty).
    Load(String),
    /// Save state to a file (trimmed, possibly empty).
    Save(String),
    /// Pick a choice by its 1-based number.
    Select(usize),
    /// Anything else.
    Invalid,
}

/// Classify a line of input against the number of choices on offer.
///
/// `line` must already have its line terminator removed. Matching is exact:
/// no case folding and no trimming outside of filenames.
pub fn parse_command(line: &str, choice_count: usize) -> Command {
    match line {
        "help" => return Command::Help,
        "quit" | "exit" => return Command::Quit,
        _ => {}
    }
    if let Some(rest) = line.strip_prefix("load ") {
        return Command::Load(rest.trim().to_string());
    }
    if let Some(rest) = line.strip_prefix("save ") {
        return Command::Save(rest.trim().to_string());
    }
    match line.parse::<usize>() {
        Ok(n) if (1..=choice_count).contains(&n) => Command::Select(n),
        _ => Command::Invalid,
    }
}

/// How a prompt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// A valid 1-based choice number.
    Choice(usize),
    /// A saved state replaced the story; the offered choices are stale.
    Reloaded,
    /// The player asked to leave.
    Quit,
}

/// Reads commands until the player picks a choice, loads a save, or quits.
pub struct CommandPrompt<'a, R, W> {
    config: &'a PlayerConfig,
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> CommandPrompt<'a, R, W> {
    /// Create a prompt over the given streams.
    pub fn new(config: &'a PlayerConfig, input: &'a mut R, output: &'a mut W) -> Self {
        Self {
            config,
            input,
            output,
        }
    }

    /// Prompt until a terminating command arrives.
    ///
    /// `choice_count` is the number of choices currently displayed. Rejected
    /// input never touches the story.
    pub fn ask<S: Story + ?Sized>(
        &mut self,
        story: &mut S,
        choice_count: usize,
    ) -> PlayerResult<Selection> {
        loop {
            write!(self.output, "{}", self.config.highlight(PROMPT))?;
            self.output.flush()?;

            let line = self.read_line()?;
            match parse_command(&line, choice_count) {
                Command::Help => write!(self.output, "{HELP_TEXT}")?,
                Command::Quit => return Ok(Selection::Quit),
                Command::Select(n) => return Ok(Selection::Choice(n)),
                Command::Invalid => {
                    debug!(input = %line, choice_count, "rejected input");
                    writeln!(self.output, "{INVALID_CHOICE}")?;
                }
                Command::Load(name) => {
                    let loaded =
                        with_filename(&name, |path| persistence::load(&mut *story, path));
                    if self.recover(loaded)? {
                        return Ok(Selection::Reloaded);
                    }
                }
                Command::Save(name) => {
                    let saved = with_filename(&name, |path| persistence::save(&*story, path));
                    self.recover(saved)?;
                }
            }
        }
    }

    /// Read one line; bytes that are not UTF-8 become replacement characters.
    fn read_line(&mut self) -> PlayerResult<String> {
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Err(PlayerError::EndOfInput);
        }
        let mut line = String::from_utf8_lossy(&raw).into_owned();
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }

    /// Report a file error and carry on; anything else stays fatal.
    fn recover(&mut self, result: PlayerResult<()>) -> PlayerResult<bool> {
        match result {
            Ok(()) => Ok(true),
            Err(e) if e.is_file_error() => {
                warn!(error = %e, "file command failed");
                writeln!(self.output, "{INVALID_FILENAME}")?;
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

fn with_filename<F>(name: &str, op: F) -> PlayerResult<()>
where
    F: FnOnce(&Path) -> PlayerResult<()>,
{
    if name.is_empty() {
        return Err(PlayerError::EmptyFilename);
    }
    op(Path::new(name))
}
