//! Error types for the player.

use std::io;
use std::path::PathBuf;

use fable_story::StoryError;
use miette::Diagnostic;
use thiserror::Error;

/// Result type for player operations.
pub type PlayerResult<T> = Result<T, PlayerError>;

/// Errors raised while playing a story.
#[derive(Debug, Error, Diagnostic)]
pub enum PlayerError {
    /// A file could not be read or decoded.
    #[error("cannot read '{}'", path.display())]
    #[diagnostic(code(fable::file::read))]
    Read {
        /// The offending file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A file could not be created or written.
    #[error("cannot write '{}'", path.display())]
    #[diagnostic(code(fable::file::write))]
    Write {
        /// The offending file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A save file was read but the story rejected it.
    #[error("'{}' is not a saved state for this story", path.display())]
    #[diagnostic(code(fable::file::state))]
    BadSave {
        /// The offending file.
        path: PathBuf,
        /// What the story objected to.
        #[source]
        source: StoryError,
    },

    /// A load or save command without a filename.
    #[error("no filename given")]
    #[diagnostic(code(fable::file::empty))]
    EmptyFilename,

    /// The story script could not be loaded.
    #[error("cannot load script '{}'", path.display())]
    #[diagnostic(
        code(fable::script),
        help("scripts are JSON documents with a `start` passage and a `passages` table")
    )]
    Script {
        /// The script file.
        path: PathBuf,
        /// What was wrong with it.
        #[source]
        source: StoryError,
    },

    /// The story engine failed while running.
    #[error("story engine failed")]
    #[diagnostic(code(fable::engine))]
    Engine(#[from] StoryError),

    /// Standard input closed while a choice was pending.
    #[error("end of input while waiting for a choice")]
    #[diagnostic(code(fable::input::eof), help("type 'quit' to leave the story"))]
    EndOfInput,

    /// Reading from or writing to the terminal failed.
    #[error("terminal I/O failed")]
    #[diagnostic(code(fable::io))]
    Io(#[from] io::Error),
}

impl PlayerError {
    /// Whether the prompt can recover by asking for another filename.
    pub fn is_file_error(&self) -> bool {
        matches!(
            self,
            Self::Read { .. } | Self::Write { .. } | Self::BadSave { .. } | Self::EmptyFilename
        )
    }
}
