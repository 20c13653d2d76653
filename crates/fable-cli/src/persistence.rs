//! Reading story files and saving or restoring story state.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use fable_story::Story;
use tracing::{debug, info};

use crate::error::{PlayerError, PlayerResult};

const BOM: char = '\u{feff}';

/// Read a UTF-8 file, dropping any BOM from its first line.
///
/// Every line of the result ends with `\n`.
pub fn read_text(path: &Path) -> PlayerResult<String> {
    let raw = fs::read_to_string(path).map_err(|source| PlayerError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(normalize_lines(&raw))
}

fn normalize_lines(raw: &str) -> String {
    let mut text = String::with_capacity(raw.len() + 1);
    for (i, line) in raw.lines().enumerate() {
        if i == 0 {
            text.extend(line.chars().filter(|&c| c != BOM));
        } else {
            text.push_str(line);
        }
        text.push('\n');
    }
    text
}

/// Replace the story's state with the one saved at `path`.
pub fn load<S: Story + ?Sized>(story: &mut S, path: &Path) -> PlayerResult<()> {
    let blob = read_text(path)?;
    story
        .deserialize_state(&blob)
        .map_err(|source| PlayerError::BadSave {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), "state loaded");
    Ok(())
}

/// Write the story's current state to `path`, followed by a newline.
pub fn save<S: Story + ?Sized>(story: &S, path: &Path) -> PlayerResult<()> {
    let blob = story.serialize_state()?;
    let write_err = |source| PlayerError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{blob}")
        .and_then(|()| writer.flush())
        .map_err(write_err)?;

    debug!(path = %path.display(), bytes = blob.len() + 1, "state saved");
    Ok(())
}
