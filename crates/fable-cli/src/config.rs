//! Player configuration, fixed at startup.

use std::env;

use colored::Colorize;

use crate::terminal;

/// Prompt shown while waiting for a choice.
pub const PROMPT: &str = "?> ";

/// Settings shared by the driver and the prompt for the whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Render choices and the prompt in color.
    pub color: bool,
}

impl PlayerConfig {
    /// Build the configuration for this process.
    ///
    /// Color is on when the terminal supports it and `NO_COLOR` is unset.
    pub fn detect() -> Self {
        let no_color = env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::default().with_color(terminal::detect() && !no_color)
    }

    /// Enable or disable color.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Wrap text in the highlight color when color is enabled.
    pub fn highlight(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Run `f` with `colored` forced on, one caller at a time.
///
/// The override is process-wide, so tests that need real escapes take a lock
/// and restore detection afterwards.
#[cfg(test)]
pub(crate) fn with_forced_color<T>(f: impl FnOnce() -> T) -> T {
    use std::sync::Mutex;

    static OVERRIDE: Mutex<()> = Mutex::new(());
    let _guard = OVERRIDE.lock().unwrap_or_else(|e| e.into_inner());
    colored::control::set_override(true);
    let result = f();
    colored::control::unset_override();
    result
}
