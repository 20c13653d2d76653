//! Terminal capability detection.

use std::env;
use std::io::{self, IsTerminal};

/// Whether output goes to an interactive terminal that understands ANSI colors.
///
/// Both stdin and stdout must be terminals. Windows consoles are treated as
/// lacking native ANSI support.
pub fn detect() -> bool {
    let console = io::stdin().is_terminal() && io::stdout().is_terminal();
    supports_ansi(console, env::consts::OS)
}

/// Decide capability from an attached-console flag and an OS name.
pub fn supports_ansi(console_attached: bool, os: &str) -> bool {
    console_attached && !os.eq_ignore_ascii_case("windows")
}
