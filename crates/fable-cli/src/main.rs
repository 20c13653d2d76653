//! Interactive command-line player for Fable stories.

mod config;
mod driver;
mod error;
mod persistence;
mod prompt;
mod terminal;

use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use fable_story::ScriptStory;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::PlayerConfig;
use crate::driver::{Outcome, StoryDriver};
use crate::error::{PlayerError, PlayerResult};

/// Exit status when the arguments are wrong.
const EXIT_USAGE: i32 = -1;
/// Exit status for an unrecoverable error.
const EXIT_FATAL: i32 = -2;

#[derive(Parser)]
#[command(
    name = "fable",
    about = "Play a branching story in the terminal",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Story script (JSON); any single argument is taken as the filename
    #[arg(allow_hyphen_values = true)]
    script: PathBuf,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(_) => {
            println!("Script filename not specified.");
            print_usage();
            process::exit(EXIT_USAGE);
        }
    };

    init_logging();

    let config = PlayerConfig::detect();
    colored::control::set_override(config.color);

    match play(&cli.script, &config) {
        Ok(Outcome::Finished) => {}
        Ok(Outcome::Quit) => info!("player quit"),
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            process::exit(EXIT_FATAL);
        }
    }
}

fn print_usage() {
    println!("Usage:\n\tfable <script_filename>\n");
}

/// Log to stderr, filtered by `FABLE_LOG`; silent unless asked.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("FABLE_LOG").unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn play(script: &Path, config: &PlayerConfig) -> PlayerResult<Outcome> {
    let json = persistence::read_text(script)?;
    let story = ScriptStory::from_json(&json).map_err(|source| PlayerError::Script {
        path: script.to_path_buf(),
        source,
    })?;
    info!(script = %script.display(), passages = story.script().passages.len(), "story loaded");

    let stdin = io::stdin();
    let mut driver = StoryDriver::new(
        story,
        config,
        stdin.lock(),
        io::stdout().lock(),
        io::stderr().lock(),
    );
    driver.run()
}
