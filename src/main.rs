use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ewm_quiz::{ConfigLoader, Quiz, Theme, logging};
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the questions from (defaults to the built-in bank)
    #[arg(short, long)]
    questions: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the CSV export is written to
    #[arg(short, long)]
    export_dir: Option<PathBuf>,

    /// Color theme at startup: light or dark
    #[arg(short, long)]
    theme: Option<Theme>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config =
        ConfigLoader::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(questions) = args.questions {
        config.questions = Some(questions);
    }
    if let Some(export_dir) = args.export_dir {
        config.export_dir = export_dir;
    }
    if let Some(theme) = args.theme {
        config.theme = theme;
    }

    let _log_guard = logging::init(&config.log, args.verbose).context("Failed to set up logging")?;
    info!(
        questions = ?config.questions,
        export_dir = %config.export_dir.display(),
        theme = %config.theme,
        "starting ewm-quiz"
    );

    let quiz = Quiz::from_config(&config).context("Failed to load questions")?;
    quiz.run().context("Error running quiz")?;

    Ok(())
}
