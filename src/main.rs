use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod app;
mod config;
mod explorer;
mod lesson;
mod logging;
mod tutorial;
mod ui;

use app::App;
use config::Config;
use lesson::Lesson;

#[derive(Parser)]
#[command(name = "riemann-tutor")]
#[command(about = "Guided Riemann-sum explorer for the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Lesson file to load instead of the built-in walkthrough
    #[arg(short, long)]
    lesson: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the lesson's step sequence without starting the TUI
    Steps {
        /// Lesson file (default: the built-in walkthrough)
        lesson: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let mut config = Config::load(cli.config.as_deref())?;
    if cli.lesson.is_some() {
        config.lesson.path = cli.lesson.clone();
    }

    // Determine if we're running in TUI mode (no subcommand)
    let is_tui_mode = cli.command.is_none();

    // Initialize logging (file-based for TUI, stderr for CLI)
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Steps { lesson }) => {
            cmd_steps(&config, lesson.as_deref())?;
        }
        None => {
            run_tui(config, logging_handle.log_file_path).await?;
        }
    }

    Ok(())
}

async fn run_tui(config: Config, log_file_path: Option<PathBuf>) -> Result<()> {
    let mut app = App::new(config)?;
    let result = app.run().await;

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if log_path.exists() {
            if let Ok(metadata) = log_path.metadata() {
                if metadata.len() > 0 {
                    eprintln!("Session log: {}", log_path.display());
                }
            }
        }
    }

    result
}

fn cmd_steps(config: &Config, lesson_path: Option<&str>) -> Result<()> {
    let lesson = match lesson_path.or(config.lesson.path.as_deref()) {
        Some(path) => Lesson::from_path(path)?,
        None => Lesson::builtin()?,
    };

    println!("{} ({} steps)", lesson.name, lesson.len());
    println!("{}", "─".repeat(60));

    for (i, step) in lesson.steps.iter().enumerate() {
        let marker = if step.requires_interaction() {
            "⚑"
        } else {
            "·"
        };
        println!("{} {:>2}. {}", marker, i + 1, step.title);
        if let Some(action) = &step.action {
            println!("       {}", action);
        }
    }

    println!();
    println!("⚑ = step is gated on an interaction");

    Ok(())
}
