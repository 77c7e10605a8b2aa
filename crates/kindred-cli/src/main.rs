use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kindred_infrastructure::KindredPaths;
use kindred_infrastructure::logging::init_stderr_logging;

mod commands;

#[derive(Parser)]
#[command(name = "kindred")]
#[command(about = "Kindred CLI - configuration, stored results and prompt previews", long_about = None)]
struct Cli {
    /// Use this directory instead of the platform config directory
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage config.toml and secret.json
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List stored assessments, newest first
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Print the prompt that would be sent to the model
    Prompt {
        #[command(subcommand)]
        kind: PromptKind,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write default config.toml and a secret.json template if missing
    Init,
    /// Print the effective configuration
    Show,
    /// Print where configuration files live
    Path,
}

#[derive(Subcommand)]
enum PromptKind {
    /// Prompt for one question
    Question {
        /// 1-based question number
        #[arg(long, default_value_t = 1)]
        step: usize,
        /// A previous answer; repeat for several
        #[arg(long = "response")]
        responses: Vec<String>,
    },
    /// Prompt for the final analysis
    Analysis {
        #[arg(long = "response", required = true)]
        responses: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_stderr_logging("warn")?;

    let cli = Cli::parse();
    let paths = KindredPaths::new(cli.config_dir.as_deref());

    match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Init => commands::config::init(&paths)?,
            ConfigAction::Show => commands::config::show(&paths)?,
            ConfigAction::Path => commands::config::path(&paths)?,
        },
        Commands::History { limit } => commands::history::run(paths, limit).await?,
        Commands::Prompt { kind } => match kind {
            PromptKind::Question { step, responses } => {
                commands::prompt::question(&paths, step, &responses)?
            }
            PromptKind::Analysis { responses } => commands::prompt::analysis(&paths, &responses)?,
        },
    }

    Ok(())
}
