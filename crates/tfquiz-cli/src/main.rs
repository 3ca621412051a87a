//! Command-line interface for the tfquiz quiz runner.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod console;
mod render;

#[derive(Parser)]
#[command(name = "tfquiz", version, about = "True/false quiz runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz in the terminal
    Run {
        /// Question file or http(s) URL (default: from config, else questions.json)
        #[arg(long)]
        questions: Option<String>,

        /// Participant name (asked interactively if omitted)
        #[arg(long)]
        name: Option<String>,

        /// Output directory for results
        #[arg(long)]
        output: Option<PathBuf>,

        /// Result formats: json, html, all (comma-separated)
        #[arg(long)]
        format: Option<String>,

        /// Post the result to the configured webhook
        #[arg(long)]
        submit: bool,

        /// Do not write result files
        #[arg(long)]
        no_save: bool,

        /// Treat questions without an answer as false
        #[arg(long)]
        coerce_missing_answer: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a question file for problems
    Validate {
        /// Question file or http(s) URL
        #[arg(long)]
        questions: String,

        /// Treat questions without an answer as false
        #[arg(long)]
        coerce_missing_answer: bool,
    },

    /// Print a saved result
    Show {
        /// Result JSON file
        #[arg(long)]
        result: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create a sample question file and config
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tfquiz=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            questions,
            name,
            output,
            format,
            submit,
            no_save,
            coerce_missing_answer,
            config,
        } => {
            commands::run::execute(
                questions,
                name,
                output,
                format,
                submit,
                no_save,
                coerce_missing_answer,
                config,
            )
            .await
        }
        Commands::Validate {
            questions,
            coerce_missing_answer,
        } => commands::validate::execute(questions, coerce_missing_answer).await,
        Commands::Show { result, format } => commands::show::execute(result, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
