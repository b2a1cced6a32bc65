use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser, Debug)]
#[command(name = "veles")]
#[command(about = "Standardized questionnaires as survey pages", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to <config dir>/veles/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available questionnaires
    List,
    /// Print a questionnaire page as JSON
    Page(PageArgs),
    /// Print a questionnaire's items, keying and subscales as JSON
    Info {
        /// Questionnaire ID, e.g. "tipi"
        id: String,
    },
    /// Write an empty config file if none exists
    Init,
}

#[derive(Args, Debug)]
struct PageArgs {
    /// Questionnaire ID, e.g. "tipi"
    id: String,

    /// Base name for the page and its blocks
    #[arg(long)]
    name: Option<String>,

    /// Replace the default instruction
    #[arg(long)]
    instruction: Option<String>,

    /// Option for the question block, as KEY=VALUE (repeatable)
    #[arg(long = "question-option", value_name = "KEY=VALUE", value_parser = commands::parse_option)]
    question_options: Vec<(String, Value)>,

    /// Option for the page, as KEY=VALUE (repeatable)
    #[arg(long = "page-option", value_name = "KEY=VALUE", value_parser = commands::parse_option)]
    page_options: Vec<(String, Value)>,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };

    match cli.command {
        Commands::List => println!("{}", commands::list()),
        Commands::Page(args) => {
            let config = config::load_config(&config_path)?;
            let overrides = commands::overrides(
                args.name,
                args.instruction,
                args.question_options,
                args.page_options,
            );
            println!("{}", commands::page(&config, &args.id, overrides)?);
        }
        Commands::Info { id } => println!("{}", commands::info(&id)?),
        Commands::Init => {
            if config_path.exists() {
                tracing::warn!(path = %config_path.display(), "config already exists");
            } else {
                config::save_config(&config_path, &config::VelesConfig::default())?;
                println!("{}", config_path.display());
            }
        }
    }

    Ok(())
}
