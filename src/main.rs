//! Recent Topics - command-line entrypoint.
//!
//! Loads configuration, builds the application context and runs a single
//! command against the recency registry. Recent lists are printed to stdout
//! as JSON arrays; logs go to stderr.

use clap::{Parser, Subcommand};
use recent_topics_lib::config::{ConfigLoader, LogConfig, RecentsConfig, ENV_PREFIX};
use recent_topics_lib::{AppContext, RecentsError, RecentsResult};
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for the recent-topics tool.
#[derive(Parser, Debug)]
#[clap(name = "Recent Topics", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Record that an identity used a tag, persist, and print the updated list
    Touch {
        /// Identity key of the caller
        identity: String,
        /// Tag that was used
        tag: String,
    },

    /// Print the recent tags of an identity
    List {
        /// Identity key of the caller
        identity: String,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
fn init_logging(log: &LogConfig) -> RecentsResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .with_file(true);

    let installed = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    installed
        .map_err(|e| RecentsError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

fn print_tags(tags: &[String]) -> RecentsResult<()> {
    println!("{}", serde_json::to_string(tags)?);
    Ok(())
}

/// Main entry point for the application.
#[tokio::main]
async fn main() -> RecentsResult<()> {
    let args = Args::parse();
    let config_loader = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX);

    if let Command::GenConfig { output } = &args.command {
        let default_config = RecentsConfig::default();

        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(&default_config)
            .map_err(|e| RecentsError::Custom(format!("Failed to serialize config: {e}")))?;
        std::fs::write(output, toml)?;

        eprintln!("Default configuration written to {output:?}");
        return Ok(());
    }

    let config = match config_loader.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    };
    init_logging(&config.log)?;

    match args.command {
        Command::Validate => {
            info!("Configuration validated successfully");
            Ok(())
        }
        Command::Touch { identity, tag } => {
            let context = AppContext::new(config)?;
            let registry = context.registry();
            let tags = registry.touch(&identity, &tag).await?;
            registry.persist(&identity).await?;
            print_tags(&tags)
        }
        Command::List { identity } => {
            let context = AppContext::new(config)?;
            let tags = context.registry().snapshot(&identity).await?;
            print_tags(&tags)
        }
        Command::GenConfig { .. } => Ok(()),
    }
}
