//! CLI frontend for the Loom text-adventure engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose logging `--verbose` raises to debug.
const LOOM_CRATES: &[&str] = &["loom_core", "loom_llm", "loom_engine", "loom_cli"];

#[derive(Parser)]
#[command(
    name = "loom",
    about = "Loom — a text adventure narrated by a language model",
    version,
    propagate_version = true
)]
struct Cli {
    /// Content module directory
    #[arg(
        short,
        long,
        global = true,
        env = "LOOM_CONTENT_MODULE",
        default_value = "content/default"
    )]
    module: PathBuf,

    /// Log debug output from the engine to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the content module interactively
    Play {
        /// Replay model replies from a JSON array of strings instead of
        /// calling a model
        #[arg(long)]
        replay: Option<PathBuf>,

        /// Model request timeout in seconds
        #[arg(long, default_value = "45")]
        timeout: u64,

        /// Attempts at producing a valid object before giving up
        #[arg(long, default_value = "5")]
        max_attempts: u32,
    },

    /// Validate the module's starting scene, story, and game state
    Check,

    /// Validate a JSON document against one of the module's schemas
    Validate {
        /// Schema file name (e.g. scene_schema.json)
        schema: String,

        /// JSON document to validate
        document: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if verbose {
        for krate in LOOM_CRATES {
            if let Ok(directive) = format!("{krate}=debug").parse() {
                filter = filter.add_directive(directive);
            }
        }
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Play {
            replay,
            timeout,
            max_attempts,
        } => commands::play::run(&cli.module, replay.as_deref(), timeout, max_attempts),
        Commands::Check => commands::check::run(&cli.module),
        Commands::Validate { schema, document } => {
            commands::validate::run(&cli.module, &schema, &document)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
