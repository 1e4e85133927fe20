//! lessonkit CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "lessonkit",
    version,
    about = "Sequencing games and resource library for course content"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate sequence, module and resource TOML files
    Validate {
        /// Path to a data file or directory
        #[arg(long)]
        path: PathBuf,
    },

    /// List the resource library
    Resources {
        /// Only show this kind: video, document, link
        #[arg(long)]
        kind: Option<String>,

        /// Only show resources for this module id
        #[arg(long)]
        module: Option<String>,

        /// Case-insensitive search in title and description
        #[arg(long)]
        search: Option<String>,

        /// Output format: text, json (default from config)
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Play a sequencing game
    Play {
        /// Path to a sequence .toml file, or a sequence id from the sequences directory
        #[arg(long)]
        sequence: String,

        /// Submit this order non-interactively (comma-separated stage ids)
        #[arg(long)]
        order: Option<String>,

        /// Seed for the initial shuffle
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example content
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lessonkit_core=info".parse().unwrap())
                .add_directive("lessonkit_cli=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { path } => commands::validate::execute(path),
        Commands::Resources {
            kind,
            module,
            search,
            format,
            config,
        } => commands::resources::execute(kind, module, search, format, config),
        Commands::Play {
            sequence,
            order,
            seed,
            config,
        } => commands::play::execute(sequence, order, seed, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
