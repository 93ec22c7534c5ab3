use clap::{Parser, Subcommand};
use histoscan_cli::{OutputArgs, SeedArgs};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{cmd_analyze, cmd_batch, cmd_init, cmd_score, cmd_transform};

#[derive(Parser)]
#[command(name = "histoscan")]
#[command(version, about = "Virtual IHC generation and HER2 severity scoring", long_about = None)]
struct Cli {
    /// Config file (default: $HISTOSCAN_CONFIG, ./config/histoscan.yml,
    /// ./histoscan.yml, ~/.histoscan/histoscan.yml)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose (debug) logging; RUST_LOG overrides
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a virtual IHC image from an H&E image
    Transform {
        /// Input image
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file or directory (default: <stem>_ihc.png next to the input)
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,

        #[command(flatten)]
        seed: SeedArgs,
    },

    /// Score an IHC image for HER2 severity
    Score {
        /// Input image
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        seed: SeedArgs,
    },

    /// Transform then score one image and print the diagnostic report
    Analyze {
        /// Input H&E image
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Directory for the generated IHC image
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        #[command(flatten)]
        seed: SeedArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Save the JSON report to a file
        #[arg(short, long, value_name = "FILE")]
        save: Option<PathBuf>,
    },

    /// Analyze many images in parallel
    Batch {
        /// Input files or directories
        #[arg(value_name = "INPUTS")]
        inputs: Vec<PathBuf>,

        /// Recurse into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Number of parallel threads
        #[arg(short = 'j', long, value_name = "N")]
        threads: Option<usize>,

        #[command(flatten)]
        seed: SeedArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Write the default config to ~/.histoscan/histoscan.yml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Log to stderr so JSON on stdout stays parseable.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    histoscan_core::config::init_config(cli.config.as_deref());
    histoscan_core::config::log_config_usage();

    let result = match cli.command {
        Commands::Transform { input, out, seed } => cmd_transform(input, out, seed.seed),

        Commands::Score {
            input,
            output,
            seed,
        } => cmd_score(input, output.json, seed.seed),

        Commands::Analyze {
            input,
            out,
            seed,
            output,
            save,
        } => cmd_analyze(input, out, seed.seed, output.json, save),

        Commands::Batch {
            inputs,
            recursive,
            out,
            threads,
            seed,
            output,
        } => cmd_batch(inputs, recursive, out, threads, seed.seed, output.json),

        Commands::Init { force } => cmd_init(force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
