//! gradekeeper CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "gradekeeper",
    version,
    about = "Grade aggregation and GPA estimation for study blocks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process study blocks and report grades
    Process {
        /// Path to a .toml study block or a directory of them
        #[arg(long)]
        block: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory (defaults to the configured one)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: text, json, html, all (comma-separated)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Compare two grade reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Smallest projected-grade change that counts, as a fraction
        #[arg(long, default_value = "0.01")]
        threshold: f64,

        /// Exit code 1 if regressions found
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate study block TOML files
    Validate {
        /// Path to a study block file or directory
        #[arg(long)]
        block: PathBuf,
    },

    /// Resolve a score to a letter grade
    Letter {
        /// Score as a fraction, e.g. 0.73
        #[arg(long, allow_negative_numbers = true)]
        score: f64,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example study block
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gradekeeper=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Process {
            block,
            config,
            output,
            format,
        } => commands::process::execute(block, config, output, format),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_regression, format),
        Commands::Validate { block } => commands::validate::execute(block),
        Commands::Letter { score, config } => commands::letter::execute(score, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
