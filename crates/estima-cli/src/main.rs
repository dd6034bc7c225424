//! Estima CLI - inspect table statistics and selectivity estimates.
//!
//! Tables are loaded from delimited text files: the first line declares the
//! columns as `name:type`, every following line is one row.

mod commands;
mod loader;
mod output;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use estima::StatsConfig;

/// Table statistics and cardinality estimation tool.
#[derive(Parser)]
#[command(name = "estima")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "table")]
    format: OutputFormat,

    /// Suppress progress and info messages
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

/// Output format options.
#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// Machine-readable JSON format
    Json,
}

/// Options controlling how tables are loaded and statistics built.
#[derive(Args, Clone)]
struct LoadOptions {
    /// Histogram buckets per column
    #[arg(long, default_value_t = estima::NUM_HIST_BINS)]
    bins: usize,

    /// Cost of reading one page
    #[arg(long, default_value_t = estima::IO_COST_PER_PAGE)]
    io_cost: f64,

    /// Page size in bytes used for page counting
    #[arg(long, default_value_t = estima::DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Field delimiter
    #[arg(long, short, default_value_t = ',')]
    delimiter: char,
}

impl LoadOptions {
    fn config(&self) -> StatsConfig {
        StatsConfig::default()
            .with_histogram_bins(self.bins)
            .with_io_cost_per_page(self.io_cost)
    }
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Build statistics for one or more tables and summarize them
    Stats {
        /// Table files; each file's stem becomes the table name
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        options: LoadOptions,
    },

    /// Estimate the selectivity of a single-column predicate
    Estimate {
        /// Table file
        file: PathBuf,

        /// Column the predicate applies to
        #[arg(long)]
        column: String,

        /// Comparison operator (=, <>, <, <=, >, >=, like)
        #[arg(long)]
        op: String,

        /// Constant to compare against
        #[arg(long)]
        value: String,

        #[command(flatten)]
        options: LoadOptions,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    } else if !cli.quiet {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(std::io::stderr)
            .init();
    }

    let result = match cli.command {
        Commands::Stats { files, options } => {
            commands::stats::run(&files, &options, cli.format, cli.quiet)
        }
        Commands::Estimate {
            file,
            column,
            op,
            value,
            options,
        } => commands::estimate::run(
            &file,
            &commands::estimate::Predicate {
                column: &column,
                op: &op,
                value: &value,
            },
            &options,
            cli.format,
            cli.quiet,
        ),
    };

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
