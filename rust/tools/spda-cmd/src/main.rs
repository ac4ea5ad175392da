use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "spda-cmd")]
#[command(about = "Command-line demos for the spda dynamic array")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace); RUST_LOG overrides it
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build arrays of multi-field structs and print them with their metadata
    Basic,

    /// Copy and sort an integer array, then edit a string array
    CopySort,

    /// Fill an array with random values and print it
    Random {
        /// Number of values to generate
        #[arg(short, long, default_value_t = 10)]
        count: usize,

        /// Lower bound of the generated values
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        min: i32,

        /// Upper bound of the generated values (inclusive for integers)
        #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
        max: i32,

        /// Generate 32-bit floats instead of integers
        #[arg(long)]
        float: bool,

        /// Sort the values before printing
        #[arg(long)]
        sort: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Basic => commands::basic::run(),
        Commands::CopySort => commands::copy_sort::run(),
        Commands::Random {
            count,
            min,
            max,
            float,
            sort,
        } => commands::random::run(count, min, max, float, sort),
    }
}

/// Installs a stderr subscriber; `log` records from the library are forwarded to it.
fn init_logging(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}
