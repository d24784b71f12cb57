mod commands;
mod config;
mod render;
mod transport;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::commands::{
    classify::cmd_classify, fetch::cmd_fetch, lookup::cmd_lookup, normalize::cmd_normalize,
    validate::cmd_validate,
};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Normalize hotel booking payloads into one canonical record shape.
#[derive(Parser)]
#[command(
    name = "staybook",
    version,
    about = "Normalize hotel booking payloads into canonical records"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to a TOML config file (upstream, aliases, log level)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a raw booking payload from a JSON file
    Normalize {
        /// Path to the raw JSON payload
        file: PathBuf,
        /// Treat the file as a list envelope instead of a single booking
        #[arg(long)]
        list: bool,
    },

    /// Classify a raw detail-lookup envelope as found, not found, or malformed
    Classify {
        /// Path to the raw lookup envelope
        file: PathBuf,
        /// Reference ID the lookup was made for
        #[arg(long, default_value = "unknown")]
        reference: String,
    },

    /// Fetch and normalize bookings made within a date range
    Fetch {
        /// First day of the range (YYYY-MM-DD)
        #[arg(long)]
        from: String,
        /// Last day of the range (YYYY-MM-DD)
        #[arg(long)]
        to: String,
    },

    /// Look up one booking by its reference ID
    Lookup {
        /// Booking reference ID
        reference_id: String,
    },

    /// Validate canonical booking JSON against the canonical schema
    Validate {
        /// Path to the canonical JSON file (one booking or an array)
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(msg) => {
            report_error(&msg, cli.output, cli.quiet);
            process::exit(1);
        }
    };

    // --quiet keeps library warnings off stderr unless RUST_LOG asks for them.
    let level = if cli.quiet { "error" } else { config.log_level() };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Normalize { file, list } => {
            cmd_normalize(&file, list, &config, cli.output, cli.quiet);
        }
        Commands::Classify { file, reference } => {
            cmd_classify(&file, &reference, &config, cli.output, cli.quiet);
        }
        Commands::Fetch { from, to } => {
            cmd_fetch(&from, &to, &config, cli.output, cli.quiet);
        }
        Commands::Lookup { reference_id } => {
            cmd_lookup(&reference_id, &config, cli.output, cli.quiet);
        }
        Commands::Validate { file } => {
            cmd_validate(&file, cli.output, cli.quiet);
        }
    }
}

/// Report an error in the selected output format.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("error: {}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
