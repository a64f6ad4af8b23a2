#![allow(missing_docs)]

mod config;
mod output;

use clap::{Parser, ValueEnum};
use tierconf_core::{process_file_name, ArgSource, EnvSource, Resolver};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::ServiceConfig;

/// tierconf inspector - resolve a sample service config and show where each
/// value came from.
#[derive(Parser)]
#[command(name = "tierconf-inspect")]
#[command(about = "Resolve a service config from defaults, file, args and env")]
#[command(version)]
struct Args {
    /// Path to the YAML config file (defaults to <program>.yaml)
    #[arg(short = 'c', long = "config", env = "TIERCONF_CONFIG")]
    config: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Expand ${VAR} placeholders in the config file
    #[arg(long)]
    expand: bool,

    /// Arguments for the resolver, after `--` (e.g. `-- --port 8080 --v`)
    #[arg(last = true)]
    overrides: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    let args = Args::parse();
    init_logging(&args.log_level);

    let file = args.config.clone().unwrap_or_else(process_file_name);
    tracing::debug!(file = %file, overrides = args.overrides.len(), "Resolving service config");

    let resolver = Resolver::isolated()
        .with_file(&file)
        .with_args(ArgSource::from_args(args.overrides))
        .with_env(EnvSource::from_process())
        .expand_placeholders(args.expand);

    let mut config = ServiceConfig::default();
    let resolution = match resolver.resolve_with_report(&mut config) {
        Ok(resolution) => resolution,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let rendered = match args.format {
        Format::Text => output::text(&mut config, &resolution),
        Format::Json => output::json(&config, &resolution),
    };
    match rendered {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
