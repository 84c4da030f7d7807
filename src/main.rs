use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use country_leaders::config::{ApiConfig, ErrorPolicy, RunConfig, DEFAULT_BASE_URL, DEFAULT_OUTPUT};

#[derive(Parser)]
#[command(
    name = "country-leaders",
    about = "Fetch country leaders and the first paragraph of their Wikipedia page",
    version
)]
struct Cli {
    /// Base URL of the country leaders API.
    #[arg(long, env = "LEADERS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// JSON file to write, replaced on every run.
    #[arg(short, long, env = "LEADERS_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// What to do when the leaders of a country cannot be fetched.
    #[arg(long, value_enum, default_value_t = ErrorPolicy::Skip)]
    on_leaders_error: ErrorPolicy,

    /// Per-request timeout in seconds. Requests wait indefinitely when unset.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = RunConfig {
        api: ApiConfig::new(&cli.base_url)?,
        output: cli.output,
        on_leaders_error: cli.on_leaders_error,
        timeout: cli.timeout_secs.map(Duration::from_secs),
    };

    country_leaders::run(&config).await?;
    Ok(())
}
