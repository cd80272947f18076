use std::process::ExitCode;

use bengawan_scraper::{AvailabilityChecker, CheckResult};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bengawan-cli")]
#[command(about = "Check KAI booking pages for seats on a target train")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch one booking search page and report on the target train.
    Check {
        /// Booking search results URL.
        #[arg(long, env = "BENGAWAN_CHECK_URL")]
        url: String,
        /// Train to look for instead of the configured target.
        #[arg(long, value_parser = parse_train_name)]
        train: Option<String>,
        /// Print the full result as JSON instead of the log lines.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // `.env` may supply BENGAWAN_CHECK_URL, so it is loaded before parsing.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = bengawan_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check { url, train, json } => {
            if let Some(train) = train {
                config.target_train = train;
            }
            if !url.contains(&config.allowed_host) {
                tracing::warn!(url = %url, allowed_host = %config.allowed_host, "url is outside the booking site");
            }

            let checker = AvailabilityChecker::from_app_config(&config)?;
            let result = checker.check(&url).await;
            print_result(&result, json)?;

            Ok(if result.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

/// Trimmed, upper-cased train name; blank names would match every card.
fn parse_train_name(raw: &str) -> Result<String, String> {
    let name = raw.trim().to_uppercase();
    if name.is_empty() {
        return Err("train name must not be blank".to_string());
    }
    Ok(name)
}

fn print_result(result: &CheckResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        for line in &result.logs {
            println!("{line}");
        }
    }
    Ok(())
}
