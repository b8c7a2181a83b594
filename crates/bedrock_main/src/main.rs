use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use bedrock_app::BedrockApp;
use bedrock_config::{AwsEnvironment, BedrockConfig, load_dotenv};
use bedrock_display::{ColorConfig, ColorMode, init_color_config};
use bedrock_infra::BedrockInfra;
use bedrock_main::{Cli, UI};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Crates whose logs are shown by default.
const LOG_TARGETS: [&str; 6] = [
    "bedrock_doctor",
    "bedrock_main",
    "bedrock_app",
    "bedrock_infra",
    "bedrock_config",
    "bedrock_domain",
];

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so reports on stdout stay pipeable
    let level = if cli.verbose { "debug" } else { "info" };
    let default_filter = LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    load_dotenv();

    let mut colors = ColorConfig::new();
    if let Some(mode) = cli.color.as_deref() {
        colors.set_mode(ColorMode::from_str(mode).map_err(|e| anyhow!(e))?);
    }
    match colors.mode() {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }
    init_color_config(colors);

    let env = AwsEnvironment::from_env();
    let config = BedrockConfig::from_env()?;
    let region = env.region_or(&config.default_region);
    tracing::debug!(region = %region, "Starting bedrock-doctor");

    let infra = Arc::new(BedrockInfra::new(&config, region));
    let ui = UI::new(BedrockApp::new(infra, config, env));

    if ui.run(cli.command).await? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
