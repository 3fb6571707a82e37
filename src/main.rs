use anyhow::Context;
use clap::Parser;
use dashboard_monitor::app;
use dashboard_monitor::config::validate_provider;
use dashboard_monitor::core::ConfigProvider;
use dashboard_monitor::domain::model::HandlerResponse;
use dashboard_monitor::utils::error::MonitorError;
use dashboard_monitor::utils::logger;
use dashboard_monitor::{CliConfig, TomlConfig};

/// Telegram settings are only checked when messages are actually sent.
async fn run_once<C: ConfigProvider>(
    config: &C,
    dry_run: bool,
) -> Result<HandlerResponse, MonitorError> {
    validate_provider(config, !dry_run)?;

    let response = if dry_run {
        app::dry_run_monitor(config)?.handle().await
    } else {
        app::telegram_monitor(config)?.handle().await
    };

    Ok(response)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse().with_env_aliases();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting dashboard-monitor CLI");
    if cli.verbose {
        tracing::debug!(
            "Dashboard: {}, user: {}, dry run: {}",
            cli.dashboard_url(),
            cli.username(),
            cli.dry_run
        );
    }

    let outcome = match &cli.config {
        Some(path) => {
            tracing::info!("📄 Loading configuration from {}", path.display());
            match TomlConfig::from_file(path) {
                Ok(file_config) => run_once(&file_config, cli.dry_run).await,
                Err(e) => Err(e),
            }
        }
        None => run_once(&cli, cli.dry_run).await,
    };

    let response = match outcome {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("❌ Could not start the monitor: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            std::process::exit(e.category().exit_code());
        }
    };

    let body =
        serde_json::to_string_pretty(&response.body).context("failed to render the response body")?;
    println!("{}", body);

    if let Some(category) = response.failure {
        eprintln!("💡 {:?} failure, see the log above", category);
        std::process::exit(category.exit_code());
    }

    Ok(())
}
