//! Wiring from a [`ConfigProvider`] to a ready-to-run [`DashboardMonitor`].

use crate::adapters::{ConsoleNotifier, TelegramNotifier};
use crate::core::monitor::{DashboardMonitor, MonitorSettings};
use crate::core::scraper::DashboardScraper;
use crate::core::session::{build_http_client, DashboardEndpoints, SessionAcquirer};
use crate::domain::ports::{ConfigProvider, Notifier};
use crate::utils::error::Result;
use reqwest::Client;

pub type TelegramMonitor = DashboardMonitor<DashboardScraper, TelegramNotifier>;

pub fn scraper_from_config<C: ConfigProvider + ?Sized>(
    client: Client,
    config: &C,
) -> DashboardScraper {
    let session = SessionAcquirer::new(
        client,
        DashboardEndpoints::from_base(config.dashboard_url()),
        config.username().to_string(),
        config.password().to_string(),
    );
    DashboardScraper::new(session)
}

pub fn telegram_from_config<C: ConfigProvider + ?Sized>(
    client: Client,
    config: &C,
) -> TelegramNotifier {
    TelegramNotifier::new(
        client,
        config.telegram_api_base(),
        config.telegram_bot_token().to_string(),
        config.telegram_chat_id().to_string(),
    )
}

/// Builds a monitor around any notifier, sharing one HTTP client with the scraper.
pub fn monitor_with_notifier<C, N, F>(
    config: &C,
    make_notifier: F,
) -> Result<DashboardMonitor<DashboardScraper, N>>
where
    C: ConfigProvider + ?Sized,
    N: Notifier,
    F: FnOnce(Client) -> N,
{
    let client = build_http_client(config.request_timeout_secs())?;
    let scraper = scraper_from_config(client.clone(), config);
    DashboardMonitor::new(
        scraper,
        make_notifier(client),
        MonitorSettings::from_config(config),
    )
}

pub fn telegram_monitor<C: ConfigProvider + ?Sized>(config: &C) -> Result<TelegramMonitor> {
    monitor_with_notifier(config, |client| telegram_from_config(client, config))
}

pub fn dry_run_monitor<C: ConfigProvider + ?Sized>(
    config: &C,
) -> Result<DashboardMonitor<DashboardScraper, ConsoleNotifier<std::io::Stderr>>> {
    monitor_with_notifier(config, |_| ConsoleNotifier::stderr())
}
