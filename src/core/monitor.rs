use crate::core::extract::{AmountBounds, AmountExtractor};
use crate::core::message::{
    format_error_message, format_local_time, format_summary_message, format_timestamp,
    DEFAULT_UTC_OFFSET_MINUTES,
};
use crate::domain::amount::total_volume;
use crate::domain::model::{DashboardSummary, HandlerResponse, MonitorResponse};
use crate::domain::ports::{ConfigProvider, DashboardSource, Notifier};
use crate::utils::error::{MonitorError, Result};
use chrono::{DateTime, Utc};

pub const SUCCESS_MESSAGE: &str = "Dashboard monitor executed successfully";

#[derive(Debug, Clone, PartialEq)]
pub struct MonitorSettings {
    pub dashboard_name: String,
    pub bounds: AmountBounds,
    pub utc_offset_minutes: i32,
    /// Treat "both sides N/A" as an extraction failure instead of reporting it.
    pub require_amounts: bool,
}

impl MonitorSettings {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            dashboard_name: config.dashboard_name().to_string(),
            bounds: AmountBounds {
                ceiling: config.amount_ceiling(),
                large_amount_floor: config.large_amount_floor(),
            },
            utc_offset_minutes: config.utc_offset_minutes(),
            require_amounts: config.require_amounts(),
        }
    }
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            dashboard_name: "One Stop Fashion Hub".to_string(),
            bounds: AmountBounds::default(),
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            require_amounts: false,
        }
    }
}

/// One invocation: scrape, extract, notify, answer.
pub struct DashboardMonitor<S: DashboardSource, N: Notifier> {
    source: S,
    notifier: N,
    payin: AmountExtractor,
    payout: AmountExtractor,
    settings: MonitorSettings,
}

impl<S: DashboardSource, N: Notifier> DashboardMonitor<S, N> {
    pub fn new(source: S, notifier: N, settings: MonitorSettings) -> Result<Self> {
        Ok(Self {
            source,
            notifier,
            payin: AmountExtractor::for_label("Payin", settings.bounds)?,
            payout: AmountExtractor::for_label("Payout", settings.bounds)?,
            settings,
        })
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Scrapes both amounts and sends the summary message.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<DashboardSummary> {
        let local_time = format_local_time(now, self.settings.utc_offset_minutes);
        tracing::info!("🚀 Starting dashboard monitor ({})", local_time);

        let data = self.source.fetch().await?;

        let payin = self.payin.extract(data.payin_response.as_deref());
        let payout = self.payout.extract(data.payout_response.as_deref());
        tracing::info!("💰 Payin: {}, 💸 Payout: {}", payin, payout);

        if self.settings.require_amounts && !payin.is_available() && !payout.is_available() {
            return Err(MonitorError::Extraction {
                message: "neither payin nor payout amount could be extracted".to_string(),
            });
        }

        let total = total_volume(&payin, &payout);
        let message = format_summary_message(
            &self.settings.dashboard_name,
            &payin,
            &payout,
            &total,
            &local_time,
        );
        self.notifier.send(&message).await?;

        tracing::info!("✅ Dashboard monitor completed");
        Ok(DashboardSummary {
            payin,
            payout,
            total_volume: total,
            last_updated: local_time,
        })
    }

    /// Top-level handler: never fails, always answers with a status and body.
    /// Failures are reported through the notifier on a best-effort basis.
    pub async fn handle_at(&self, now: DateTime<Utc>) -> HandlerResponse {
        match self.run_at(now).await {
            Ok(summary) => HandlerResponse {
                status_code: 200,
                body: MonitorResponse {
                    success: true,
                    message: Some(SUCCESS_MESSAGE.to_string()),
                    error: None,
                    timestamp: format_timestamp(Utc::now()),
                    data: Some(summary),
                },
                failure: None,
            },
            Err(e) => {
                tracing::error!(
                    "❌ Dashboard monitor failed: {} (category: {:?})",
                    e,
                    e.category()
                );
                tracing::error!("💡 {}", e.recovery_suggestion());

                let local_time = format_local_time(now, self.settings.utc_offset_minutes);
                let report = format_error_message(&e.to_string(), &local_time);
                if let Err(report_err) = self.notifier.send(&report).await {
                    tracing::error!("Failed to send error notification: {}", report_err);
                }

                HandlerResponse {
                    status_code: 500,
                    body: MonitorResponse {
                        success: false,
                        message: None,
                        error: Some(e.to_string()),
                        timestamp: format_timestamp(Utc::now()),
                        data: None,
                    },
                    failure: Some(e.category()),
                }
            }
        }
    }

    pub async fn handle(&self) -> HandlerResponse {
        self.handle_at(Utc::now()).await
    }
}
