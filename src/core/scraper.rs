use crate::core::cookies::CookieJar;
use crate::core::session::{SessionAcquirer, BROWSER_USER_AGENT};
use crate::domain::model::DashboardData;
use crate::domain::ports::DashboardSource;
use crate::utils::error::Result;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, COOKIE, REFERER, USER_AGENT};

const XHR_ACCEPT: &str = "application/json, text/javascript, */*; q=0.01";

/// Logs in, then pulls the payin and payout summary fragments.
pub struct DashboardScraper {
    session: SessionAcquirer,
}

impl DashboardScraper {
    pub fn new(session: SessionAcquirer) -> Self {
        Self { session }
    }

    /// POSTs an empty form to a summary endpoint. Any failure is logged and
    /// yields `None` so the other side can still be reported.
    async fn fetch_summary(&self, name: &str, url: &str, jar: &CookieJar) -> Option<String> {
        tracing::info!("📊 Fetching {} summary", name);
        let endpoints = self.session.endpoints();

        let response = self
            .session
            .client()
            .post(url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(COOKIE, jar.header_value())
            .header(ACCEPT, XHR_ACCEPT)
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.5")
            .header("X-Requested-With", "XMLHttpRequest")
            .header(REFERER, &endpoints.dashboard)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("")
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("❌ {} summary request failed: {}", name, e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("⚠️ {} summary returned status {}", name, status);
        }

        match response.text().await {
            Ok(text) => {
                tracing::debug!("📊 {} summary response ({} bytes): {}", name, text.len(), text);
                Some(text)
            }
            Err(e) => {
                tracing::warn!("❌ Failed to read {} summary body: {}", name, e);
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl DashboardSource for DashboardScraper {
    async fn fetch(&self) -> Result<DashboardData> {
        let jar = self.session.acquire().await?;
        let endpoints = self.session.endpoints();

        let payin_response = self
            .fetch_summary("payin", &endpoints.payin_summary, &jar)
            .await;
        let payout_response = self
            .fetch_summary("payout", &endpoints.payout_summary, &jar)
            .await;

        Ok(DashboardData {
            payin_response,
            payout_response,
        })
    }
}
