use crate::core::cookies::CookieJar;
use crate::utils::error::{MonitorError, Result};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, COOKIE, REFERER, USER_AGENT};
use reqwest::{redirect, Client, RequestBuilder, StatusCode};
use std::time::Duration;

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.5";

/// Every URL the monitor touches, derived from the dashboard base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardEndpoints {
    pub landing: String,
    pub login: String,
    pub dashboard: String,
    pub payin_summary: String,
    pub payout_summary: String,
}

impl DashboardEndpoints {
    pub fn from_base(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            landing: base.to_string(),
            login: format!("{}/auth/login", base),
            dashboard: format!("{}/dashboard", base),
            payin_summary: format!("{}/remote/getDashboardPayinSummary", base),
            payout_summary: format!("{}/remote/getDashboardPayoutSummary", base),
        }
    }
}

/// Redirects are never followed: the login POST answers with a 302 whose
/// `Set-Cookie` headers must be observed.
pub fn build_http_client(timeout_secs: Option<u64>) -> Result<Client> {
    let mut builder = Client::builder().redirect(redirect::Policy::none());

    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    Ok(builder.build()?)
}

/// Logs in with form credentials and returns the accumulated session cookies.
pub struct SessionAcquirer {
    client: Client,
    endpoints: DashboardEndpoints,
    username: String,
    password: String,
}

impl SessionAcquirer {
    pub fn new(
        client: Client,
        endpoints: DashboardEndpoints,
        username: String,
        password: String,
    ) -> Self {
        Self {
            client,
            endpoints,
            username,
            password,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn endpoints(&self) -> &DashboardEndpoints {
        &self.endpoints
    }

    pub async fn acquire(&self) -> Result<CookieJar> {
        tracing::info!("🔐 Starting login flow against {}", self.endpoints.landing);
        let mut jar = CookieJar::new();

        // 1. 匿名首頁，取得初始 session
        let request = self.client.get(&self.endpoints.landing);
        self.step("landing page", request, &mut jar).await?;

        // 2. 登入頁
        let request = self
            .client
            .get(&self.endpoints.login)
            .header(ACCEPT, HTML_ACCEPT);
        self.step("login page", request, &mut jar).await?;

        // 3. 送出帳號密碼
        let request = self
            .client
            .post(&self.endpoints.login)
            .header(REFERER, &self.endpoints.login)
            .header(ACCEPT, HTML_ACCEPT)
            .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_VALUE)
            .form(&[
                ("username", self.username.as_str()),
                ("password", self.password.as_str()),
            ]);
        let status = self.step("credential submission", request, &mut jar).await?;

        if !(status.is_success() || status.is_redirection()) {
            tracing::error!("❌ Login rejected with status {}", status);
            return Err(MonitorError::LoginRejected {
                status: status.as_u16(),
            });
        }

        // 4. 進入儀表板以建立已登入狀態
        let request = self
            .client
            .get(&self.endpoints.dashboard)
            .header(REFERER, &self.endpoints.login)
            .header(ACCEPT, HTML_ACCEPT)
            .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_VALUE);
        self.step("dashboard page", request, &mut jar).await?;

        if jar.is_empty() {
            tracing::warn!("⚠️ No session cookies after login, continuing without a session");
        } else {
            tracing::info!("✅ Login completed with {} cookies", jar.len());
        }

        Ok(jar)
    }

    /// Sends one request with the current cookie header and folds the
    /// response cookies back into the jar.
    async fn step(
        &self,
        name: &str,
        request: RequestBuilder,
        jar: &mut CookieJar,
    ) -> Result<StatusCode> {
        let mut request = request.header(USER_AGENT, BROWSER_USER_AGENT);
        if !jar.is_empty() {
            request = request.header(COOKIE, jar.header_value());
        }

        let response = request
            .send()
            .await
            .map_err(|e| MonitorError::Authentication {
                message: format!("{} request failed: {}", name, e),
            })?;

        let status = response.status();
        let taken = jar.absorb(&response);
        tracing::debug!(
            "🍪 {}: status {}, {} new cookies, {} total",
            name,
            status,
            taken,
            jar.len()
        );

        if !(status.is_success() || status.is_redirection()) {
            tracing::warn!("⚠️ {} returned status {}", name, status);
        }

        Ok(status)
    }
}
