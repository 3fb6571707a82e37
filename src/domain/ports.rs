use crate::domain::model::DashboardData;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn dashboard_url(&self) -> &str;
    fn username(&self) -> &str;
    fn password(&self) -> &str;
    fn telegram_bot_token(&self) -> &str;
    fn telegram_chat_id(&self) -> &str;
    fn telegram_api_base(&self) -> &str;
    fn dashboard_name(&self) -> &str;
    fn amount_ceiling(&self) -> f64;
    fn large_amount_floor(&self) -> f64;
    /// `None` disables the per-request timeout.
    fn request_timeout_secs(&self) -> Option<u64>;
    fn utc_offset_minutes(&self) -> i32;
    fn require_amounts(&self) -> bool;
}

#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn fetch(&self) -> Result<DashboardData>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<()>;
}
