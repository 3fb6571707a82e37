pub mod cookies;
pub mod extract;
pub mod message;
pub mod monitor;
pub mod scraper;
pub mod session;

pub use crate::domain::model::{DashboardData, DashboardSummary, HandlerResponse};
pub use crate::domain::ports::{ConfigProvider, DashboardSource, Notifier};
pub use crate::utils::error::Result;
