pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{LambdaConfig, TomlConfig};

pub use core::monitor::{DashboardMonitor, MonitorSettings};
pub use domain::amount::Amount;
pub use utils::error::{MonitorError, Result};
