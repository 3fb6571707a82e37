#[cfg(feature = "cli")]
pub mod cli;
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use lambda::LambdaConfig;
pub use toml_config::TomlConfig;

use crate::core::ConfigProvider;
use crate::utils::error::{MonitorError, Result};
use crate::utils::validation::{
    validate_amount_bounds, validate_chat_id, validate_non_empty_string, validate_range,
    validate_url,
};

pub const DEFAULT_DASHBOARD_URL: &str = "https://pay.onestopfashionhub.in/ssadmin";
pub const DEFAULT_USERNAME: &str = "Admin";
pub const DEFAULT_DASHBOARD_NAME: &str = "One Stop Fashion Hub";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// 密鑰的內建預設值在編譯時注入，例如
// `DEFAULT_DASHBOARD_PASSWORD=... cargo build --release`；未提供時為空字串
pub const DEFAULT_PASSWORD: &str = build_default(option_env!("DEFAULT_DASHBOARD_PASSWORD"));
pub const DEFAULT_TELEGRAM_BOT_TOKEN: &str =
    build_default(option_env!("DEFAULT_TELEGRAM_BOT_TOKEN"));
pub const DEFAULT_TELEGRAM_CHAT_ID: &str = build_default(option_env!("DEFAULT_TELEGRAM_CHAT_ID"));

/// Environment names for the credentials, highest priority first.
pub const USERNAME_VARS: [&str; 2] = ["DASHBOARD_USERNAME", "USERNAME"];
pub const PASSWORD_VARS: [&str; 2] = ["DASHBOARD_PASSWORD", "PASSWORD"];

const fn build_default(value: Option<&'static str>) -> &'static str {
    match value {
        Some(value) => value,
        None => "",
    }
}

/// First non-blank value among `names`.
pub(crate) fn lookup_first<F>(lookup: &F, names: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    names
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
}

pub use crate::adapters::telegram::TELEGRAM_API_BASE as DEFAULT_TELEGRAM_API_BASE;
pub use crate::core::message::DEFAULT_UTC_OFFSET_MINUTES;
pub use crate::domain::amount::{DEFAULT_AMOUNT_CEILING, DEFAULT_LARGE_AMOUNT_FLOOR};

/// `0` disables the timeout.
pub(crate) fn timeout_from_secs(secs: u64) -> Option<u64> {
    (secs > 0).then_some(secs)
}

/// Leftover `${VAR}` placeholders mean the variable was never set.
fn ensure_resolved(field: &str, value: &str) -> Result<()> {
    if value.contains("${") {
        return Err(MonitorError::MissingConfig {
            field: format!("{} (unresolved placeholder {})", field, value),
        });
    }
    Ok(())
}

/// Checks shared by every provider. Telegram settings are only required when
/// messages are actually sent.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C, notify: bool) -> Result<()> {
    validate_url("dashboard_url", config.dashboard_url())?;
    validate_non_empty_string("username", config.username())?;
    ensure_resolved("password", config.password())?;
    if config.password().is_empty() {
        return Err(MonitorError::MissingConfig {
            field: "password".to_string(),
        });
    }

    validate_amount_bounds(config.large_amount_floor(), config.amount_ceiling())?;
    validate_range("utc_offset_minutes", config.utc_offset_minutes(), -14 * 60, 14 * 60)?;

    if notify {
        validate_url("telegram_api_base", config.telegram_api_base())?;
        ensure_resolved("telegram_bot_token", config.telegram_bot_token())?;
        if config.telegram_bot_token().trim().is_empty() {
            return Err(MonitorError::MissingConfig {
                field: "telegram_bot_token".to_string(),
            });
        }
        ensure_resolved("telegram_chat_id", config.telegram_chat_id())?;
        if config.telegram_chat_id().is_empty() {
            return Err(MonitorError::MissingConfig {
                field: "telegram_chat_id".to_string(),
            });
        }
        validate_chat_id("telegram_chat_id", config.telegram_chat_id())?;
    }

    tracing::debug!("✅ Configuration validation passed");
    Ok(())
}
