use super::*;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "dashboard-monitor")]
#[command(about = "Scrape payin/payout totals from the payment dashboard and post them to Telegram")]
pub struct CliConfig {
    #[arg(long, env = "DASHBOARD_URL", default_value = DEFAULT_DASHBOARD_URL)]
    pub dashboard_url: String,

    #[arg(long, env = "DASHBOARD_USERNAME", help = "Dashboard login [default: Admin]")]
    pub username: Option<String>,

    #[arg(long, env = "DASHBOARD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub telegram_bot_token: Option<String>,

    #[arg(long, env = "TELEGRAM_CHAT_ID", allow_hyphen_values = true)]
    pub telegram_chat_id: Option<String>,

    #[arg(long, env = "TELEGRAM_API_BASE", default_value = DEFAULT_TELEGRAM_API_BASE)]
    pub telegram_api_base: String,

    #[arg(long, env = "DASHBOARD_NAME", default_value = DEFAULT_DASHBOARD_NAME)]
    pub dashboard_name: String,

    #[arg(long, env = "AMOUNT_CEILING", default_value_t = DEFAULT_AMOUNT_CEILING)]
    pub amount_ceiling: f64,

    #[arg(long, env = "LARGE_AMOUNT_FLOOR", default_value_t = DEFAULT_LARGE_AMOUNT_FLOOR)]
    pub large_amount_floor: f64,

    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS, help = "Per-request timeout in seconds, 0 disables it")]
    pub request_timeout_secs: u64,

    #[arg(long, env = "UTC_OFFSET_MINUTES", default_value_t = DEFAULT_UTC_OFFSET_MINUTES, allow_hyphen_values = true)]
    pub utc_offset_minutes: i32,

    #[arg(long, env = "REQUIRE_AMOUNTS", help = "Fail when neither amount can be extracted")]
    pub require_amounts: bool,

    #[arg(short, long, help = "Load settings from a TOML file instead of flags/env")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Print the message to stderr instead of sending it")]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Fills unset credentials from the generic `USERNAME` / `PASSWORD`
    /// variables.
    pub fn with_env_aliases(mut self) -> Self {
        self.apply_aliases(|name| std::env::var(name).ok());
        self
    }

    pub(crate) fn apply_aliases<F: Fn(&str) -> Option<String>>(&mut self, lookup: F) {
        if self.username.is_none() {
            self.username = lookup_first(&lookup, &USERNAME_VARS[1..]);
        }
        if self.password.is_none() {
            self.password = lookup_first(&lookup, &PASSWORD_VARS[1..]);
        }
    }
}

impl ConfigProvider for CliConfig {
    fn dashboard_url(&self) -> &str {
        &self.dashboard_url
    }

    fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(DEFAULT_USERNAME)
    }

    fn password(&self) -> &str {
        self.password.as_deref().unwrap_or(DEFAULT_PASSWORD)
    }

    fn telegram_bot_token(&self) -> &str {
        self.telegram_bot_token
            .as_deref()
            .unwrap_or(DEFAULT_TELEGRAM_BOT_TOKEN)
    }

    fn telegram_chat_id(&self) -> &str {
        self.telegram_chat_id
            .as_deref()
            .unwrap_or(DEFAULT_TELEGRAM_CHAT_ID)
    }

    fn telegram_api_base(&self) -> &str {
        &self.telegram_api_base
    }

    fn dashboard_name(&self) -> &str {
        &self.dashboard_name
    }

    fn amount_ceiling(&self) -> f64 {
        self.amount_ceiling
    }

    fn large_amount_floor(&self) -> f64 {
        self.large_amount_floor
    }

    fn request_timeout_secs(&self) -> Option<u64> {
        timeout_from_secs(self.request_timeout_secs)
    }

    fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
    }

    fn require_amounts(&self) -> bool {
        self.require_amounts
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self, !self.dry_run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        let mut argv = vec!["dashboard-monitor"];
        argv.extend_from_slice(args);
        CliConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = parse(&[
            "--dashboard-url",
            "http://127.0.0.1:8080/ssadmin",
            "--password",
            "pw",
            "--telegram-bot-token",
            "123:ABC",
            "--telegram-chat-id",
            "-1002643858824",
            "--amount-ceiling",
            "10000000",
            "--request-timeout-secs",
            "0",
            "--utc-offset-minutes",
            "-300",
        ]);

        assert_eq!(config.dashboard_url(), "http://127.0.0.1:8080/ssadmin");
        assert_eq!(config.telegram_chat_id(), "-1002643858824");
        assert_eq!(config.amount_ceiling(), 10_000_000.0);
        assert_eq!(config.request_timeout_secs(), None);
        assert_eq!(config.utc_offset_minutes(), -300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_dry_run_does_not_need_telegram_settings() {
        let config = parse(&["--password", "pw", "--dry-run", "--telegram-chat-id", "x y"]);
        assert!(config.validate().is_ok());

        let config = parse(&["--password", "pw", "--telegram-chat-id", "x y"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_password_is_rejected() {
        let mut config = parse(&["--dry-run"]);
        config.password = Some(String::new());
        assert!(matches!(
            config.validate(),
            Err(MonitorError::MissingConfig { ref field }) if field == "password"
        ));
    }

    #[test]
    fn test_unset_secrets_fall_back_to_build_defaults() {
        let mut config = parse(&["--dry-run"]);
        config.username = None;
        config.password = None;
        config.telegram_bot_token = None;
        config.telegram_chat_id = None;

        assert_eq!(config.username(), DEFAULT_USERNAME);
        assert_eq!(config.password(), DEFAULT_PASSWORD);
        assert_eq!(config.telegram_bot_token(), DEFAULT_TELEGRAM_BOT_TOKEN);
        assert_eq!(config.telegram_chat_id(), DEFAULT_TELEGRAM_CHAT_ID);
    }

    #[test]
    fn test_generic_credential_names_fill_only_unset_values() {
        let aliases = |name: &str| match name {
            "USERNAME" => Some("ops".to_string()),
            "PASSWORD" => Some("legacy-pw".to_string()),
            _ => None,
        };

        let mut config = parse(&["--dry-run"]);
        config.username = None;
        config.password = None;
        config.apply_aliases(aliases);
        assert_eq!(config.username(), "ops");
        assert_eq!(config.password(), "legacy-pw");

        let mut config = parse(&["--dry-run", "--username", "Admin2", "--password", "pw"]);
        config.apply_aliases(aliases);
        assert_eq!(config.username(), "Admin2");
        assert_eq!(config.password(), "pw");
    }
}
