use super::*;
use crate::utils::validation::Validate;
use std::env;
use std::str::FromStr;

/// Settings read from the Lambda environment. Unset variables fall back to
/// the built-in defaults; the secrets' defaults are fixed at build time.
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub dashboard_url: String,
    pub username: String,
    pub password: String,
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
    pub telegram_api_base: String,
    pub dashboard_name: String,
    pub amount_ceiling: f64,
    pub large_amount_floor: f64,
    pub request_timeout_secs: u64,
    pub utc_offset_minutes: i32,
    pub require_amounts: bool,
}

fn parse_or<T, F>(lookup: &F, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse()
                .map_err(|e: T::Err| MonitorError::InvalidConfigValue {
                    field: name.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                })
        }
        _ => Ok(default),
    }
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any name → value lookup.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        let text = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        Ok(Self {
            dashboard_url: text("DASHBOARD_URL", DEFAULT_DASHBOARD_URL),
            username: lookup_first(&lookup, &USERNAME_VARS)
                .unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            password: lookup_first(&lookup, &PASSWORD_VARS)
                .unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
            telegram_bot_token: text("TELEGRAM_BOT_TOKEN", DEFAULT_TELEGRAM_BOT_TOKEN),
            telegram_chat_id: text("TELEGRAM_CHAT_ID", DEFAULT_TELEGRAM_CHAT_ID),
            telegram_api_base: text("TELEGRAM_API_BASE", DEFAULT_TELEGRAM_API_BASE),
            dashboard_name: text("DASHBOARD_NAME", DEFAULT_DASHBOARD_NAME),
            amount_ceiling: parse_or(&lookup, "AMOUNT_CEILING", DEFAULT_AMOUNT_CEILING)?,
            large_amount_floor: parse_or(&lookup, "LARGE_AMOUNT_FLOOR", DEFAULT_LARGE_AMOUNT_FLOOR)?,
            request_timeout_secs: parse_or(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            utc_offset_minutes: parse_or(&lookup, "UTC_OFFSET_MINUTES", DEFAULT_UTC_OFFSET_MINUTES)?,
            require_amounts: parse_or(&lookup, "REQUIRE_AMOUNTS", false)?,
        })
    }
}

impl ConfigProvider for LambdaConfig {
    fn dashboard_url(&self) -> &str {
        &self.dashboard_url
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn password(&self) -> &str {
        &self.password
    }

    fn telegram_bot_token(&self) -> &str {
        &self.telegram_bot_token
    }

    fn telegram_chat_id(&self) -> &str {
        &self.telegram_chat_id
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

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self, true)?;
        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = LambdaConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.dashboard_url, DEFAULT_DASHBOARD_URL);
        assert_eq!(config.username, "Admin");
        assert_eq!(config.amount_ceiling, 100_000_000.0);
        assert_eq!(config.request_timeout_secs(), Some(30));
        assert_eq!(config.utc_offset_minutes, 330);
        assert!(!config.require_amounts);
        assert_eq!(config.password, DEFAULT_PASSWORD);
        assert_eq!(config.telegram_bot_token, DEFAULT_TELEGRAM_BOT_TOKEN);
        assert_eq!(config.telegram_chat_id, DEFAULT_TELEGRAM_CHAT_ID);
        if DEFAULT_PASSWORD.is_empty() {
            // 沒有內建密碼時驗證必須失敗
            assert!(matches!(
                config.validate(),
                Err(MonitorError::MissingConfig { ref field }) if field == "password"
            ));
        }
    }

    #[test]
    fn test_generic_credential_names_are_accepted() {
        let config = LambdaConfig::from_lookup(lookup(&[
            ("USERNAME", "ops"),
            ("PASSWORD", "legacy-pw"),
        ]))
        .unwrap();
        assert_eq!(config.username, "ops");
        assert_eq!(config.password, "legacy-pw");
    }

    #[test]
    fn test_prefixed_credential_names_win() {
        let config = LambdaConfig::from_lookup(lookup(&[
            ("USERNAME", "shell-user"),
            ("PASSWORD", "legacy-pw"),
            ("DASHBOARD_USERNAME", "Admin2"),
            ("DASHBOARD_PASSWORD", "pw"),
        ]))
        .unwrap();
        assert_eq!(config.username, "Admin2");
        assert_eq!(config.password, "pw");

        // 空白值視為未設定
        let config = LambdaConfig::from_lookup(lookup(&[
            ("DASHBOARD_PASSWORD", " "),
            ("PASSWORD", "legacy-pw"),
        ]))
        .unwrap();
        assert_eq!(config.password, "legacy-pw");
    }

    #[test]
    fn test_reads_overrides() {
        let config = LambdaConfig::from_lookup(lookup(&[
            ("DASHBOARD_PASSWORD", "pw"),
            ("TELEGRAM_BOT_TOKEN", "123:ABC"),
            ("TELEGRAM_CHAT_ID", "-100123"),
            ("AMOUNT_CEILING", "1000000"),
            ("REQUIRE_AMOUNTS", "true"),
            ("REQUEST_TIMEOUT_SECS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.amount_ceiling, 1_000_000.0);
        assert!(config.require_amounts);
        assert_eq!(config.request_timeout_secs(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unparsable_number_is_reported() {
        let err = LambdaConfig::from_lookup(lookup(&[("AMOUNT_CEILING", "lots")])).unwrap_err();
        match err {
            MonitorError::InvalidConfigValue { field, value, .. } => {
                assert_eq!(field, "AMOUNT_CEILING");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
