use super::*;
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub dashboard: DashboardSection,
    pub telegram: TelegramSection,
    #[serde(default)]
    pub extraction: ExtractionSection,
    #[serde(default)]
    pub runtime: RuntimeSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSection {
    #[serde(default = "default_dashboard_url")]
    pub url: String,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_password")]
    pub password: String,
    #[serde(default = "default_dashboard_name")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramSection {
    #[serde(default = "default_bot_token")]
    pub bot_token: String,
    #[serde(default = "default_chat_id")]
    pub chat_id: String,
    #[serde(default = "default_telegram_api_base")]
    pub api_base: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionSection {
    pub amount_ceiling: Option<f64>,
    pub large_amount_floor: Option<f64>,
    pub require_amounts: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeSection {
    pub request_timeout_secs: Option<u64>,
    pub utc_offset_minutes: Option<i32>,
}

fn default_dashboard_url() -> String {
    DEFAULT_DASHBOARD_URL.to_string()
}

fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}

fn default_password() -> String {
    DEFAULT_PASSWORD.to_string()
}

fn default_bot_token() -> String {
    DEFAULT_TELEGRAM_BOT_TOKEN.to_string()
}

fn default_chat_id() -> String {
    DEFAULT_TELEGRAM_CHAT_ID.to_string()
}

fn default_dashboard_name() -> String {
    DEFAULT_DASHBOARD_NAME.to_string()
}

fn default_telegram_api_base() -> String {
    DEFAULT_TELEGRAM_API_BASE.to_string()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${TELEGRAM_BOT_TOKEN})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }
}

impl ConfigProvider for TomlConfig {
    fn dashboard_url(&self) -> &str {
        &self.dashboard.url
    }

    fn username(&self) -> &str {
        &self.dashboard.username
    }

    fn password(&self) -> &str {
        &self.dashboard.password
    }

    fn telegram_bot_token(&self) -> &str {
        &self.telegram.bot_token
    }

    fn telegram_chat_id(&self) -> &str {
        &self.telegram.chat_id
    }

    fn telegram_api_base(&self) -> &str {
        &self.telegram.api_base
    }

    fn dashboard_name(&self) -> &str {
        &self.dashboard.name
    }

    fn amount_ceiling(&self) -> f64 {
        self.extraction.amount_ceiling.unwrap_or(DEFAULT_AMOUNT_CEILING)
    }

    fn large_amount_floor(&self) -> f64 {
        self.extraction
            .large_amount_floor
            .unwrap_or(DEFAULT_LARGE_AMOUNT_FLOOR)
    }

    fn request_timeout_secs(&self) -> Option<u64> {
        timeout_from_secs(
            self.runtime
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    fn utc_offset_minutes(&self) -> i32 {
        self.runtime
            .utc_offset_minutes
            .unwrap_or(DEFAULT_UTC_OFFSET_MINUTES)
    }

    fn require_amounts(&self) -> bool {
        self.extraction.require_amounts.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self, true)
    }
}
