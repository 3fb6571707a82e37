use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Login failed with status {status}")]
    LoginRejected { status: u16 },

    #[error("Authentication error: {message}")]
    Authentication { message: String },

    #[error("Extraction error: {message}")]
    Extraction { message: String },

    #[error("Telegram failed: {status} - {body}")]
    Delivery { status: u16, body: String },

    #[error("Telegram delivery failed: {message}")]
    DeliveryFailed { message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// 錯誤類別，決定回報方式與 CLI 退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Authentication,
    Extraction,
    Delivery,
    Transport,
}

impl ErrorCategory {
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Authentication => 2,
            ErrorCategory::Extraction => 3,
            ErrorCategory::Delivery => 4,
            ErrorCategory::Transport => 5,
        }
    }
}

impl MonitorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MonitorError::LoginRejected { .. } | MonitorError::Authentication { .. } => {
                ErrorCategory::Authentication
            }
            MonitorError::Extraction { .. } | MonitorError::Serialization(_) => {
                ErrorCategory::Extraction
            }
            MonitorError::Delivery { .. } | MonitorError::DeliveryFailed { .. } => {
                ErrorCategory::Delivery
            }
            MonitorError::Http(_) => ErrorCategory::Transport,
            MonitorError::Io(_)
            | MonitorError::Toml(_)
            | MonitorError::Pattern(_)
            | MonitorError::Config { .. }
            | MonitorError::MissingConfig { .. }
            | MonitorError::InvalidConfigValue { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the environment variables, CLI flags or TOML file for missing or malformed values"
            }
            ErrorCategory::Authentication => {
                "Verify the dashboard credentials and that the login page is reachable"
            }
            ErrorCategory::Extraction => {
                "The dashboard markup may have changed; inspect the summary responses at debug level"
            }
            ErrorCategory::Delivery => "Verify the Telegram bot token and chat id",
            ErrorCategory::Transport => "Check network connectivity and the request timeout",
        }
    }
}

pub type Result<T> = std::result::Result<T, MonitorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_rejected_message_contains_status() {
        let err = MonitorError::LoginRejected { status: 401 };
        assert!(err.to_string().contains("401"));
        assert_eq!(err.category(), ErrorCategory::Authentication);
    }

    #[test]
    fn test_delivery_message_format() {
        let err = MonitorError::Delivery {
            status: 400,
            body: "Bad Request: chat not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Telegram failed: 400 - Bad Request: chat not found"
        );
        assert_eq!(err.category().exit_code(), 4);
    }

    #[test]
    fn test_config_errors_share_category() {
        let missing = MonitorError::MissingConfig {
            field: "password".to_string(),
        };
        let invalid = MonitorError::InvalidConfigValue {
            field: "amount_ceiling".to_string(),
            value: "-1".to_string(),
            reason: "must be positive".to_string(),
        };
        assert_eq!(missing.category(), ErrorCategory::Configuration);
        assert_eq!(invalid.category(), ErrorCategory::Configuration);
    }
}
