use crate::utils::error::{MonitorError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(MonitorError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(MonitorError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(MonitorError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MonitorError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(MonitorError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Floor and ceiling used by the amount extractor.
pub fn validate_amount_bounds(floor: f64, ceiling: f64) -> Result<()> {
    if !floor.is_finite() || floor < 0.0 {
        return Err(MonitorError::InvalidConfigValue {
            field: "large_amount_floor".to_string(),
            value: floor.to_string(),
            reason: "Floor must be a non-negative number".to_string(),
        });
    }
    if !ceiling.is_finite() || ceiling <= floor {
        return Err(MonitorError::InvalidConfigValue {
            field: "amount_ceiling".to_string(),
            value: ceiling.to_string(),
            reason: format!("Ceiling must be greater than the floor ({})", floor),
        });
    }
    Ok(())
}

/// Telegram chat ids are numeric (`-100…` for channels) or an `@channel` handle.
pub fn validate_chat_id(field_name: &str, chat_id: &str) -> Result<()> {
    validate_non_empty_string(field_name, chat_id)?;

    let digits = chat_id.strip_prefix('-').unwrap_or(chat_id);
    let numeric = !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit());
    let handle = chat_id.len() > 1
        && chat_id.starts_with('@')
        && chat_id[1..]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !numeric && !handle {
        return Err(MonitorError::InvalidConfigValue {
            field: field_name.to_string(),
            value: chat_id.to_string(),
            reason: "Chat id must be numeric or an @channel handle".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("dashboard_url", "https://example.com/ssadmin").is_ok());
        assert!(validate_url("dashboard_url", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("dashboard_url", "").is_err());
        assert!(validate_url("dashboard_url", "invalid-url").is_err());
        assert!(validate_url("dashboard_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_amount_bounds() {
        assert!(validate_amount_bounds(1000.0, 100_000_000.0).is_ok());
        assert!(validate_amount_bounds(0.0, 1.0).is_ok());
        assert!(validate_amount_bounds(-1.0, 10.0).is_err());
        assert!(validate_amount_bounds(1000.0, 1000.0).is_err());
        assert!(validate_amount_bounds(1000.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_chat_id() {
        assert!(validate_chat_id("telegram_chat_id", "-1002643858824").is_ok());
        assert!(validate_chat_id("telegram_chat_id", "123456").is_ok());
        assert!(validate_chat_id("telegram_chat_id", "@payments_feed").is_ok());
        assert!(validate_chat_id("telegram_chat_id", "").is_err());
        assert!(validate_chat_id("telegram_chat_id", "@").is_err());
        assert!(validate_chat_id("telegram_chat_id", "-").is_err());
        assert!(validate_chat_id("telegram_chat_id", "chat 1").is_err());
    }
}
