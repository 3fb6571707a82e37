use crate::domain::ports::Notifier;
use crate::utils::error::{MonitorError, Result};
use reqwest::Client;
use serde::Deserialize;

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends Markdown messages through the Telegram Bot API `sendMessage` method.
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(client: Client, api_base: &str, bot_token: String, chat_id: String) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            bot_token,
            chat_id,
        }
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.bot_token)
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        tracing::info!("📤 Sending message to Telegram chat {}", self.chat_id);

        let response = self
            .client
            .post(self.send_message_url())
            .form(&[
                ("chat_id", self.chat_id.as_str()),
                ("text", text),
                ("parse_mode", "Markdown"),
            ])
            .send()
            .await
            .map_err(|e| MonitorError::DeliveryFailed {
                message: format!("request failed: {}", e),
            })?;

        let status = response.status();
        tracing::debug!("📤 Telegram response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MonitorError::Delivery {
                status: status.as_u16(),
                body,
            });
        }

        let reply: TelegramResponse =
            response
                .json()
                .await
                .map_err(|e| MonitorError::DeliveryFailed {
                    message: format!("unreadable reply: {}", e),
                })?;
        if !reply.ok {
            return Err(MonitorError::DeliveryFailed {
                message: reply
                    .description
                    .unwrap_or_else(|| "ok=false without description".to_string()),
            });
        }

        tracing::info!("✅ Telegram message sent");
        Ok(())
    }
}
