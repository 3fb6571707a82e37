#[cfg(feature = "lambda")]
use dashboard_monitor::app;
#[cfg(feature = "lambda")]
use dashboard_monitor::core::message::format_timestamp;
#[cfg(feature = "lambda")]
use dashboard_monitor::domain::model::{HandlerResponse, MonitorResponse};
#[cfg(feature = "lambda")]
use dashboard_monitor::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use dashboard_monitor::{LambdaConfig, MonitorError};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::Serialize;
#[cfg(feature = "lambda")]
use std::collections::HashMap;

/// API Gateway 相容的回應格式
#[cfg(feature = "lambda")]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

#[cfg(feature = "lambda")]
impl Response {
    fn from_handler(response: &HandlerResponse) -> Result<Self, Error> {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        Ok(Self {
            status_code: response.status_code,
            headers,
            body: serde_json::to_string(&response.body)?,
        })
    }
}

#[cfg(feature = "lambda")]
fn startup_failure(error: &MonitorError) -> HandlerResponse {
    HandlerResponse {
        status_code: 500,
        body: MonitorResponse {
            success: false,
            message: None,
            error: Some(error.to_string()),
            timestamp: format_timestamp(chrono::Utc::now()),
            data: None,
        },
        failure: Some(error.category()),
    }
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<serde_json::Value>) -> Result<Response, Error> {
    tracing::info!(request_id = %event.context.request_id, "Starting dashboard monitor");

    // 事件內容不影響執行，每次都從環境變數讀取配置
    let outcome = match LambdaConfig::from_env() {
        Ok(config) => match config.validate() {
            Ok(()) => app::telegram_monitor(&config),
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    };

    let response = match outcome {
        Ok(monitor) => monitor.handle().await,
        Err(e) => {
            tracing::error!("❌ Configuration error: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            startup_failure(&e)
        }
    };

    tracing::info!(
        status_code = response.status_code,
        "Dashboard monitor finished"
    );
    Response::from_handler(&response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
