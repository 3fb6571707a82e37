use crate::domain::amount::Amount;
use crate::utils::error::ErrorCategory;
use serde::Serialize;

/// Raw text returned by the two summary endpoints. `None` when the call failed.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub payin_response: Option<String>,
    pub payout_response: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub payin: Amount,
    pub payout: Amount,
    pub total_volume: Amount,
    pub last_updated: String,
}

/// JSON body returned by every invocation.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<DashboardSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HandlerResponse {
    pub status_code: u16,
    pub body: MonitorResponse,
    #[serde(skip)]
    pub failure: Option<ErrorCategory>,
}
