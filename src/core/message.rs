use crate::domain::amount::Amount;
use chrono::{DateTime, FixedOffset, Offset, SecondsFormat, Utc};

/// Asia/Kolkata, which has no daylight saving.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;

/// `dd/mm/yyyy, hh:mm:ss am` at the given offset.
pub fn format_local_time(now: DateTime<Utc>, utc_offset_minutes: i32) -> String {
    let offset = FixedOffset::east_opt(utc_offset_minutes.saturating_mul(60)).unwrap_or_else(|| {
        tracing::warn!(
            "Invalid UTC offset {} minutes, falling back to UTC",
            utc_offset_minutes
        );
        Utc.fix()
    });

    now.with_timezone(&offset)
        .format("%d/%m/%Y, %I:%M:%S %P")
        .to_string()
}

/// ISO-8601 UTC timestamp with millisecond precision, e.g. `2026-10-17T09:00:00.000Z`.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Escapes the characters Telegram's legacy Markdown treats as markup, so
/// interpolated text like `error_code` is sent verbatim.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub fn format_summary_message(
    dashboard_name: &str,
    payin: &Amount,
    payout: &Amount,
    total: &Amount,
    local_time: &str,
) -> String {
    format!(
        "🔔 *{} Dashboard Update*\n\
         \n\
         📊 *Today's Transaction Summary*\n\
         💰 Payin Amount: {}\n\
         💸 Payout Amount: {}\n\
         📈 Total Volume: {}\n\
         \n\
         🕒 Updated at: {}",
        escape_markdown(dashboard_name),
        payin,
        payout,
        total,
        local_time
    )
}

pub fn format_error_message(error: &str, local_time: &str) -> String {
    format!(
        "❌ Dashboard Monitor Error: {}\n🕒 Time: {}",
        escape_markdown(error),
        local_time
    )
}
