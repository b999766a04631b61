use chrono::{SecondsFormat, Utc};

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn iso_timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Name given to tasks the user did not name explicitly.
pub fn default_task_name(timestamp: &str) -> String {
    format!("Task of {timestamp}")
}
