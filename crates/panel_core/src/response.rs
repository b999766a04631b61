//! Interpretation of the import endpoint's JSON replies.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyError {
    /// Body was not JSON at all.
    Malformed(String),
    /// Body was JSON but did not carry a usable `id`.
    MissingId(Value),
}

/// `null`, `false`, `0` and `""` do not count as an id.
pub fn is_truthy_id(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Parses an import reply and checks that it names the created task.
pub(crate) fn parse_import_reply(body: &str) -> Result<Value, ReplyError> {
    let json: Value =
        serde_json::from_str(body).map_err(|err| ReplyError::Malformed(err.to_string()))?;
    let has_id = json.get("id").is_some_and(is_truthy_id);
    if has_id {
        Ok(json)
    } else {
        Err(ReplyError::MissingId(json))
    }
}

/// Message shown for a successful upload whose reply cannot be used.
pub(crate) fn upload_reply_error(body: &str, err: &ReplyError) -> String {
    let detail = match err {
        ReplyError::Malformed(message) => message.clone(),
        ReplyError::MissingId(_) => {
            format!("Expected id field, but none given ({})", body.trim())
        }
    };
    format!("Invalid response from server: {detail}")
}

/// Message shown for a URL import whose reply has no id.
pub(crate) fn url_import_reply_error(body: &str, err: &ReplyError) -> String {
    if let ReplyError::MissingId(json) = err {
        match json.get("error") {
            Some(Value::String(message)) if !message.is_empty() => return message.clone(),
            Some(other) if is_truthy_id(other) => return other.to_string(),
            _ => {}
        }
        return format!("Cannot import from URL, server responded: {json}");
    }
    format!("Cannot import from URL, server responded: {}", body.trim())
}
