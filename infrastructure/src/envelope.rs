//! Decoding of the `{ success, error, ...payload }` envelope every endpoint
//! except table close answers with.

use domain::ApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Checks the envelope and hands back the whole JSON object.
///
/// `success: false` (or a non-2xx status) becomes [`ApiError::Rejected`]
/// carrying the server's `error` text, or `fallback` when it sent none.
pub fn open(status: u16, body: &str, fallback: &str) -> Result<Value, ApiError> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) if !is_success(status) => return Err(ApiError::rejected(status, fallback)),
        Err(err) => return Err(ApiError::InvalidResponse(err.to_string())),
    };

    let success = value.get("success").and_then(Value::as_bool).unwrap_or(false);
    if success && is_success(status) {
        Ok(value)
    } else {
        Err(ApiError::rejected(status, error_text(&value).unwrap_or(fallback)))
    }
}

/// Plain (non-enveloped) response: only the status code decides, and only
/// `200 OK` counts as success.
pub fn open_plain<T: DeserializeOwned>(status: u16, body: &str, fallback: &str) -> Result<T, ApiError> {
    if status != 200 {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| error_text(&v).map(str::to_string))
            .unwrap_or_else(|| fallback.to_string());
        return Err(ApiError::rejected(status, message));
    }
    serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))
}

/// Takes `field` out of an opened envelope and decodes it.
pub fn field<T: DeserializeOwned>(envelope: &mut Value, name: &str) -> Result<T, ApiError> {
    let raw = envelope
        .get_mut(name)
        .map(Value::take)
        .ok_or_else(|| ApiError::Decode(format!("missing field `{}`", name)))?;
    serde_json::from_value(raw).map_err(|err| ApiError::Decode(format!("field `{}`: {}", name, err)))
}

/// Like [`field`] but absent or `null` reads as `None`.
pub fn optional_field<T: DeserializeOwned>(envelope: &mut Value, name: &str) -> Result<Option<T>, ApiError> {
    match envelope.get_mut(name).map(Value::take) {
        None | Some(Value::Null) => Ok(None),
        Some(raw) => serde_json::from_value(raw)
            .map(Some)
            .map_err(|err| ApiError::Decode(format!("field `{}`: {}", name, err))),
    }
}

fn error_text(value: &Value) -> Option<&str> {
    value
        .get("error")
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
}
