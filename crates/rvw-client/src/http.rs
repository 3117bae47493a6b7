//! Shared HTTP response helpers.
//!
//! Centralizes status checks and error-body parsing so the resource modules
//! stay focused on request construction.

use reqwest::StatusCode;
use serde_json::Value;

use crate::error::ApiError;

/// Return the response unchanged on success, otherwise an [`ApiError::Api`]
/// carrying the server's detail.
///
/// A `401` always maps to the fixed detail `"Unauthorized"`; the caller is
/// responsible for the forced sign-out.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Api {
            status: status.as_u16(),
            detail: "Unauthorized".to_string(),
        });
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Api {
        status: status.as_u16(),
        detail: extract_detail(status, &body),
    })
}

/// Pull a human-readable message out of an error body.
///
/// A string `detail` is used verbatim. Structured details (FastAPI-style
/// validation arrays) are rendered as compact JSON. Anything else falls back
/// to the status text.
#[must_use]
pub fn extract_detail(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|mut json| json.get_mut("detail").map(Value::take));

    match detail {
        Some(Value::String(text)) if !text.is_empty() => text,
        Some(Value::Null | Value::String(_)) | None => status_text(status),
        Some(other) => other.to_string(),
    }
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_string)
}

/// Decode a success body, mapping shape mismatches to [`ApiError::Decode`].
pub async fn decode<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ApiError> {
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}
