//! The Document AI call: POST the encoded document, decode the response.
//!
//! This is the only stage with network I/O, and deliberately the dumbest
//! one: one request, one response, no retry, no backoff. Online processing
//! is synchronous on the server side — the response body already contains
//! the full analysis result — so there is no polling or operation tracking
//! either. Failure handling for the call (retries, partial results) is the
//! caller's concern.

use crate::config::ProcessorConfig;
use crate::document::{ApiErrorResponse, Document, ProcessRequest, ProcessResponse};
use crate::error::ExtractError;
use std::time::Duration;
use tracing::{debug, info};

/// Send one process request and return the analysed document.
pub async fn process_document(
    config: &ProcessorConfig,
    request: &ProcessRequest,
) -> Result<Document, ExtractError> {
    let url = config.process_url();
    let token = resolve_token(config)?;
    info!("Sending process request to {}", url);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| ExtractError::Internal(format!("HTTP client build failed: {e}")))?;

    let response = client
        .post(&url)
        .bearer_auth(&token)
        .json(request)
        .send()
        .await
        .map_err(|e| ExtractError::RequestFailed {
            endpoint: url.clone(),
            reason: e.to_string(),
        })?;

    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| ExtractError::RequestFailed {
            endpoint: url.clone(),
            reason: format!("reading response body: {e}"),
        })?;

    if !status.is_success() {
        return Err(api_error(status.as_u16(), &body));
    }

    let parsed: ProcessResponse =
        serde_json::from_slice(&body).map_err(|e| ExtractError::MalformedResponse {
            detail: e.to_string(),
        })?;

    debug!(
        "Received document: {} chars of text, {} pages",
        parsed.document.text.len(),
        parsed.document.pages.len()
    );

    Ok(parsed.document)
}

/// Resolve the bearer token, from most-specific to least-specific.
///
/// 1. **Config field** (`config.access_token`) — the caller fetched a token
///    themselves (service-account flow, token broker, tests).
/// 2. **`DOCAI_ACCESS_TOKEN`** — a token provisioned specifically for this
///    tool, honoured before the generic variable.
/// 3. **`GOOGLE_ACCESS_TOKEN`** — the conventional variable populated by
///    `gcloud auth print-access-token` wrappers.
fn resolve_token(config: &ProcessorConfig) -> Result<String, ExtractError> {
    if let Some(ref token) = config.access_token {
        if !token.is_empty() {
            return Ok(token.clone());
        }
    }

    for var in ["DOCAI_ACCESS_TOKEN", "GOOGLE_ACCESS_TOKEN"] {
        if let Ok(token) = std::env::var(var) {
            if !token.is_empty() {
                return Ok(token);
            }
        }
    }

    Err(ExtractError::MissingToken {
        hint: "Set DOCAI_ACCESS_TOKEN or GOOGLE_ACCESS_TOKEN, e.g.:\n  \
               export GOOGLE_ACCESS_TOKEN=$(gcloud auth print-access-token)"
            .to_string(),
    })
}

/// Map a non-success status to [`ExtractError::ApiError`], pulling the
/// structured code/message out of Google's error envelope when present.
fn api_error(status: u16, body: &[u8]) -> ExtractError {
    match serde_json::from_slice::<ApiErrorResponse>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => ExtractError::ApiError {
            status,
            code: envelope.error.status,
            message: envelope.error.message,
        },
        _ => ExtractError::ApiError {
            status,
            code: String::new(),
            message: String::from_utf8_lossy(body).into_owned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_token_takes_priority() {
        let config = ProcessorConfig::builder()
            .endpoint("http://localhost/process")
            .access_token("from-config")
            .build()
            .unwrap();
        assert_eq!(resolve_token(&config).unwrap(), "from-config");
    }

    #[test]
    fn api_error_parses_google_envelope() {
        let body = br#"{"error": {"code": 404, "message": "processor not found", "status": "NOT_FOUND"}}"#;
        match api_error(404, body) {
            ExtractError::ApiError {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 404);
                assert_eq!(code, "NOT_FOUND");
                assert_eq!(message, "processor not found");
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[test]
    fn api_error_falls_back_to_raw_body() {
        match api_error(502, b"<html>bad gateway</html>") {
            ExtractError::ApiError { status, message, .. } => {
                assert_eq!(status, 502);
                assert!(message.contains("bad gateway"));
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }
}
