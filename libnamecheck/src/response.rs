//! Shared mapping from transport outcomes onto [`CheckResult`].
//!
//! Every provider module funnels its failures through here so that the
//! `Unknown` details stay short and consistent across probes.

use crate::types::{CheckResult, MAX_ERROR_DETAIL};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

pub(crate) async fn send(request: RequestBuilder, provider: &str) -> Result<Response, CheckResult> {
    match request.send().await {
        Ok(response) => {
            debug!(provider, status = response.status().as_u16(), "response");
            Ok(response)
        }
        Err(e) => {
            debug!(provider, error = %e, "request failed");
            Err(transport_failure(&e))
        }
    }
}

pub(crate) fn transport_failure(err: &reqwest::Error) -> CheckResult {
    if err.is_timeout() {
        CheckResult::unknown("timeout")
    } else {
        CheckResult::unknown(truncate(&err.to_string(), MAX_ERROR_DETAIL))
    }
}

pub(crate) fn unexpected_status(status: StatusCode) -> CheckResult {
    CheckResult::unknown(format!("HTTP {}", status.as_u16()))
}

/// Reads the body and decodes it. A body that arrives but does not decode is a
/// `parse error`; a body that never arrives is a transport failure.
pub(crate) async fn json_body<T: DeserializeOwned>(response: Response) -> Result<T, CheckResult> {
    let bytes = response.bytes().await.map_err(|e| transport_failure(&e))?;
    serde_json::from_slice(&bytes).map_err(|e| {
        debug!(error = %e, "undecodable body");
        CheckResult::unknown("parse error")
    })
}

pub(crate) fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
