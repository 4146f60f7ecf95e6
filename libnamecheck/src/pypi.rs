use crate::{
    endpoint::Endpoints,
    response::{send, unexpected_status},
    types::CheckResult,
};
use regex::Regex;
use reqwest::{Client, StatusCode};
use std::sync::LazyLock;

static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_.]+").expect("separator pattern is valid"));

/// Collapses runs of `-`, `_` and `.` into a single `-` and lowercases,
/// which is how the package index compares project names.
pub fn normalize_pypi_name(name: &str) -> String {
    SEPARATOR_RUNS.replace_all(name, "-").to_lowercase()
}

pub async fn check_pypi(client: &Client, endpoints: &Endpoints, name: &str) -> CheckResult {
    let normalized = normalize_pypi_name(name);
    let response = match send(client.get(endpoints.pypi_url(&normalized)), "pypi").await {
        Ok(r) => r,
        Err(failed) => return failed,
    };

    match response.status() {
        StatusCode::NOT_FOUND => CheckResult::available(),
        StatusCode::OK if normalized != name => {
            CheckResult::taken(format!("(normalized: {})", normalized))
        }
        StatusCode::OK => CheckResult::taken(""),
        status => unexpected_status(status),
    }
}
