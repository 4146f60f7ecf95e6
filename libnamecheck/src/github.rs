use crate::{
    response::{json_body, send, unexpected_status},
    types::{CheckResult, RATE_LIMITED},
};
use reqwest::{header::HeaderMap, Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

pub const GITHUB_ACCEPT: &str = "application/vnd.github+json";

#[derive(Debug, Deserialize)]
struct Account {
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Organization {
    public_repos: Option<u64>,
}

pub async fn check_user(client: &Client, url: &str, headers: &HeaderMap) -> CheckResult {
    let response = match send(client.get(url).headers(headers.clone()), "github-user").await {
        Ok(r) => r,
        Err(failed) => return failed,
    };

    match response.status() {
        StatusCode::NOT_FOUND => CheckResult::available(),
        StatusCode::OK => match json_body::<Account>(response).await {
            Ok(account) => CheckResult::taken(account.kind.unwrap_or_else(|| "User".to_string())),
            Err(failed) => failed,
        },
        StatusCode::FORBIDDEN => rate_limited(url),
        status => unexpected_status(status),
    }
}

pub async fn check_org(client: &Client, url: &str, headers: &HeaderMap) -> CheckResult {
    let response = match send(client.get(url).headers(headers.clone()), "github-org").await {
        Ok(r) => r,
        Err(failed) => return failed,
    };

    match response.status() {
        StatusCode::NOT_FOUND => CheckResult::available(),
        StatusCode::OK => match json_body::<Organization>(response).await {
            Ok(org) => CheckResult::taken(format!("{} repos", org.public_repos.unwrap_or(0))),
            Err(failed) => failed,
        },
        StatusCode::FORBIDDEN => rate_limited(url),
        status => unexpected_status(status),
    }
}

fn rate_limited(url: &str) -> CheckResult {
    debug!(url, "GitHub rate limit hit");
    CheckResult::unknown(RATE_LIMITED)
}
