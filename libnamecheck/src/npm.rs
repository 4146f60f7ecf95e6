use crate::{
    response::{send, unexpected_status},
    types::CheckResult,
};
use reqwest::{Client, StatusCode};

pub async fn check_npm(client: &Client, url: &str) -> CheckResult {
    let response = match send(client.get(url), "npm").await {
        Ok(r) => r,
        Err(failed) => return failed,
    };

    match response.status() {
        StatusCode::NOT_FOUND => CheckResult::available(),
        StatusCode::OK => CheckResult::taken(""),
        status => unexpected_status(status),
    }
}
