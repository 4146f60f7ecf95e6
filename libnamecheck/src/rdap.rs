use crate::{
    response::{json_body, send, unexpected_status},
    types::CheckResult,
};
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};

pub async fn check_rdap(client: &Client, url: &str) -> CheckResult {
    let response = match send(client.get(url), "rdap").await {
        Ok(r) => r,
        Err(failed) => return failed,
    };

    match response.status() {
        StatusCode::NOT_FOUND => CheckResult::available(),
        StatusCode::OK => match json_body::<Value>(response).await {
            Ok(Value::Object(record)) => record_result(&record),
            Ok(_) => CheckResult::unknown("parse error"),
            Err(failed) => failed,
        },
        status => unexpected_status(status),
    }
}

fn record_result(record: &Map<String, Value>) -> CheckResult {
    // Some registries answer 200 with an RDAP error object instead of a 404.
    if record.contains_key("errorCode") {
        return CheckResult::available();
    }

    match expiration(record) {
        Some(date) => CheckResult::taken(format!("exp {}", date)),
        None => CheckResult::taken(""),
    }
}

fn expiration(record: &Map<String, Value>) -> Option<String> {
    record
        .get("events")?
        .as_array()?
        .iter()
        .find(|e| e.get("eventAction").and_then(Value::as_str) == Some("expiration"))
        .map(|e| {
            e.get("eventDate")
                .and_then(Value::as_str)
                .unwrap_or("")
                .chars()
                .take(10)
                .collect::<String>()
        })
        .filter(|date| !date.is_empty())
}
