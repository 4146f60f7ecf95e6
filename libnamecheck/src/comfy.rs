use crate::{
    response::{json_body, send, unexpected_status},
    types::CheckResult,
};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

const NODE_SEARCH_LIMIT: u32 = 5;

#[derive(Debug, Deserialize)]
struct PublisherValidation {
    #[serde(rename = "isAvailable", default)]
    is_available: bool,
}

#[derive(Debug, Deserialize)]
struct NodeSearch {
    #[serde(default)]
    nodes: Vec<Node>,
}

#[derive(Debug, Deserialize)]
struct Node {
    id: Option<String>,
    publisher: Option<Publisher>,
}

#[derive(Debug, Deserialize)]
struct Publisher {
    id: Option<String>,
}

pub async fn check_publisher(client: &Client, url: &str, name: &str) -> CheckResult {
    let request = client.get(url).query(&[("username", name)]);
    let response = match send(request, "comfy-publisher").await {
        Ok(r) => r,
        Err(failed) => return failed,
    };

    match response.status() {
        StatusCode::OK => match json_body::<PublisherValidation>(response).await {
            Ok(body) if body.is_available => CheckResult::available(),
            Ok(_) => CheckResult::taken("taken"),
            Err(failed) => failed,
        },
        status => unexpected_status(status),
    }
}

pub async fn check_node(client: &Client, url: &str, name: &str) -> CheckResult {
    let limit = NODE_SEARCH_LIMIT.to_string();
    let request = client
        .get(url)
        .query(&[("search", name), ("limit", limit.as_str())]);
    let response = match send(request, "comfy-node").await {
        Ok(r) => r,
        Err(failed) => return failed,
    };

    match response.status() {
        StatusCode::OK => match json_body::<NodeSearch>(response).await {
            Ok(body) => node_result(&body, name),
            Err(failed) => failed,
        },
        status => unexpected_status(status),
    }
}

fn node_result(search: &NodeSearch, name: &str) -> CheckResult {
    let wanted = name.to_lowercase();
    match search.nodes.iter().find(|n| n.id.as_deref().is_some_and(|id| id.to_lowercase() == wanted)) {
        Some(node) => {
            let owner = node
                .publisher
                .as_ref()
                .and_then(|p| p.id.as_deref())
                .unwrap_or("unknown");
            CheckResult::taken(format!("by @{}", owner))
        }
        None => CheckResult::available(),
    }
}
