//! GitHub credential lookup. The library only ever sees the resulting headers.

use std::{collections::BTreeMap, time::Duration};
use tokio::process::Command;
use tracing::debug;

const TOKEN_VARS: &[&str] = &["GITHUB_TOKEN", "GH_TOKEN"];
const GH_TIMEOUT: Duration = Duration::from_secs(5);

/// `GITHUB_TOKEN`, then `GH_TOKEN`, then `gh auth token`.
pub async fn resolve_github_token() -> Option<String> {
    if let Some(token) = token_from_env(|var| std::env::var(var).ok()) {
        debug!("using GitHub token from environment");
        return Some(token);
    }
    token_from_gh().await
}

fn token_from_env(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    TOKEN_VARS
        .iter()
        .filter_map(|var| lookup(var))
        .map(|t| t.trim().to_string())
        .find(|t| !t.is_empty())
}

async fn token_from_gh() -> Option<String> {
    let output = Command::new("gh")
        .args(["auth", "token"])
        .kill_on_drop(true)
        .output();

    match tokio::time::timeout(GH_TIMEOUT, output).await {
        Ok(Ok(out)) if out.status.success() => {
            let token = String::from_utf8_lossy(&out.stdout).trim().to_string();
            if token.is_empty() {
                None
            } else {
                debug!("using GitHub token from gh");
                Some(token)
            }
        }
        Ok(Ok(out)) => {
            debug!(status = ?out.status, "gh auth token failed");
            None
        }
        Ok(Err(e)) => {
            debug!(error = %e, "gh not available");
            None
        }
        Err(_) => {
            debug!("gh auth token timed out");
            None
        }
    }
}

pub fn bearer_headers(token: Option<&str>) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    if let Some(token) = token {
        headers.insert("Authorization".to_string(), format!("Bearer {}", token));
    }
    headers
}
