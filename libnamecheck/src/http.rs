use reqwest::{redirect, Client};
use std::time::Duration;
use thiserror::Error;

/// The shared transport could not be built. This is the only fatal error a batch can hit.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to create HTTP client: {0}")]
    Build(#[from] reqwest::Error),
    #[error("Invalid credential header: {0}")]
    InvalidHeader(String),
}

const MAX_REDIRECTS: usize = 5;

/// Only requests whose first URL starts with `follow_prefix` may be redirected.
/// Every other request gets its 3xx response back as-is.
pub fn create_http_pool(
    timeout: Duration,
    user_agent: &str,
    follow_prefix: String,
) -> Result<Client, ClientError> {
    let policy = redirect::Policy::custom(move |attempt| {
        let origin = attempt.previous().first().map(|u| u.as_str()).unwrap_or("");
        if !follows_redirects(origin, &follow_prefix) {
            attempt.stop()
        } else if attempt.previous().len() > MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else {
            attempt.follow()
        }
    });

    let client = Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .redirect(policy)
        .pool_max_idle_per_host(8)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .tcp_nodelay(true)
        .use_rustls_tls()
        .build()?;
    Ok(client)
}

fn follows_redirects(origin: &str, follow_prefix: &str) -> bool {
    !follow_prefix.is_empty() && origin.starts_with(follow_prefix)
}
