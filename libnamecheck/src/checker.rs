use crate::{
    endpoint::Endpoints,
    github::GITHUB_ACCEPT,
    http::{create_http_pool, ClientError},
    probe::ProbeContext,
    registry::{plan, SkipSet},
    types::{BatchRequest, BatchResult, CheckConfig, LabeledResult},
};
use futures::future::join_all;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, ACCEPT},
    Client,
};
use std::{collections::BTreeMap, time::Instant};
use tracing::debug;

/// Runs batches of probes over one shared connection pool.
#[derive(Clone)]
pub struct Checker {
    client: Client,
    endpoints: Endpoints,
    github_headers: HeaderMap,
}

impl Checker {
    pub fn with_config(config: CheckConfig) -> Result<Self, ClientError> {
        let github_headers = github_headers(&config.credential_headers)?;
        let client = create_http_pool(
            config.timeout,
            &config.user_agent,
            config.endpoints.rdap_domain_url(""),
        )?;
        Ok(Self {
            client,
            endpoints: config.endpoints,
            github_headers,
        })
    }

    /// Launches every planned probe at once and waits for all of them.
    /// Rows come back in plan order whatever order the probes finish in.
    pub async fn check(&self, request: &BatchRequest) -> BatchResult {
        let start = Instant::now();
        let skip = SkipSet::parse(&request.skip);
        let planned = plan(&request.name, &request.tlds, &skip);
        debug!(name = %request.name, probes = planned.len(), "starting batch");

        let ctx = ProbeContext {
            client: &self.client,
            endpoints: &self.endpoints,
            github_headers: &self.github_headers,
        };
        let results = join_all(planned.iter().map(|p| p.probe.run(&ctx, &request.name))).await;

        let rows: BatchResult = planned
            .into_iter()
            .zip(results)
            .map(|(p, result)| {
                debug!(
                    label = %p.label,
                    available = %result.available,
                    detail = %result.detail,
                    "probe finished"
                );
                LabeledResult {
                    label: p.label,
                    result,
                }
            })
            .collect();

        debug!(name = %request.name, elapsed = ?start.elapsed(), "batch finished");
        rows
    }

    /// Checks each name in turn; the probes within one name still run concurrently.
    pub async fn check_many<I, S>(
        &self,
        names: I,
        tlds: &[String],
        skip: &[String],
    ) -> Vec<(String, BatchResult)>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = Vec::new();
        for name in names {
            let request = BatchRequest {
                name: name.into(),
                tlds: tlds.to_vec(),
                skip: skip.to_vec(),
            };
            let rows = self.check(&request).await;
            out.push((request.name, rows));
        }
        out
    }
}

fn github_headers(credentials: &BTreeMap<String, String>) -> Result<HeaderMap, ClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
    for (name, value) in credentials {
        let header = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ClientError::InvalidHeader(name.clone()))?;
        let value =
            HeaderValue::from_str(value).map_err(|_| ClientError::InvalidHeader(name.clone()))?;
        headers.insert(header, value);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::AUTHORIZATION;

    #[test]
    fn accept_header_is_always_sent() {
        let headers = github_headers(&BTreeMap::new()).unwrap();
        assert_eq!(headers.get(ACCEPT).unwrap(), GITHUB_ACCEPT);
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn credentials_are_copied_verbatim() {
        let mut creds = BTreeMap::new();
        creds.insert("Authorization".to_string(), "Bearer abc123".to_string());
        let headers = github_headers(&creds).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc123");
    }

    #[test]
    fn malformed_header_is_fatal() {
        let mut creds = BTreeMap::new();
        creds.insert("bad header".to_string(), "x".to_string());
        assert!(matches!(
            github_headers(&creds),
            Err(ClientError::InvalidHeader(name)) if name == "bad header"
        ));
    }
}
