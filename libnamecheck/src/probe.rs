use crate::{
    comfy, endpoint::Endpoints, github, npm, pypi, rdap, registry::Category, tlds::domain_name,
    types::CheckResult,
};
use reqwest::{header::HeaderMap, Client};

/// One provider check. Every variant resolves to a [`CheckResult`]; failures
/// surface as `Unknown` rather than as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    ComfyPublisher,
    ComfyNode,
    PyPi,
    Npm,
    GitHubUser,
    GitHubOrg,
    Domain { tld: String },
}

/// Everything a probe borrows from the batch that runs it.
pub struct ProbeContext<'a> {
    pub client: &'a Client,
    pub endpoints: &'a Endpoints,
    pub github_headers: &'a HeaderMap,
}

impl Probe {
    pub fn label(&self, name: &str) -> String {
        match self {
            Probe::ComfyPublisher => "Comfy Publisher".to_string(),
            Probe::ComfyNode => "Comfy Node".to_string(),
            Probe::PyPi => "PyPI".to_string(),
            Probe::Npm => "npm".to_string(),
            Probe::GitHubUser => "GitHub User".to_string(),
            Probe::GitHubOrg => "GitHub Org".to_string(),
            Probe::Domain { tld } => domain_name(name, tld),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Probe::ComfyPublisher | Probe::ComfyNode => Category::Comfy,
            Probe::PyPi => Category::Pypi,
            Probe::Npm => Category::Npm,
            Probe::GitHubUser | Probe::GitHubOrg => Category::Github,
            Probe::Domain { .. } => Category::Domain,
        }
    }

    /// Issues exactly one GET (the RDAP probe may follow redirects).
    pub async fn run(&self, ctx: &ProbeContext<'_>, name: &str) -> CheckResult {
        let endpoints = ctx.endpoints;
        match self {
            Probe::ComfyPublisher => {
                comfy::check_publisher(ctx.client, &endpoints.comfy_publisher_url(), name).await
            }
            Probe::ComfyNode => {
                comfy::check_node(ctx.client, &endpoints.comfy_node_search_url(), name).await
            }
            Probe::PyPi => pypi::check_pypi(ctx.client, endpoints, name).await,
            Probe::Npm => npm::check_npm(ctx.client, &endpoints.npm_url(name)).await,
            Probe::GitHubUser => {
                github::check_user(ctx.client, &endpoints.github_user_url(name), ctx.github_headers)
                    .await
            }
            Probe::GitHubOrg => {
                github::check_org(ctx.client, &endpoints.github_org_url(name), ctx.github_headers)
                    .await
            }
            Probe::Domain { tld } => {
                rdap::check_rdap(ctx.client, &endpoints.rdap_domain_url(&domain_name(name, tld)))
                    .await
            }
        }
    }
}
