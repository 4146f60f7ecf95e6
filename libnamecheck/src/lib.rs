mod checker;
mod comfy;
mod endpoint;
mod github;
mod http;
mod npm;
mod probe;
mod pypi;
mod rdap;
pub mod registry;
mod response;
mod summary;
pub mod tlds;
mod types;

pub use checker::Checker;
pub use endpoint::Endpoints;
pub use http::ClientError;
pub use probe::{Probe, ProbeContext};
pub use pypi::normalize_pypi_name;
pub use registry::{plan, Category, PlannedProbe, SkipSet};
pub use summary::{rate_limited_labels, Summary};
pub use types::{
    Availability, BatchRequest, BatchResult, CheckConfig, CheckResult, LabeledResult,
    MAX_ERROR_DETAIL, RATE_LIMITED,
};

/// Runs one batch on a fresh connection pool that is dropped when the batch ends.
pub async fn check_batch(
    config: CheckConfig,
    request: &BatchRequest,
) -> Result<BatchResult, ClientError> {
    let checker = Checker::with_config(config)?;
    Ok(checker.check(request).await)
}
