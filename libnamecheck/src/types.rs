use serde::Serialize;
use std::{collections::BTreeMap, fmt, time::Duration};

use crate::endpoint::Endpoints;

/// Detail string used by identity probes when the provider throttled us.
pub const RATE_LIMITED: &str = "rate limited";

/// Failure details built from transport errors are cut to this many characters.
pub const MAX_ERROR_DETAIL: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Taken,
    Unknown,
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }

    pub fn is_taken(&self) -> bool {
        matches!(self, Availability::Taken)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Availability::Unknown)
    }

    /// `Some(true)` / `Some(false)` / `None`, the shape NDJSON consumers expect.
    pub fn as_option(&self) -> Option<bool> {
        match self {
            Availability::Available => Some(true),
            Availability::Taken => Some(false),
            Availability::Unknown => None,
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Available => write!(f, "available"),
            Availability::Taken => write!(f, "taken"),
            Availability::Unknown => write!(f, "unknown"),
        }
    }
}

/// Outcome of a single probe. `detail` is a display hint only and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub available: Availability,
    pub detail: String,
}

impl CheckResult {
    pub fn available() -> Self {
        Self {
            available: Availability::Available,
            detail: String::new(),
        }
    }

    pub fn taken(detail: impl Into<String>) -> Self {
        Self {
            available: Availability::Taken,
            detail: detail.into(),
        }
    }

    pub fn unknown(detail: impl Into<String>) -> Self {
        Self {
            available: Availability::Unknown,
            detail: detail.into(),
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        self.detail == RATE_LIMITED
    }
}

/// One row of a batch: the display label and what its probe returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledResult {
    pub label: String,
    #[serde(flatten)]
    pub result: CheckResult,
}

/// Ordered rows in construction order.
pub type BatchResult = Vec<LabeledResult>;

/// What the caller wants checked.
#[derive(Debug, Clone, Default)]
pub struct BatchRequest {
    pub name: String,
    pub tlds: Vec<String>,
    pub skip: Vec<String>,
}

impl BatchRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_tlds<I, S>(mut self, tlds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tlds = tlds.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_skip<I, S>(mut self, skip: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip = skip.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Applied to every request through the shared client.
    pub timeout: Duration,
    pub user_agent: String,
    pub endpoints: Endpoints,
    /// Attached verbatim to GitHub requests.
    pub credential_headers: BTreeMap<String, String>,
}

impl CheckConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_credential_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.credential_headers = headers;
        self
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: concat!("namecheck/", env!("CARGO_PKG_VERSION")).to_string(),
            endpoints: Endpoints::default(),
            credential_headers: BTreeMap::new(),
        }
    }
}
