const COMFY_API_URL: &str = "https://api.comfy.org";
const PYPI_URL: &str = "https://pypi.org";
const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";
const GITHUB_API_URL: &str = "https://api.github.com";
const RDAP_URL: &str = "https://rdap.org";

/// Base URLs of every provider the probes talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub comfy: String,
    pub pypi: String,
    pub npm: String,
    pub github: String,
    pub rdap: String,
}

impl Endpoints {
    /// Route every provider to the same base, e.g. a local mock server.
    pub fn all(base: &str) -> Self {
        let base = trim_base(base);
        Self {
            comfy: base.clone(),
            pypi: base.clone(),
            npm: base.clone(),
            github: base.clone(),
            rdap: base,
        }
    }

    pub fn comfy_publisher_url(&self) -> String {
        format!("{}/publishers/validate", trim_base(&self.comfy))
    }

    pub fn comfy_node_search_url(&self) -> String {
        format!("{}/nodes/search", trim_base(&self.comfy))
    }

    pub fn pypi_url(&self, normalized: &str) -> String {
        format!("{}/pypi/{}/json", trim_base(&self.pypi), normalized)
    }

    pub fn npm_url(&self, name: &str) -> String {
        format!("{}/{}", trim_base(&self.npm), name)
    }

    pub fn github_user_url(&self, name: &str) -> String {
        format!("{}/users/{}", trim_base(&self.github), name)
    }

    pub fn github_org_url(&self, name: &str) -> String {
        format!("{}/orgs/{}", trim_base(&self.github), name)
    }

    pub fn rdap_domain_url(&self, domain: &str) -> String {
        format!("{}/domain/{}", trim_base(&self.rdap), domain)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            comfy: COMFY_API_URL.to_string(),
            pypi: PYPI_URL.to_string(),
            npm: NPM_REGISTRY_URL.to_string(),
            github: GITHUB_API_URL.to_string(),
            rdap: RDAP_URL.to_string(),
        }
    }
}

fn trim_base(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}
