//! Which probes run for a request, and in what order.

use crate::probe::Probe;
use std::collections::HashSet;
use tracing::debug;

/// Provider groups a caller can exclude by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Comfy,
    Pypi,
    Npm,
    Github,
    Domain,
}

impl Category {
    /// Fixed construction order of a batch.
    pub const ALL: [Category; 5] = [
        Category::Comfy,
        Category::Pypi,
        Category::Npm,
        Category::Github,
        Category::Domain,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Category::Comfy => "comfy",
            Category::Pypi => "pypi",
            Category::Npm => "npm",
            Category::Github => "github",
            Category::Domain => "domain",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(key))
    }

    fn probes(&self, tlds: &[String]) -> Vec<Probe> {
        match self {
            Category::Comfy => vec![Probe::ComfyPublisher, Probe::ComfyNode],
            Category::Pypi => vec![Probe::PyPi],
            Category::Npm => vec![Probe::Npm],
            Category::Github => vec![Probe::GitHubUser, Probe::GitHubOrg],
            Category::Domain => tlds
                .iter()
                .map(|tld| Probe::Domain { tld: tld.clone() })
                .collect(),
        }
    }
}

/// Categories excluded from a batch. Unknown keys are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipSet(HashSet<Category>);

impl SkipSet {
    pub fn parse<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        for key in keys {
            match Category::from_key(key.as_ref()) {
                Some(category) => {
                    set.insert(category);
                }
                None => debug!(key = key.as_ref(), "ignoring unknown skip key"),
            }
        }
        Self(set)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.0.contains(&category)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// A probe together with the label its row is shown under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedProbe {
    pub label: String,
    pub probe: Probe,
}

/// Builds the ordered probe list for `name`: categories in [`Category::ALL`]
/// order, then one domain probe per TLD in the order supplied.
pub fn plan(name: &str, tlds: &[String], skip: &SkipSet) -> Vec<PlannedProbe> {
    Category::ALL
        .iter()
        .filter(|c| !skip.contains(**c))
        .flat_map(|c| c.probes(tlds))
        .map(|probe| PlannedProbe {
            label: probe.label(name),
            probe,
        })
        .collect()
}
