//! Namespace policy: which namespaces intersect globally, which names to drop

use std::collections::{BTreeMap, BTreeSet};

use super::native_list::ReservedNamespace;

/// Per-run namespace handling rules.
///
/// A *global* namespace is intersected against the union of every indexed
/// namespace instead of a single keyed entry. Exclusions drop normalized
/// native names containing a given substring, per namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacePolicy {
    global: BTreeSet<String>,
    exclusions: BTreeMap<String, Vec<String>>,
}

impl NamespacePolicy {
    pub fn new<G, S>(global: G) -> Self
    where
        G: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            global: global.into_iter().map(Into::into).collect(),
            exclusions: BTreeMap::new(),
        }
    }

    /// No global namespaces, no exclusions
    pub fn empty() -> Self {
        Self::new(Vec::<String>::new())
    }

    pub fn exclude(mut self, namespace: impl Into<String>, substring: impl Into<String>) -> Self {
        self.exclusions
            .entry(namespace.into())
            .or_default()
            .push(substring.into());
        self
    }

    pub fn is_global(&self, namespace: &str) -> bool {
        self.global.contains(namespace)
    }

    pub fn global_namespaces(&self) -> impl Iterator<Item = &str> {
        self.global.iter().map(String::as_str)
    }

    pub fn exclusions_for(&self, namespace: &str) -> &[String] {
        self.exclusions
            .get(namespace)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True if `name` must be dropped from `namespace`'s native list
    pub fn is_excluded(&self, namespace: &str, name: &str) -> bool {
        self.exclusions_for(namespace)
            .iter()
            .any(|substring| name.contains(substring.as_str()))
    }
}

impl Default for NamespacePolicy {
    /// `at` and `at::native` are global; `torch::nn` drops `*Options*` names
    fn default() -> Self {
        Self::new(ReservedNamespace::ALL.iter().map(|ns| ns.as_str()))
            .exclude("torch::nn", "Options")
    }
}
