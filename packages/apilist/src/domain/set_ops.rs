//! Set algebra over name lists
//!
//! All results are sorted ascending and deduplicated.

use rustc_hash::FxHashSet;

/// Names present in both inputs
pub fn intersection<'a, L, R>(left: L, right: R) -> Vec<String>
where
    L: IntoIterator<Item = &'a str>,
    R: IntoIterator<Item = &'a str>,
{
    let right: FxHashSet<&str> = right.into_iter().collect();
    sorted_unique(left.into_iter().filter(|name| right.contains(name)))
}

/// Names in `left` that are not in `right`
pub fn difference<'a, L, R>(left: L, right: R) -> Vec<String>
where
    L: IntoIterator<Item = &'a str>,
    R: IntoIterator<Item = &'a str>,
{
    let right: FxHashSet<&str> = right.into_iter().collect();
    sorted_unique(left.into_iter().filter(|name| !right.contains(name)))
}

pub fn sorted_unique<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let unique: FxHashSet<&str> = names.into_iter().collect();
    let mut out: Vec<String> = unique.into_iter().map(str::to_owned).collect();
    out.sort_unstable();
    out
}

/// Final intersection for one target namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionResult {
    pub namespace: String,
    pub names: Vec<String>,
}

impl IntersectionResult {
    pub fn new(namespace: impl Into<String>, names: Vec<String>) -> Self {
        Self {
            namespace: namespace.into(),
            names,
        }
    }

    /// `<namespace>::<name>` per entry, in order
    pub fn qualified_names(&self) -> Vec<String> {
        self.names
            .iter()
            .map(|name| format!("{}::{}", self.namespace, name))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
