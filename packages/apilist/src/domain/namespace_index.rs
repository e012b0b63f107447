//! NamespaceIndex: namespace path → sorted member names

use std::collections::{BTreeMap, BTreeSet};

use super::dotted_path::DottedPath;

/// Binding API surface grouped by namespace path.
///
/// Both keys and members are kept in `BTreeMap`/`BTreeSet`, so iteration is
/// lexicographic and duplicates collapse on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceIndex {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl NamespaceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: DottedPath) {
        let (namespace, member) = path.into_parts();
        self.entries.entry(namespace).or_default().insert(member);
    }

    /// Members of one namespace path (dotted form)
    pub fn members(&self, namespace: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(namespace)
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.entries.contains_key(namespace)
    }

    /// Namespace paths in ascending order
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Union of members across every namespace
    pub fn all_members(&self) -> BTreeSet<&str> {
        self.entries
            .values()
            .flat_map(|members| members.iter().map(String::as_str))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Human-readable dump: `Path: <ns>`, indented members, blank line
    pub fn dump_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (namespace, members) in &self.entries {
            lines.push(format!("Path: {}", namespace));
            lines.extend(members.iter().map(|m| format!("  {}", m)));
            lines.push(String::new());
        }
        lines
    }
}

impl FromIterator<DottedPath> for NamespaceIndex {
    fn from_iter<T: IntoIterator<Item = DottedPath>>(iter: T) -> Self {
        let mut index = NamespaceIndex::new();
        for path in iter {
            index.insert(path);
        }
        index
    }
}
