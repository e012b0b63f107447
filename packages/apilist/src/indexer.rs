//! NamespaceApiIndexer
//!
//! Loads a dotted binding API list once, then intersects it with native
//! function lists one namespace at a time.
//!
//! ```rust,ignore
//! let indexer = NamespaceApiIndexer::from_path("py_api_list", NamespacePolicy::default())?;
//! indexer.write_index_dump("IntersectionList")?;
//! let result = indexer.compute_intersection(
//!     "torch::fft",
//!     "CppLibraryList/torch::fft_function_list",
//!     &layout,
//! )?;
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::OutputLayout;
use crate::domain::{
    intersection, to_dotted_key, DottedPath, IntersectionResult, NamespaceIndex, NamespacePolicy,
    NativeFunctionList,
};
use crate::error::{ApiListError, Result};
use crate::infrastructure::{read_lines, write_lines};

/// Index dump: namespace headers with indented members
pub const INDEX_DUMP_FILE: &str = "pyApiPath";
/// Index dump: namespace keys only
pub const NAMESPACE_LIST_FILE: &str = "pyApiPath2";

#[derive(Debug)]
pub struct NamespaceApiIndexer {
    source: Option<PathBuf>,
    index: NamespaceIndex,
    policy: NamespacePolicy,
}

impl NamespaceApiIndexer {
    /// Build from an API list file. Blank lines are skipped; any other
    /// malformed line fails the whole load.
    pub fn from_path(path: impl AsRef<Path>, policy: NamespacePolicy) -> Result<Self> {
        let path = path.as_ref();
        let lines = read_lines(path)?;
        let mut indexer = Self::from_lines(&lines, policy).map_err(|e| e.with_path(path))?;
        indexer.source = Some(path.to_path_buf());

        info!(
            "indexed {} namespaces from {}",
            indexer.index.len(),
            path.display()
        );
        Ok(indexer)
    }

    pub fn from_lines<S: AsRef<str>>(lines: &[S], policy: NamespacePolicy) -> Result<Self> {
        let index = parse_index(lines)?;
        Ok(Self {
            source: None,
            index,
            policy,
        })
    }

    pub fn index(&self) -> &NamespaceIndex {
        &self.index
    }

    /// Sorted namespace paths (dotted form)
    pub fn namespaces(&self) -> Vec<&str> {
        self.index.namespaces().collect()
    }

    pub fn policy(&self) -> &NamespacePolicy {
        &self.policy
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Intersect an already normalized native list with the index
    pub fn intersect(&self, native: &NativeFunctionList) -> Result<IntersectionResult> {
        let namespace = native.namespace();
        let native_names = native.names().iter().map(String::as_str);

        let names = if self.policy.is_global(namespace) {
            debug!("{} is global; intersecting against all namespaces", namespace);
            intersection(native_names, self.index.all_members())
        } else {
            let key = to_dotted_key(namespace);
            let members = self
                .index
                .members(&key)
                .ok_or_else(|| ApiListError::lookup(namespace, &key))?;
            intersection(native_names, members.iter().map(String::as_str))
        };

        Ok(IntersectionResult::new(namespace, names))
    }

    /// Normalize `native_list_path`, intersect it with the index and write
    /// the normalized list and the qualified intersection under `layout`.
    ///
    /// Nothing is written if the namespace lookup fails.
    pub fn compute_intersection(
        &self,
        target_namespace: &str,
        native_list_path: impl AsRef<Path>,
        layout: &OutputLayout,
    ) -> Result<IntersectionResult> {
        let native_list_path = native_list_path.as_ref();
        let lines = read_lines(native_list_path)?;
        let native = NativeFunctionList::normalize(target_namespace, &lines, &self.policy)
            .map_err(|e| e.with_path(native_list_path))?;

        let result = self.intersect(&native)?;

        write_lines(layout.native_names_path(target_namespace), native.names())?;
        write_lines(
            layout.intersection_path(target_namespace),
            result.qualified_names(),
        )?;

        info!(
            "{}: {} native names, {} in intersection",
            target_namespace,
            native.len(),
            result.len()
        );
        Ok(result)
    }

    /// Write `pyApiPath` and `pyApiPath2` into `dir`
    pub fn write_index_dump(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        write_lines(dir.join(INDEX_DUMP_FILE), self.index.dump_lines())?;
        write_lines(dir.join(NAMESPACE_LIST_FILE), self.index.namespaces())?;
        Ok(())
    }
}

/// Parse dotted API lines into an index. Line numbers in errors are 1-based.
pub fn parse_index<S: AsRef<str>>(lines: &[S]) -> Result<NamespaceIndex> {
    let mut index = NamespaceIndex::new();
    for (idx, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }
        let path = DottedPath::parse(line).map_err(|e| ApiListError::parse(idx + 1, line, e))?;
        index.insert(path);
    }
    Ok(index)
}
