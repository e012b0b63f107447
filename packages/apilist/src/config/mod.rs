//! Batch configuration
//!
//! A batch is one API list plus a list of (namespace, native list) entries.
//! Output locations and the namespace policy are part of the same file.
//!
//! ```yaml
//! version: 1
//! api_list: ../pyApiFile/py_api_list
//! output:
//!   intersection_dir: ../IntersectionList
//!   native_dir: ../CppLibraryList
//! global_namespaces: [at, "at::native"]
//! exclusions:
//!   - { namespace: "torch::nn", substring: Options }
//! namespaces:
//!   - { namespace: "torch::fft", native_list: "../CppLibraryList/torch::fft_function_list" }
//! ```

mod builtin;
mod io;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{NamespacePolicy, ReservedNamespace};
use crate::error::{ApiListError, Result};

/// Configuration schema versions this build understands
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Where output files go
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputLayout {
    /// Index dumps and `intersection_<namespace>` files
    pub intersection_dir: PathBuf,
    /// `<namespace>_function_list_name` files
    pub native_dir: PathBuf,
}

impl OutputLayout {
    pub fn new(intersection_dir: impl Into<PathBuf>, native_dir: impl Into<PathBuf>) -> Self {
        Self {
            intersection_dir: intersection_dir.into(),
            native_dir: native_dir.into(),
        }
    }

    /// Both kinds of output in one directory
    pub fn single(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self::new(dir.clone(), dir)
    }

    pub fn native_names_path(&self, namespace: &str) -> PathBuf {
        self.native_dir
            .join(format!("{}_function_list_name", namespace))
    }

    pub fn intersection_path(&self, namespace: &str) -> PathBuf {
        self.intersection_dir
            .join(format!("intersection_{}", namespace))
    }
}

/// One namespace to intersect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamespaceEntry {
    /// `ns::Sub` identifier
    pub namespace: String,
    /// Raw native declaration list for the namespace
    pub native_list: PathBuf,
}

/// Drop native names containing `substring` from `namespace`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Exclusion {
    pub namespace: String,
    pub substring: String,
}

fn default_global_namespaces() -> Vec<String> {
    ReservedNamespace::ALL
        .iter()
        .map(|ns| ns.as_str().to_string())
        .collect()
}

/// Batch configuration (schema v1)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchConfig {
    /// Schema version; 0 means the field was missing
    #[serde(default)]
    pub version: u32,

    /// Dotted binding API list
    pub api_list: PathBuf,

    pub output: OutputLayout,

    /// Namespaces intersected against every indexed member
    #[serde(default = "default_global_namespaces")]
    pub global_namespaces: Vec<String>,

    #[serde(default)]
    pub exclusions: Vec<Exclusion>,

    #[serde(default)]
    pub namespaces: Vec<NamespaceEntry>,
}

impl BatchConfig {
    pub fn new(api_list: impl Into<PathBuf>, output: OutputLayout) -> Self {
        Self {
            version: 1,
            api_list: api_list.into(),
            output,
            global_namespaces: default_global_namespaces(),
            exclusions: Vec::new(),
            namespaces: Vec::new(),
        }
    }

    pub fn namespace(mut self, namespace: impl Into<String>, native_list: impl Into<PathBuf>) -> Self {
        self.namespaces.push(NamespaceEntry {
            namespace: namespace.into(),
            native_list: native_list.into(),
        });
        self
    }

    pub fn exclusion(mut self, namespace: impl Into<String>, substring: impl Into<String>) -> Self {
        self.exclusions.push(Exclusion {
            namespace: namespace.into(),
            substring: substring.into(),
        });
        self
    }

    pub fn global_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.global_namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }

    /// Resolve relative input and output paths against `base`
    pub fn rebase(mut self, base: &Path) -> Self {
        let join = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                base.join(p)
            }
        };
        self.api_list = join(&self.api_list);
        self.output.intersection_dir = join(&self.output.intersection_dir);
        self.output.native_dir = join(&self.output.native_dir);
        for entry in &mut self.namespaces {
            entry.native_list = join(&entry.native_list);
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.version == 0 {
            return Err(ApiListError::config(
                "missing 'version' field; add 'version: 1' to the top of the file",
            ));
        }
        if !SUPPORTED_VERSIONS.contains(&self.version) {
            return Err(ApiListError::config(format!(
                "unsupported configuration version {}; supported: {:?}",
                self.version, SUPPORTED_VERSIONS
            )));
        }

        let mut seen = BTreeSet::new();
        for entry in &self.namespaces {
            if entry.namespace.trim().is_empty() {
                return Err(ApiListError::config("namespace entry with empty name"));
            }
            if !seen.insert(entry.namespace.as_str()) {
                return Err(ApiListError::config(format!(
                    "namespace {} listed more than once",
                    entry.namespace
                )));
            }
        }

        if let Some(ns) = self.global_namespaces.iter().find(|ns| ns.trim().is_empty()) {
            return Err(ApiListError::config(format!(
                "empty global namespace name: {:?}",
                ns
            )));
        }

        for exclusion in &self.exclusions {
            if exclusion.substring.is_empty() {
                return Err(ApiListError::config(format!(
                    "empty exclusion substring for namespace {}",
                    exclusion.namespace
                )));
            }
        }

        Ok(())
    }

    pub fn policy(&self) -> NamespacePolicy {
        self.exclusions
            .iter()
            .fold(NamespacePolicy::new(self.global_namespaces.iter().cloned()), |policy, ex| {
                policy.exclude(ex.namespace.clone(), ex.substring.clone())
            })
    }
}
