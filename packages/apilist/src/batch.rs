//! Batch runner
//!
//! Builds the indexer once and intersects every configured namespace.
//! A failing namespace is recorded and the batch moves on.

use tracing::{error, info, warn};

use crate::config::BatchConfig;
use crate::error::{ApiListError, Result};
use crate::indexer::NamespaceApiIndexer;

/// Successful intersection of one namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceOutcome {
    pub namespace: String,
    pub count: usize,
}

/// Failed intersection of one namespace
#[derive(Debug)]
pub struct NamespaceFailure {
    pub namespace: String,
    pub error: ApiListError,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<NamespaceOutcome>,
    pub failed: Vec<NamespaceFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_namespaces(&self) -> Vec<&str> {
        self.failed.iter().map(|f| f.namespace.as_str()).collect()
    }

    /// One-line summary for the end of a run
    pub fn summary(&self) -> String {
        let total = self.succeeded.len() + self.failed.len();
        if self.is_success() {
            format!("{}/{} namespaces succeeded", self.succeeded.len(), total)
        } else {
            format!(
                "{}/{} namespaces succeeded; failed: {}",
                self.succeeded.len(),
                total,
                self.failed_namespaces().join(", ")
            )
        }
    }
}

/// Run every namespace in `config`.
///
/// Errors that prevent any work (invalid config, unreadable or malformed
/// API list, unwritable index dump) are returned directly. Per-namespace
/// errors end up in the report.
pub fn run_batch(config: &BatchConfig) -> Result<BatchReport> {
    config.validate()?;

    let indexer = NamespaceApiIndexer::from_path(&config.api_list, config.policy())?;
    indexer.write_index_dump(&config.output.intersection_dir)?;

    if config.namespaces.is_empty() {
        warn!("no namespaces configured; only the index dump was written");
    }

    let mut report = BatchReport::default();
    for entry in &config.namespaces {
        match indexer.compute_intersection(&entry.namespace, &entry.native_list, &config.output) {
            Ok(result) => report.succeeded.push(NamespaceOutcome {
                namespace: entry.namespace.clone(),
                count: result.len(),
            }),
            Err(err) => {
                error!("{}: {}", entry.namespace, err);
                report.failed.push(NamespaceFailure {
                    namespace: entry.namespace.clone(),
                    error: err,
                });
            }
        }
    }

    info!("{}", report.summary());
    Ok(report)
}
