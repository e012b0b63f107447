/*
 * apilist - API surface intersection tooling
 *
 * Matches a binding's dotted API surface (`torch.nn.Linear.forward.json`)
 * against native function lists (`at::add(...)`, `Tensor torch::fft::fft(...)`)
 * and writes the per-namespace intersections consumed by the path finder
 * generator.
 *
 * Layout:
 * - domain/         : Dotted paths, namespace index, native lists, set algebra
 * - infrastructure/ : Line-oriented file I/O
 * - config/         : YAML batch configuration
 * - indexer         : NamespaceApiIndexer
 * - batch           : Batch runner with per-namespace error isolation
 * - compare         : Flat name comparisons and reports
 */

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports
// ═══════════════════════════════════════════════════════════════════════════

pub mod batch;
pub mod compare;
pub mod config;
pub mod domain;
pub mod error;
pub mod indexer;
pub mod infrastructure;

pub use batch::{run_batch, BatchReport, NamespaceFailure, NamespaceOutcome};
pub use config::{BatchConfig, NamespaceEntry, OutputLayout};
pub use domain::{
    DottedPath, IntersectionResult, NamespaceIndex, NamespacePolicy, NativeFunctionList,
    ReservedNamespace,
};
pub use error::{ApiListError, ErrorKind, Result};
pub use indexer::NamespaceApiIndexer;
