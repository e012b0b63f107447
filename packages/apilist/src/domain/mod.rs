//! Domain models: dotted paths, the namespace index, native lists, set algebra
//!
//! Everything here is pure; file access lives in `infrastructure`.

pub mod dotted_path;
pub mod namespace_index;
pub mod native_list;
pub mod policy;
pub mod set_ops;

pub use dotted_path::{to_dotted_key, DottedPath, MalformedPath, PATH_MARKER};
pub use namespace_index::NamespaceIndex;
pub use native_list::{NativeFunctionList, NormalizationRule, ReservedNamespace};
pub use policy::NamespacePolicy;
pub use set_ops::{difference, intersection, sorted_unique, IntersectionResult};
