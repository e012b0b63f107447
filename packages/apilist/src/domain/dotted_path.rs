//! Dotted API path tokenizer
//!
//! Binding API entries look like `torch.nn.Linear.forward.json`: the final
//! `json` segment is a marker, the segment before it is the member name and
//! everything before that is the namespace path.

use std::fmt;
use thiserror::Error;

/// Marker segment terminating every dotted API entry
pub const PATH_MARKER: &str = "json";

/// Minimum number of segments: namespace, member, marker
pub const MIN_SEGMENTS: usize = 3;

/// Why a line is not a well-formed dotted path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedPath {
    #[error("expected at least 3 dot-separated segments, found {found}")]
    TooFewSegments { found: usize },

    #[error("expected trailing \"json\" marker segment, found {found:?}")]
    MissingMarker { found: String },

    #[error("segment {index} is empty")]
    EmptySegment { index: usize },
}

/// A parsed `namespace.path.member.json` entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DottedPath {
    namespace: String,
    member: String,
}

impl DottedPath {
    /// Parse one line of an API list. A trailing `\n` or `\r\n` is ignored.
    pub fn parse(line: &str) -> Result<Self, MalformedPath> {
        let line = line.trim_end_matches(['\n', '\r']);
        let segments: Vec<&str> = line.split('.').collect();

        // Segment count is checked before the marker position is inspected
        if segments.len() < MIN_SEGMENTS {
            return Err(MalformedPath::TooFewSegments {
                found: segments.len(),
            });
        }

        let marker = segments[segments.len() - 1];
        if marker != PATH_MARKER {
            return Err(MalformedPath::MissingMarker {
                found: marker.to_string(),
            });
        }

        if let Some(index) = segments.iter().position(|s| s.is_empty()) {
            return Err(MalformedPath::EmptySegment { index });
        }

        let member_at = segments.len() - 2;
        Ok(Self {
            namespace: segments[..member_at].join("."),
            member: segments[member_at].to_string(),
        })
    }

    /// Namespace path, segments rejoined with `.`
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn member(&self) -> &str {
        &self.member
    }

    pub fn into_parts(self) -> (String, String) {
        (self.namespace, self.member)
    }
}

impl fmt::Display for DottedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.namespace, self.member, PATH_MARKER)
    }
}

/// Convert a `ns::Sub` namespace identifier to its dotted index key
pub fn to_dotted_key(namespace: &str) -> String {
    namespace.replace("::", ".")
}
