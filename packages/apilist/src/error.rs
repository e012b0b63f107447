//! Error types for apilist

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error kinds surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input path missing or unreadable
    FileAccess,
    /// Line does not match the expected dotted-path or declaration shape
    Parse,
    /// Requested namespace absent from the API index
    Lookup,
    /// Invalid batch configuration
    Config,
    /// Output could not be written
    Io,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::FileAccess => "file_access",
            ErrorKind::Parse => "parse",
            ErrorKind::Lookup => "lookup",
            ErrorKind::Config => "config",
            ErrorKind::Io => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for apilist operations
#[derive(Debug, Error)]
#[error("[{kind}] {}{message}", location(.path, .line))]
pub struct ApiListError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
    /// File the error refers to, if any
    pub path: Option<PathBuf>,
    /// 1-based line number inside `path`
    pub line: Option<usize>,
}

fn location(path: &Option<PathBuf>, line: &Option<usize>) -> String {
    match (path, line) {
        (Some(path), Some(line)) => format!("{}:{}: ", path.display(), line),
        (Some(path), None) => format!("{}: ", path.display()),
        (None, Some(line)) => format!("line {}: ", line),
        (None, None) => String::new(),
    }
}

impl ApiListError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: None,
            line: None,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Attach the file the error came from. An already attached path wins.
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        if self.path.is_none() {
            self.path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    // Convenience constructors
    pub fn file_access(path: impl AsRef<Path>, err: std::io::Error) -> Self {
        Self::new(ErrorKind::FileAccess, format!("cannot read input: {}", err))
            .with_path(path)
            .with_source(err)
    }

    /// Malformed input line; `line_no` is 1-based
    pub fn parse(line_no: usize, line: &str, reason: impl fmt::Display) -> Self {
        Self::new(ErrorKind::Parse, format!("{} (line: {:?})", reason, line)).with_line(line_no)
    }

    pub fn lookup(namespace: &str, key: &str) -> Self {
        Self::new(
            ErrorKind::Lookup,
            format!(
                "namespace not found in API index: {} (looked up as {:?})",
                namespace, key
            ),
        )
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn io(path: impl AsRef<Path>, err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io, format!("cannot write output: {}", err))
            .with_path(path)
            .with_source(err)
    }
}

impl From<serde_yaml::Error> for ApiListError {
    fn from(err: serde_yaml::Error) -> Self {
        ApiListError::config(format!("YAML error: {}", err)).with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ApiListError>;
