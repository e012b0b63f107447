//! Native function list normalization
//!
//! Raw declaration lines come in two shapes:
//! - qualified calls for the reserved ATen namespaces (`at::add(...)`,
//!   `at::native::add(...)`)
//! - generic declarations (`Tensor torch::fft::fft(const Tensor& self)`)
//!
//! Both reduce to a bare member name.

use std::collections::BTreeSet;
use std::fmt;

use super::policy::NamespacePolicy;
use crate::error::{ApiListError, Result};

/// Namespaces whose declarations carry a fixed qualifier prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedNamespace {
    /// `at::add(...)`
    At,
    /// `at::native::add(...)`
    AtNative,
}

impl ReservedNamespace {
    pub const ALL: [ReservedNamespace; 2] = [ReservedNamespace::At, ReservedNamespace::AtNative];

    pub fn from_namespace(namespace: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ns| ns.as_str() == namespace)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservedNamespace::At => "at",
            ReservedNamespace::AtNative => "at::native",
        }
    }

    /// Qualifier every declaration line in this namespace starts with
    pub fn declared_prefix(&self) -> &'static str {
        match self {
            ReservedNamespace::At => "at::",
            ReservedNamespace::AtNative => "at::native::",
        }
    }

    /// 4 for `at`, 12 for `at::native`
    pub fn prefix_len(&self) -> usize {
        self.declared_prefix().len()
    }
}

impl fmt::Display for ReservedNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How one declaration line is reduced to a name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationRule<'a> {
    /// Strip the declared prefix, cut at `(`
    Reserved(ReservedNamespace),
    /// Cut at `(`, keep the last token, strip `<namespace>::`
    Generic { namespace: &'a str },
}

impl<'a> NormalizationRule<'a> {
    pub fn for_namespace(namespace: &'a str) -> Self {
        match ReservedNamespace::from_namespace(namespace) {
            Some(reserved) => NormalizationRule::Reserved(reserved),
            None => NormalizationRule::Generic { namespace },
        }
    }

    /// Normalize one non-blank line. `line_no` is 1-based and only used for errors.
    pub fn apply(&self, line_no: usize, line: &str) -> Result<String> {
        let trimmed = line.trim();
        let name = match self {
            NormalizationRule::Reserved(reserved) => {
                let prefix = reserved.declared_prefix();
                let rest = trimmed.strip_prefix(prefix).ok_or_else(|| {
                    ApiListError::parse(
                        line_no,
                        line,
                        format!("declaration in namespace {} must start with {:?}", reserved, prefix),
                    )
                })?;
                before_paren(rest)
            }
            NormalizationRule::Generic { namespace } => {
                let token = before_paren(trimmed).split_whitespace().last().unwrap_or("");
                let qualifier = format!("{}::", namespace);
                token.strip_prefix(qualifier.as_str()).unwrap_or(token)
            }
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(ApiListError::parse(line_no, line, "declaration has no function name"));
        }
        Ok(name.to_string())
    }
}

fn before_paren(text: &str) -> &str {
    match text.find('(') {
        Some(pos) => &text[..pos],
        None => text,
    }
}

/// Normalized, sorted, deduplicated native names for one namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeFunctionList {
    namespace: String,
    names: Vec<String>,
}

impl NativeFunctionList {
    /// Normalize raw declaration lines. Blank lines are skipped; names the
    /// policy excludes for `namespace` are dropped.
    pub fn normalize<S: AsRef<str>>(
        namespace: &str,
        lines: &[S],
        policy: &NamespacePolicy,
    ) -> Result<Self> {
        let rule = NormalizationRule::for_namespace(namespace);
        let mut names = BTreeSet::new();

        for (idx, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            let name = rule.apply(idx + 1, line)?;
            if policy.is_excluded(namespace, &name) {
                continue;
            }
            names.insert(name);
        }

        Ok(Self {
            namespace: namespace.to_string(),
            names: names.into_iter().collect(),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn normalize(namespace: &str, lines: &[&str]) -> Result<Vec<String>> {
        NativeFunctionList::normalize(namespace, lines, &NamespacePolicy::default())
            .map(|list| list.names().to_vec())
    }

    #[test]
    fn test_reserved_prefix_lengths() {
        assert_eq!(ReservedNamespace::At.prefix_len(), 4);
        assert_eq!(ReservedNamespace::AtNative.prefix_len(), 12);
        assert_eq!(ReservedNamespace::from_namespace("at::native"), Some(ReservedNamespace::AtNative));
        assert_eq!(ReservedNamespace::from_namespace("at::Tensor"), None);
    }

    #[test]
    fn test_at_rule() {
        let names = normalize("at", &["at::add(const Tensor& self)", "at::clear\n", "at::add(Tensor)"]).unwrap();
        assert_eq!(names, vec!["add", "clear"]);
    }

    #[test]
    fn test_at_native_rule() {
        let names = normalize("at::native", &["at::native::add_out(Tensor& out)", "at::native::zeros"]).unwrap();
        assert_eq!(names, vec!["add_out", "zeros"]);
    }

    #[test]
    fn test_reserved_prefix_is_validated() {
        // A bare `at::` line cannot pass for the nested namespace
        let err = normalize("at::native", &["at::native::ok()", "at::add(Tensor)"]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
        assert_eq!(err.line, Some(2));
        assert!(err.message.contains("at::native::"));
    }

    #[test]
    fn test_generic_rule() {
        let names = normalize("ns", &["int ns::add(int,int)", "void ns::reset()"]).unwrap();
        assert_eq!(names, vec!["add", "reset"]);
    }

    #[test]
    fn test_generic_rule_without_paren_or_prefix() {
        let names = normalize("torch::fft", &["torch::fft::fft", "Tensor ifft"]).unwrap();
        assert_eq!(names, vec!["fft", "ifft"]);
    }

    #[test]
    fn test_generic_rule_space_before_paren() {
        let names = normalize("ns", &["void ns::reset ()"]).unwrap();
        assert_eq!(names, vec!["reset"]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let names = normalize("ns", &["", "int ns::add(int)", "  ", "\n"]).unwrap();
        assert_eq!(names, vec!["add"]);
    }

    #[test]
    fn test_options_excluded_only_for_torch_nn() {
        let lines = ["torch::nn::Linear", "torch::nn::LinearOptions"];
        assert_eq!(normalize("torch::nn", &lines).unwrap(), vec!["Linear"]);

        let lines = ["torch::optim::Adam", "torch::optim::AdamOptions"];
        assert_eq!(
            normalize("torch::optim", &lines).unwrap(),
            vec!["Adam", "AdamOptions"]
        );
    }

    #[test]
    fn test_empty_name_is_parse_error() {
        let err = normalize("at", &["at::(Tensor)"]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
        assert_eq!(err.line, Some(1));
    }
}
