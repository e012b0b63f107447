//! Standalone comparisons between the binding API surface and native lists
//!
//! These work on flat name lists rather than the namespace index:
//! - member name extraction from the dotted API list
//! - two-way comparison (intersection plus both differences)
//! - the remaining-API report, grouped and counted by namespace path
//! - kernel list expansion from an op → kernels table

use std::collections::BTreeSet;
use std::path::Path;

use rustc_hash::FxHashSet;
use tracing::info;

use crate::domain::{difference, intersection, sorted_unique, DottedPath, NamespacePolicy, NativeFunctionList};
use crate::error::{ApiListError, Result};
use crate::infrastructure::{read_lines, write_lines};

/// Separator line framing each group in the remaining-API report
pub const REPORT_RULE: &str =
    "----------------------------------------------------------------------";

/// Kernels skipped by default when expanding an op → kernels table (cuFFT only)
pub const DEFAULT_KERNEL_BLOCK_LIST: &[&str] = &["_fft_c2c_cufft", "_fft_r2c_cufft", "_fft_c2r_cufft"];

/// Qualifier prepended to every expanded kernel
pub const KERNEL_QUALIFIER: &str = "at::native::";

fn parse_dotted<S: AsRef<str>>(lines: &[S]) -> Result<Vec<DottedPath>> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !line.as_ref().trim().is_empty())
        .map(|(idx, line)| {
            DottedPath::parse(line.as_ref()).map_err(|e| ApiListError::parse(idx + 1, line.as_ref(), e))
        })
        .collect()
}

/// Member names of every dotted API entry, sorted and deduplicated
pub fn extract_member_names<S: AsRef<str>>(api_lines: &[S]) -> Result<Vec<String>> {
    let paths = parse_dotted(api_lines)?;
    Ok(sorted_unique(paths.iter().map(DottedPath::member)))
}

/// Outcome of comparing native names with binding names
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameSetComparison {
    pub intersection: Vec<String>,
    /// Native names with no binding counterpart
    pub native_only: Vec<String>,
    /// Binding names with no native counterpart
    pub binding_only: Vec<String>,
}

impl NameSetComparison {
    pub fn intersection_file(namespace: &str) -> String {
        format!("intersection_{}_pyApi", namespace)
    }

    pub fn native_only_file(namespace: &str) -> String {
        format!("differenceSet_{}", namespace)
    }

    pub const BINDING_ONLY_FILE: &'static str = "differenceSet_pyApi";

    /// Write the three lists into `dir`. Intersection and native-only names
    /// are qualified with `<namespace>::`; binding-only names are not.
    pub fn write(&self, dir: impl AsRef<Path>, namespace: &str) -> Result<()> {
        let dir = dir.as_ref();
        let qualify = |names: &[String]| -> Vec<String> {
            names.iter().map(|n| format!("{}::{}", namespace, n)).collect()
        };
        write_lines(dir.join(Self::intersection_file(namespace)), qualify(&self.intersection))?;
        write_lines(dir.join(Self::native_only_file(namespace)), qualify(&self.native_only))?;
        write_lines(dir.join(Self::BINDING_ONLY_FILE), &self.binding_only)?;
        Ok(())
    }
}

/// Compare two flat name lists. Blank entries are ignored.
pub fn compare_name_sets<N, B>(native_names: &[N], binding_names: &[B]) -> NameSetComparison
where
    N: AsRef<str>,
    B: AsRef<str>,
{
    let native = || {
        native_names
            .iter()
            .map(|n| n.as_ref().trim())
            .filter(|n| !n.is_empty())
    };
    let binding = || {
        binding_names
            .iter()
            .map(|n| n.as_ref().trim())
            .filter(|n| !n.is_empty())
    };

    NameSetComparison {
        intersection: intersection(binding(), native()),
        native_only: difference(native(), binding()),
        binding_only: difference(binding(), native()),
    }
}

/// Lines of the API list whose member name is in `remaining`, grouped by
/// consecutive namespace path, each group closed by a `Path: <ns>, Count: <n>`
/// block.
pub fn remaining_api_report<A, R>(api_lines: &[A], remaining: &[R]) -> Result<Vec<String>>
where
    A: AsRef<str>,
    R: AsRef<str>,
{
    let remaining: FxHashSet<&str> = remaining
        .iter()
        .map(|r| r.as_ref().trim())
        .filter(|r| !r.is_empty())
        .collect();

    let mut report = Vec::new();
    let mut current: Option<(String, usize)> = None;

    for (idx, line) in api_lines.iter().enumerate() {
        let line = line.as_ref().trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }
        let path = DottedPath::parse(line).map_err(|e| ApiListError::parse(idx + 1, line, e))?;
        if !remaining.contains(path.member()) {
            continue;
        }

        let same_group = matches!(&current, Some((ns, _)) if ns == path.namespace());
        if same_group {
            if let Some((_, count)) = current.as_mut() {
                *count += 1;
            }
        } else {
            if let Some((namespace, count)) = current.take() {
                close_group(&mut report, &namespace, count);
            }
            current = Some((path.namespace().to_string(), 1));
        }
        report.push(line.to_string());
    }

    if let Some((namespace, count)) = current {
        close_group(&mut report, &namespace, count);
    }
    Ok(report)
}

fn close_group(report: &mut Vec<String>, namespace: &str, count: usize) {
    report.push(REPORT_RULE.to_string());
    report.push(format!("Path: {}, Count: {}", namespace, count));
    report.push(REPORT_RULE.to_string());
    report.push(String::new());
}

/// Expand `<op> <kernel>,<kernel>,...` lines into qualified kernel names,
/// in input order, skipping blocked kernels.
pub fn expand_kernel_list<S, B>(ops_to_kernels: &[S], block_list: &[B]) -> Result<Vec<String>>
where
    S: AsRef<str>,
    B: AsRef<str>,
{
    let blocked: BTreeSet<&str> = block_list.iter().map(AsRef::as_ref).collect();
    let mut kernels = Vec::new();

    for (idx, line) in ops_to_kernels.iter().enumerate() {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }
        let field = line.split_whitespace().nth(1).ok_or_else(|| {
            ApiListError::parse(idx + 1, line, "expected '<op> <kernel>[,<kernel>...]'")
        })?;

        kernels.extend(
            field
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty() && !blocked.contains(k))
                .map(|k| format!("{}{}", KERNEL_QUALIFIER, k)),
        );
    }
    Ok(kernels)
}

// File-level wrappers used by the CLI

pub fn write_member_names(api_list: &Path, out: &Path) -> Result<usize> {
    let lines = read_lines(api_list)?;
    let names = extract_member_names(&lines).map_err(|e| e.with_path(api_list))?;
    write_lines(out, &names)?;
    info!("{} member names written to {}", names.len(), out.display());
    Ok(names.len())
}

pub fn write_normalized_native_list(
    namespace: &str,
    native_list: &Path,
    out: &Path,
    policy: &NamespacePolicy,
) -> Result<usize> {
    let lines = read_lines(native_list)?;
    let native = NativeFunctionList::normalize(namespace, &lines, policy)
        .map_err(|e| e.with_path(native_list))?;
    write_lines(out, native.names())?;
    info!("{}: {} native names written to {}", namespace, native.len(), out.display());
    Ok(native.len())
}

pub fn compare_files(
    native_names: &Path,
    binding_names: &Path,
    namespace: &str,
    out_dir: &Path,
) -> Result<NameSetComparison> {
    let native = read_lines(native_names)?;
    let binding = read_lines(binding_names)?;
    let comparison = compare_name_sets(&native, &binding);
    comparison.write(out_dir, namespace)?;
    info!(
        "{}: {} shared, {} native only, {} binding only",
        namespace,
        comparison.intersection.len(),
        comparison.native_only.len(),
        comparison.binding_only.len()
    );
    Ok(comparison)
}

pub fn write_remaining_report(api_list: &Path, remaining: &Path, out: &Path) -> Result<()> {
    let api_lines = read_lines(api_list)?;
    let remaining = read_lines(remaining)?;
    let report = remaining_api_report(&api_lines, &remaining).map_err(|e| e.with_path(api_list))?;
    write_lines(out, &report)
}

pub fn write_kernel_list<B: AsRef<str>>(input: &Path, out: &Path, block_list: &[B]) -> Result<usize> {
    let lines = read_lines(input)?;
    let kernels = expand_kernel_list(&lines, block_list).map_err(|e| e.with_path(input))?;
    write_lines(out, &kernels)?;
    Ok(kernels.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_member_names() {
        let lines = ["torch.add.json", "torch.Tensor.add.json", "torch.nn.ReLU.json", ""];
        assert_eq!(extract_member_names(&lines).unwrap(), vec!["ReLU", "add"]);
    }

    #[test]
    fn test_extract_member_names_malformed() {
        let err = extract_member_names(&["torch.add.json", "oops"]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
        assert_eq!(err.line, Some(2));
    }

    #[test]
    fn test_compare_name_sets() {
        let native = ["add", "mul", "_cudnn_rnn", ""];
        let binding = ["add", "mul", "relu", "add"];
        let cmp = compare_name_sets(&native, &binding);

        assert_eq!(cmp.intersection, vec!["add", "mul"]);
        assert_eq!(cmp.native_only, vec!["_cudnn_rnn"]);
        assert_eq!(cmp.binding_only, vec!["relu"]);
    }

    #[test]
    fn test_remaining_report_groups_consecutive_paths() {
        let api = [
            "torch.nn.functional.relu.json",
            "torch.nn.functional.gelu.json",
            "torch.nn.functional.silu.json",
            "torch.add.json",
            "torch.nn.functional.elu.json",
        ];
        let remaining = ["relu", "gelu", "add", "elu"];
        let report = remaining_api_report(&api, &remaining).unwrap();

        assert_eq!(
            report,
            vec![
                "torch.nn.functional.relu.json",
                "torch.nn.functional.gelu.json",
                REPORT_RULE,
                "Path: torch.nn.functional, Count: 2",
                REPORT_RULE,
                "",
                "torch.add.json",
                REPORT_RULE,
                "Path: torch, Count: 1",
                REPORT_RULE,
                "",
                "torch.nn.functional.elu.json",
                REPORT_RULE,
                "Path: torch.nn.functional, Count: 1",
                REPORT_RULE,
                "",
            ]
        );
    }

    #[test]
    fn test_remaining_report_empty_selection() {
        let report = remaining_api_report(&["torch.add.json"], &["mul"]).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_expand_kernel_list() {
        let lines = [
            "add add_out_cpu,add_out_cuda",
            "",
            "fft_c2c _fft_c2c_mkl,_fft_c2c_cufft",
        ];
        let kernels = expand_kernel_list(&lines, DEFAULT_KERNEL_BLOCK_LIST).unwrap();
        assert_eq!(
            kernels,
            vec![
                "at::native::add_out_cpu",
                "at::native::add_out_cuda",
                "at::native::_fft_c2c_mkl",
            ]
        );
    }

    #[test]
    fn test_expand_kernel_list_missing_field() {
        let err = expand_kernel_list(&["lonely_op"], DEFAULT_KERNEL_BLOCK_LIST).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
        assert_eq!(err.line, Some(1));
    }
}
