//! Built-in batch: the namespaces of interest, laid out relative to the
//! preprocessing working directory.

use std::path::PathBuf;

use super::{BatchConfig, OutputLayout};

const API_LIST: &str = "../pyApiFile/py_api_list";
const INTERSECTION_DIR: &str = "../IntersectionList";
const NATIVE_DIR: &str = "../CppLibraryList";

/// Namespaces intersected by a default run, in run order
pub const BUILTIN_NAMESPACES: &[&str] = &[
    "at::Tensor",
    "at",
    "at::native",
    "torch",
    "torch::fft",
    "torch::jit",
    "torch::linalg",
    "torch::nn",
    "torch::nn::functional",
    "torch::nn::init",
    "torch::nn::parallel",
    "torch::nn::utils",
    "torch::nn::utils::rnn",
    "torch::optim",
    "torch::special",
];

impl BatchConfig {
    /// Default batch used when no configuration file is given
    pub fn builtin() -> Self {
        let base = BatchConfig::new(API_LIST, OutputLayout::new(INTERSECTION_DIR, NATIVE_DIR))
            .exclusion("torch::nn", "Options");

        BUILTIN_NAMESPACES.iter().fold(base, |config, ns| {
            let native_list = PathBuf::from(NATIVE_DIR).join(format!("{}_function_list", ns));
            config.namespace(*ns, native_list)
        })
    }
}
