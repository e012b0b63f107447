//! Common test utilities for apilist
//!
//! Scratch directories with input fixtures laid out the way a batch run
//! expects them.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Binding API surface used across tests
pub const PY_API_LIST: &[&str] = &[
    "torch.add.json",
    "torch.mul.json",
    "torch.Tensor.add.json",
    "torch.Tensor.relu.json",
    "torch.fft.fft.json",
    "torch.fft.ifft.json",
    "torch.nn.Linear.json",
    "torch.nn.ReLU.json",
    "torch.nn.functional.relu.json",
    "torch.nn.functional.gelu.json",
];

pub const AT_FUNCTION_LIST: &[&str] = &[
    "at::add(const Tensor& self, const Tensor& other)",
    "at::mul(const Tensor& self, const Tensor& other)",
    "at::relu(const Tensor& self)",
    "at::gelu(const Tensor& self)",
    "at::_cudnn_rnn(const Tensor& input)",
    "at::clear",
];

pub const TORCH_FFT_FUNCTION_LIST: &[&str] = &[
    "Tensor torch::fft::fft(const Tensor& self)",
    "",
    "Tensor torch::fft::rfft(const Tensor& self)",
];

pub const TORCH_NN_FUNCTION_LIST: &[&str] = &[
    "torch::nn::Linear",
    "torch::nn::LinearOptions",
    "torch::nn::ReLU",
    "torch::nn::Conv2d",
];

/// Temporary workspace with an input directory and an output directory
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn input(&self, name: &str) -> PathBuf {
        self.path().join("input").join(name)
    }

    pub fn output(&self) -> PathBuf {
        self.path().join("output")
    }

    /// Write `lines` (newline-terminated) under `input/`
    pub fn write_input(&self, name: &str, lines: &[&str]) -> PathBuf {
        let path = self.input(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut text = lines.join("\n");
        text.push('\n');
        fs::write(&path, text).unwrap();
        path
    }

    pub fn read_output(&self, name: &str) -> Vec<String> {
        let text = fs::read_to_string(self.output().join(name))
            .unwrap_or_else(|e| panic!("reading output {}: {}", name, e));
        text.lines().map(str::to_string).collect()
    }

    pub fn output_exists(&self, name: &str) -> bool {
        self.output().join(name).exists()
    }
}
