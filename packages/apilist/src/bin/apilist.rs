//! apilist CLI
//!
//! # Usage
//!
//! ```bash
//! # Built-in batch, paths relative to the working directory
//! cargo run --bin apilist
//!
//! # Batch from a YAML configuration
//! cargo run --bin apilist -- run --config apilist.yaml
//!
//! # Single namespace
//! cargo run --bin apilist -- intersect --api-list py_api_list \
//!     --namespace torch::fft --native-list torch::fft_function_list
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use apilist::compare::{self, DEFAULT_KERNEL_BLOCK_LIST};
use apilist::{run_batch, BatchConfig, NamespaceApiIndexer, NamespacePolicy, OutputLayout};

#[derive(Parser)]
#[command(name = "apilist")]
#[command(about = "Intersect a binding API surface with native function lists", long_about = None)]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a batch (built-in configuration when no file is given)
    Run {
        /// YAML batch configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write the namespace index dumps (pyApiPath, pyApiPath2)
    Index {
        #[arg(short, long)]
        api_list: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Intersect one namespace
    Intersect {
        #[arg(short, long)]
        api_list: PathBuf,

        /// Namespace in `ns::Sub` form
        #[arg(short, long)]
        namespace: String,

        #[arg(long)]
        native_list: PathBuf,

        /// Directory for the normalized native list
        #[arg(long, default_value = ".")]
        native_dir: PathBuf,

        /// Directory for the intersection file
        #[arg(long, default_value = ".")]
        intersection_dir: PathBuf,
    },

    /// Extract sorted member names from a dotted API list
    Names {
        #[arg(short, long)]
        api_list: PathBuf,

        #[arg(short, long)]
        out: PathBuf,
    },

    /// Normalize a native function list
    Normalize {
        #[arg(short, long)]
        namespace: String,

        #[arg(long)]
        native_list: PathBuf,

        #[arg(short, long)]
        out: PathBuf,
    },

    /// Compare native names with binding names (intersection and differences)
    Compare {
        /// Normalized native names
        #[arg(long)]
        native: PathBuf,

        /// Binding member names
        #[arg(long)]
        binding: PathBuf,

        #[arg(short, long, default_value = "at")]
        namespace: String,

        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Report binding APIs left without a native counterpart, grouped by path
    Remaining {
        #[arg(short, long)]
        api_list: PathBuf,

        /// Binding-only names (e.g. differenceSet_pyApi)
        #[arg(short, long)]
        remaining: PathBuf,

        #[arg(short, long)]
        out: PathBuf,
    },

    /// Expand an op → kernels table into qualified at::native kernel names
    Kernels {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        out: PathBuf,

        /// Kernels to skip (defaults to the cuFFT kernels)
        #[arg(long = "block")]
        block: Vec<String>,
    },

    /// Print the built-in configuration as YAML
    DefaultConfig,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command.unwrap_or(Commands::Run { config: None })) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Run { config } => {
            let config = match config {
                Some(path) => BatchConfig::from_yaml(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => BatchConfig::builtin(),
            };

            let report = run_batch(&config)?;
            for failure in &report.failed {
                eprintln!("{}: {}", failure.namespace, failure.error);
            }
            println!("{}", report.summary());

            if report.is_success() {
                return Ok(ExitCode::SUCCESS);
            }
            Ok(ExitCode::FAILURE)
        }
        Commands::Index { api_list, out } => {
            let indexer = NamespaceApiIndexer::from_path(&api_list, NamespacePolicy::default())?;
            indexer.write_index_dump(&out)?;
            println!("{} namespaces indexed", indexer.index().len());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Intersect {
            api_list,
            namespace,
            native_list,
            native_dir,
            intersection_dir,
        } => {
            let indexer = NamespaceApiIndexer::from_path(&api_list, NamespacePolicy::default())?;
            let layout = OutputLayout::new(intersection_dir, native_dir);
            let result = indexer.compute_intersection(&namespace, &native_list, &layout)?;
            println!("{}: {} names", namespace, result.len());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Names { api_list, out } => {
            compare::write_member_names(&api_list, &out)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Normalize {
            namespace,
            native_list,
            out,
        } => {
            compare::write_normalized_native_list(
                &namespace,
                &native_list,
                &out,
                &NamespacePolicy::default(),
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Compare {
            native,
            binding,
            namespace,
            out_dir,
        } => {
            compare::compare_files(&native, &binding, &namespace, &out_dir)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Remaining {
            api_list,
            remaining,
            out,
        } => {
            compare::write_remaining_report(&api_list, &remaining, &out)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Kernels { input, out, block } => {
            let count = if block.is_empty() {
                compare::write_kernel_list(&input, &out, DEFAULT_KERNEL_BLOCK_LIST)?
            } else {
                compare::write_kernel_list(&input, &out, &block)?
            };
            println!("{} kernels written to {}", count, out.display());
            Ok(ExitCode::SUCCESS)
        }
        Commands::DefaultConfig => {
            print!("{}", BatchConfig::builtin().to_yaml()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
