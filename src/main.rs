#![forbid(unsafe_code)]

//! conda-shim binary entry point

use clap::Parser;
use conda_shim::cli::Cli;
use conda_shim::config::{ShimConfig, ShimContext};
use conda_shim::dispatch::{self, ProcessInvoker};
use conda_shim::errors::ShimError;
use conda_shim::output::report_error;
use std::path::{Path, PathBuf};

fn main() {
    // Silent by default; RUST_LOG=conda_shim=debug traces dispatch decisions
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli.args) {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            report_error(&error);
            std::process::exit(1);
        }
    }
}

fn run(args: &[String]) -> Result<i32, ShimError> {
    let shim_dir = shim_dir()?;
    let config = ShimConfig::load(&shim_dir)?;
    let ctx = ShimContext::resolve(&shim_dir, |key| std::env::var(key).ok(), &config);

    dispatch::dispatch(&ctx, args, &ProcessInvoker)
}

/// Directory containing the shim binary, the anchor for relative defaults
fn shim_dir() -> Result<PathBuf, ShimError> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}
