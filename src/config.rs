//! Context resolution and optional configuration file

pub mod shim_toml;

pub use shim_toml::{CONDA_EXE_VAR, CONTEXT_TOKEN_VAR, MODE_FLAG_VAR, ShimConfig, ShimContext};
