#![forbid(unsafe_code)]

//! conda-shim: native command-dispatch shim for conda
//!
//! conda-shim fronts the real `conda` executable the way the historical
//! `condabin/conda.bat` script did: it forwards every invocation to the tool
//! unchanged, routes `activate`/`deactivate` to the shell activation helper
//! instead, and re-triggers activation after subcommands that mutate the
//! environment's package set.

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod output;
pub mod quoting;
