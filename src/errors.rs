#![forbid(unsafe_code)]

//! Error types for the shim
//!
//! The taxonomy is deliberately flat. Exit statuses of programs that did
//! launch are ordinary data flowing back to the caller; only failures the
//! host shell itself would have reported (an unlaunchable binary, an
//! unreadable config file) become errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShimError {
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShimError>;
