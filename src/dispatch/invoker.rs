#![forbid(unsafe_code)]

//! The process seam
//!
//! [`Invoker`] is the boundary between dispatch logic and the operating
//! system. Production code runs real child processes; unit tests substitute
//! a recording stub so the dispatch rules can be exercised without a shell.

use crate::errors::{Result, ShimError};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Fallback exit code when a child terminated without one (killed by signal)
const SIGNALED_EXIT_CODE: i32 = 1;

/// Runs one external program to completion and reports its exit status
pub trait Invoker {
    /// Launches `program` with `args`, blocking until it exits.
    ///
    /// A status the program itself returned, zero or not, is an `Ok` value.
    /// Only a failure to launch at all (binary missing, permission denied)
    /// is an error.
    fn invoke(&self, program: &Path, args: &[String]) -> Result<i32>;
}

/// [`Invoker`] backed by `std::process::Command`
///
/// Children inherit the shim's stdio, so whatever the tool or helper prints
/// reaches the caller unmodified. Invocations are synchronous with no
/// timeout, matching the batch ancestor.
pub struct ProcessInvoker;

impl Invoker for ProcessInvoker {
    fn invoke(&self, program: &Path, args: &[String]) -> Result<i32> {
        debug!(program = %program.display(), ?args, "invoking");

        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|source| ShimError::Launch {
                program: program.to_path_buf(),
                source,
            })?;

        let code = status.code().unwrap_or(SIGNALED_EXIT_CODE);
        debug!(program = %program.display(), code, "invocation finished");
        Ok(code)
    }
}
