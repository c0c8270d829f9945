#![forbid(unsafe_code)]

//! The dispatcher
//!
//! One function owns the whole control flow the batch ancestor spread across
//! `conda.bat`:
//!
//! - `activate` / `deactivate` delegate entirely to the activation helper;
//!   the tool is never launched for them.
//! - Everything else launches the tool with the full original argument list,
//!   prefixed by the mode flag and context token when present. A non-zero
//!   status ends the invocation right there.
//! - Environment-mutating verbs additionally fire `reactivate` at the helper
//!   afterwards so the caller's prompt and variables pick up the changed
//!   package set.
//!
//! Fail-fast is ordinary early return of a status code; nothing in here
//! terminates the process.

use crate::config::ShimContext;
use crate::dispatch::invoker::Invoker;
use crate::dispatch::verb::Verb;
use crate::errors::Result;
use crate::quoting::{has_asymmetric_leading_quote, route_helper_args};
use tracing::debug;

/// Fixed argument for the post-mutation helper call
const REACTIVATE: &str = "reactivate";

/// Dispatches one invocation and returns the exit status to terminate with.
///
/// The returned status is that of the last external invocation performed,
/// or of the first one that failed.
pub fn dispatch(ctx: &ShimContext, args: &[String], invoker: &impl Invoker) -> Result<i32> {
    let verb = Verb::classify(args);
    debug!(?verb, "dispatching");

    // An asymmetric leading quote on the first token means the caller's
    // terminal flattened an activation request into our argument list; the
    // whole invocation is really `activate` and never reaches the tool.
    let requoted = args
        .first()
        .is_some_and(|t| has_asymmetric_leading_quote(t));

    if verb == Verb::Activation || requoted {
        let helper_args = route_helper_args(args);
        return invoker.invoke(&ctx.helper, &helper_args);
    }

    let status = invoker.invoke(&ctx.tool, &tool_args(ctx, args))?;
    if status != 0 {
        return Ok(status);
    }

    if verb == Verb::Mutating {
        // The tool exiting zero only means the invocation itself succeeded;
        // the environment may still have changed partially. Reactivation
        // fires unconditionally at this point, and its status becomes ours
        // without any further check.
        return invoker.invoke(&ctx.helper, &[REACTIVATE.to_string()]);
    }

    Ok(status)
}

/// Full argument list for a tool invocation: mode flag, context token, then
/// the original arguments verbatim
fn tool_args(ctx: &ShimContext, args: &[String]) -> Vec<String> {
    let mut full = Vec::with_capacity(args.len() + 2);
    if let Some(mode) = &ctx.mode_flag {
        full.push(mode.clone());
    }
    if let Some(token) = &ctx.context_token {
        full.push(token.clone());
    }
    full.extend(args.iter().cloned());
    full
}
