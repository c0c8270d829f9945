#![forbid(unsafe_code)]

//! Raw argument capture for the shim
//!
//! The shim owns no flags of its own. Everything after the program name is
//! pass-through data for the external tool, so help/version interception is
//! disabled and hyphen-prefixed tokens are accepted verbatim. The only
//! inspection the shim ever performs is an exact string match on the first
//! token.

use clap::Parser;

/// Command-line surface of the shim
///
/// `conda-shim install numpy` captures `["install", "numpy"]`; what those
/// tokens mean is entirely the external tool's business.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "conda-shim",
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Every argument, in order, exactly as received
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// First token of the argument vector, if any
    ///
    /// This is the only token the dispatcher inspects.
    pub fn first_token(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}
