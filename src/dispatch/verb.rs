#![forbid(unsafe_code)]

//! Classification of the first argument token
//!
//! Matching is case-sensitive, exact-string, and first-token-only. No flags,
//! prefixes, or abbreviations are recognized; `Install`, `in`, and
//! `--install` are all ordinary pass-through tokens.

/// What the first token tells the dispatcher to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// `activate` / `deactivate`: delegate entirely to the activation helper
    Activation,
    /// `install` / `update` / `upgrade` / `remove` / `uninstall`: run the
    /// tool, then refresh the shell via the helper
    Mutating,
    /// Anything else, including no arguments at all: run the tool only
    PassThrough,
}

impl Verb {
    /// Classifies an argument vector by its first token
    pub fn classify(args: &[String]) -> Verb {
        match args.first().map(String::as_str) {
            Some("activate") | Some("deactivate") => Verb::Activation,
            Some("install") | Some("update") | Some("upgrade") | Some("remove")
            | Some("uninstall") => Verb::Mutating,
            _ => Verb::PassThrough,
        }
    }
}
