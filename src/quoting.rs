#![forbid(unsafe_code)]

//! Quote-asymmetry detection for activation-helper calls
//!
//! cmd.exe terminals sometimes re-quote an activation request on its way to
//! the shim: instead of forwarding `activate` alone, the caller flattens its
//! own command line into the argument list, producing something like
//! `"C:\Windows\System32\cmd.exe` `"/K"` `"...\activate.bat"` `"...\env"`
//! where the first token carries a leading quote with no matching trailing
//! quote. Forwarding that list verbatim would hand the helper garbage, so the
//! shim detects the asymmetry and downgrades the call to an argument-less
//! `activate`.
//!
//! Detection is a pure string predicate over the first token only, so it is
//! testable without spawning anything.

/// Returns true when `token` starts with a double quote that is not closed
/// by the token's own last character.
///
/// A bare `"` is its own first and last character and therefore symmetric.
/// Content between the quotes is irrelevant; only the two boundary
/// characters are compared.
pub fn has_asymmetric_leading_quote(token: &str) -> bool {
    let mut chars = token.chars();
    let first = chars.next();
    let last = chars.next_back().or(first);
    first == Some('"') && last != Some('"')
}

/// Decides what argument list the activation helper actually receives.
///
/// When the first token exhibits the re-quoting asymmetry the whole list is
/// replaced by a single `activate`; otherwise the arguments pass through
/// unchanged.
pub fn route_helper_args(args: &[String]) -> Vec<String> {
    match args.first() {
        Some(first) if has_asymmetric_leading_quote(first) => vec!["activate".to_string()],
        _ => args.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_leading_quote_without_trailing_is_asymmetric() {
        assert!(has_asymmetric_leading_quote("\"C:\\Windows\\System32\\cmd.exe"));
        assert!(has_asymmetric_leading_quote("\"x"));
    }

    #[test]
    fn test_balanced_quotes_are_symmetric() {
        assert!(!has_asymmetric_leading_quote("\"quoted value\""));
        assert!(!has_asymmetric_leading_quote("\"\""));
    }

    #[test]
    fn test_lone_quote_is_symmetric() {
        // A single `"` is its own closing character
        assert!(!has_asymmetric_leading_quote("\""));
    }

    #[test]
    fn test_unquoted_tokens_are_symmetric() {
        assert!(!has_asymmetric_leading_quote("activate"));
        assert!(!has_asymmetric_leading_quote(""));
        assert!(!has_asymmetric_leading_quote("trailing\""));
    }

    #[test]
    fn test_requoted_invocation_routes_to_bare_activate() {
        let mangled = strings(&[
            "\"C:\\Windows\\System32\\cmd.exe",
            "\"/K\"",
            "\"C:\\miniconda\\Scripts\\activate.bat\"",
            "\"C:\\miniconda\\envs\\work\"",
        ]);
        assert_eq!(route_helper_args(&mangled), strings(&["activate"]));
    }

    #[test]
    fn test_clean_arguments_pass_through_unchanged() {
        let args = strings(&["activate", "work", "--stack"]);
        assert_eq!(route_helper_args(&args), args);

        let quoted = strings(&["\"activate\"", "\"work\""]);
        assert_eq!(route_helper_args(&quoted), quoted);
    }

    #[test]
    fn test_empty_list_passes_through() {
        assert!(route_helper_args(&[]).is_empty());
    }
}
