#![forbid(unsafe_code)]

//! Shim context resolution
//!
//! The batch ancestor kept its bookkeeping in shell variables (`CONDA_EXE`,
//! `_CE_M`, `_CE_CONDA`) that doubled as scratch state. Here the same three
//! values, plus the helper location, live in one immutable [`ShimContext`]
//! built once per invocation and passed down explicitly. The environment is
//! only ever read during resolution; the shim never writes its bookkeeping
//! back, so nothing can leak into the caller's variable table.
//!
//! Resolution precedence for the tool location:
//! 1. the `CONDA_EXE` environment variable,
//! 2. the optional `conda-shim.toml` next to the shim binary,
//! 3. the conventional install-tree default relative to the shim itself.
//!
//! When the location has to be derived (case 3) the mode flag and context
//! token are cleared, matching the ancestor's behavior of resetting `_CE_M`
//! and `_CE_CONDA` whenever `CONDA_EXE` was undefined.

use crate::errors::{Result, ShimError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the external tool executable
pub const CONDA_EXE_VAR: &str = "CONDA_EXE";

/// Environment variable carrying the mode flag (`-m` in dev setups)
pub const MODE_FLAG_VAR: &str = "_CE_M";

/// Environment variable carrying the secondary context token
pub const CONTEXT_TOKEN_VAR: &str = "_CE_CONDA";

/// File name of the optional per-install configuration
pub const CONFIG_FILE_NAME: &str = "conda-shim.toml";

/// Optional configuration file contents
///
/// Every field is optional; the file itself is optional. It exists so an
/// install tree that does not follow the conventional layout can pin paths
/// without exporting environment variables.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ShimConfig {
    /// Path to the external tool executable
    pub tool: Option<PathBuf>,
    /// Path to the activation helper
    pub helper: Option<PathBuf>,
    /// Default mode flag when `_CE_M` is not set
    pub mode_flag: Option<String>,
    /// Default context token when `_CE_CONDA` is not set
    pub context_token: Option<String>,
}

impl ShimConfig {
    /// Loads `conda-shim.toml` from the given directory
    ///
    /// A missing file is not an error and yields the all-`None` default; a
    /// present-but-malformed file is a configuration error.
    pub fn load(dir: &Path) -> Result<ShimConfig> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(ShimConfig::default());
        }

        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content)
            .map_err(|e| ShimError::Config(format!("failed to parse {}: {}", path.display(), e)))
    }
}

/// Immutable per-invocation context for the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShimContext {
    /// Path to the external tool executable
    pub tool: PathBuf,
    /// Extra leading token for tool invocations, when present
    pub mode_flag: Option<String>,
    /// Second extra leading token for tool invocations, when present
    pub context_token: Option<String>,
    /// Path to the activation helper
    pub helper: PathBuf,
}

impl ShimContext {
    /// Resolves the context for one invocation.
    ///
    /// `shim_dir` is the directory containing the shim binary itself;
    /// `env` looks up environment variables (injected so resolution is
    /// testable without touching the process environment); `config` is the
    /// already-loaded optional configuration file.
    ///
    /// Empty environment values are treated as unset, the way cmd.exe
    /// treats `SET VAR=`.
    pub fn resolve(
        shim_dir: &Path,
        env: impl Fn(&str) -> Option<String>,
        config: &ShimConfig,
    ) -> ShimContext {
        let non_empty = |key: &str| env(key).filter(|v| !v.is_empty());

        let env_tool = non_empty(CONDA_EXE_VAR).map(PathBuf::from);
        let derived = env_tool.is_none() && config.tool.is_none();

        let tool = env_tool
            .or_else(|| config.tool.clone())
            .unwrap_or_else(|| default_tool_path(shim_dir));

        // A derived locator means the invocation tokens that accompanied an
        // explicit one are meaningless; clear them rather than guessing.
        let (mode_flag, context_token) = if derived {
            (None, None)
        } else {
            (
                non_empty(MODE_FLAG_VAR).or_else(|| config.mode_flag.clone()),
                non_empty(CONTEXT_TOKEN_VAR).or_else(|| config.context_token.clone()),
            )
        };

        let helper = config
            .helper
            .clone()
            .unwrap_or_else(|| default_helper_path(shim_dir));

        debug!(
            tool = %tool.display(),
            helper = %helper.display(),
            derived,
            "resolved shim context"
        );

        ShimContext {
            tool,
            mode_flag,
            context_token,
            helper,
        }
    }
}

/// Conventional tool location relative to the shim's own directory
fn default_tool_path(shim_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        shim_dir.join("..").join("Scripts").join("conda.exe")
    } else {
        shim_dir.join("..").join("bin").join("conda")
    }
}

/// Conventional helper location: a sibling of the shim binary
fn default_helper_path(shim_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        shim_dir.join("_conda_activate.bat")
    } else {
        shim_dir.join("_conda_activate")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_env_var_wins() {
        let config = ShimConfig {
            tool: Some(PathBuf::from("/from/config/conda")),
            ..ShimConfig::default()
        };
        let ctx = ShimContext::resolve(
            Path::new("/opt/shim"),
            env_of(&[(CONDA_EXE_VAR, "/from/env/conda")]),
            &config,
        );
        assert_eq!(ctx.tool, PathBuf::from("/from/env/conda"));
    }

    #[test]
    fn test_config_file_beats_derived_default() {
        let config = ShimConfig {
            tool: Some(PathBuf::from("/from/config/conda")),
            ..ShimConfig::default()
        };
        let ctx = ShimContext::resolve(Path::new("/opt/shim"), env_of(&[]), &config);
        assert_eq!(ctx.tool, PathBuf::from("/from/config/conda"));
    }

    #[test]
    fn test_derived_default_location() {
        let ctx = ShimContext::resolve(Path::new("/opt/shim"), env_of(&[]), &ShimConfig::default());
        let expected = if cfg!(windows) {
            PathBuf::from("/opt/shim").join("..").join("Scripts").join("conda.exe")
        } else {
            PathBuf::from("/opt/shim").join("..").join("bin").join("conda")
        };
        assert_eq!(ctx.tool, expected);
    }

    #[test]
    fn test_derived_locator_clears_invocation_tokens() {
        let ctx = ShimContext::resolve(
            Path::new("/opt/shim"),
            env_of(&[(MODE_FLAG_VAR, "-m"), (CONTEXT_TOKEN_VAR, "conda")]),
            &ShimConfig::default(),
        );
        assert_eq!(ctx.mode_flag, None);
        assert_eq!(ctx.context_token, None);
    }

    #[test]
    fn test_explicit_locator_keeps_invocation_tokens() {
        let ctx = ShimContext::resolve(
            Path::new("/opt/shim"),
            env_of(&[
                (CONDA_EXE_VAR, "/env/conda"),
                (MODE_FLAG_VAR, "-m"),
                (CONTEXT_TOKEN_VAR, "conda"),
            ]),
            &ShimConfig::default(),
        );
        assert_eq!(ctx.mode_flag.as_deref(), Some("-m"));
        assert_eq!(ctx.context_token.as_deref(), Some("conda"));
    }

    #[test]
    fn test_empty_env_value_is_unset() {
        let ctx = ShimContext::resolve(
            Path::new("/opt/shim"),
            env_of(&[(CONDA_EXE_VAR, ""), (MODE_FLAG_VAR, "")]),
            &ShimConfig::default(),
        );
        let expected_suffix = if cfg!(windows) { "conda.exe" } else { "conda" };
        assert!(ctx.tool.ends_with(expected_suffix));
        assert_eq!(ctx.mode_flag, None);
    }

    #[test]
    fn test_config_supplies_token_defaults() {
        let config = ShimConfig {
            tool: Some(PathBuf::from("/env/conda")),
            mode_flag: Some("-m".to_string()),
            context_token: Some("conda".to_string()),
            helper: None,
        };
        let ctx = ShimContext::resolve(Path::new("/opt/shim"), env_of(&[]), &config);
        assert_eq!(ctx.mode_flag.as_deref(), Some("-m"));
        assert_eq!(ctx.context_token.as_deref(), Some("conda"));
    }

    #[test]
    fn test_default_helper_is_shim_sibling() {
        let ctx = ShimContext::resolve(Path::new("/opt/shim"), env_of(&[]), &ShimConfig::default());
        let expected = if cfg!(windows) {
            "_conda_activate.bat"
        } else {
            "_conda_activate"
        };
        assert_eq!(ctx.helper, Path::new("/opt/shim").join(expected));
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = ShimConfig::load(dir.path()).unwrap();
        assert_eq!(config, ShimConfig::default());
    }

    #[test]
    fn test_load_parses_fields() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"
tool = "/custom/conda"
helper = "/custom/_conda_activate"
mode_flag = "-m"
"#,
        )
        .unwrap();

        let config = ShimConfig::load(dir.path()).unwrap();
        assert_eq!(config.tool, Some(PathBuf::from("/custom/conda")));
        assert_eq!(config.helper, Some(PathBuf::from("/custom/_conda_activate")));
        assert_eq!(config.mode_flag.as_deref(), Some("-m"));
        assert_eq!(config.context_token, None);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "tool = [[").unwrap();

        let err = ShimConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, ShimError::Config(_)));
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "toool = \"/x\"").unwrap();

        assert!(ShimConfig::load(dir.path()).is_err());
    }
}
