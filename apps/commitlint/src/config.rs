//! Configuration discovery and effective settings resolution.
//!
//! commitlint reads the first of `commitlint.toml`, `.commitlintrc.toml`,
//! `.commitlintrc.yaml`, `.commitlintrc.yml`, `.commitlintrc.json` found in the
//! repository root (or closest ancestor) and merges it with CLI flags to
//! produce an `Effective` config.
//! Defaults:
//! - `extends`: none
//! - `rules`: none
//! - `defaultIgnores`: true
//! - `output`: `human`
//!
//! Overrides precedence: CLI > config file > defaults. A config file that
//! exists but does not parse is a fatal error.

use crate::error::ConfigError;
use serde::Deserialize;
use serde_json::Value as Json;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Candidate config file names in lookup order.
pub const CONFIG_FILES: &[&str] = &[
    "commitlint.toml",
    ".commitlintrc.toml",
    ".commitlintrc.yaml",
    ".commitlintrc.yml",
    ".commitlintrc.json",
];

/// Starter config written by `commitlint init`.
pub const DEFAULT_CONFIG: &str = r#"extends = ["@commitlint/config-conventional"]

[rules]
"references-empty" = [1, "never"]
"scope-case" = [2, "always", "lower-case"]
"subject-case" = [0]
"type-case" = [2, "always", "lower-case"]
"#;

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Root configuration loaded from a commitlint config file.
pub struct LintConfig {
    #[serde(default)]
    pub extends: Vec<String>,
    /// rule name -> [severity, condition?, value?]
    #[serde(default)]
    pub rules: BTreeMap<String, Vec<Json>>,
    /// Regexes; matching messages are not linted.
    #[serde(default)]
    pub ignores: Vec<String>,
    pub default_ignores: Option<bool>,
    pub help_url: Option<String>,
    pub output: Option<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved settings used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub config: LintConfig,
    pub output: String,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a commitlint config file or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).is_file()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// First config file present in `root`, if any.
pub fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|f| root.join(f))
        .find(|p| p.is_file())
}

/// Load a config file, choosing the format from its extension.
pub fn load_config_file(path: &Path) -> Result<LintConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_err = |message: String| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    };
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&s).map_err(|e| parse_err(e.to_string())),
        Some("json") => serde_json::from_str(&s).map_err(|e| parse_err(e.to_string())),
        _ => toml::from_str(&s).map_err(|e| parse_err(e.to_string())),
    }
}

/// Load the config discovered in `root`, returning its path alongside.
pub fn load_config(root: &Path) -> Result<Option<(PathBuf, LintConfig)>, ConfigError> {
    match find_config(root) {
        Some(path) => {
            let cfg = load_config_file(&path)?;
            Ok(Some((path, cfg)))
        }
        None => Ok(None),
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// A non-empty `cli_extends` replaces the file's `extends` list.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_config: Option<&str>,
    cli_output: Option<&str>,
    cli_extends: &[String],
) -> Result<Effective, ConfigError> {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);

    let (config_path, mut config) = match cli_config {
        Some(p) => {
            let path = PathBuf::from(p);
            let path = if path.is_absolute() { path } else { start.join(path) };
            let cfg = load_config_file(&path)?;
            (Some(path), cfg)
        }
        None => match load_config(&repo_root)? {
            Some((path, cfg)) => (Some(path), cfg),
            None => (None, LintConfig::default()),
        },
    };
    match &config_path {
        Some(p) => info!(path = %p.display(), "loaded config"),
        None => debug!(root = %repo_root.display(), "no config file found; using defaults"),
    }

    if !cli_extends.is_empty() {
        config.extends = cli_extends.to_vec();
    }

    let output = cli_output
        .map(|s| s.to_string())
        .or_else(|| config.output.clone())
        .unwrap_or_else(|| "human".to_string());

    Ok(Effective {
        repo_root,
        config_path,
        config,
        output,
    })
}

/// Write the starter config into `root`. Refuses to overwrite unless `force`.
pub fn write_default_config(root: &Path, force: bool) -> Result<PathBuf, ConfigError> {
    let path = root.join(CONFIG_FILES[0]);
    if path.exists() && !force {
        return Err(ConfigError::Io {
            path,
            source: std::io::Error::new(std::io::ErrorKind::AlreadyExists, "file exists (use --force)"),
        });
    }
    fs::write(&path, DEFAULT_CONFIG).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("commitlint.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
extends = ["conventional"]
output = "json"
helpUrl = "https://example.com/commits"
[rules]
"scope-case" = [2, "always", "lower-case"]
"subject-case" = [0]
    "#
        )
        .unwrap();

        // Resolve using explicit repo_root to avoid global CWD races
        let eff = resolve_effective(root.to_str(), None, None, &[]).unwrap();
        assert_eq!(eff.config.extends, vec!["conventional"]);
        assert_eq!(eff.output, "json");
        assert_eq!(eff.config.help_url.as_deref(), Some("https://example.com/commits"));
        assert_eq!(eff.config.rules["scope-case"].len(), 3);
        assert_eq!(eff.config.rules["subject-case"], vec![Json::from(0)]);
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join(".commitlintrc.yaml"),
            r#"
extends:
  - conventional
rules:
  references-empty: [1, never]
defaultIgnores: false
            "#,
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), None, None, &[]).unwrap();
        assert_eq!(eff.output, "human");
        assert_eq!(eff.config.default_ignores, Some(false));
        assert_eq!(
            eff.config.rules["references-empty"],
            vec![Json::from(1), Json::from("never")]
        );
    }

    #[test]
    fn test_json_config_and_cli_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join(".commitlintrc.json"),
            r#"{"extends": ["conventional"], "output": "json", "rules": {"type-case": [2, "always", "lower-case"]}}"#,
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), None, Some("human"), &["angular".to_string()]).unwrap();
        assert_eq!(eff.output, "human");
        assert_eq!(eff.config.extends, vec!["angular"]);
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let eff = resolve_effective(dir.path().to_str(), None, None, &[]).unwrap();
        assert!(eff.config_path.is_none());
        assert_eq!(eff.config, LintConfig::default());
    }

    #[test]
    fn test_detect_repo_root_walks_up() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("commitlint.toml"), "").unwrap();
        let nested = root.join("a/b");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(detect_repo_root(&nested), root.to_path_buf());
    }

    #[test]
    fn test_malformed_config_is_fatal() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("commitlint.toml"), "extends = [").unwrap();
        let err = resolve_effective(dir.path().to_str(), None, None, &[]).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_explicit_config_path() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("custom.yml"), "extends: [angular]\n").unwrap();
        let eff = resolve_effective(root.to_str(), Some("custom.yml"), None, &[]).unwrap();
        assert_eq!(eff.config.extends, vec!["angular"]);
        assert!(eff.config_path.unwrap().ends_with("custom.yml"));
    }

    #[test]
    fn test_write_default_config() {
        let dir = tempdir().unwrap();
        let path = write_default_config(dir.path(), false).unwrap();
        let cfg = load_config_file(&path).unwrap();
        assert_eq!(cfg.extends, vec!["@commitlint/config-conventional"]);
        assert_eq!(cfg.rules.len(), 4);
        assert!(write_default_config(dir.path(), false).is_err());
        assert!(write_default_config(dir.path(), true).is_ok());
    }
}
