//! Error taxonomy.
//!
//! - `ConfigError`: malformed or unknown configuration. Fatal before linting.
//! - `ParseError`: malformed message header. Reported as a failing result.
//! - `RegistryError`: duplicate or missing rule implementation. Fatal.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unknown base rule set '{0}'")]
    UnknownBase(String),

    #[error("Rule '{rule}': severity must be 0, 1 or 2 (got {found})")]
    InvalidSeverity { rule: String, found: String },

    #[error("Rule '{rule}': condition must be \"always\" or \"never\" (got {found})")]
    InvalidCondition { rule: String, found: String },

    #[error("Rule '{rule}': unsupported value {found}")]
    InvalidValue { rule: String, found: String },

    #[error("Rule '{rule}': {message}")]
    InvalidOption { rule: String, message: String },

    #[error("Invalid ignore pattern '{pattern}': {source}")]
    InvalidIgnore {
        pattern: String,
        source: regex::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("message header is empty")]
    EmptyHeader,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Rule '{0}' is already registered")]
    Duplicate(String),

    #[error("Rule '{0}' is configured but not implemented")]
    Missing(String),
}

/// Failures that abort a run before any message is evaluated.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Failed to read input {path}: {source}")]
    Input {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid input pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Input pattern '{0}' matched no files")]
    NoMatches(String),

    #[error("No commit messages to lint")]
    NoMessages,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_into_error() {
        let err: Error = ConfigError::UnknownBase("nonexistent".into()).into();
        assert!(matches!(err, Error::Config(ConfigError::UnknownBase(_))));
        assert_eq!(err.to_string(), "Unknown base rule set 'nonexistent'");
    }

    #[test]
    fn registry_error_messages() {
        assert_eq!(
            RegistryError::Duplicate("type-case".into()).to_string(),
            "Rule 'type-case' is already registered"
        );
        assert_eq!(
            RegistryError::Missing("nope".into()).to_string(),
            "Rule 'nope' is configured but not implemented"
        );
    }
}
