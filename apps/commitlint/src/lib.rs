//! commitlint core library.
//!
//! This crate exposes programmatic APIs for linting commit messages against
//! configurable conventional-commit rules.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `resolver`: Merging base rule sets with local overrides.
//! - `presets`: Named base rule sets (`conventional`, `angular`).
//! - `parser`: Raw message to `ParsedMessage`.
//! - `rules`: Rule registry and builtin validators.
//! - `engine`: Applies resolved rules to messages, single or batched.
//! - `input`: Reading messages from files, globs, and stdin.
//! - `output`: Human/JSON printers and exit codes.
//! - `run`: The `lint` command flow from config to exit code.
//! - `models`: Data models shared by the modules above.
//! - `error`: Error taxonomy.
//!
//! ```no_run
//! use commitlint::{engine::Linter, resolver, rules::Registry};
//! use std::collections::BTreeMap;
//!
//! let config = resolver::resolve(&["conventional".to_string()], &BTreeMap::new())?;
//! let linter = Linter::new(Registry::builtin(), config)?;
//! let report = linter.lint("stdin", "fix(parser): handle empty input");
//! assert!(report.failures().next().is_none());
//! # Ok::<(), commitlint::error::Error>(())
//! ```
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod models;
pub mod output;
pub mod parser;
pub mod presets;
pub mod resolver;
pub mod rules;
pub mod run;
