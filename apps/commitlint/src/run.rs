//! The `lint` command flow: resolve config, build the linter, read
//! messages, report, and map the outcome to an exit code.
//!
//! Setup runs before any input is read, so a broken config never touches
//! stdin or the hook file.

use crate::config::{self, Effective};
use crate::engine::Linter;
use crate::error::Error;
use crate::input::{self, InputOptions, MessageInput};
use crate::output::{self, error_prefix, note_prefix, EXIT_FATAL};
use crate::resolver;
use crate::rules::Registry;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Arguments of `commitlint lint`.
#[derive(Debug, Clone, Default)]
pub struct LintRequest {
    pub inputs: Vec<String>,
    pub edit: Option<String>,
    pub null: bool,
    pub repo_root: Option<String>,
    pub config: Option<String>,
    pub extends: Vec<String>,
    pub output: Option<String>,
}

/// Print `err` on stderr and return the fatal exit code.
pub fn fatal(err: impl Display) -> i32 {
    eprintln!("{} {}", error_prefix(), err);
    EXIT_FATAL
}

/// Resolve the effective config and build a linter from it.
pub fn prepare(req: &LintRequest) -> Result<(Effective, Linter), Error> {
    let eff = config::resolve_effective(
        req.repo_root.as_deref(),
        req.config.as_deref(),
        req.output.as_deref(),
        &req.extends,
    )?;
    if eff.config_path.is_none() && eff.config.extends.is_empty() {
        eprintln!(
            "{} No commitlint config found and no --extends given; no rules are active.",
            note_prefix()
        );
    }
    let resolved = resolver::resolve_config(&eff.config)?;
    let linter = Linter::new(Registry::builtin(), resolved)?;
    Ok((eff, linter))
}

/// Read the hook file (if `--edit`) and the positional inputs.
pub fn read_messages(req: &LintRequest, repo_root: &Path) -> Result<Vec<MessageInput>, Error> {
    let mut messages = Vec::new();
    if let Some(edit) = req.edit.as_deref() {
        let path = PathBuf::from(edit);
        // git passes the hook file relative to the repository root
        let path = if path.is_relative() && !path.exists() {
            repo_root.join(path)
        } else {
            path
        };
        messages.extend(input::read_edit_file(&path, req.null)?);
    }
    if req.edit.is_none() || !req.inputs.is_empty() {
        let opts = InputOptions {
            null_separated: req.null,
            strip_comments: false,
        };
        messages.extend(input::read_inputs(&req.inputs, &opts)?);
    }
    Ok(messages)
}

pub fn run_lint(req: &LintRequest) -> i32 {
    run_lint_with(req, read_messages)
}

/// `run_lint` with a custom message source.
pub fn run_lint_with<F>(req: &LintRequest, read: F) -> i32
where
    F: FnOnce(&LintRequest, &Path) -> Result<Vec<MessageInput>, Error>,
{
    let (eff, linter) = match prepare(req) {
        Ok(prepared) => prepared,
        Err(e) => return fatal(e),
    };
    let messages = match read(req, &eff.repo_root) {
        Ok(m) if m.is_empty() => return fatal(Error::NoMessages),
        Ok(m) => m,
        Err(e) => return fatal(e),
    };
    debug!(messages = messages.len(), "linting");

    let reports = linter.lint_batch(&messages);
    output::print_lint(&reports, &eff.output, linter.config().help_url.as_deref());
    output::exit_code(output::overall(&reports))
}
