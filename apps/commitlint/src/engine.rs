//! Rule engine.
//!
//! A `Linter` pairs a registry with a resolved config. Construction checks
//! every configured rule against the registry and validates rule options, so
//! a broken setup fails before any message is read. Linting itself never
//! fails: parse errors become a failing `parser` result.

use crate::error::{ConfigError, Error, RegistryError};
use crate::input::MessageInput;
use crate::models::{
    Condition, LintReport, Outcome, ParsedMessage, ResolvedConfig, Rule, Severity,
    ValidationResult,
};
use crate::parser;
use crate::rules::{Assertion, Registry, RuleEntry};
use rayon::prelude::*;
use regex::Regex;
use tracing::{debug, info};

/// Rule name used for results produced by parse failures.
pub const PARSER_RULE: &str = "parser";

/// Messages git or hosting tools generate; skipped unless `defaultIgnores = false`.
pub const DEFAULT_IGNORES: &[&str] = &[
    r"^Merge pull request",
    r"^Merge (.*?) into (.*)",
    r"^Merge branch",
    r"^Merge tag",
    r"^Merge remote-tracking branch",
    r"^Merged (.*?)(in|into) (.*)",
    r"^(R|r)evert (.*)",
    r"^(amend|fixup|squash)! ",
    r"^Automatic merge",
    r"^Auto-merged (.*?) into (.*)",
];

pub struct Linter {
    registry: Registry,
    config: ResolvedConfig,
    ignores: Vec<Regex>,
}

impl Linter {
    pub fn new(registry: Registry, config: ResolvedConfig) -> Result<Self, Error> {
        for rule in config.rules.values() {
            let entry = registry
                .get(&rule.name)
                .ok_or_else(|| RegistryError::Missing(rule.name.clone()))?;
            // `[0]` disables a rule without requiring its value
            if !rule.is_enabled() {
                continue;
            }
            entry
                .validator()
                .check_options(rule.value.as_ref())
                .map_err(|message| ConfigError::InvalidOption {
                    rule: rule.name.clone(),
                    message,
                })?;
        }

        let defaults: &[&str] = if config.default_ignores {
            DEFAULT_IGNORES
        } else {
            &[]
        };
        let ignores = defaults
            .iter()
            .copied()
            .chain(config.ignores.iter().map(String::as_str))
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ConfigError::InvalidIgnore {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            rules = config.rules.values().filter(|r| r.is_enabled()).count(),
            ignores = ignores.len(),
            "linter ready"
        );
        Ok(Self {
            registry,
            config,
            ignores,
        })
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn is_ignored(&self, raw: &str) -> bool {
        self.ignores.iter().any(|re| re.is_match(raw))
    }

    /// Evaluate every enabled rule, in rule-name order.
    pub fn evaluate(&self, msg: &ParsedMessage) -> Vec<ValidationResult> {
        self.config
            .rules
            .values()
            .filter(|rule| rule.is_enabled())
            .filter_map(|rule| {
                let entry = self.registry.get(&rule.name)?;
                Some(apply(entry, rule, msg))
            })
            .collect()
    }

    /// Lint one raw message.
    pub fn lint(&self, source: &str, raw: &str) -> LintReport {
        let header = raw.lines().next().unwrap_or_default().trim_end().to_string();
        if self.is_ignored(raw) {
            debug!(source, header = %header, "message ignored");
            return LintReport {
                source: source.to_string(),
                header,
                ignored: true,
                results: Vec::new(),
                outcome: Outcome::Pass,
            };
        }
        let results = match parser::parse(raw) {
            Ok(msg) => self.evaluate(&msg),
            Err(e) => vec![ValidationResult {
                rule: PARSER_RULE.to_string(),
                severity: Severity::Error,
                passed: false,
                message: Some(e.to_string()),
            }],
        };
        let outcome = Outcome::aggregate(&results);
        debug!(source, header = %header, ?outcome, "message linted");
        LintReport {
            source: source.to_string(),
            header,
            ignored: false,
            results,
            outcome,
        }
    }

    /// Lint messages in parallel; reports keep input order.
    pub fn lint_batch(&self, inputs: &[MessageInput]) -> Vec<LintReport> {
        inputs
            .par_iter()
            .map(|input| self.lint(&input.source, &input.raw))
            .collect()
    }
}

fn apply(entry: &RuleEntry, rule: &Rule, msg: &ParsedMessage) -> ValidationResult {
    let (passed, message) = match entry.validator().assert(msg, rule.value.as_ref()) {
        Assertion::NotApplicable => (true, None),
        Assertion::Evaluated {
            holds,
            target,
            expectation,
        } => {
            let never = rule.condition == Condition::Never;
            let passed = holds != never;
            let message = (!passed).then(|| {
                let not = if never { "not " } else { "" };
                format!("{target} must {not}{expectation}")
            });
            (passed, message)
        }
    };
    ValidationResult {
        rule: rule.name.clone(),
        severity: rule.severity,
        passed,
        message,
    }
}
