//! Shared data models for rules, resolved configuration, and lint output.

pub mod message;

pub use message::{KeyValue, ParsedMessage};

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
/// Rule enforcement level. Config files use the numeric codes 0/1/2.
pub enum Severity {
    Off,
    Warning,
    Error,
}

impl Severity {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Off),
            1 => Some(Self::Warning),
            2 => Some(Self::Error),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Warning => 1,
            Self::Error => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
/// Whether a rule's assertion must hold (`always`) or must not hold (`never`).
pub enum Condition {
    #[default]
    Always,
    Never,
}

impl Condition {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
/// The optional third element of a rule entry, e.g. a case style or an allowed list.
pub enum RuleValue {
    Bool(bool),
    Int(i64),
    Text(String),
    List(Vec<String>),
}

impl RuleValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Text values are treated as a one-element list.
    pub fn to_list(&self) -> Option<Vec<String>> {
        match self {
            Self::Text(s) => Some(vec![s.clone()]),
            Self::List(items) => Some(items.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A configured rule after resolution.
pub struct Rule {
    pub name: String,
    pub severity: Severity,
    pub condition: Condition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<RuleValue>,
}

impl Rule {
    pub fn new(name: impl Into<String>, severity: Severity) -> Self {
        Self {
            name: name.into(),
            severity,
            condition: Condition::Always,
            value: None,
        }
    }

    pub fn never(mut self) -> Self {
        self.condition = Condition::Never;
        self
    }

    pub fn with_value(mut self, value: RuleValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.severity != Severity::Off
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Immutable rule set produced by the resolver, shared across a batch.
pub struct ResolvedConfig {
    pub rules: BTreeMap<String, Rule>,
    pub ignores: Vec<String>,
    pub default_ignores: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_url: Option<String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            rules: BTreeMap::new(),
            ignores: Vec::new(),
            default_ignores: true,
            help_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Result of evaluating one rule against one message.
pub struct ValidationResult {
    pub rule: String,
    pub severity: Severity,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
/// Aggregate outcome; ordered so that `max` picks the worst.
pub enum Outcome {
    Pass,
    Warn,
    Fail,
}

impl Outcome {
    /// Fail on any failed error, warn on any failed warning, pass otherwise.
    pub fn aggregate(results: &[ValidationResult]) -> Self {
        let failed = |sev| results.iter().any(|r| !r.passed && r.severity == sev);
        if failed(Severity::Error) {
            Self::Fail
        } else if failed(Severity::Warning) {
            Self::Warn
        } else {
            Self::Pass
        }
    }
}

#[derive(Debug, Clone, Serialize)]
/// Lint results for a single message.
pub struct LintReport {
    pub source: String,
    pub header: String,
    pub ignored: bool,
    pub results: Vec<ValidationResult>,
    pub outcome: Outcome,
}

impl LintReport {
    pub fn failures(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
/// Aggregated lint summary used by printers.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub messages: usize,
    pub ignored: usize,
}

impl Summary {
    pub fn from_reports(reports: &[LintReport]) -> Self {
        let mut summary = Self {
            messages: reports.len(),
            ..Self::default()
        };
        for report in reports {
            if report.ignored {
                summary.ignored += 1;
            }
            for r in report.failures() {
                match r.severity {
                    Severity::Error => summary.errors += 1,
                    Severity::Warning => summary.warnings += 1,
                    Severity::Off => {}
                }
            }
        }
        summary
    }
}
