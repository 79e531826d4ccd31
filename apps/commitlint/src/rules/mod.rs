//! Rule registry.
//!
//! Maps rule names to validators and default severities. Validators only
//! state whether their assertion holds; the engine applies the configured
//! `always`/`never` condition and severity.
//!
//! | Family | Rules |
//! |--------|-------|
//! | case | `header-case`, `type-case`, `scope-case`, `subject-case`, `body-case` |
//! | empty | `type-empty`, `scope-empty`, `subject-empty`, `body-empty`, `footer-empty` |
//! | enum | `type-enum`, `scope-enum` |
//! | length | `<part>-max-length`, `<part>-min-length` for every part |
//! | full stop | `header-full-stop`, `subject-full-stop`, `body-full-stop` |
//! | layout | `body-leading-blank`, `footer-leading-blank`, `body-max-line-length`, `footer-max-line-length`, `header-trim` |
//! | references | `references-empty` |

pub mod case;
pub mod content;
pub mod layout;
pub mod references;

use crate::error::RegistryError;
use crate::models::{ParsedMessage, RuleValue, Severity};
use std::collections::BTreeMap;
use tracing::{debug, error};

/// Section of a commit message a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Header,
    Type,
    Scope,
    Subject,
    Body,
    Footer,
}

impl Part {
    pub fn name(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Type => "type",
            Self::Scope => "scope",
            Self::Subject => "subject",
            Self::Body => "body",
            Self::Footer => "footer",
        }
    }

    /// Text of this part, `None` when the message does not have it.
    pub fn text(self, msg: &ParsedMessage) -> Option<String> {
        match self {
            Self::Header => Some(msg.header.clone()),
            Self::Type => Some(msg.commit_type.clone()),
            Self::Scope => msg.scope.clone(),
            Self::Subject => Some(msg.subject.clone()),
            Self::Body => msg.body.clone(),
            Self::Footer => msg.footer_text(),
        }
    }
}

/// What a validator found, before `always`/`never` is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assertion {
    /// The rule does not apply to this message, e.g. `scope-case` without a scope.
    NotApplicable,
    Evaluated {
        holds: bool,
        /// What was checked, e.g. `scope`.
        target: String,
        /// The positive expectation, e.g. `be lower-case`.
        expectation: String,
    },
}

impl Assertion {
    pub fn evaluated(holds: bool, target: impl Into<String>, expectation: impl Into<String>) -> Self {
        Self::Evaluated {
            holds,
            target: target.into(),
            expectation: expectation.into(),
        }
    }
}

/// A rule implementation. Implemented for plain closures so hosts can
/// register rules without defining a type.
pub trait Validator: Send + Sync {
    fn assert(&self, msg: &ParsedMessage, value: Option<&RuleValue>) -> Assertion;

    /// Validate the configured value once, before any message is linted.
    fn check_options(&self, _value: Option<&RuleValue>) -> Result<(), String> {
        Ok(())
    }

    fn description(&self) -> String {
        String::new()
    }
}

impl<F> Validator for F
where
    F: Fn(&ParsedMessage, Option<&RuleValue>) -> Assertion + Send + Sync,
{
    fn assert(&self, msg: &ParsedMessage, value: Option<&RuleValue>) -> Assertion {
        self(msg, value)
    }
}

pub struct RuleEntry {
    pub default_severity: Severity,
    validator: Box<dyn Validator>,
}

impl RuleEntry {
    pub fn validator(&self) -> &dyn Validator {
        self.validator.as_ref()
    }
}

/// Rule name → implementation. Built once at startup, read-only afterwards.
#[derive(Default)]
pub struct Registry {
    rules: BTreeMap<String, RuleEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every builtin rule.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (name, severity, validator) in builtin_rules() {
            let registered = registry.register_boxed(name, severity, validator);
            if let Err(e) = &registered {
                error!(error = %e, "builtin rule not registered");
            }
            debug_assert!(registered.is_ok(), "builtin rule names must be unique");
        }
        debug!(rules = registry.len(), "builtin registry ready");
        registry
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        default_severity: Severity,
        validator: impl Validator + 'static,
    ) -> Result<(), RegistryError> {
        self.register_boxed(name.into(), default_severity, Box::new(validator))
    }

    fn register_boxed(
        &mut self,
        name: String,
        default_severity: Severity,
        validator: Box<dyn Validator>,
    ) -> Result<(), RegistryError> {
        if self.rules.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        self.rules.insert(
            name,
            RuleEntry {
                default_severity,
                validator,
            },
        );
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RuleEntry> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleEntry)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v))
    }
}

type Builtin = (String, Severity, Box<dyn Validator>);

fn builtin_rules() -> Vec<Builtin> {
    use content::{CaseRule, EmptyRule, EnumRule, FullStopRule, MaxLengthRule, MinLengthRule};
    use layout::{HeaderTrimRule, LeadingBlankRule, MaxLineLengthRule};
    use Part::*;

    let mut out: Vec<Builtin> = Vec::new();
    let mut add = |name: String, severity: Severity, v: Box<dyn Validator>| {
        out.push((name, severity, v));
    };
    for part in [Header, Type, Scope, Subject, Body] {
        add(format!("{}-case", part.name()), Severity::Error, Box::new(CaseRule(part)));
    }
    for part in [Type, Scope, Subject, Body, Footer] {
        add(format!("{}-empty", part.name()), Severity::Error, Box::new(EmptyRule(part)));
    }
    for part in [Type, Scope] {
        add(format!("{}-enum", part.name()), Severity::Error, Box::new(EnumRule(part)));
    }
    for part in [Header, Type, Scope, Subject, Body, Footer] {
        add(format!("{}-max-length", part.name()), Severity::Error, Box::new(MaxLengthRule(part)));
        add(format!("{}-min-length", part.name()), Severity::Error, Box::new(MinLengthRule(part)));
    }
    for part in [Header, Subject, Body] {
        add(format!("{}-full-stop", part.name()), Severity::Error, Box::new(FullStopRule(part)));
    }
    for part in [Body, Footer] {
        add(format!("{}-leading-blank", part.name()), Severity::Warning, Box::new(LeadingBlankRule(part)));
        add(format!("{}-max-line-length", part.name()), Severity::Error, Box::new(MaxLineLengthRule(part)));
    }
    add("header-trim".into(), Severity::Error, Box::new(HeaderTrimRule));
    add("references-empty".into(), Severity::Warning, Box::new(references::ReferencesEmptyRule));
    out
}
