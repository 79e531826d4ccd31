//! Named base rule sets available to `extends`.

use crate::models::{Rule, RuleValue, Severity};

/// Identifiers accepted by `extends`, canonical names first.
pub const KNOWN_BASES: &[&str] = &[
    "conventional",
    "config-conventional",
    "@commitlint/config-conventional",
    "angular",
    "config-angular",
    "@commitlint/config-angular",
];

const CONVENTIONAL_TYPES: &[&str] = &[
    "build", "chore", "ci", "docs", "feat", "fix", "perf", "refactor", "revert", "style", "test",
];

const ANGULAR_TYPES: &[&str] = &[
    "build", "ci", "docs", "feat", "fix", "perf", "refactor", "revert", "style", "test",
];

const FORBIDDEN_SUBJECT_CASES: &[&str] = &["sentence-case", "start-case", "pascal-case", "upper-case"];

/// Rules of the base set named `id`, or `None` when the name is unknown.
pub fn base_rule_set(id: &str) -> Option<Vec<Rule>> {
    match id {
        "conventional" | "config-conventional" | "@commitlint/config-conventional" => {
            Some(conventional())
        }
        "angular" | "config-angular" | "@commitlint/config-angular" => Some(angular()),
        _ => None,
    }
}

fn list(items: &[&str]) -> RuleValue {
    RuleValue::List(items.iter().map(|s| s.to_string()).collect())
}

fn text(s: &str) -> RuleValue {
    RuleValue::Text(s.to_string())
}

fn conventional() -> Vec<Rule> {
    use Severity::{Error, Warning};
    vec![
        Rule::new("body-leading-blank", Warning),
        Rule::new("body-max-line-length", Error).with_value(RuleValue::Int(100)),
        Rule::new("footer-leading-blank", Warning),
        Rule::new("footer-max-line-length", Error).with_value(RuleValue::Int(100)),
        Rule::new("header-max-length", Error).with_value(RuleValue::Int(100)),
        Rule::new("header-trim", Error),
        Rule::new("subject-case", Error)
            .never()
            .with_value(list(FORBIDDEN_SUBJECT_CASES)),
        Rule::new("subject-empty", Error).never(),
        Rule::new("subject-full-stop", Error).never().with_value(text(".")),
        Rule::new("type-case", Error).with_value(text("lower-case")),
        Rule::new("type-empty", Error).never(),
        Rule::new("type-enum", Error).with_value(list(CONVENTIONAL_TYPES)),
    ]
}

fn angular() -> Vec<Rule> {
    use Severity::{Error, Warning};
    vec![
        Rule::new("body-leading-blank", Warning),
        Rule::new("footer-leading-blank", Warning),
        Rule::new("header-max-length", Error).with_value(RuleValue::Int(72)),
        Rule::new("scope-case", Error).with_value(text("lower-case")),
        Rule::new("subject-case", Error)
            .never()
            .with_value(list(FORBIDDEN_SUBJECT_CASES)),
        Rule::new("subject-empty", Error).never(),
        Rule::new("subject-full-stop", Error).never().with_value(text(".")),
        Rule::new("type-case", Error).with_value(text("lower-case")),
        Rule::new("type-empty", Error).never(),
        Rule::new("type-enum", Error).with_value(list(ANGULAR_TYPES)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Registry;

    #[test]
    fn every_known_base_resolves() {
        for id in KNOWN_BASES {
            assert!(base_rule_set(id).is_some(), "{id}");
        }
        assert!(base_rule_set("nonexistent").is_none());
    }

    #[test]
    fn base_rules_are_registered_builtins() {
        let registry = Registry::builtin();
        for id in ["conventional", "angular"] {
            for rule in base_rule_set(id).unwrap() {
                let entry = registry.get(&rule.name).expect("builtin");
                assert!(entry.validator().check_options(rule.value.as_ref()).is_ok());
            }
        }
    }
}
