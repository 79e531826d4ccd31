//! Part-generic content rules: case, empty, enum, length, full stop.

use super::case::{strip_quoted, CaseStyle};
use super::{Assertion, Part, Validator};
use crate::models::{ParsedMessage, RuleValue};

/// Scopes may list several names separated by `/`, `\` or `,`.
fn scope_items(scope: &str) -> Vec<String> {
    scope
        .split(['/', '\\', ','])
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Present, non-empty text of `part`, split into scopes for `Part::Scope`.
fn items(part: Part, msg: &ParsedMessage) -> Option<Vec<String>> {
    let text = part.text(msg)?;
    if text.trim().is_empty() {
        return None;
    }
    Some(match part {
        Part::Scope => scope_items(&text),
        _ => vec![text],
    })
}

fn case_styles(value: Option<&RuleValue>) -> Result<Vec<CaseStyle>, String> {
    let names = value
        .and_then(RuleValue::to_list)
        .ok_or_else(|| "expected a case style or a list of case styles".to_string())?;
    if names.is_empty() {
        return Err("expected at least one case style".into());
    }
    names
        .iter()
        .map(|n| CaseStyle::parse(n).ok_or_else(|| format!("unknown case style '{n}'")))
        .collect()
}

fn length_limit(value: Option<&RuleValue>) -> Result<usize, String> {
    value
        .and_then(RuleValue::as_int)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| "expected a non-negative length".to_string())
}

pub struct CaseRule(pub Part);

impl Validator for CaseRule {
    fn assert(&self, msg: &ParsedMessage, value: Option<&RuleValue>) -> Assertion {
        let (Some(items), Ok(styles)) = (items(self.0, msg), case_styles(value)) else {
            return Assertion::NotApplicable;
        };
        // case only applies to text that starts with a letter
        let cased: Vec<&String> = items
            .iter()
            .filter(|item| strip_quoted(item).starts_with(char::is_alphabetic))
            .collect();
        if cased.is_empty() {
            return Assertion::NotApplicable;
        }
        let holds = cased
            .iter()
            .all(|item| styles.iter().any(|style| style.matches(item)));
        let names: Vec<&str> = styles.iter().map(|s| s.name()).collect();
        Assertion::evaluated(holds, self.0.name(), format!("be {}", names.join(" or ")))
    }

    fn check_options(&self, value: Option<&RuleValue>) -> Result<(), String> {
        case_styles(value).map(|_| ())
    }

    fn description(&self) -> String {
        format!("{} is in one of the given case styles", self.0.name())
    }
}

pub struct EmptyRule(pub Part);

impl Validator for EmptyRule {
    fn assert(&self, msg: &ParsedMessage, _value: Option<&RuleValue>) -> Assertion {
        let empty = self.0.text(msg).map_or(true, |t| t.trim().is_empty());
        Assertion::evaluated(empty, self.0.name(), "be empty")
    }

    fn description(&self) -> String {
        format!("{} is empty", self.0.name())
    }
}

pub struct EnumRule(pub Part);

impl Validator for EnumRule {
    fn assert(&self, msg: &ParsedMessage, value: Option<&RuleValue>) -> Assertion {
        let (Some(items), Some(allowed)) = (items(self.0, msg), value.and_then(RuleValue::to_list))
        else {
            return Assertion::NotApplicable;
        };
        let holds = items.iter().all(|item| allowed.contains(item));
        Assertion::evaluated(
            holds,
            self.0.name(),
            format!("be one of [{}]", allowed.join(", ")),
        )
    }

    fn check_options(&self, value: Option<&RuleValue>) -> Result<(), String> {
        match value.and_then(RuleValue::to_list) {
            Some(_) => Ok(()),
            None => Err("expected a list of allowed values".into()),
        }
    }

    fn description(&self) -> String {
        format!("{} is one of the allowed values", self.0.name())
    }
}

pub struct MaxLengthRule(pub Part);

impl Validator for MaxLengthRule {
    fn assert(&self, msg: &ParsedMessage, value: Option<&RuleValue>) -> Assertion {
        let (Some(text), Ok(max)) = (self.0.text(msg), length_limit(value)) else {
            return Assertion::NotApplicable;
        };
        if text.is_empty() {
            return Assertion::NotApplicable;
        }
        Assertion::evaluated(
            text.chars().count() <= max,
            self.0.name(),
            format!("have at most {max} characters"),
        )
    }

    fn check_options(&self, value: Option<&RuleValue>) -> Result<(), String> {
        length_limit(value).map(|_| ())
    }

    fn description(&self) -> String {
        format!("{} length is within the given maximum", self.0.name())
    }
}

pub struct MinLengthRule(pub Part);

impl Validator for MinLengthRule {
    fn assert(&self, msg: &ParsedMessage, value: Option<&RuleValue>) -> Assertion {
        let (Some(text), Ok(min)) = (self.0.text(msg), length_limit(value)) else {
            return Assertion::NotApplicable;
        };
        if text.is_empty() {
            return Assertion::NotApplicable;
        }
        Assertion::evaluated(
            text.chars().count() >= min,
            self.0.name(),
            format!("have at least {min} characters"),
        )
    }

    fn check_options(&self, value: Option<&RuleValue>) -> Result<(), String> {
        length_limit(value).map(|_| ())
    }

    fn description(&self) -> String {
        format!("{} length is at least the given minimum", self.0.name())
    }
}

pub struct FullStopRule(pub Part);

impl Validator for FullStopRule {
    fn assert(&self, msg: &ParsedMessage, value: Option<&RuleValue>) -> Assertion {
        let Some(text) = self.0.text(msg).filter(|t| !t.trim().is_empty()) else {
            return Assertion::NotApplicable;
        };
        let stop = value.and_then(RuleValue::as_text).unwrap_or(".");
        Assertion::evaluated(
            text.trim_end().ends_with(stop),
            self.0.name(),
            format!("end with '{stop}'"),
        )
    }

    fn check_options(&self, value: Option<&RuleValue>) -> Result<(), String> {
        match value {
            None => Ok(()),
            Some(RuleValue::Text(s)) if !s.is_empty() => Ok(()),
            Some(_) => Err("expected a non-empty stop character".into()),
        }
    }

    fn description(&self) -> String {
        format!("{} ends with the given character", self.0.name())
    }
}
