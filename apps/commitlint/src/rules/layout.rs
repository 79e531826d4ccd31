//! Layout rules: blank-line separation, line lengths, header whitespace.

use super::{Assertion, Part, Validator};
use crate::models::{ParsedMessage, RuleValue};

fn blank(line: Option<&str>) -> bool {
    line.map_or(true, |l| l.trim().is_empty())
}

/// `body-leading-blank` / `footer-leading-blank`.
pub struct LeadingBlankRule(pub Part);

impl Validator for LeadingBlankRule {
    fn assert(&self, msg: &ParsedMessage, _value: Option<&RuleValue>) -> Assertion {
        let holds = match self.0 {
            Part::Body if msg.body.is_some() => blank(msg.second_line()),
            // a footer after a body is always its own paragraph
            Part::Footer if msg.footer.is_some() => msg.body.is_some() || blank(msg.second_line()),
            _ => return Assertion::NotApplicable,
        };
        Assertion::evaluated(holds, self.0.name(), "have a leading blank line")
    }

    fn description(&self) -> String {
        format!("{} is separated from the preceding section by a blank line", self.0.name())
    }
}

/// `body-max-line-length` / `footer-max-line-length`.
pub struct MaxLineLengthRule(pub Part);

impl MaxLineLengthRule {
    fn limit(value: Option<&RuleValue>) -> Option<usize> {
        value
            .and_then(RuleValue::as_int)
            .and_then(|n| usize::try_from(n).ok())
    }
}

impl Validator for MaxLineLengthRule {
    fn assert(&self, msg: &ParsedMessage, value: Option<&RuleValue>) -> Assertion {
        let (Some(text), Some(max)) = (self.0.text(msg), Self::limit(value)) else {
            return Assertion::NotApplicable;
        };
        let holds = text.lines().all(|l| l.chars().count() <= max);
        Assertion::evaluated(
            holds,
            format!("{} lines", self.0.name()),
            format!("have at most {max} characters"),
        )
    }

    fn check_options(&self, value: Option<&RuleValue>) -> Result<(), String> {
        Self::limit(value)
            .map(|_| ())
            .ok_or_else(|| "expected a non-negative line length".to_string())
    }

    fn description(&self) -> String {
        format!("every {} line is within the given length", self.0.name())
    }
}

/// `header-trim`: no leading or trailing whitespace around the header.
pub struct HeaderTrimRule;

impl Validator for HeaderTrimRule {
    fn assert(&self, msg: &ParsedMessage, _value: Option<&RuleValue>) -> Assertion {
        Assertion::evaluated(msg.header.trim() == msg.header, "header", "be trimmed")
    }

    fn description(&self) -> String {
        "header has no surrounding whitespace".into()
    }
}
