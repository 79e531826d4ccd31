//! `references-empty`: issue references in the footer.

use super::{Assertion, Validator};
use crate::models::{ParsedMessage, RuleValue};
use regex::Regex;
use std::sync::LazyLock;

static ISSUE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\b[\w.-]+/[\w.-]+)?#\d+\b").expect("issue reference regex"));

/// Issue references (`#12`, `owner/repo#12`) found in footer tokens.
pub fn references(msg: &ParsedMessage) -> Vec<String> {
    msg.footer
        .iter()
        .flatten()
        .flat_map(|token| ISSUE_REF.find_iter(&token.value).map(|m| m.as_str().to_string()))
        .collect()
}

pub struct ReferencesEmptyRule;

impl Validator for ReferencesEmptyRule {
    fn assert(&self, msg: &ParsedMessage, _value: Option<&RuleValue>) -> Assertion {
        Assertion::evaluated(references(msg).is_empty(), "references", "be empty")
    }

    fn description(&self) -> String {
        "footer carries no issue references".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn finds_plain_and_qualified_references() {
        let msg = parse("fix: a\n\nCloses #12\nRefs: acme/widgets#7, #9").unwrap();
        assert_eq!(references(&msg), vec!["#12", "acme/widgets#7", "#9"]);
    }

    #[test]
    fn body_references_do_not_count() {
        let msg = parse("fix: a\n\nThis fixes the crash in #12.").unwrap();
        assert!(references(&msg).is_empty());
    }

    #[test]
    fn no_footer_means_empty() {
        let msg = parse("chore: cleanup").unwrap();
        assert!(matches!(
            ReferencesEmptyRule.assert(&msg, None),
            Assertion::Evaluated { holds: true, .. }
        ));
    }
}
