//! Commit message parser.
//!
//! Splits a raw message into header, body, and footer:
//! - The header is the first line: `type(scope)!: subject`. Scope and `!`
//!   are optional; the header is split on its first colon.
//! - Paragraphs after the header form the body.
//! - The last paragraph is the footer when every line in it is a
//!   `Key: value` or `Key #value` token (continuation lines may be indented).
//!
//! Only an empty header is a parse error. A header without a colon parses
//! with empty type and subject so rules can report what is missing.

use crate::error::ParseError;
use crate::models::{KeyValue, ParsedMessage};
use regex::Regex;
use std::sync::LazyLock;

static FOOTER_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<key>BREAKING[ -]CHANGE|[A-Za-z][A-Za-z0-9-]*)(?:: (?P<text>.*)| (?P<issue>#.*))$")
        .expect("footer token regex")
});

/// Parse a raw commit message.
pub fn parse(raw: &str) -> Result<ParsedMessage, ParseError> {
    let raw = raw.replace("\r\n", "\n");
    let raw = raw.trim_end().to_string();
    let header = raw.lines().next().unwrap_or_default().to_string();
    if header.trim().is_empty() {
        return Err(ParseError::EmptyHeader);
    }

    let (commit_type, scope, subject, bang) = split_header(&header);

    let mut paragraphs = paragraphs(raw.lines().skip(1));
    let footer = match paragraphs.last() {
        Some(last) => parse_footer(last),
        None => None,
    };
    let footer_raw = match footer {
        Some(_) => paragraphs.pop().map(|p| p.join("\n")),
        None => None,
    };
    let body = if paragraphs.is_empty() {
        None
    } else {
        Some(
            paragraphs
                .iter()
                .map(|p| p.join("\n"))
                .collect::<Vec<_>>()
                .join("\n\n"),
        )
    };

    let breaking = bang
        || footer
            .as_ref()
            .is_some_and(|tokens| tokens.iter().any(|t| is_breaking_key(&t.key)));

    Ok(ParsedMessage {
        raw,
        header,
        commit_type,
        scope,
        subject,
        body,
        footer,
        footer_raw,
        breaking,
    })
}

fn is_breaking_key(key: &str) -> bool {
    key == "BREAKING CHANGE" || key == "BREAKING-CHANGE"
}

/// Returns `(type, scope, subject, breaking_bang)`.
fn split_header(header: &str) -> (String, Option<String>, String, bool) {
    let Some((prefix, subject)) = header.split_once(':') else {
        return (String::new(), None, String::new(), false);
    };
    let subject = subject.trim().to_string();
    let prefix = prefix.trim();
    let (prefix, bang) = match prefix.strip_suffix('!') {
        Some(p) => (p, true),
        None => (prefix, false),
    };
    if let Some((ty, rest)) = prefix.split_once('(') {
        if let Some(scope) = rest.strip_suffix(')') {
            let scope = scope.trim();
            let scope = (!scope.is_empty()).then(|| scope.to_string());
            return (ty.trim().to_string(), scope, subject, bang);
        }
    }
    (prefix.to_string(), None, subject, bang)
}

/// Group lines into blank-line separated paragraphs, dropping the blanks.
fn paragraphs<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<Vec<&'a str>> {
    let mut out: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn parse_footer(paragraph: &[&str]) -> Option<Vec<KeyValue>> {
    let mut tokens: Vec<KeyValue> = Vec::new();
    for line in paragraph {
        if let Some(caps) = FOOTER_TOKEN.captures(line) {
            let value = caps
                .name("text")
                .or_else(|| caps.name("issue"))
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default();
            tokens.push(KeyValue::new(&caps["key"], value));
        } else if line.starts_with([' ', '\t']) {
            // continuation of the previous token's value
            let last = tokens.last_mut()?;
            last.value.push('\n');
            last.value.push_str(line.trim());
        } else {
            return None;
        }
    }
    (!tokens.is_empty()).then_some(tokens)
}
