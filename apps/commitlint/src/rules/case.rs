//! Case styles used by the `*-case` rules.
//!
//! A string is "in" a case style when converting it to that style leaves it
//! unchanged. Quoted segments (backticks, single or double quotes) are removed
//! first since they often hold proper names. Callers decide what to do with
//! text that has no leading letter; see [`strip_quoted`].

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"`.*?`|".*?"|'.*?'"#).expect("quoted segment regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStyle {
    Lower,
    Upper,
    Camel,
    Kebab,
    Pascal,
    Sentence,
    Snake,
    Start,
}

impl CaseStyle {
    pub const ALL: [CaseStyle; 8] = [
        Self::Lower,
        Self::Upper,
        Self::Camel,
        Self::Kebab,
        Self::Pascal,
        Self::Sentence,
        Self::Snake,
        Self::Start,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "lower-case" | "lowercase" => Some(Self::Lower),
            "upper-case" | "uppercase" => Some(Self::Upper),
            "camel-case" => Some(Self::Camel),
            "kebab-case" => Some(Self::Kebab),
            "pascal-case" => Some(Self::Pascal),
            "sentence-case" | "sentencecase" => Some(Self::Sentence),
            "snake-case" => Some(Self::Snake),
            "start-case" => Some(Self::Start),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Lower => "lower-case",
            Self::Upper => "upper-case",
            Self::Camel => "camel-case",
            Self::Kebab => "kebab-case",
            Self::Pascal => "pascal-case",
            Self::Sentence => "sentence-case",
            Self::Snake => "snake-case",
            Self::Start => "start-case",
        }
    }

    pub fn convert(self, input: &str) -> String {
        match self {
            Self::Lower => input.to_lowercase(),
            Self::Upper => input.to_uppercase(),
            Self::Camel => camel(input),
            Self::Kebab => join_lower(input, "-"),
            Self::Pascal => upper_first(&camel(input)),
            Self::Sentence => upper_first(input),
            Self::Snake => join_lower(input, "_"),
            Self::Start => words(input)
                .iter()
                .map(|w| upper_first(w))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    pub fn matches(self, raw: &str) -> bool {
        let input = strip_quoted(raw);
        self.convert(&input) == input
    }
}

/// `raw` without quoted segments, trimmed.
pub fn strip_quoted(raw: &str) -> String {
    QUOTED.replace_all(raw, "").trim().to_string()
}

impl fmt::Display for CaseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Split into words on non-alphanumerics and on camel humps
/// (`fooBar` → `foo`, `Bar`; `XMLHttp` → `XML`, `Http`).
fn words(input: &str) -> Vec<String> {
    let mut out = Vec::new();
    for chunk in input.split(|c: char| !c.is_alphanumeric()) {
        let chars: Vec<char> = chunk.chars().collect();
        let mut start = 0;
        for i in 1..chars.len() {
            let prev = chars[i - 1];
            let cur = chars[i];
            let next_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            let hump = prev.is_lowercase() && cur.is_uppercase();
            let acronym_end = prev.is_uppercase() && cur.is_uppercase() && next_lower;
            if hump || acronym_end {
                out.push(chars[start..i].iter().collect());
                start = i;
            }
        }
        if start < chars.len() {
            out.push(chars[start..].iter().collect());
        }
    }
    out
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn camel(input: &str) -> String {
    words(input)
        .iter()
        .enumerate()
        .map(|(i, w)| {
            let lower = w.to_lowercase();
            if i == 0 {
                lower
            } else {
                upper_first(&lower)
            }
        })
        .collect()
}

fn join_lower(input: &str, sep: &str) -> String {
    words(input)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(sep)
}
