//! Parsed commit message structure.

#[derive(Debug, Clone, PartialEq, Eq)]
/// A `Key: value` footer token.
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Structured view of a commit message. Immutable once parsed.
pub struct ParsedMessage {
    /// The message as given, line endings normalized.
    pub raw: String,
    /// First line, untrimmed.
    pub header: String,
    /// Empty when the header has no `type:` prefix.
    pub commit_type: String,
    pub scope: Option<String>,
    pub subject: String,
    pub body: Option<String>,
    pub footer: Option<Vec<KeyValue>>,
    /// Footer paragraph exactly as written, continuation indents included.
    pub footer_raw: Option<String>,
    pub breaking: bool,
}

impl ParsedMessage {
    /// Line following the header, if any.
    pub fn second_line(&self) -> Option<&str> {
        self.raw.lines().nth(1)
    }

    pub fn footer_text(&self) -> Option<String> {
        self.footer_raw.clone()
    }
}
