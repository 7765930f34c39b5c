//! Selector Tokens

use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix of the synthetic token made from a `[class...=value]` attribute selector.
pub const ATTRIBUTE_CLASS_MARKER: &str = "[.";

/// Prefix of the synthetic token made from an `[id...=value]` attribute selector.
pub const ATTRIBUTE_ID_MARKER: &str = "[#";

static ELEMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9]*$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Element,
    Class,
    Id,
    Attribute,
    Asterisk,
    Pseudo,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorToken {
    pub text: String,
    pub category: TokenCategory,
}

impl SelectorToken {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let category = classify(&text);
        SelectorToken { text, category }
    }

    /// True for attribute tokens built from an `[id...=value]` selector.
    pub fn is_id_attribute(&self) -> bool {
        self.category == TokenCategory::Attribute && self.text.starts_with(ATTRIBUTE_ID_MARKER)
    }
}

/// First matching rule wins. Attribute markers are checked before the element
/// pattern because they are synthesized by the tokenizer.
pub fn classify(token: &str) -> TokenCategory {
    if token == "*" {
        TokenCategory::Asterisk
    } else if token.starts_with('.') {
        TokenCategory::Class
    } else if token.starts_with('#') {
        TokenCategory::Id
    } else if token.starts_with(':') {
        TokenCategory::Pseudo
    } else if token.starts_with(ATTRIBUTE_CLASS_MARKER) || token.starts_with(ATTRIBUTE_ID_MARKER)
    {
        TokenCategory::Attribute
    } else if ELEMENT_RE.is_match(token) {
        TokenCategory::Element
    } else {
        TokenCategory::Unknown
    }
}

/// Strip one leading `.` or `#`.
pub fn unprefixed(name: &str) -> &str {
    name.strip_prefix('.')
        .or_else(|| name.strip_prefix('#'))
        .unwrap_or(name)
}

pub fn class_selector(name: &str) -> String {
    format!(".{}", name)
}

pub fn id_selector(name: &str) -> String {
    format!("#{}", name)
}
