//! Selector Tokenizer
//!
//! Splits one selector into the fragments that may need scoping. Combinators
//! are separators and never become tokens.

use once_cell::sync::Lazy;
use regex::{Match, Regex};
use smallvec::SmallVec;

use crate::css_rules::COMMENT_PLACEHOLDER;

use super::token::{ATTRIBUTE_CLASS_MARKER, ATTRIBUTE_ID_MARKER};

pub type Tokens = SmallVec<[String; 8]>;

/// `[class=...]` / `[id~="..."]` and the other value operators.
/// Groups: 1 = attribute name, 2 = operator, 3 = opening quote, 4 = value.
pub static ATTRIBUTE_SELECTOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\[\s*(class|id)\s*([*^$~|]?=)\s*(["']?)([^"'\]]*?)["']?\s*\]"#).unwrap()
});

static CLASS_EXACT_MATCH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(\s*class\s*)=").unwrap());

// Order matters: comment placeholder and any other attribute selector (both skipped),
// class/id, pseudo with a non-selector argument, pseudo, word, `*`.
static SIMPLE_SELECTOR_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"{}|\[[^\]]*\]|[.#][\w-]+|:(?:nth-[\w-]+|lang|dir)\([^)]*\)|::?[\w-]+|\w+|\*",
        regex::escape(COMMENT_PLACEHOLDER)
    );
    Regex::new(&pattern).unwrap()
});

/// Turn `[class=x]` into `[class~=x]`. Scoped elements carry several classes,
/// so an exact match would stop matching.
pub fn normalize_class_attributes(selector: &str) -> String {
    CLASS_EXACT_MATCH_RE
        .replace_all(selector, "[${1}~=")
        .into_owned()
}

/// Next simple-selector match at or after `from`.
pub fn next_token(selector: &str, from: usize) -> Option<Match<'_>> {
    SIMPLE_SELECTOR_RE.find_at(selector, from)
}

pub fn tokenize(selector: &str) -> Tokens {
    let mut tokens = Tokens::new();
    if selector
        .trim_start()
        .starts_with(|c: char| c.is_ascii_digit())
    {
        return tokens;
    }

    if ATTRIBUTE_SELECTOR_RE.is_match(selector) {
        attribute_pass(selector, &mut tokens);
    } else {
        plain_pass(selector, &mut tokens);
    }
    tokens
}

fn plain_pass(segment: &str, tokens: &mut Tokens) {
    let mut cursor = 0;
    while let Some(m) = next_token(segment, cursor) {
        cursor = m.end();
        if !is_skipped(m.as_str()) {
            tokens.push(m.as_str().to_string());
        }
    }
}

/// Comments, attribute selectors without a class or id, and numbers are never
/// scoped.
fn is_skipped(token: &str) -> bool {
    token == COMMENT_PLACEHOLDER
        || token.starts_with('[')
        || token.starts_with(|c: char| c.is_ascii_digit())
}

fn attribute_pass(selector: &str, tokens: &mut Tokens) {
    let mut cursor = 0;
    for caps in ATTRIBUTE_SELECTOR_RE.captures_iter(selector) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        plain_pass(&selector[cursor..whole.start()], tokens);
        cursor = whole.end();

        let name = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let value = caps.get(4).map(|m| m.as_str()).unwrap_or("");
        if value.is_empty() {
            continue;
        }
        let marker = if name == "id" {
            ATTRIBUTE_ID_MARKER
        } else {
            ATTRIBUTE_CLASS_MARKER
        };
        tokens.push(format!("{}{}", marker, value));
    }
    plain_pass(&selector[cursor..], tokens);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_token_resumes_from_cursor() {
        let selector = "div > .bro";
        let first = next_token(selector, 0).unwrap();
        assert_eq!(first.as_str(), "div");
        let second = next_token(selector, first.end()).unwrap();
        assert_eq!(second.as_str(), ".bro");
        assert!(next_token(selector, second.end()).is_none());
    }

    #[test]
    fn test_plain_pass_skips_comments_and_numbers() {
        assert_eq!(tokenize(".a %COMMENT% .b").into_vec(), vec![".a", ".b"]);
        assert_eq!(
            tokenize("li:nth-child(2n+1) a:lang(en)").into_vec(),
            vec!["li", ":nth-child(2n+1)", "a", ":lang(en)"]
        );
        assert_eq!(tokenize("p:not(.x) 1x").into_vec(), vec!["p", ":not", ".x"]);
    }

    #[test]
    fn test_normalize_leaves_other_operators_alone() {
        assert_eq!(
            normalize_class_attributes(r#"td[class="a"], td[class*="b"], td[class~=c]"#),
            r#"td[class~="a"], td[class*="b"], td[class~=c]"#
        );
        assert_eq!(normalize_class_attributes("a[id=x]"), "a[id=x]");
    }
}
