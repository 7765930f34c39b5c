//! CSS Rules
//!
//! A lightweight rule walker: splits stylesheet text into `selector { content }`
//! and `selector;` rules without building a tree, and lets a callback rewrite
//! each rule's selector and content. Whitespace and anything the callback does
//! not touch is preserved as is.

use once_cell::sync::Lazy;
use regex::Regex;

/// Stands in for a comment while rules are walked.
pub const COMMENT_PLACEHOLDER: &str = "%COMMENT%";
const BLOCK_PLACEHOLDER: &str = "%BLOCK%";
const COMMA_IN_PLACEHOLDER: &str = "%COMMA_IN_PLACEHOLDER%";
const SEMI_IN_PLACEHOLDER: &str = "%SEMI_IN_PLACEHOLDER%";
const COLON_IN_PLACEHOLDER: &str = "%COLON_IN_PLACEHOLDER%";
const OPEN_BRACE_IN_PLACEHOLDER: &str = "%OPEN_BRACE_IN_PLACEHOLDER%";
const CLOSE_BRACE_IN_PLACEHOLDER: &str = "%CLOSE_BRACE_IN_PLACEHOLDER%";

/// At-rules whose content is a list of rules that must be walked in turn.
pub const GROUPING_AT_RULES: &[&str] = &[
    "@media",
    "@supports",
    "@document",
    "@layer",
    "@container",
    "@scope",
    "@starting-style",
];

static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*[\s\S]*?\*/").unwrap());

static COMMENT_PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&regex::escape(COMMENT_PLACEHOLDER)).unwrap());

static CSS_COMMA_IN_PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(COMMA_IN_PLACEHOLDER).unwrap());

static CSS_SEMI_IN_PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(SEMI_IN_PLACEHOLDER).unwrap());

static CSS_COLON_IN_PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(COLON_IN_PLACEHOLDER).unwrap());

static CSS_OPEN_BRACE_IN_PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(OPEN_BRACE_IN_PLACEHOLDER).unwrap());

static CSS_CLOSE_BRACE_IN_PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(CLOSE_BRACE_IN_PLACEHOLDER).unwrap());

static RULE_RE: Lazy<Regex> = Lazy::new(|| {
    // (leading space and comments)(selector)(space)({%BLOCK%} | {%BLOCK% | ;)
    // The closing brace is optional so unterminated blocks still form a rule.
    let comment_ph = regex::escape(COMMENT_PLACEHOLDER);
    let block_ph = regex::escape(BLOCK_PLACEHOLDER);
    let pattern = format!(
        r"(\s*(?:{}\s*)*)([^;{{}}]+?)(\s*)((?:\{{{}\}}?\s*;?)|(?:\s*;))",
        comment_ph, block_ph
    );
    Regex::new(&pattern).unwrap()
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CssRule {
    pub selector: String,
    pub content: String,
}

impl CssRule {
    pub fn new(selector: String, content: String) -> Self {
        CssRule { selector, content }
    }

    pub fn is_at_rule(&self) -> bool {
        self.selector.starts_with('@')
    }

    /// Name of the at-rule including the `@`, e.g. `@media`.
    pub fn at_rule_name(&self) -> Option<&str> {
        if !self.is_at_rule() {
            return None;
        }
        let end = self
            .selector
            .find(|c: char| c.is_whitespace() || c == '(' || c == '"' || c == '\'')
            .unwrap_or(self.selector.len());
        Some(&self.selector[..end])
    }

    pub fn is_grouping_at_rule(&self) -> bool {
        self.at_rule_name()
            .is_some_and(|name| GROUPING_AT_RULES.contains(&name))
    }
}

struct EscapedBlocks {
    text: String,
    blocks: Vec<String>,
}

/// Comments pulled out of a stylesheet so that the walker never sees them.
#[derive(Debug, Default)]
pub struct ExtractedComments {
    comments: Vec<String>,
}

impl ExtractedComments {
    /// Replace every comment in `css` with a placeholder.
    pub fn extract(css: &str) -> (String, Self) {
        let mut comments = Vec::new();
        let text = COMMENT_RE
            .replace_all(css, |caps: &regex::Captures| {
                comments.push(caps[0].to_string());
                COMMENT_PLACEHOLDER
            })
            .into_owned();
        (text, ExtractedComments { comments })
    }

    /// Put the comments back in their original order.
    pub fn restore(&self, css: &str) -> String {
        let mut next = 0;
        COMMENT_PLACEHOLDER_RE
            .replace_all(css, |_caps: &regex::Captures| match self.comments.get(next) {
                Some(comment) => {
                    next += 1;
                    comment.clone()
                }
                None => COMMENT_PLACEHOLDER.to_string(),
            })
            .into_owned()
    }
}

/// Process CSS rules by applying a callback to each top-level rule.
pub fn process_rules<F>(input: &str, mut rule_callback: F) -> String
where
    F: FnMut(CssRule) -> CssRule,
{
    let escaped = escape_in_strings(input);
    let escaped_blocks = escape_blocks(&escaped, BLOCK_PLACEHOLDER);
    let block_start = format!("{{{}", BLOCK_PLACEHOLDER);

    let mut next_block_index = 0;
    let escaped_result = RULE_RE.replace_all(
        &escaped_blocks.text,
        |caps: &regex::Captures| {
            let prefix = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let selector = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            let middle = caps.get(3).map(|m| m.as_str()).unwrap_or("");
            let suffix = caps.get(4).map(|m| m.as_str()).unwrap_or("");

            let mut content = String::new();
            let mut content_prefix = "";
            let mut final_suffix = suffix;

            if let Some(rest) = suffix.strip_prefix(block_start.as_str()) {
                if let Some(block) = escaped_blocks.blocks.get(next_block_index) {
                    content = block.clone();
                    next_block_index += 1;
                }
                final_suffix = rest;
                content_prefix = "{";
            }

            let rule = rule_callback(CssRule::new(selector.to_string(), content));
            format!(
                "{}{}{}{}{}{}",
                prefix, rule.selector, middle, content_prefix, rule.content, final_suffix
            )
        },
    );

    unescape_in_strings(&escaped_result)
}

/// Split on commas that are not nested in parentheses.
pub fn split_on_top_level_commas(text: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut parens = 0i32;
    let mut prev = 0;

    for (i, ch) in text.char_indices() {
        match ch {
            '(' => parens += 1,
            ')' => parens -= 1,
            ',' if parens == 0 => {
                result.push(&text[prev..i]);
                prev = i + 1;
            }
            _ => {}
        }
    }

    result.push(&text[prev..]);
    result
}

/// Append a `}` for every block left open at the end of the text.
pub fn close_unbalanced_blocks(css: &str) -> String {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut chars = css.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            chars.next();
            continue;
        }
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => {}
            None => match ch {
                '"' | '\'' => quote = Some(ch),
                '{' => depth += 1,
                '}' => depth = depth.saturating_sub(1),
                _ => {}
            },
        }
    }

    let mut closed = css.to_string();
    closed.extend(std::iter::repeat('}').take(depth));
    closed
}

/// Replace structural characters inside quoted strings with placeholders so
/// that they are not mistaken for CSS structure.
pub fn escape_in_strings(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut current_quote_char: Option<char> = None;
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            result.push(ch);
            if let Some(escaped) = chars.next() {
                result.push(escaped);
            }
            continue;
        }

        if let Some(quote) = current_quote_char {
            if ch == quote {
                current_quote_char = None;
            } else {
                let placeholder = match ch {
                    ';' => Some(SEMI_IN_PLACEHOLDER),
                    ',' => Some(COMMA_IN_PLACEHOLDER),
                    ':' => Some(COLON_IN_PLACEHOLDER),
                    '{' => Some(OPEN_BRACE_IN_PLACEHOLDER),
                    '}' => Some(CLOSE_BRACE_IN_PLACEHOLDER),
                    _ => None,
                };
                if let Some(ph) = placeholder {
                    result.push_str(ph);
                    continue;
                }
            }
        } else if ch == '\'' || ch == '"' {
            current_quote_char = Some(ch);
        }
        result.push(ch);
    }

    result
}

pub fn unescape_in_strings(input: &str) -> String {
    let result = CSS_COMMA_IN_PLACEHOLDER_RE.replace_all(input, ",");
    let result = CSS_SEMI_IN_PLACEHOLDER_RE.replace_all(&result, ";");
    let result = CSS_OPEN_BRACE_IN_PLACEHOLDER_RE.replace_all(&result, "{");
    let result = CSS_CLOSE_BRACE_IN_PLACEHOLDER_RE.replace_all(&result, "}");
    CSS_COLON_IN_PLACEHOLDER_RE
        .replace_all(&result, ":")
        .into_owned()
}

/// Replace the content of every top-level `{...}` block with `placeholder` and
/// return the blocks in order. A block never closed runs to the end of the text.
fn escape_blocks(input: &str, placeholder: &str) -> EscapedBlocks {
    let mut text = String::with_capacity(input.len());
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut block_start = 0;
    let mut chars = input.char_indices();

    while let Some((i, ch)) = chars.next() {
        match ch {
            '\\' => {
                let escaped = chars.next();
                if depth == 0 {
                    text.push(ch);
                    if let Some((_, next)) = escaped {
                        text.push(next);
                    }
                }
                continue;
            }
            '{' => {
                depth += 1;
                if depth == 1 {
                    text.push(ch);
                    block_start = i + 1;
                    continue;
                }
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    blocks.push(input[block_start..i].to_string());
                    text.push_str(placeholder);
                    text.push(ch);
                    continue;
                }
            }
            _ => {}
        }
        if depth == 0 {
            text.push(ch);
        }
    }

    if depth > 0 {
        blocks.push(input[block_start..].to_string());
        text.push_str(placeholder);
    }

    EscapedBlocks { text, blocks }
}
