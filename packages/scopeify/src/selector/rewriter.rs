//! Selector Rewriter
//!
//! Scopes every in-scope token of a rule's selectors and rewrites the selector
//! list text in place, left to right. A cursor tracks how far the text has been
//! rewritten so that a token is only ever matched after the previous one.

use std::ops::Range;

use crate::css_rules::COMMENT_PLACEHOLDER;
use crate::error::ScopeWarning;
use crate::mapping::{MappingCategory, NameMapping};
use crate::options::ScopeOptions;

use super::token::{class_selector, id_selector, unprefixed, SelectorToken, TokenCategory};
use super::tokenizer::{normalize_class_attributes, tokenize, ATTRIBUTE_SELECTOR_RE};

/// Appended to element names so `div` and `.div` never scope to the same class.
pub const ELEMENT_MARKER: &str = "_el";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteResult {
    pub selector: String,
    pub warnings: Vec<ScopeWarning>,
}

/// What one token turns into.
struct Replacement {
    category: MappingCategory,
    original: String,
    /// Bare scoped name, recorded in the mapping.
    scoped: String,
    target: Target,
}

enum Target {
    /// Replace the token text itself with this selector.
    Selector(String),
    /// Replace the value inside the next matching `[class|id ...=value]`.
    AttributeValue { id: bool },
}

/// Rewrite `selector_list`, whose comma separated parts are `selectors`, recording
/// every scoped name in `mapping`.
pub fn rewrite(
    selector_list: &str,
    selectors: &[&str],
    mapping: &mut NameMapping,
    scoper: &dyn Fn(&str) -> String,
    options: &ScopeOptions,
) -> RewriteResult {
    let mut output = normalize_class_attributes(selector_list);
    let mut warnings = Vec::new();
    let mut cursor = 0;

    for selector in selectors {
        let selector = normalize_class_attributes(selector);
        let start = match output[cursor..].find(selector.as_str()) {
            Some(offset) => cursor + offset,
            None => cursor,
        };
        let mut selector_end = start + selector.len();
        cursor = start;

        for text in tokenize(&selector) {
            let token = SelectorToken::new(text);
            if token.category == TokenCategory::Unknown {
                tracing::warn!(
                    token = %token.text,
                    selector = %selector,
                    "unrecognized selector fragment left unscoped"
                );
                warnings.push(ScopeWarning::UnknownToken {
                    token: token.text.clone(),
                    selector: selector.clone(),
                });
                continue;
            }

            let Some(replacement) = plan_replacement(&token, options, scoper) else {
                continue;
            };
            tracing::debug!(
                category = ?replacement.category,
                original = %replacement.original,
                scoped = %replacement.scoped,
                "scoped selector name"
            );

            let applied = match &replacement.target {
                Target::Selector(new_text) => {
                    find_token(&output, cursor, &token.text).map(|index| {
                        splice(&mut output, index..index + token.text.len(), new_text)
                    })
                }
                Target::AttributeValue { id } => {
                    find_attribute_value(&output, cursor, *id, unprefixed_attribute(&token))
                        .map(|(value, bracket_end)| {
                            let (_, growth) = splice(&mut output, value, &replacement.scoped);
                            (offset(bracket_end, growth), growth)
                        })
                }
            };
            if let Some((next_cursor, growth)) = applied {
                cursor = next_cursor;
                selector_end = offset(selector_end, growth);
            }

            mapping.insert(replacement.category, replacement.original, replacement.scoped);
        }

        cursor = cursor.max(selector_end).min(output.len());
    }

    RewriteResult {
        selector: output,
        warnings,
    }
}

fn plan_replacement(
    token: &SelectorToken,
    options: &ScopeOptions,
    scoper: &dyn Fn(&str) -> String,
) -> Option<Replacement> {
    let scope = |name: &str| unprefixed(&scoper(name)).to_string();

    match token.category {
        TokenCategory::Pseudo | TokenCategory::Unknown => None,
        TokenCategory::Class => {
            if !options.classes {
                return None;
            }
            let original = unprefixed(&token.text);
            let scoped = scope(&join_whitespace(original));
            Some(Replacement {
                category: MappingCategory::Classes,
                original: original.to_string(),
                target: Target::Selector(class_selector(&scoped)),
                scoped,
            })
        }
        TokenCategory::Id => {
            if !options.ids {
                return None;
            }
            let original = unprefixed(&token.text);
            let scoped = scope(original);
            Some(Replacement {
                category: MappingCategory::Ids,
                original: original.to_string(),
                target: Target::Selector(id_selector(&scoped)),
                scoped,
            })
        }
        TokenCategory::Element => {
            if !options.elements {
                return None;
            }
            let name = format!(
                "{}{}",
                (options.element_name_transform)(&token.text),
                ELEMENT_MARKER
            );
            let scoped = scope(&name);
            Some(Replacement {
                category: MappingCategory::Elements,
                original: token.text.clone(),
                target: Target::Selector(class_selector(&scoped)),
                scoped,
            })
        }
        TokenCategory::Asterisk => {
            if !options.elements {
                return None;
            }
            let scoped = scope(&options.asterisk_name.resolve());
            Some(Replacement {
                category: MappingCategory::Elements,
                original: "*".to_string(),
                target: Target::Selector(class_selector(&scoped)),
                scoped,
            })
        }
        TokenCategory::Attribute => {
            let id = token.is_id_attribute();
            let original = unprefixed_attribute(token);
            let (enabled, category, scoped) = if id {
                (options.ids, MappingCategory::Ids, scope(original))
            } else {
                (
                    options.classes,
                    MappingCategory::Classes,
                    scope(&join_whitespace(original)),
                )
            };
            if !enabled {
                return None;
            }
            Some(Replacement {
                category,
                original: original.to_string(),
                scoped,
                target: Target::AttributeValue { id },
            })
        }
    }
}

/// `cell center` scopes as `cell_center`.
fn join_whitespace(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Attribute tokens carry a two character marker.
fn unprefixed_attribute(token: &SelectorToken) -> &str {
    token.text.get(2..).unwrap_or("")
}

/// Replace `range` and return the position right after the new text along with
/// how much the string grew.
fn splice(output: &mut String, range: Range<usize>, new_text: &str) -> (usize, isize) {
    let growth = new_text.len() as isize - range.len() as isize;
    let end = range.start + new_text.len();
    output.replace_range(range, new_text);
    (end, growth)
}

fn offset(position: usize, growth: isize) -> usize {
    (position as isize + growth).max(0) as usize
}

fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' || byte >= 0x80
}

/// Next exact occurrence of `token` at or after `from`, outside brackets, strings
/// and comment placeholders. The following character must end the name; element names must also
/// start one (`a` never matches inside `.a_el` or `:hover`).
fn find_token(haystack: &str, from: usize, token: &str) -> Option<usize> {
    let bytes = haystack.as_bytes();
    let needle = token.as_bytes();
    let starts_with_name = needle.first().copied().is_some_and(is_name_byte);
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = from;

    while i < bytes.len() {
        let byte = bytes[i];
        if byte == b'\\' {
            i += 2;
            continue;
        }
        if quote.is_none() && bytes[i..].starts_with(COMMENT_PLACEHOLDER.as_bytes()) {
            i += COMMENT_PLACEHOLDER.len();
            continue;
        }
        if let Some(open) = quote {
            if byte == open {
                quote = None;
            }
            i += 1;
            continue;
        }

        match byte {
            b'"' | b'\'' => quote = Some(byte),
            b'[' => depth += 1,
            b']' => depth = depth.saturating_sub(1),
            _ if depth == 0 && bytes[i..].starts_with(needle) => {
                let after_ok = bytes
                    .get(i + needle.len())
                    .map_or(true, |&next| !is_name_byte(next));
                let before_ok = !starts_with_name
                    || i == 0
                    || !matches!(bytes[i - 1], b'.' | b'#' | b':') && !is_name_byte(bytes[i - 1]);
                if after_ok && before_ok {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Range of the value inside the next `[class|id ...=value]` at or after `from`
/// whose value equals `value`, along with the end of that bracket.
fn find_attribute_value(
    haystack: &str,
    from: usize,
    id: bool,
    value: &str,
) -> Option<(Range<usize>, usize)> {
    let mut at = from;
    while let Some(caps) = ATTRIBUTE_SELECTOR_RE.captures_at(haystack, at) {
        let whole = caps.get(0)?;
        let name = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        if let Some(found) = caps.get(4) {
            if (name == "id") == id && found.as_str() == value {
                return Some((found.range(), whole.end()));
            }
        }
        at = whole.end();
    }
    None
}
