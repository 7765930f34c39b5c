//! Declaration Scoping
//!
//! Keyframe names, animation references and font-face families. These share
//! the scoper and mapping of the selector pass but work on at-rule parameters
//! and declaration values instead of selectors.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::css_rules::{split_on_top_level_commas, unescape_in_strings};
use crate::mapping::{MappingCategory, NameMapping};

static KEYFRAMES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)^(@(?:-webkit-|-moz-|-o-)?keyframes\s+)(["']?)(.+?)(["']?)(\s*)$"#).unwrap()
});

/// Call `rewrite_value(property, value)` for every `property: value` in a rule
/// body and splice in the values it returns. The property is lowercased; the
/// value is trimmed and has string placeholders restored.
pub fn rewrite_declarations<F>(content: &str, mut rewrite_value: F) -> String
where
    F: FnMut(&str, &str) -> Option<String>,
{
    content
        .split(';')
        .map(|declaration| {
            let Some(colon) = declaration.find(':') else {
                return declaration.to_string();
            };
            let property = declaration[..colon].trim().to_ascii_lowercase();
            let raw_value = &declaration[colon + 1..];
            let value = raw_value.trim();
            if property.is_empty() || value.is_empty() {
                return declaration.to_string();
            }

            match rewrite_value(&property, &unescape_in_strings(value)) {
                Some(new_value) => {
                    let leading = &raw_value[..raw_value.len() - raw_value.trim_start().len()];
                    let trailing = &raw_value[raw_value.trim_end().len()..];
                    format!(
                        "{}{}{}{}",
                        &declaration[..=colon],
                        leading,
                        new_value,
                        trailing
                    )
                }
                None => declaration.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(";")
}

/// Scope a bare keyframes name and record it.
pub fn scope_keyframes_name(
    name: &str,
    mapping: &mut NameMapping,
    scoper: &dyn Fn(&str) -> String,
) -> String {
    let scoped = scoper(name);
    tracing::debug!(original = %name, scoped = %scoped, "scoped keyframes");
    mapping.insert(MappingCategory::Keyframes, name, scoped.clone());
    scoped
}

/// Rewrite the name of a `@keyframes name` prelude, keeping any quotes.
/// Returns `None` for other at-rules.
pub fn scope_keyframes_selector(
    selector: &str,
    mapping: &mut NameMapping,
    scoper: &dyn Fn(&str) -> String,
) -> Option<String> {
    let caps = KEYFRAMES_RE.captures(selector)?;
    let start = caps.get(1).map(|m| m.as_str()).unwrap_or("");
    let open_quote = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    let name = caps.get(3).map(|m| m.as_str()).unwrap_or("");
    let close_quote = caps.get(4).map(|m| m.as_str()).unwrap_or("");
    let end_spaces = caps.get(5).map(|m| m.as_str()).unwrap_or("");

    let scoped = scope_keyframes_name(name, mapping, scoper);
    Some(format!(
        "{}{}{}{}{}",
        start, open_quote, scoped, close_quote, end_spaces
    ))
}

/// In every comma separated animation, replace the first name that exactly
/// equals a known keyframes name. Names inside functions are never touched.
pub fn scope_animation_value(value: &str, keyframes: &IndexMap<String, String>) -> Option<String> {
    if keyframes.is_empty() {
        return None;
    }

    let mut result = String::with_capacity(value.len());
    let mut changed = false;
    let layers = split_on_top_level_commas(value);
    for (index, layer) in layers.iter().enumerate() {
        if index > 0 {
            result.push(',');
        }
        match scope_animation_layer(layer, keyframes) {
            Some(scoped) => {
                result.push_str(&scoped);
                changed = true;
            }
            None => result.push_str(layer),
        }
    }

    changed.then_some(result)
}

fn scope_animation_layer(layer: &str, keyframes: &IndexMap<String, String>) -> Option<String> {
    let bytes = layer.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        match byte {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b'"' | b'\'' => {
                let start = i + 1;
                let end = layer[start..]
                    .find(byte as char)
                    .map_or(layer.len(), |offset| start + offset);
                if depth == 0 {
                    if let Some(scoped) = keyframes.get(&layer[start..end]) {
                        return Some(format!("{}{}{}", &layer[..start], scoped, &layer[end..]));
                    }
                }
                i = end + 1;
                continue;
            }
            _ if is_ident_byte(byte) => {
                let start = i;
                while i < bytes.len() && is_ident_byte(bytes[i]) {
                    i += 1;
                }
                if depth == 0 {
                    if let Some(scoped) = keyframes.get(&layer[start..i]) {
                        return Some(format!("{}{}{}", &layer[..start], scoped, &layer[i..]));
                    }
                }
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' || byte >= 0x80
}

/// Scope the family declared by a `@font-face` rule. Quotes are stripped to get
/// the name and kept in the rewritten value.
pub fn scope_font_face_family(
    value: &str,
    mapping: &mut NameMapping,
    scoper: &dyn Fn(&str) -> String,
) -> String {
    let unquoted = value.replace(['"', '\''], "");
    let family = unquoted.trim();
    if family.is_empty() {
        return value.to_string();
    }

    let scoped = scoper(family);
    tracing::debug!(original = %family, scoped = %scoped, "scoped font face");
    mapping.insert(MappingCategory::FontFaces, family, scoped.clone());
    value.replacen(family, &scoped, 1)
}

/// Rename families of a `font-family` list that were declared by `@font-face`.
pub fn scope_font_family_references(
    value: &str,
    font_faces: &IndexMap<String, String>,
) -> Option<String> {
    if font_faces.is_empty() {
        return None;
    }

    let mut changed = false;
    let families: Vec<String> = split_on_top_level_commas(value)
        .into_iter()
        .map(|family| {
            let unquoted = family.replace(['"', '\''], "");
            match font_faces.get(unquoted.trim()) {
                Some(scoped) => {
                    changed = true;
                    family.replacen(unquoted.trim(), scoped, 1)
                }
                None => family.to_string(),
            }
        })
        .collect();

    changed.then(|| families.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_declarations_preserves_spacing() {
        let content = " color: red;  animation :  spin 1s ; ";
        let result = rewrite_declarations(content, |property, value| {
            (property == "animation").then(|| value.replace("spin", "spin_1"))
        });
        assert_eq!(result, " color: red;  animation :  spin_1 1s ; ");
    }

    #[test]
    fn test_rewrite_declarations_skips_fragments_without_colon() {
        let content = " color: #3869D4;. ";
        let result = rewrite_declarations(content, |_, _| Some("x".to_string()));
        assert_eq!(result, " color: x;. ");
    }
}
