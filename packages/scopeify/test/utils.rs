//! Scopeify Test Utils

#![allow(dead_code)]

use regex::Regex;
use scopeify::{scopeify, MappingCategory, NameMapping, ScopeFn, ScopeOptions, ScopeifyResult};

/// Scoper that appends `_1` to every name, whatever the source.
pub fn suffix_one(_source: &str) -> ScopeFn {
    Box::new(|name: &str| format!("{}_1", name))
}

pub fn options() -> ScopeOptions {
    ScopeOptions::default().with_scoper_factory(suffix_one)
}

pub fn scope(css: &str) -> ScopeifyResult {
    scopeify(css, &options())
}

pub fn scope_with(css: &str, options: ScopeOptions) -> ScopeifyResult {
    scopeify(css, &options.with_scoper_factory(suffix_one))
}

pub fn extract_css_content(css: &str) -> String {
    let re1 = Regex::new(r"\s+").unwrap();
    let re2 = Regex::new(r"\{\s+").unwrap();
    let re3 = Regex::new(r"\s+\}").unwrap();

    let mut result = re1.replace_all(css, " ").to_string();
    result = re2.replace_all(&result, "{").to_string();
    result = re3.replace_all(&result, "}").to_string();
    result.trim().to_string()
}

pub fn assert_equal_css(actual: &str, expected: &str) {
    let actual_css = extract_css_content(actual);
    let expected_css = extract_css_content(expected);
    assert_eq!(
        actual_css, expected_css,
        "Expected '{}' to equal '{}'",
        actual_css, expected_css
    );
}

/// Assert that `category` holds exactly `pairs`, in order.
pub fn assert_mapping(mapping: &NameMapping, category: MappingCategory, pairs: &[(&str, &str)]) {
    let actual: Vec<(&str, &str)> = mapping
        .category(category)
        .iter()
        .map(|(original, scoped)| (original.as_str(), scoped.as_str()))
        .collect();
    assert_eq!(actual, pairs, "unexpected {:?} mapping", category);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_css_content() {
        let css = "  \n  one {  color: red; }  \n  ";
        let result = extract_css_content(css);
        assert_eq!(result, "one {color: red;}");
    }
}
