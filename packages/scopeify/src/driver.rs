//! Scopeify Driver
//!
//! Runs one scoping pass over a stylesheet:
//!
//! 1. run the configured stages over the text,
//! 2. scope selectors, keyframes names and font-face families,
//! 3. rename animation and font-family references to the names recorded in 2,
//! 4. put comments back and close any block left open.
//!
//! References are handled in their own walk so that a `@keyframes` rule
//! declared after the rule using it is still picked up.

use crate::css_rules::{
    close_unbalanced_blocks, process_rules, split_on_top_level_commas, CssRule, ExtractedComments,
};
use crate::declarations::{
    rewrite_declarations, scope_animation_value, scope_font_face_family,
    scope_font_family_references, scope_keyframes_selector,
};
use crate::error::{Result, ScopeWarning};
use crate::mapping::NameMapping;
use crate::options::{ScopeConfig, ScopeOptions};
use crate::scoper::ScopeFn;
use crate::selector::rewrite;

/// Output of one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeifyResult {
    pub css: String,
    pub mapping: NameMapping,
    pub warnings: Vec<ScopeWarning>,
}

/// A reusable scoping pass. Every call to [`Scopeify::process`] starts from an
/// empty mapping, so one instance can serve many stylesheets, also in parallel.
#[derive(Debug, Clone, Default)]
pub struct Scopeify {
    options: ScopeOptions,
}

impl Scopeify {
    pub fn new(options: ScopeOptions) -> Self {
        Scopeify { options }
    }

    pub fn from_config(config: ScopeConfig) -> Result<Self> {
        Ok(Scopeify::new(config.into_options()?))
    }

    pub fn options(&self) -> &ScopeOptions {
        &self.options
    }

    pub fn process(&self, css: &str) -> ScopeifyResult {
        scopeify(css, &self.options)
    }
}

/// Scope one stylesheet.
pub fn scopeify(css: &str, options: &ScopeOptions) -> ScopeifyResult {
    // The suffix is derived from the text as given, before any stage runs.
    let scoper = options.scoper_for(css);

    let staged = options
        .stages
        .iter()
        .fold(css.to_string(), |text, stage| {
            tracing::trace!(stage = stage.name(), "running stage");
            stage.process(&text)
        });

    let (text, comments) = ExtractedComments::extract(&staged);
    let mut pass = ScopePass {
        options,
        scoper: &scoper,
        mapping: NameMapping::new(),
        warnings: Vec::new(),
    };
    let text = pass.scope_rules(&text);
    let text = pass.scope_references(&text);
    let css = close_unbalanced_blocks(&comments.restore(&text));

    tracing::debug!(
        names = pass.mapping.len(),
        warnings = pass.warnings.len(),
        "scoped stylesheet"
    );

    ScopeifyResult {
        css,
        mapping: pass.mapping,
        warnings: pass.warnings,
    }
}

struct ScopePass<'a> {
    options: &'a ScopeOptions,
    scoper: &'a ScopeFn,
    mapping: NameMapping,
    warnings: Vec<ScopeWarning>,
}

impl ScopePass<'_> {
    fn scope_rules(&mut self, css: &str) -> String {
        process_rules(css, |rule| self.scope_rule(rule))
    }

    fn scope_rule(&mut self, rule: CssRule) -> CssRule {
        if !rule.is_at_rule() {
            let selectors: Vec<&str> = split_on_top_level_commas(&rule.selector)
                .into_iter()
                .map(str::trim)
                .filter(|selector| !selector.is_empty())
                .collect();
            let result = rewrite(
                &rule.selector,
                &selectors,
                &mut self.mapping,
                &**self.scoper,
                self.options,
            );
            self.warnings.extend(result.warnings);
            return CssRule::new(result.selector, rule.content);
        }

        if rule.is_grouping_at_rule() {
            let content = self.scope_rules(&rule.content);
            return CssRule::new(rule.selector, content);
        }

        let is_keyframes = rule
            .at_rule_name()
            .is_some_and(|name| name.ends_with("keyframes"));
        let is_font_face = rule.at_rule_name() == Some("@font-face");

        if is_keyframes && self.options.keyframes {
            // The body is a list of keyframe selectors, never descended into.
            if let Some(selector) =
                scope_keyframes_selector(&rule.selector, &mut self.mapping, &**self.scoper)
            {
                return CssRule::new(selector, rule.content);
            }
        } else if is_font_face && self.options.font_faces {
            let mapping = &mut self.mapping;
            let scoper = &**self.scoper;
            let content = rewrite_declarations(&rule.content, |property, value| {
                (property == "font-family").then(|| scope_font_face_family(value, mapping, scoper))
            });
            return CssRule::new(rule.selector, content);
        }
        rule
    }

    fn scope_references(&self, css: &str) -> String {
        if self.mapping.keyframes.is_empty() && self.mapping.font_faces.is_empty() {
            return css.to_string();
        }
        process_rules(css, |rule| self.scope_reference_rule(rule))
    }

    fn scope_reference_rule(&self, rule: CssRule) -> CssRule {
        if rule.is_grouping_at_rule() {
            let content = self.scope_references(&rule.content);
            return CssRule::new(rule.selector, content);
        }
        if rule.is_at_rule() {
            return rule;
        }

        let content = rewrite_declarations(&rule.content, |property, value| {
            if self.options.keyframes && property.starts_with("animation") {
                scope_animation_value(value, &self.mapping.keyframes)
            } else if self.options.font_faces && property == "font-family" {
                scope_font_family_references(value, &self.mapping.font_faces)
            } else {
                None
            }
        });
        CssRule::new(rule.selector, content)
    }
}
