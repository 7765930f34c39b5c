#![deny(clippy::all)]

/**
 * Scopeify - CSS name scoping
 *
 * Renames every class, id, element, keyframe and font-face of a stylesheet to a
 * deterministic scoped name and reports the mapping from original to scoped names.
 */

pub mod css_rules;
pub mod declarations;
mod driver;
mod error;
pub mod mapping;
pub mod options;
pub mod scoper;
pub mod selector;

// Re-exports
pub use driver::{scopeify, Scopeify, ScopeifyResult};
pub use error::{Result, ScopeError, ScopeWarning};
pub use mapping::{MappingCategory, NameMapping};
pub use options::{AsteriskName, ScopeConfig, ScopeOptions, Stage, StripComments};
pub use scoper::{make_scoper, NameScoper, ScopeFn};
pub use selector::{classify, rewrite, tokenize, RewriteResult, SelectorToken, TokenCategory};

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
