//! Selector Scoping
//!
//! Tokenizes selectors, classifies each fragment and rewrites the in-scope ones.

mod rewriter;
mod token;
mod tokenizer;

pub use rewriter::{rewrite, RewriteResult, ELEMENT_MARKER};
pub use token::{
    class_selector, classify, id_selector, unprefixed, SelectorToken, TokenCategory,
    ATTRIBUTE_CLASS_MARKER, ATTRIBUTE_ID_MARKER,
};
pub use tokenizer::{
    next_token, normalize_class_attributes, tokenize, Tokens, ATTRIBUTE_SELECTOR_RE,
};
