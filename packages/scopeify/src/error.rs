//! Scoping Errors

use std::fmt;

use thiserror::Error;

/// Fatal errors. All of them are raised while building options, before any
/// stylesheet text is rewritten.
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("`plugins` must be an array of stage names, found {found}")]
    MalformedOptions { found: String },

    #[error("unknown stage `{0}`")]
    UnknownStage(String),

    #[error("invalid scopeify configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScopeError>;

/// A recoverable anomaly met during a pass. The pass carries on after reporting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeWarning {
    /// A selector fragment that matched no known category and was left as is.
    UnknownToken { token: String, selector: String },
}

impl fmt::Display for ScopeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeWarning::UnknownToken { token, selector } => write!(
                f,
                "unrecognized selector fragment `{}` in `{}` left unscoped",
                token, selector
            ),
        }
    }
}
