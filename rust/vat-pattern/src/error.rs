//! Error types for the pattern compiler.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,

    #[error("unknown tag '#{tag}' in pattern '{pattern}'")]
    UnknownTag { tag: String, pattern: String },

    #[error("unbalanced capture brackets in pattern '{pattern}'")]
    UnbalancedCapture { pattern: String },

    #[error("capture with no terms in pattern '{pattern}'")]
    EmptyCapture { pattern: String },

    #[error("unterminated alternation group in pattern '{pattern}'")]
    UnbalancedGroup { pattern: String },

    #[error("empty alternative in pattern '{pattern}'")]
    EmptyAlternation { pattern: String },

    #[error("anchor '{anchor}' out of place in pattern '{pattern}'")]
    MisplacedAnchor { anchor: char, pattern: String },
}
