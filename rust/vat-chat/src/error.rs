//! Error types for the chat engine.

use thiserror::Error;
use vat_pattern::PatternError;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("rule pattern failed to compile: {0}")]
    Pattern(#[from] PatternError),

    #[error("rule expression failed to compile: {0}")]
    Regex(#[from] regex::Error),

    #[error("memory store failed: {0}")]
    Store(#[from] StoreError),

    #[error("dictation source failed: {0}")]
    Dictation(String),
}
