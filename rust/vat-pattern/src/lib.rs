//! # vat-pattern
//!
//! The text substrate the VAT chat engine classifies utterances with: a
//! whitespace tokenizer, a small closed-lexicon part-of-speech tagger, and a
//! compiler for declarative token patterns.
//!
//! ## Pattern syntax
//!
//! Patterns are space-separated terms matched against consecutive tokens:
//!
//! ```text
//! select        literal word (case-insensitive)
//! .             any single token
//! #Determiner   any token carrying the tag
//! positive?     optional term (greedy)
//! ^what         anchored at the first token
//! me?$          anchored at the last token
//! (cube|box)    alternation of single terms
//! [#Value]      captured span (one or more terms, several per pattern)
//! ```
//!
//! ## Example
//!
//! ```
//! use vat_pattern::{Pattern, TextMode, tag};
//!
//! let doc = tag("Rotate the selection by 90 degrees.");
//! let angle = Pattern::parse("[#NumericValue] degrees").unwrap();
//!
//! assert!(doc.has(&angle));
//! assert_eq!(doc.match_span(&angle).text(TextMode::Raw), "90");
//! ```

pub mod ast;
pub mod document;
pub mod error;
pub mod inflect;
pub mod parser;
pub mod tag;
pub mod tokenizer;

pub use ast::Pattern;
pub use document::{Document, Match, Span, TextMode};
pub use error::PatternError;
pub use tag::Tag;

/// Tokenize and tag `text` into a [`Document`].
pub fn tag(text: &str) -> Document {
    Document::tag(text)
}
