//! Compiled pattern representation.
//!
//! A pattern is a flat sequence of [`Term`]s. Captures don't nest, so a
//! capture is just an index shared by the consecutive terms inside one
//! `[...]` group. Rendering a pattern with `Display` produces the canonical
//! source form, which is what rule tables log and error messages quote.

use std::fmt;

use crate::tag::Tag;
use crate::tokenizer::Token;

/// One alternative inside a term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    /// A literal word, stored lowercase and compared against the token's
    /// normalized form.
    Word(String),
    /// `.`, any single token.
    Any,
    /// `#Tag`, any token carrying the tag.
    Tag(Tag),
}

impl Atom {
    pub fn accepts(&self, token: &Token) -> bool {
        match self {
            Atom::Word(word) => token.normal == *word,
            Atom::Any => true,
            Atom::Tag(tag) => token.has_tag(*tag),
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Word(word) => write!(f, "{word}"),
            Atom::Any => write!(f, "."),
            Atom::Tag(tag) => write!(f, "{tag}"),
        }
    }
}

/// A single position in the pattern: one or more alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub alternatives: Vec<Atom>,
    pub optional: bool,
    /// Index of the capture group this term belongs to, if any.
    pub capture: Option<usize>,
}

impl Term {
    pub fn accepts(&self, token: &Token) -> bool {
        self.alternatives.iter().any(|atom| atom.accepts(token))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alternatives.len() == 1 {
            write!(f, "{}", self.alternatives[0])?;
        } else {
            write!(f, "(")?;
            for (i, atom) in self.alternatives.iter().enumerate() {
                if i > 0 {
                    write!(f, "|")?;
                }
                write!(f, "{atom}")?;
            }
            write!(f, ")")?;
        }
        if self.optional {
            write!(f, "?")?;
        }
        Ok(())
    }
}

/// A compiled token pattern. Build one with [`Pattern::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub terms: Vec<Term>,
    pub anchored_start: bool,
    pub anchored_end: bool,
    pub captures: usize,
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.anchored_start {
            write!(f, "^")?;
        }
        let mut open: Option<usize> = None;
        for (i, term) in self.terms.iter().enumerate() {
            if open.is_some() && term.capture != open {
                write!(f, "]")?;
                open = None;
            }
            if i > 0 {
                write!(f, " ")?;
            }
            if term.capture.is_some() && open.is_none() {
                write!(f, "[")?;
                open = term.capture;
            }
            write!(f, "{term}")?;
        }
        if open.is_some() {
            write!(f, "]")?;
        }
        if self.anchored_end {
            write!(f, "$")?;
        }
        Ok(())
    }
}
