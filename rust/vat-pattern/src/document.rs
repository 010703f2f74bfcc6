//! Tagged documents and pattern evaluation.
//!
//! Matching is leftmost-first: the pattern is tried at every start position
//! in order (only position 0 when anchored with `^`) and the first success
//! wins. Optional terms are greedy and backtrack when the rest of the
//! pattern fails, so `activate #Determiner? . .? tool` still matches
//! "activate the line tool".

use std::ops::Range;

use crate::ast::Pattern;
use crate::inflect::singularize;
use crate::tag::tags_for;
use crate::tokenizer::{Token, tokenize};

/// How a [`Span`] renders its tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    /// The words as typed, joined with single spaces.
    Raw,
    /// Lowercased words without edge punctuation.
    Normal,
    /// Normalized words, each singularized.
    Singular,
}

/// A tokenized and tagged piece of text.
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    tokens: Vec<Token>,
}

/// One successful match of a pattern against a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Token range covered by the whole pattern.
    pub range: Range<usize>,
    /// Token range of each capture group, in pattern order. A capture whose
    /// terms were all skipped as optional is an empty range.
    pub captures: Vec<Range<usize>>,
}

/// A contiguous run of tokens in a document.
#[derive(Debug, Clone, Copy)]
pub struct Span<'a> {
    tokens: &'a [Token],
}

impl Document {
    /// Tokenize `text` and tag every token.
    pub fn tag(text: &str) -> Self {
        let mut tokens = tokenize(text);
        for token in &mut tokens {
            token.tags = tags_for(&token.normal);
        }
        Document {
            text: text.to_string(),
            tokens,
        }
    }

    /// The untouched input text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Does the pattern match anywhere in the document?
    pub fn has(&self, pattern: &Pattern) -> bool {
        self.find(pattern).is_some()
    }

    /// The leftmost match of `pattern`, with its capture ranges.
    pub fn find(&self, pattern: &Pattern) -> Option<Match> {
        let last_start = if pattern.anchored_start {
            0
        } else {
            self.tokens.len()
        };

        let mut trail = vec![Step::default(); pattern.terms.len()];
        for start in 0..=last_start {
            if let Some(end) = self.step(pattern, 0, start, &mut trail) {
                return Some(Match {
                    range: start..end,
                    captures: capture_ranges(pattern, &trail),
                });
            }
        }
        None
    }

    /// The first capture of the leftmost match, or the whole match when the
    /// pattern captures nothing. Empty when the pattern doesn't match.
    pub fn match_span(&self, pattern: &Pattern) -> Span<'_> {
        match self.find(pattern) {
            Some(found) => {
                let range = found.captures.first().cloned().unwrap_or(found.range);
                self.span(range)
            }
            None => self.span(0..0),
        }
    }

    /// Every capture of the leftmost match, or `None` when it doesn't match.
    pub fn captures(&self, pattern: &Pattern) -> Option<Vec<Span<'_>>> {
        self.find(pattern).map(|found| {
            found
                .captures
                .into_iter()
                .map(|range| self.span(range))
                .collect()
        })
    }

    /// Tokens before the leftmost match; empty when it doesn't match.
    pub fn before(&self, pattern: &Pattern) -> Span<'_> {
        match self.find(pattern) {
            Some(found) => self.span(0..found.range.start),
            None => self.span(0..0),
        }
    }

    /// Tokens after the leftmost match; empty when it doesn't match.
    pub fn after(&self, pattern: &Pattern) -> Span<'_> {
        match self.find(pattern) {
            Some(found) => self.span(found.range.end..self.tokens.len()),
            None => self.span(0..0),
        }
    }

    pub fn span(&self, range: Range<usize>) -> Span<'_> {
        Span {
            tokens: &self.tokens[range],
        }
    }

    fn step(&self, pattern: &Pattern, term: usize, pos: usize, trail: &mut [Step]) -> Option<usize> {
        let Some(current) = pattern.terms.get(term) else {
            if pattern.anchored_end && pos != self.tokens.len() {
                return None;
            }
            return Some(pos);
        };

        if let Some(token) = self.tokens.get(pos) {
            if current.accepts(token) {
                trail[term] = Step { pos, taken: true };
                if let Some(end) = self.step(pattern, term + 1, pos + 1, trail) {
                    return Some(end);
                }
            }
        }

        if current.optional {
            trail[term] = Step { pos, taken: false };
            return self.step(pattern, term + 1, pos, trail);
        }

        None
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Step {
    pos: usize,
    taken: bool,
}

fn capture_ranges(pattern: &Pattern, trail: &[Step]) -> Vec<Range<usize>> {
    (0..pattern.captures)
        .map(|capture| {
            let steps: Vec<Step> = pattern
                .terms
                .iter()
                .zip(trail)
                .filter(|(term, _)| term.capture == Some(capture))
                .map(|(_, step)| *step)
                .collect();
            let start = steps.first().map(|step| step.pos).unwrap_or(0);
            let end = steps
                .iter()
                .filter(|step| step.taken)
                .map(|step| step.pos + 1)
                .max()
                .unwrap_or(start);
            start..end
        })
        .collect()
}

impl<'a> Span<'a> {
    pub fn tokens(&self) -> &'a [Token] {
        self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn text(&self, mode: TextMode) -> String {
        self.tokens
            .iter()
            .map(|token| match mode {
                TextMode::Raw => token.original.clone(),
                TextMode::Normal => token.normal.clone(),
                TextMode::Singular => singularize(&token.normal),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::Tag;

    fn pattern(source: &str) -> Pattern {
        Pattern::parse(source).unwrap()
    }

    #[test]
    fn tagging_assigns_tags() {
        let doc = Document::tag("draw me a cube with a height of 2m");
        assert!(doc.tokens()[1].has_tag(Tag::Pronoun));
        assert!(doc.tokens()[2].has_tag(Tag::Determiner));
        assert!(doc.tokens()[8].has_tag(Tag::Value));
    }

    #[test]
    fn has_matches_anywhere_unless_anchored() {
        let doc = Document::tag("well hello there");
        assert!(doc.has(&pattern("(hello|hi|hey)")));
        assert!(!doc.has(&pattern("^hello")));
        assert!(doc.has(&pattern("there$")));
        assert!(!doc.has(&pattern("hello$")));
    }

    #[test]
    fn optional_terms_backtrack() {
        let doc = Document::tag("activate the line tool");
        let found = doc.find(&pattern("activate #Determiner? . .? tool")).unwrap();
        assert_eq!(found.range, 0..4);

        let doc = Document::tag("please activate the paint bucket tool");
        let found = doc.find(&pattern("activate #Determiner? . .? tool")).unwrap();
        assert_eq!(found.range, 1..6);
    }

    #[test]
    fn match_span_returns_first_capture() {
        let doc = Document::tag("Move selection 2m along negative X axis");
        let span = doc.match_span(&pattern("[#Value] along #Determiner? negative x axis"));
        assert_eq!(span.text(TextMode::Raw), "2m");

        let span = doc.match_span(&pattern("[#Value] along #Determiner? positive? x axis"));
        assert!(span.is_empty());
    }

    #[test]
    fn match_span_without_capture_is_whole_match() {
        let doc = Document::tag("please select the first group now");
        let span = doc.match_span(&pattern("select #Determiner? first group"));
        assert_eq!(span.text(TextMode::Normal), "select the first group");
    }

    #[test]
    fn captures_return_every_group() {
        let doc = Document::tag("What is the color of the Ball?");
        let spans = doc
            .captures(&pattern("^what is #Determiner? [.] of #Determiner? [.]"))
            .unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text(TextMode::Normal), "color");
        assert_eq!(spans[1].text(TextMode::Raw), "Ball");
    }

    #[test]
    fn skipped_optional_capture_is_empty() {
        let doc = Document::tag("help");
        let found = doc.find(&pattern("^help [me?]$")).unwrap();
        assert_eq!(found.captures, vec![1..1]);
    }

    #[test]
    fn before_and_after() {
        let doc = Document::tag("search for a plugin about stairs and doors.");
        let anchor = pattern("search for #Pronoun? #Determiner? plugin about");
        assert_eq!(doc.after(&anchor).text(TextMode::Raw), "stairs and doors");
        assert!(doc.before(&anchor).is_empty());

        let doc = Document::tag("Let's talk about you");
        assert_eq!(doc.after(&pattern("^let's talk about")).text(TextMode::Raw), "you");
        assert!(doc.after(&pattern("^let's sing")).is_empty());
    }

    #[test]
    fn singular_mode() {
        let doc = Document::tag("what are the Colors of Ball");
        let span = doc.match_span(&pattern("^what are #Determiner? [.] of"));
        assert_eq!(span.text(TextMode::Singular), "color");
    }

    #[test]
    fn empty_document_matches_only_optional_patterns() {
        let doc = Document::tag("   ");
        assert!(doc.is_empty());
        assert!(!doc.has(&pattern("hello")));
        assert!(doc.has(&pattern("hello?")));
    }
}
