//! Compiler from pattern source text to a [`Pattern`].
//!
//! ```text
//! pattern     = '^'? item* '$'?
//! item        = term | '[' term+ ']'
//! term        = (atom | '(' atom ('|' atom)* ')') '?'? '$'?
//! atom        = '.' | '#' TagName | word
//! ```
//!
//! `$` may only follow the last term and `^` may only precede the first.

use crate::ast::{Atom, Pattern, Term};
use crate::error::PatternError;
use crate::tag::Tag;

impl Pattern {
    /// Compile `source` into a pattern.
    pub fn parse(source: &str) -> Result<Pattern, PatternError> {
        Parser::new(source).parse()
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn parse(mut self) -> Result<Pattern, PatternError> {
        let mut terms: Vec<Term> = Vec::new();
        let mut captures = 0;
        let mut open_capture: Option<usize> = None;
        let mut capture_start = 0;
        let mut anchored_start = false;
        let mut anchored_end = false;

        self.skip_whitespace();
        if self.peek() == Some('^') {
            self.advance();
            anchored_start = true;
        }

        loop {
            self.skip_whitespace();
            let Some(ch) = self.peek() else { break };

            if anchored_end {
                return Err(self.misplaced('$'));
            }

            match ch {
                '[' => {
                    if open_capture.is_some() {
                        return Err(self.unbalanced_capture());
                    }
                    self.advance();
                    open_capture = Some(captures);
                    capture_start = terms.len();
                    captures += 1;
                }
                ']' => {
                    if open_capture.is_none() {
                        return Err(self.unbalanced_capture());
                    }
                    if terms.len() == capture_start {
                        return Err(PatternError::EmptyCapture {
                            pattern: self.source.to_string(),
                        });
                    }
                    self.advance();
                    open_capture = None;
                    self.skip_whitespace();
                    if self.peek() == Some('$') {
                        self.advance();
                        anchored_end = true;
                    }
                }
                '^' => return Err(self.misplaced('^')),
                '$' => {
                    self.advance();
                    anchored_end = true;
                }
                _ => {
                    let mut term = self.parse_term()?;
                    term.capture = open_capture;
                    terms.push(term);
                    if self.peek() == Some('$') {
                        if open_capture.is_some() {
                            return Err(self.misplaced('$'));
                        }
                        self.advance();
                        anchored_end = true;
                    }
                }
            }
        }

        if open_capture.is_some() {
            return Err(self.unbalanced_capture());
        }
        if terms.is_empty() {
            return Err(PatternError::Empty);
        }

        Ok(Pattern {
            terms,
            anchored_start,
            anchored_end,
            captures,
        })
    }

    fn parse_term(&mut self) -> Result<Term, PatternError> {
        let alternatives = if self.peek() == Some('(') {
            self.advance();
            let mut body = String::new();
            loop {
                match self.advance() {
                    Some(')') => break,
                    Some(ch) => body.push(ch),
                    None => {
                        return Err(PatternError::UnbalancedGroup {
                            pattern: self.source.to_string(),
                        });
                    }
                }
            }
            body.split('|')
                .map(|alternative| self.parse_atom(alternative.trim()))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            let mut word = String::new();
            while let Some(ch) = self.peek() {
                if ch.is_whitespace() || matches!(ch, '[' | ']' | '(' | '?' | '$') {
                    break;
                }
                word.push(ch);
                self.advance();
            }
            vec![self.parse_atom(&word)?]
        };

        let optional = if self.peek() == Some('?') {
            self.advance();
            true
        } else {
            false
        };

        Ok(Term {
            alternatives,
            optional,
            capture: None,
        })
    }

    fn parse_atom(&self, text: &str) -> Result<Atom, PatternError> {
        if text.is_empty() {
            return Err(PatternError::EmptyAlternation {
                pattern: self.source.to_string(),
            });
        }
        if text == "." {
            return Ok(Atom::Any);
        }
        if let Some(name) = text.strip_prefix('#') {
            return name
                .parse::<Tag>()
                .map(Atom::Tag)
                .map_err(|_| PatternError::UnknownTag {
                    tag: name.to_string(),
                    pattern: self.source.to_string(),
                });
        }
        Ok(Atom::Word(text.to_lowercase()))
    }

    fn unbalanced_capture(&self) -> PatternError {
        PatternError::UnbalancedCapture {
            pattern: self.source.to_string(),
        }
    }

    fn misplaced(&self, anchor: char) -> PatternError {
        PatternError::MisplacedAnchor {
            anchor,
            pattern: self.source.to_string(),
        }
    }
}
