//! Tokenization of chat input.
//!
//! Tokens are whitespace-delimited words. Each keeps the text as typed (so
//! names and free text survive with their case and inner punctuation) next
//! to a normalized form used for matching: lowercase, with leading and
//! trailing punctuation removed. Apostrophes and decimal points inside a
//! word are kept (`let's`, `1.5m`), and a sign directly in front of a digit
//! survives normalization (`-2m`).
//!
//! The sentence-final `.`, `?` or `!` belongs to the sentence rather than to
//! the last word, so it is dropped from that token's original text.

use crate::tag::Tag;

/// A single token extracted from input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The text as typed.
    pub original: String,
    /// Lowercased, edge punctuation removed.
    pub normal: String,
    /// Zero-based position in the token sequence.
    pub position: usize,
    /// Part-of-speech tags; empty until the token is tagged.
    pub tags: Vec<Tag>,
}

impl Token {
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }
}

/// Tokenize input text into a sequence of untagged tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut tokens = Vec::with_capacity(words.len());

    for (index, word) in words.iter().enumerate() {
        let original = if index + 1 == words.len() {
            word.trim_end_matches(['.', '?', '!'])
        } else {
            word
        };
        if original.is_empty() {
            continue;
        }

        tokens.push(Token {
            original: original.to_string(),
            normal: normalize(original),
            position: tokens.len(),
            tags: Vec::new(),
        });
    }

    tokens
}

/// Normalize one word for matching.
///
/// A word made only of punctuation (`+`, `-`) normalizes to itself.
pub fn normalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let chars: Vec<char> = lower.chars().collect();

    let mut start = 0;
    while start < chars.len() && !chars[start].is_alphanumeric() {
        let signed_number = matches!(chars[start], '-' | '+')
            && chars.get(start + 1).is_some_and(|c| c.is_ascii_digit());
        if signed_number {
            break;
        }
        start += 1;
    }

    let mut end = chars.len();
    while end > start && !chars[end - 1].is_alphanumeric() {
        end -= 1;
    }

    if start >= end {
        return lower;
    }
    chars[start..end].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_simple_command() {
        let tokens = tokenize("select the first group");
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].normal, "select");
        assert_eq!(tokens[3].normal, "group");
        assert_eq!(tokens[3].position, 3);
    }

    #[test]
    fn tokenize_preserves_original_case() {
        let tokens = tokenize("Ball is a Toy");
        assert_eq!(tokens[0].normal, "ball");
        assert_eq!(tokens[0].original, "Ball");
        assert_eq!(tokens[3].original, "Toy");
    }

    #[test]
    fn sentence_final_punctuation_is_dropped() {
        let tokens = tokenize("What are we talking about?");
        assert_eq!(tokens.last().unwrap().original, "about");

        let tokens = tokenize("Move it 1m, then stop!");
        assert_eq!(tokens[2].original, "1m,");
        assert_eq!(tokens[2].normal, "1m");
        assert_eq!(tokens[4].original, "stop");
    }

    #[test]
    fn inner_punctuation_survives() {
        let tokens = tokenize("let's move 1.5m");
        assert_eq!(tokens[0].normal, "let's");
        assert_eq!(tokens[2].normal, "1.5m");
    }

    #[test]
    fn signed_numbers_keep_their_sign() {
        assert_eq!(normalize("-2m"), "-2m");
        assert_eq!(normalize("(-2m)"), "-2m");
        assert_eq!(normalize("\"hello\""), "hello");
        assert_eq!(normalize("+"), "+");
    }

    #[test]
    fn lone_terminator_is_not_a_token() {
        let tokens = tokenize("hello ?");
        assert_eq!(tokens.len(), 1);
        assert!(tokenize("   ").is_empty());
    }
}
