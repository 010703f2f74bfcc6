//! Part-of-speech tags.
//!
//! The tagger is a closed lexicon plus a few shape rules; it knows exactly
//! the word classes the chat grammar filters on and nothing more. A token
//! may carry several tags (possessive determiners are both `Possessive` and
//! `Determiner`, numerals are both `Value` and `NumericValue`). Alphabetic
//! words that fall through every rule are tagged `Noun`.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Determiner,
    Possessive,
    Pronoun,
    Preposition,
    Conjunction,
    QuestionWord,
    Adjective,
    /// A quantity, possibly with a unit suffix: `2m`, `-1.5cm`, `90`, `two`.
    Value,
    /// A bare number: `90`, `2.5`, `six`.
    NumericValue,
    Noun,
}

impl Tag {
    pub const ALL: [Tag; 10] = [
        Tag::Determiner,
        Tag::Possessive,
        Tag::Pronoun,
        Tag::Preposition,
        Tag::Conjunction,
        Tag::QuestionWord,
        Tag::Adjective,
        Tag::Value,
        Tag::NumericValue,
        Tag::Noun,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tag::Determiner => "Determiner",
            Tag::Possessive => "Possessive",
            Tag::Pronoun => "Pronoun",
            Tag::Preposition => "Preposition",
            Tag::Conjunction => "Conjunction",
            Tag::QuestionWord => "QuestionWord",
            Tag::Adjective => "Adjective",
            Tag::Value => "Value",
            Tag::NumericValue => "NumericValue",
            Tag::Noun => "Noun",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.name())
    }
}

impl FromStr for Tag {
    type Err = ();

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Tag::ALL
            .into_iter()
            .find(|tag| tag.name() == name)
            .ok_or(())
    }
}

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "some", "any", "each", "every", "all",
    "another", "no",
];

const POSSESSIVES: &[&str] = &["my", "your", "his", "her", "its", "our", "their"];

const PRONOUNS: &[&str] = &[
    "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself",
    "yourself", "itself", "ourselves", "themselves",
];

const PREPOSITIONS: &[&str] = &[
    "of", "to", "from", "in", "into", "on", "onto", "at", "by", "with", "along", "about", "for",
    "over", "under", "around", "through", "toward", "towards", "as",
];

const CONJUNCTIONS: &[&str] = &["and", "or", "but", "then", "so"];

const QUESTION_WORDS: &[&str] = &["what", "who", "whom", "which", "where", "when", "why", "how"];

const ADJECTIVES: &[&str] = &[
    "good", "great", "nice", "smart", "clever", "bright", "intelligent", "awesome", "amazing",
    "stupid", "bad", "dumb", "kind", "cool", "excellent", "beautiful", "wonderful", "incredible",
    "brilliant", "lazy", "slow", "fast", "quick", "boring", "interesting", "perfect", "terrible",
    "horrible", "friendly", "polite", "rude", "silly", "wise", "funny", "crazy", "fantastic",
    "ugly", "big", "small", "little", "old", "young", "new", "red", "green", "blue", "yellow",
    "black", "white", "happy", "sad", "weird", "strange", "impressive", "efficient", "elegant",
];

const ADJECTIVE_SUFFIXES: &[&str] = &["ful", "ous", "ive", "able", "ible", "less", "ish", "ical"];

const NUMBER_WORDS: &[(&str, u32)] = &[
    ("zero", 0),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("twenty", 20),
    ("hundred", 100),
];

/// The value of a spelled-out number, if `word` is one the tagger knows.
pub fn number_word(word: &str) -> Option<u32> {
    NUMBER_WORDS
        .iter()
        .find(|(name, _)| *name == word)
        .map(|(_, value)| *value)
}

/// Split a normalized word into its numeric prefix and the rest.
///
/// The prefix is an optional sign, digits, and at most one decimal point
/// followed by more digits. Returns `None` when the word doesn't start with
/// a number.
pub fn split_number(word: &str) -> Option<(&str, &str)> {
    let bytes = word.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        i += 1;
    }
    let digits_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start {
        return None;
    }
    if i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    Some((&word[..i], &word[i..]))
}

/// Tag one normalized word.
pub fn tags_for(word: &str) -> Vec<Tag> {
    let mut tags = Vec::new();

    if number_word(word).is_some() {
        return vec![Tag::Value, Tag::NumericValue];
    }
    if let Some((_, unit)) = split_number(word) {
        if unit.is_empty() {
            return vec![Tag::Value, Tag::NumericValue];
        }
        if unit.chars().all(|c| c.is_alphabetic() || c == '"' || c == '\'') {
            return vec![Tag::Value];
        }
    }

    if POSSESSIVES.contains(&word) {
        tags.push(Tag::Possessive);
        tags.push(Tag::Determiner);
    }
    if DETERMINERS.contains(&word) {
        tags.push(Tag::Determiner);
    }
    if PRONOUNS.contains(&word) {
        tags.push(Tag::Pronoun);
    }
    if PREPOSITIONS.contains(&word) {
        tags.push(Tag::Preposition);
    }
    if CONJUNCTIONS.contains(&word) {
        tags.push(Tag::Conjunction);
    }
    if QUESTION_WORDS.contains(&word) {
        tags.push(Tag::QuestionWord);
    }
    if !tags.is_empty() {
        return tags;
    }

    if is_adjective(word) {
        return vec![Tag::Adjective];
    }
    if word.chars().any(|c| c.is_alphabetic()) {
        return vec![Tag::Noun];
    }
    tags
}

fn is_adjective(word: &str) -> bool {
    ADJECTIVES.contains(&word)
        || ADJECTIVE_SUFFIXES
            .iter()
            .any(|suffix| word.len() > suffix.len() + 2 && word.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_names_round_trip() {
        for tag in Tag::ALL {
            assert_eq!(tag.name().parse::<Tag>(), Ok(tag));
        }
        assert!("Verb".parse::<Tag>().is_err());
    }

    #[test]
    fn values_and_numbers() {
        assert_eq!(tags_for("2m"), vec![Tag::Value]);
        assert_eq!(tags_for("-1.5cm"), vec![Tag::Value]);
        assert_eq!(tags_for("90"), vec![Tag::Value, Tag::NumericValue]);
        assert_eq!(tags_for("six"), vec![Tag::Value, Tag::NumericValue]);
        assert_eq!(tags_for("2.5"), vec![Tag::Value, Tag::NumericValue]);
    }

    #[test]
    fn closed_classes() {
        assert_eq!(tags_for("my"), vec![Tag::Possessive, Tag::Determiner]);
        assert_eq!(tags_for("the"), vec![Tag::Determiner]);
        assert_eq!(tags_for("me"), vec![Tag::Pronoun]);
        assert_eq!(tags_for("along"), vec![Tag::Preposition]);
        assert_eq!(tags_for("what"), vec![Tag::QuestionWord]);
    }

    #[test]
    fn adjectives_by_lexicon_and_suffix() {
        assert_eq!(tags_for("smart"), vec![Tag::Adjective]);
        assert_eq!(tags_for("helpful"), vec![Tag::Adjective]);
        assert_eq!(tags_for("adorable"), vec![Tag::Adjective]);
        assert_eq!(tags_for("bot"), vec![Tag::Noun]);
    }

    #[test]
    fn split_number_prefix() {
        assert_eq!(split_number("1.5m"), Some(("1.5", "m")));
        assert_eq!(split_number("-2"), Some(("-2", "")));
        assert_eq!(split_number("3."), Some(("3", ".")));
        assert_eq!(split_number("m2"), None);
        assert_eq!(split_number("-"), None);
    }
}
