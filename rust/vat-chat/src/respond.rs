//! Reply assembly and synonym variation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::host::{CompletionEvent, FAILED_PHRASE, HostOutcome};

/// A canned phrase that is rendered as one of several synonyms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phrase {
    TakeNote,
    Ok,
    Done,
    Welcome,
}

impl Phrase {
    pub fn canonical(&self) -> &'static str {
        self.synonyms()[0]
    }

    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            Phrase::TakeNote => &["I take note.", "Noted.", "It's understood."],
            Phrase::Ok => &["OK.", "Okay.", "Good idea.", "Let's go!"],
            Phrase::Done => &["It's done.", "Mission complete."],
            Phrase::Welcome => &["You're welcome.", "No problem.", "😉"],
        }
    }
}

/// One piece of a bot reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Phrase(Phrase),
}

/// Turns replies into text, picking synonyms from a seedable RNG.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    rng: StdRng,
}

impl Default for Synthesizer {
    fn default() -> Self {
        Synthesizer {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Synthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A synthesizer whose synonym choices are reproducible.
    pub fn seeded(seed: u64) -> Self {
        Synthesizer {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn synonym(&mut self, phrase: Phrase) -> &'static str {
        phrase
            .synonyms()
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_else(|| phrase.canonical())
    }

    /// The replies of one turn, space separated.
    pub fn render(&mut self, replies: &[Reply]) -> String {
        replies
            .iter()
            .map(|reply| match reply {
                Reply::Text(text) => text.clone(),
                Reply::Phrase(phrase) => self.synonym(*phrase).to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The follow-up message for a finished host command, if the command
    /// reports one.
    pub fn outcome(&mut self, event: &CompletionEvent) -> Option<String> {
        if !event.command.reports_outcome() {
            return None;
        }
        let text = match event.outcome {
            HostOutcome::Done => self.synonym(Phrase::Done),
            HostOutcome::NothingSelected => "Nothing is selected!",
            HostOutcome::NotFound => event.command.not_found_phrase(),
            HostOutcome::Failed => FAILED_PHRASE,
        };
        Some(text.to_string())
    }
}
