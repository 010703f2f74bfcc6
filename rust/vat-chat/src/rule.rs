//! Declarative rules and rule groups.
//!
//! A [`Rule`] is a set of triggers plus an action. A rule fires when any of
//! its triggers matches the utterance; its action then runs against the
//! [`Turn`] and either handles the utterance or passes, in which case the
//! group keeps looking. A [`RuleGroup`] is an ordered ladder where the first
//! rule to handle the utterance wins. Groups are independent of each other.

use std::fmt;

use regex::Regex;
use vat_pattern::{Document, Pattern, PatternError};

use crate::clock::Clock;
use crate::host::HostCommand;
use crate::memory::Memory;
use crate::respond::{Phrase, Reply};
use crate::slot::Slots;
use crate::tool::ToolRewriter;

/// What fires a rule.
#[derive(Debug, Clone)]
pub enum Trigger {
    /// A token pattern over the tagged document.
    Pattern(Pattern),
    /// A regular expression over the raw text.
    Regex(Regex),
    /// Input that is empty once trimmed.
    Blank,
}

impl Trigger {
    pub fn fires(&self, doc: &Document) -> bool {
        match self {
            Trigger::Pattern(pattern) => doc.has(pattern),
            Trigger::Regex(regex) => regex.is_match(doc.text()),
            Trigger::Blank => doc.text().trim().is_empty(),
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Pattern(pattern) => write!(f, "{pattern}"),
            Trigger::Regex(regex) => write!(f, "/{}/", regex.as_str()),
            Trigger::Blank => write!(f, "<blank>"),
        }
    }
}

/// Whether an action took the utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Handled,
    Pass,
}

/// Everything an action may read or write while one utterance is processed.
pub struct Turn<'a> {
    pub doc: &'a Document,
    pub memory: &'a mut Memory,
    pub user_name: &'a str,
    pub clock: &'a dyn Clock,
    pub slots: &'a Slots,
    pub tools: &'a ToolRewriter,
    pub replies: Vec<Reply>,
    pub commands: Vec<HostCommand>,
}

impl Turn<'_> {
    /// The utterance as typed.
    pub fn text(&self) -> &str {
        self.doc.text()
    }

    pub fn say(&mut self, text: impl Into<String>) {
        self.replies.push(Reply::Text(text.into()));
    }

    pub fn phrase(&mut self, phrase: Phrase) {
        self.replies.push(Reply::Phrase(phrase));
    }

    /// Queue a host command behind an "OK." acknowledgment.
    pub fn acknowledge(&mut self, command: HostCommand) {
        self.phrase(Phrase::Ok);
        self.commands.push(command);
    }
}

type Action = Box<dyn Fn(&mut Turn<'_>) -> Flow + Send + Sync>;

pub struct Rule {
    name: &'static str,
    triggers: Vec<Trigger>,
    action: Action,
}

impl Rule {
    /// A rule without triggers; add them with [`Rule::on`] and friends.
    pub fn new<F>(name: &'static str, action: F) -> Self
    where
        F: Fn(&mut Turn<'_>) -> Flow + Send + Sync + 'static,
    {
        Rule {
            name,
            triggers: Vec::new(),
            action: Box::new(action),
        }
    }

    /// Fire on a token pattern.
    pub fn on(mut self, pattern: &str) -> Result<Self, PatternError> {
        self.triggers.push(Trigger::Pattern(Pattern::parse(pattern)?));
        Ok(self)
    }

    /// Fire on a regular expression over the raw text.
    pub fn on_regex(mut self, regex: &str) -> Result<Self, regex::Error> {
        self.triggers.push(Trigger::Regex(Regex::new(regex)?));
        Ok(self)
    }

    /// Fire on blank input.
    pub fn on_blank(mut self) -> Self {
        self.triggers.push(Trigger::Blank);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    pub fn fires(&self, doc: &Document) -> bool {
        self.triggers.iter().any(|trigger| trigger.fires(doc))
    }

    pub fn apply(&self, turn: &mut Turn<'_>) -> Flow {
        (self.action)(turn)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("triggers", &self.triggers)
            .finish_non_exhaustive()
    }
}

/// An ordered ladder of mutually exclusive rules.
#[derive(Debug)]
pub struct RuleGroup {
    name: &'static str,
    rules: Vec<Rule>,
}

impl RuleGroup {
    pub fn new(name: &'static str) -> Self {
        RuleGroup {
            name,
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Run the first rule that fires and handles the turn. Returns its name.
    pub fn evaluate(&self, turn: &mut Turn<'_>) -> Option<&'static str> {
        for rule in &self.rules {
            if rule.fires(turn.doc) && rule.apply(turn) == Flow::Handled {
                tracing::debug!(group = self.name, rule = rule.name, "rule handled utterance");
                return Some(rule.name);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use vat_pattern::tag;

    fn with_turn<R>(text: &str, run: impl FnOnce(&mut Turn<'_>) -> R) -> (R, Vec<Reply>) {
        let doc = tag(text);
        let mut memory = Memory::new();
        let slots = Slots::new().unwrap();
        let tools = ToolRewriter::new().unwrap();
        let mut turn = Turn {
            doc: &doc,
            memory: &mut memory,
            user_name: "Sam",
            clock: &SystemClock,
            slots: &slots,
            tools: &tools,
            replies: Vec::new(),
            commands: Vec::new(),
        };
        let result = run(&mut turn);
        (result, turn.replies)
    }

    fn ladder() -> RuleGroup {
        RuleGroup::new("test")
            .rule(
                Rule::new("passes", |_| Flow::Pass)
                    .on("hello")
                    .unwrap(),
            )
            .rule(
                Rule::new("greets", |turn| {
                    turn.say("first");
                    Flow::Handled
                })
                .on("hello")
                .unwrap(),
            )
            .rule(
                Rule::new("shadowed", |turn| {
                    turn.say("second");
                    Flow::Handled
                })
                .on("hello")
                .unwrap(),
            )
    }

    #[test]
    fn first_handling_rule_wins() {
        let group = ladder();
        let (fired, replies) = with_turn("well hello", |turn| group.evaluate(turn));
        assert_eq!(fired, Some("greets"));
        assert_eq!(replies, vec![Reply::Text("first".into())]);
    }

    #[test]
    fn nothing_fires_without_a_match() {
        let group = ladder();
        let (fired, replies) = with_turn("goodbye", |turn| group.evaluate(turn));
        assert_eq!(fired, None);
        assert!(replies.is_empty());
    }

    #[test]
    fn triggers() {
        let doc = tag("12 + 4");
        assert!(Trigger::Regex(Regex::new(r"\d+ *\+ *\d+").unwrap()).fires(&doc));
        assert!(Trigger::Blank.fires(&tag("   ")));
        assert!(!Trigger::Blank.fires(&doc));
        assert_eq!(Trigger::Blank.to_string(), "<blank>");
    }
}
