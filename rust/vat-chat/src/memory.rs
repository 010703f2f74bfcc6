//! Frame-based conversational memory.
//!
//! Every object the user mentions gets a [`Frame`], created the first time a
//! fact about it is recorded and never removed. Frames are keyed by the
//! lowercase object name; the frame keeps the name as it was first typed for
//! display.
//!
//! A frame holds an ordered list of classes ("Ball is a Toy") and a map of
//! properties ("Ball is Red" when Red is a Color, "Box has 4 Wheels").
//! Classes are appended as stated and never deduplicated, so lookups that
//! need "the" class of an object use `classes[0]`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// What [`Memory::subject`] reports before any subject has been set.
pub const UNSET_SUBJECT: &str = "undefined";

/// Facts about one named object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// The object name as first typed.
    pub name: String,
    #[serde(default)]
    pub classes: Vec<String>,
    /// Lowercase property name to its recorded values.
    #[serde(default)]
    pub properties: IndexMap<String, Vec<String>>,
}

impl Frame {
    fn new(name: &str) -> Self {
        Frame {
            name: name.to_string(),
            ..Frame::default()
        }
    }

    /// "Ball is a Toy and a Game", or `None` when no class is known.
    pub fn describe(&self) -> Option<String> {
        if self.classes.is_empty() {
            return None;
        }
        Some(format!(
            "{} is a {}.",
            vat_pattern::inflect::capitalize(&self.name),
            self.classes.join(" and a ")
        ))
    }
}

/// The whole fact base plus the current discourse subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    frames: IndexMap<String, Frame>,
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty() && self.subject.is_none()
    }

    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.values()
    }

    pub fn frame(&self, name: &str) -> Option<&Frame> {
        self.frames.get(&key(name))
    }

    fn frame_mut(&mut self, name: &str) -> &mut Frame {
        self.frames
            .entry(key(name))
            .or_insert_with(|| Frame::new(name.trim()))
    }

    /// The classes recorded for `name`, oldest first.
    pub fn classes(&self, name: &str) -> &[String] {
        self.frame(name)
            .map(|frame| frame.classes.as_slice())
            .unwrap_or_default()
    }

    /// "X is a C": append `class` to the object's classes.
    pub fn add_class(&mut self, object: &str, class: &str) {
        self.frame_mut(object).classes.push(class.to_string());
    }

    /// "X is Y": record `value` under the property named after the first
    /// class of `value`.
    ///
    /// The object's frame is created either way. Returns the property the
    /// value was stored under, or `None` when `value` has no known class
    /// and nothing was written.
    pub fn link(&mut self, object: &str, value: &str) -> Option<String> {
        let property = self.classes(value).first().map(|class| key(class));
        let frame = self.frame_mut(object);
        let property = property?;
        frame
            .properties
            .entry(property.clone())
            .or_default()
            .push(value.to_string());
        Some(property)
    }

    /// "X has N P": overwrite the property with a single quantity.
    pub fn set_quantity(&mut self, object: &str, property: &str, quantity: &str) {
        self.frame_mut(object)
            .properties
            .insert(key(property), vec![quantity.to_string()]);
    }

    /// The values recorded for `object`'s `property`, if any.
    pub fn values(&self, object: &str, property: &str) -> Option<&[String]> {
        self.frame(object)?
            .properties
            .get(&key(property))
            .map(Vec::as_slice)
            .filter(|values| !values.is_empty())
    }

    /// The current subject, or [`UNSET_SUBJECT`] when none was set.
    pub fn subject(&self) -> &str {
        self.subject.as_deref().unwrap_or(UNSET_SUBJECT)
    }

    /// "let's talk about <topic>".
    ///
    /// First and second person swap ("you" is stored as "me" and the other
    /// way round). Restating the same swapped topic while it is already the
    /// subject flips it back, so saying "let's talk about you" twice leaves
    /// the subject at "you".
    pub fn talk_about(&mut self, topic: &str) {
        let topic = topic.trim();
        let stated = topic.to_lowercase();
        let swapped = match stated.as_str() {
            "you" => "me",
            "me" => "you",
            _ => {
                self.subject = Some(topic.to_string());
                return;
            }
        };
        let subject = if self.subject.as_deref() == Some(swapped) {
            stated
        } else {
            swapped.to_string()
        };
        self.subject = Some(subject);
    }
}
