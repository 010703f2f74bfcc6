//! Slot extraction: typed parameters out of matched text.
//!
//! Lengths stay text (`2m`, `-1.5cm`, `0`) because the host parses units
//! itself. Counts, angles and factors are parsed here; an empty or
//! unparsable capture is `None` and the caller decides whether that means
//! "use a default" or "do nothing".

use std::fmt;

use vat_pattern::tag::{number_word, split_number};
use vat_pattern::{Document, Pattern, PatternError, Span, TextMode};

/// A signed length with an optional unit suffix, as the user typed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Length(String);

impl Length {
    pub fn new(text: impl Into<String>) -> Self {
        Length(text.into())
    }

    pub fn zero() -> Self {
        Length::new("0")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The length in meters. Unitless lengths are meters.
    pub fn meters(&self) -> Option<f64> {
        let (number, unit) = split_number(self.0.trim())?;
        let value: f64 = number.parse().ok()?;
        let scale = match unit {
            "" | "m" => 1.0,
            "cm" => 0.01,
            "mm" => 0.001,
            "km" => 1000.0,
            "in" | "\"" => 0.0254,
            "ft" | "'" => 0.3048,
            _ => return None,
        };
        Some(value * scale)
    }

    /// Flip the sign of the length.
    pub fn negated(&self) -> Self {
        match self.0.strip_prefix('-') {
            Some(rest) => Length::new(rest),
            None => Length::new(format!("-{}", self.0.trim_start_matches('+'))),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn letter(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

/// Per-axis displacement of a move command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub x: Length,
    pub y: Length,
    pub z: Length,
}

/// Shape dimensions a draw command may state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Depth,
    Height,
    Radius,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Width,
        Dimension::Depth,
        Dimension::Height,
        Dimension::Radius,
    ];

    pub fn word(&self) -> &'static str {
        match self {
            Dimension::Width => "width",
            Dimension::Depth => "depth",
            Dimension::Height => "height",
            Dimension::Radius => "radius",
        }
    }
}

/// What a dimension defaults to when the sentence doesn't state it.
pub const DEFAULT_DIMENSION: &str = "1m";

/// Compiled extraction patterns, built once per dispatcher.
#[derive(Debug, Clone)]
pub struct Slots {
    positive: [Pattern; 3],
    negative: [Pattern; 3],
    degrees: Pattern,
    times: Pattern,
    sides: Pattern,
    dimensions: [Pattern; 4],
}

impl Slots {
    pub fn new() -> Result<Self, PatternError> {
        let along = |qualifier: &str, axis: Axis| {
            Pattern::parse(&format!(
                "[#Value] along #Determiner? {qualifier} {} axis",
                axis.letter()
            ))
        };
        let dimension =
            |dimension: Dimension| Pattern::parse(&format!("{} #Preposition [#Value]", dimension.word()));

        Ok(Slots {
            positive: [
                along("positive?", Axis::X)?,
                along("positive?", Axis::Y)?,
                along("positive?", Axis::Z)?,
            ],
            negative: [
                along("negative", Axis::X)?,
                along("negative", Axis::Y)?,
                along("negative", Axis::Z)?,
            ],
            degrees: Pattern::parse("[#NumericValue] degrees")?,
            times: Pattern::parse("[#NumericValue] times")?,
            sides: Pattern::parse("[#NumericValue] sides")?,
            dimensions: [
                dimension(Dimension::Width)?,
                dimension(Dimension::Depth)?,
                dimension(Dimension::Height)?,
                dimension(Dimension::Radius)?,
            ],
        })
    }

    /// The displacement along one axis.
    ///
    /// Tries "<value> along [the] [positive] <axis> axis" first, then the
    /// "negative" phrasing (negating the value), and falls back to `0`.
    pub fn axis(&self, doc: &Document, axis: Axis) -> Length {
        let index = axis as usize;
        if let Some(length) = length(doc.match_span(&self.positive[index])) {
            return length;
        }
        if let Some(length) = length(doc.match_span(&self.negative[index])) {
            return length.negated();
        }
        Length::zero()
    }

    pub fn translation(&self, doc: &Document) -> Translation {
        Translation {
            x: self.axis(doc, Axis::X),
            y: self.axis(doc, Axis::Y),
            z: self.axis(doc, Axis::Z),
        }
    }

    /// "<n> degrees".
    pub fn degrees(&self, doc: &Document) -> Option<i64> {
        integer(doc.match_span(&self.degrees))
    }

    /// "<n> times".
    pub fn times(&self, doc: &Document) -> Option<f64> {
        number(doc.match_span(&self.times))
    }

    /// "<n> sides".
    pub fn sides(&self, doc: &Document) -> Option<u32> {
        integer(doc.match_span(&self.sides)).and_then(|sides| u32::try_from(sides).ok())
    }

    /// "<dimension> of <value>", or [`DEFAULT_DIMENSION`].
    pub fn dimension(&self, doc: &Document, dimension: Dimension) -> Length {
        length(doc.match_span(&self.dimensions[dimension as usize]))
            .unwrap_or_else(|| Length::new(DEFAULT_DIMENSION))
    }
}

/// A captured length, or `None` for an empty span.
pub fn length(span: Span<'_>) -> Option<Length> {
    let text = span.text(TextMode::Normal);
    let text = text.trim();
    (!text.is_empty()).then(|| Length::new(text))
}

/// A captured number: digits, a decimal, or a number word.
pub fn number(span: Span<'_>) -> Option<f64> {
    let text = span.text(TextMode::Normal);
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    number_word(text)
        .map(f64::from)
        .or_else(|| text.parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// A captured whole number; decimals are truncated. Values outside the
/// `i64` range are rejected.
pub fn integer(span: Span<'_>) -> Option<i64> {
    number(span)
        .map(f64::trunc)
        .filter(|value| *value >= i64::MIN as f64 && *value < i64::MAX as f64)
        .map(|value| value as i64)
}

/// The trimmed text that follows `anchor`, or `None` when there is none.
pub fn text_after(doc: &Document, anchor: &Pattern) -> Option<String> {
    let text = doc.after(anchor).text(TextMode::Raw);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
