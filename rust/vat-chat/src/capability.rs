//! The catalogue of example sentences.
//!
//! The catalogue is what the "what can you do" reply lists, what input
//! autocompletion draws from, and what the "did you mean" fallback picks its
//! suggestion from. Order matters for the fallback's tie-break.

pub const CAPABILITIES: &[&str] = &[
    "Open a file.",
    "Clean my model.",
    "Select first entity.",
    "Select first group.",
    "Select groups named ...",
    "Select first component.",
    "Select components named ...",
    "Move selection 1m along X axis, 1m along Y axis and 1m along Z axis.",
    "Rotate selection by 90 degrees.",
    "Increase selection size 2 times.",
    "Rename selection to ...",
    "Duplicate selection and name it ...",
    "Clear selection.",
    "Erase selected entities.",
    "Activate the paint bucket tool.",
    "Draw me a cube with a height of 1m, width of 1m and depth of 1m.",
    "Draw me a cone with a radius of 1m and height of 1m.",
    "Draw me a cylinder with a radius of 1m and height of 1m.",
    "Draw me a prism with a radius of 1m, height of 1m and 6 sides.",
    "Draw me a pyramid with a radius of 1m, height of 1m and 4 sides.",
    "Draw me a sphere with a radius of 1m.",
    "Write ...",
    "Search for a plugin about ...",
];

/// Terms shorter than this never produce suggestions.
pub const MIN_SUGGEST_CHARS: usize = 2;

/// Catalogue entries containing `term`, case-insensitively, in catalogue
/// order.
pub fn suggest(term: &str) -> Vec<&'static str> {
    let term = term.trim().to_lowercase();
    if term.chars().count() < MIN_SUGGEST_CHARS {
        return Vec::new();
    }
    CAPABILITIES
        .iter()
        .copied()
        .filter(|capability| capability.to_lowercase().contains(&term))
        .collect()
}

/// The capability dump appended to the "what can you do" replies.
pub fn listing() -> String {
    let mut listing = String::from("Choose a sentence then customize it:");
    for capability in CAPABILITIES {
        listing.push_str("\n - ");
        listing.push_str(capability);
    }
    listing
}
