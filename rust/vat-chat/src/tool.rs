//! "activate the paint bucket tool" to `selectPaintTool:`.
//!
//! The user's tool names are rewritten with a fixed list of whole-word
//! substitutions into the wording of the host's action identifiers. Each
//! substitution runs on the result of the previous one, so `activate` is
//! rewritten last and its `select` is never turned into `selection`.

use regex::Regex;
use vat_pattern::Tag;
use vat_pattern::inflect::capitalize;
use vat_pattern::tag::tags_for;

const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("select", "selection"),
    ("eraser", "erase"),
    ("paint bucket", "paint"),
    ("follow me", "extrude"),
    ("tape measure", "measure"),
    ("axes", "axis"),
    ("dimensions", "dimension"),
    ("activate", "select"),
];

const FILLER: &[&str] = &["please"];

#[derive(Debug, Clone)]
pub struct ToolRewriter {
    substitutions: Vec<(Regex, &'static str)>,
}

impl ToolRewriter {
    pub fn new() -> Result<Self, regex::Error> {
        let substitutions = SUBSTITUTIONS
            .iter()
            .map(|(from, to)| {
                let pattern = format!(r"\b{}\b", regex::escape(from).replace(' ', r"\s+"));
                Regex::new(&pattern).map(|regex| (regex, *to))
            })
            .collect::<Result<_, _>>()?;
        Ok(ToolRewriter { substitutions })
    }

    /// The host action identifier for an "activate ... tool" phrase.
    pub fn action_id(&self, phrase: &str) -> String {
        let lowered = phrase.to_lowercase();
        let mut words: Vec<&str> = Vec::new();
        let mut after_activate = false;
        for word in lowered.split_whitespace() {
            if FILLER.contains(&word) {
                continue;
            }
            if after_activate && tags_for(word).contains(&Tag::Determiner) {
                after_activate = false;
                continue;
            }
            after_activate = word == "activate";
            words.push(word);
        }

        let mut rewritten = words.join(" ");
        for (regex, replacement) in &self.substitutions {
            rewritten = regex.replace_all(&rewritten, *replacement).into_owned();
        }

        let mut id = String::new();
        for (index, word) in rewritten.split_whitespace().enumerate() {
            if index == 0 {
                id.push_str(word);
            } else {
                id.push_str(&capitalize(word));
            }
        }
        id.push(':');
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action_id(phrase: &str) -> String {
        ToolRewriter::new().unwrap().action_id(phrase)
    }

    #[test]
    fn rewrites_tool_names() {
        assert_eq!(action_id("activate the paint bucket tool"), "selectPaintTool:");
        assert_eq!(action_id("activate the select tool"), "selectSelectionTool:");
        assert_eq!(action_id("activate the eraser tool"), "selectEraseTool:");
        assert_eq!(action_id("activate follow me tool"), "selectExtrudeTool:");
        assert_eq!(action_id("activate the tape measure tool"), "selectMeasureTool:");
        assert_eq!(action_id("activate the axes tool"), "selectAxisTool:");
        assert_eq!(action_id("activate the dimensions tool"), "selectDimensionTool:");
        assert_eq!(action_id("activate the line tool"), "selectLineTool:");
    }

    #[test]
    fn drops_filler_and_determiner() {
        assert_eq!(action_id("please activate my Rectangle tool"), "selectRectangleTool:");
        assert_eq!(action_id("Activate  the   Paint Bucket tool"), "selectPaintTool:");
    }

    #[test]
    fn substitutions_match_whole_words() {
        assert_eq!(action_id("activate the selector tool"), "selectSelectorTool:");
    }
}
