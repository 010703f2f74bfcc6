//! The "did you mean" fallback.
//!
//! When no rule produced a reply, the first word of the utterance is
//! compared with the first word of every capability and the closest one is
//! suggested. Ties go to the capability that comes later in the catalogue.

/// Edit distance between two strings, over Unicode scalar values.
///
/// Single-row dynamic programming: the row is as long as the shorter
/// string, plus one.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let mut a: Vec<char> = a.chars().collect();
    let mut b: Vec<char> = b.chars().collect();
    if a.len() > b.len() {
        std::mem::swap(&mut a, &mut b);
    }

    let mut row: Vec<usize> = (0..=a.len()).collect();
    for (i, cb) in b.iter().enumerate() {
        let mut prev = i + 1;
        for (j, ca) in a.iter().enumerate() {
            let value = if ca == cb {
                row[j]
            } else {
                (row[j] + 1).min(prev + 1).min(row[j + 1] + 1)
            };
            row[j] = prev;
            prev = value;
        }
        row[a.len()] = prev;
    }
    row[a.len()]
}

fn first_word(text: &str) -> String {
    text.split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// The capability whose first word is closest to the first word of
/// `input`, or `None` when no capability has a first word.
pub fn nearest<'a>(input: &str, capabilities: &[&'a str]) -> Option<&'a str> {
    let head = first_word(input);
    let mut best: Option<(usize, &'a str)> = None;

    for &capability in capabilities {
        let first = first_word(capability);
        if first.is_empty() {
            continue;
        }
        let distance = levenshtein(&head, &first);
        if best.is_none_or(|(minimum, _)| distance <= minimum) {
            best = Some((distance, capability));
        }
    }

    best.map(|(_, capability)| capability)
}

/// The reply given when nothing else matched.
pub fn reply(input: &str, capabilities: &[&str]) -> String {
    match nearest(input, capabilities) {
        Some(capability) => format!("I didn't understand... Did you mean: \"{capability}\"?"),
        None => "I didn't understand... Could you reformulate your sentence?".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_distances() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("same", "same"), 0);
        assert_eq!(levenshtein("été", "ete"), 2);
    }

    #[test]
    fn distance_is_symmetric() {
        for (a, b) in [("rotate", "rotat"), ("draw", "drew"), ("open", "clean"), ("", "x")] {
            assert_eq!(levenshtein(a, b), levenshtein(b, a));
        }
    }

    #[test]
    fn ties_go_to_the_later_capability() {
        let capabilities = ["Bat one.", "Cat two.", "Hat three."];
        assert_eq!(nearest("mat", &capabilities), Some("Hat three."));
        assert_eq!(nearest("bat", &capabilities), Some("Bat one."));
    }

    #[test]
    fn blank_capabilities_are_skipped() {
        assert_eq!(nearest("draw", &["", "   "]), None);
        assert_eq!(nearest("draw", &["", "Draw a box."]), Some("Draw a box."));
    }

    #[test]
    fn comparison_is_case_insensitive() {
        assert_eq!(nearest("ROTATE it", &["Rotate x.", "Move y."]), Some("Rotate x."));
    }

    #[test]
    fn reply_wording() {
        assert_eq!(
            reply("rotat it", &["Rotate selection by 90 degrees."]),
            "I didn't understand... Did you mean: \"Rotate selection by 90 degrees.\"?"
        );
        assert_eq!(
            reply("anything", &[]),
            "I didn't understand... Could you reformulate your sentence?"
        );
    }
}
