//! English inflection helpers used by the singularized text mode and reply
//! formatting.

const IRREGULAR: &[(&str, &str)] = &[
    ("children", "child"),
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("axes", "axis"),
    ("vertices", "vertex"),
    ("indices", "index"),
];

/// Singularize one lowercase English word with a few suffix rules.
pub fn singularize(word: &str) -> String {
    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == word) {
        return singular.to_string();
    }
    if word.len() <= 3 {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{stem}y");
    }
    for suffix in ["sses", "shes", "xes", "zzes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if let Some(stem) = word.strip_suffix("ches") {
        // "benches", "beaches" drop "es"; "caches", "niches" keep the "e".
        let before: Vec<char> = stem.chars().rev().take(2).collect();
        let vowel = |c: &char| "aeiou".contains(*c);
        return match before.as_slice() {
            [last, prev] if vowel(last) && !vowel(prev) => format!("{stem}che"),
            [last] if vowel(last) => format!("{stem}che"),
            _ => format!("{stem}ch"),
        };
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    match word.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => word.to_string(),
    }
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
