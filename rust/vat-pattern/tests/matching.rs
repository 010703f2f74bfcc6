use pretty_assertions::assert_eq;
use vat_pattern::{Pattern, PatternError, TextMode, tag};

fn pattern(source: &str) -> Pattern {
    Pattern::parse(source).unwrap()
}

#[test]
fn knowledge_question_captures() {
    let doc = tag("What are the colors of my ball?");
    let question = pattern("^what are #Determiner? [.] of #Determiner? [.]");
    let spans = doc.captures(&question).unwrap();
    assert_eq!(spans[0].text(TextMode::Singular), "color");
    assert_eq!(spans[1].text(TextMode::Raw), "ball");
}

#[test]
fn keyword_anchors_split_free_text() {
    let doc = tag("Select components named Kitchen Window.");
    let anchor = pattern("select #Determiner? (component|components) named");
    assert_eq!(doc.after(&anchor).text(TextMode::Raw), "Kitchen Window");
    assert!(doc.before(&anchor).is_empty());
}

#[test]
fn optional_qualifier_and_tagged_values() {
    let doc = tag("move selection 1m along the positive Y axis");
    let along = pattern("[#Value] along #Determiner? positive? y axis");
    assert_eq!(doc.match_span(&along).text(TextMode::Normal), "1m");

    let doc = tag("move selection 1m along Y axis");
    assert_eq!(doc.match_span(&along).text(TextMode::Normal), "1m");
}

#[test]
fn end_anchor_rejects_trailing_words() {
    let what_is = pattern("^what is #Determiner? .$");
    assert!(tag("What is a ball?").has(&what_is));
    assert!(!tag("What is the color of the ball?").has(&what_is));
}

#[test]
fn malformed_patterns_are_errors() {
    assert!(matches!(
        Pattern::parse("#Verb"),
        Err(PatternError::UnknownTag { .. })
    ));
    assert!(Pattern::parse("").is_err());
    assert!(Pattern::parse("[open").is_err());
    assert!(Pattern::parse("(a|)").is_err());
}
