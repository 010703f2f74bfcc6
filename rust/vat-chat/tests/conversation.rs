//! End-to-end conversations against the simulated host.

use chrono::NaiveTime;
use pretty_assertions::assert_eq;
use tokio::sync::mpsc::UnboundedReceiver;
use vat_chat::scene::EntityKind;
use vat_chat::slot::Length;
use vat_chat::{
    CompletionEvent, Dispatcher, FixedClock, JsonFileStore, Memory, MemoryStore, Phrase, Session,
    SimulatedHost, Synthesizer, VolatileStore, completion_channel,
};

struct Chat<S> {
    session: Session<SimulatedHost, S>,
    completions: UnboundedReceiver<CompletionEvent>,
}

impl<S: MemoryStore> Chat<S> {
    fn new(store: S) -> Self {
        let (sender, completions) = completion_channel();
        let memory = store.load().unwrap();
        let dispatcher = Dispatcher::new("Sam")
            .unwrap()
            .with_clock(FixedClock(NaiveTime::from_hms_opt(14, 30, 0).unwrap()));
        let session = Session::new(
            dispatcher,
            memory,
            Synthesizer::seeded(11),
            SimulatedHost::demo(),
            store,
            sender,
        );
        Chat {
            session,
            completions,
        }
    }

    fn say(&mut self, text: &str) -> String {
        self.session.say(text)
    }

    /// Apply every pending completion, returning the messages they added.
    fn settle(&mut self) -> Vec<String> {
        let mut messages = Vec::new();
        while let Ok(event) = self.completions.try_recv() {
            messages.extend(self.session.complete(&event));
        }
        messages
    }
}

fn is_phrase(phrase: Phrase, text: &str) -> bool {
    phrase.synonyms().contains(&text)
}

#[test]
fn small_talk_and_arithmetic() {
    let mut chat = Chat::new(VolatileStore::default());
    assert_eq!(chat.say("hello"), "Hello Sam!");
    assert!(chat.say("what is 2 + 3?").contains('5'));
    assert_eq!(chat.say("10 / 2"), "5");
    assert_eq!(chat.say("what time is it?"), "It's 14:30:0.");
    assert_eq!(chat.say(""), "👍");
    assert_eq!(chat.say("    "), "👍");
}

#[test]
fn knowledge_accumulates_across_turns() {
    let mut chat = Chat::new(VolatileStore::default());
    assert!(is_phrase(Phrase::TakeNote, &chat.say("Ball is a Toy")));
    assert_eq!(chat.say("What do you know about Ball?"), "Ball is a Toy.");
    chat.say("Ball is a Toy");
    assert_eq!(chat.say("What do you know about Ball?"), "Ball is a Toy and a Toy.");

    chat.say("Green is a Color");
    chat.say("Ball is green");
    assert_eq!(chat.say("What is the color of the ball?"), "Green.");

    assert!(is_phrase(Phrase::TakeNote, &chat.say("Box has 4 Wheels")));
    assert_eq!(chat.say("how many Wheels does Box have"), "4.");
    chat.say("Box has 6 Wheels");
    assert_eq!(chat.say("how many wheels does the box have?"), "6.");
    assert_eq!(chat.say("how many doors does the box have?"), "I don't know.");
}

#[test]
fn subject_swaps_person() {
    let mut chat = Chat::new(VolatileStore::default());
    assert_eq!(chat.say("What are we talking about?"), "We're talking about undefined.");
    chat.say("Let's talk about you");
    assert_eq!(chat.session.memory().subject(), "me");
    chat.say("Let's talk about you");
    assert_eq!(chat.session.memory().subject(), "you");
    chat.say("let's talk about Rust");
    assert_eq!(chat.say("what are we talking about"), "We're talking about Rust.");
}

#[test]
fn commands_drive_the_scene() {
    let mut chat = Chat::new(VolatileStore::default());

    assert!(is_phrase(Phrase::Ok, &chat.say("Draw me a cube with a height of 2m")));
    let done = chat.settle();
    assert_eq!(done.len(), 1);
    assert!(is_phrase(Phrase::Done, &done[0]));

    chat.say("move selection 2m along negative X axis");
    chat.settle();
    let cube = chat
        .session
        .host()
        .entities()
        .iter()
        .find(|entity| entity.name == "Box")
        .cloned()
        .unwrap();
    assert_eq!(cube.kind, EntityKind::Group);
    assert_eq!(cube.position, [-2.0, 0.0, 0.0]);

    chat.say("please activate the paint bucket tool");
    chat.settle();
    assert_eq!(chat.session.host().active_action(), Some("selectPaintTool:"));

    chat.say("search for plugins about curved stairs");
    chat.settle();
    assert_eq!(
        chat.session.host().last_search(),
        Some("https://sketchucation.com/pluginstore?search=curved+stairs")
    );
}

#[test]
fn negative_outcomes_arrive_after_the_acknowledgment() {
    let mut chat = Chat::new(VolatileStore::default());
    let ack = chat.say("select groups named Garage");
    assert!(is_phrase(Phrase::Ok, &ack));
    assert_eq!(chat.settle(), vec!["No matching group!"]);

    chat.say("clear selection");
    assert!(chat.settle().is_empty());
    chat.say("increase selection size 2 times");
    assert_eq!(chat.settle(), vec!["Nothing is selected!"]);

    chat.say("select first entity");
    chat.settle();
    chat.say("rotate selection by 90 degrees");
    assert_eq!(chat.settle(), vec!["No grouponent found!"]);

    let texts: Vec<&str> = chat
        .session
        .transcript()
        .messages()
        .iter()
        .map(|message| message.text.as_str())
        .collect();
    assert_eq!(texts[0], "select groups named Garage");
    assert_eq!(texts[1], ack);
    assert_eq!(texts[2], "No matching group!");
}

#[test]
fn draw_defaults_dimensions() {
    let mut chat = Chat::new(VolatileStore::default());
    chat.say("draw me a cylinder");
    assert!(is_phrase(Phrase::Done, &chat.settle()[0]));
    chat.say("draw a sphere with a radius of 0m");
    assert_eq!(chat.settle(), vec!["Something goes wrong!"]);
    assert_eq!(Length::new("1m").meters(), Some(1.0));
}

#[test]
fn unknown_input_gets_a_suggestion() {
    let mut chat = Chat::new(VolatileStore::default());
    assert_eq!(
        chat.say("rotat it"),
        "I didn't understand... Did you mean: \"Rotate selection by 90 degrees.\"?"
    );
    assert_eq!(
        chat.say("selct something"),
        "I didn't understand... Did you mean: \"Select components named ...\"?"
    );
}

#[test]
fn farewell_closes_the_session() {
    let mut chat = Chat::new(VolatileStore::default());
    assert_eq!(chat.say("ok, bye"), "Goodbye Sam! 👍");
    assert!(chat.session.is_closed());
    assert!(chat.settle().is_empty());
}

#[test]
fn memory_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memory.json");

    let mut chat = Chat::new(JsonFileStore::new(&path));
    chat.say("Ball is a Toy");
    chat.say("let's talk about you");
    assert!(chat.session.persist());

    let mut chat = Chat::new(JsonFileStore::new(&path));
    assert_eq!(chat.say("what is the ball?"), "Ball is a Toy.");
    assert_eq!(chat.session.memory().subject(), "me");

    let reloaded: Memory = JsonFileStore::new(&path).load().unwrap();
    assert_eq!(&reloaded, chat.session.memory());
}
