//! One conversation between a user and the assistant.
//!
//! The session owns everything a conversation touches: the compiled rules,
//! the memory, the synonym source, the transcript, the host and the store.
//! Utterances are processed one at a time, start to finish. Host commands
//! are acknowledged in the transcript before the host is invoked, and the
//! outcome is appended later when the event loop hands the completion back
//! through [`Session::complete`]. Completions and new utterances interleave
//! in whatever order they arrive.

use std::fmt;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::config::ChatConfig;
use crate::dispatch::{Dispatcher, Response};
use crate::error::ChatError;
use crate::host::{Completion, CompletionEvent, Host, HostCommand};
use crate::memory::Memory;
use crate::respond::Synthesizer;
use crate::store::MemoryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub speaker: Speaker,
    pub text: String,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.speaker {
            Speaker::User => write!(f, "> {}", self.text),
            Speaker::Bot => write!(f, "{}", self.text),
        }
    }
}

/// The append-only record of a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn push(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.messages.push(Message {
            speaker,
            text: text.into(),
        });
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

pub struct Session<H, S> {
    dispatcher: Dispatcher,
    memory: Memory,
    synthesizer: Synthesizer,
    transcript: Transcript,
    host: H,
    store: S,
    completions: UnboundedSender<CompletionEvent>,
    closed: bool,
}

impl<H, S> Session<H, S>
where
    H: Host,
    S: MemoryStore,
{
    pub fn new(
        dispatcher: Dispatcher,
        memory: Memory,
        synthesizer: Synthesizer,
        host: H,
        store: S,
        completions: UnboundedSender<CompletionEvent>,
    ) -> Self {
        Session {
            dispatcher,
            memory,
            synthesizer,
            transcript: Transcript::default(),
            host,
            store,
            completions,
            closed: false,
        }
    }

    /// Load the memory from `store` and compile the rules for the
    /// configured user.
    pub fn open(
        config: &ChatConfig,
        host: H,
        store: S,
        completions: UnboundedSender<CompletionEvent>,
    ) -> Result<Self, ChatError> {
        let memory = store.load()?;
        let dispatcher = Dispatcher::new(config.user_name.clone())?;
        let synthesizer = config.seed.map(Synthesizer::seeded).unwrap_or_default();
        info!(
            user = %config.user_name,
            frames = memory.frames().count(),
            "session opened"
        );
        Ok(Self::new(
            dispatcher,
            memory,
            synthesizer,
            host,
            store,
            completions,
        ))
    }

    /// Process one utterance and return the assistant's reply.
    pub fn say(&mut self, text: &str) -> String {
        self.transcript.push(Speaker::User, text);

        let Response { replies, commands } = self.dispatcher.dispatch(text, &mut self.memory);
        let reply = self.synthesizer.render(&replies);
        self.transcript.push(Speaker::Bot, reply.clone());

        for command in commands {
            if command == HostCommand::CloseSession {
                self.closed = true;
            }
            debug!(%command, "invoking host");
            let completion = Completion::new(command.clone(), self.completions.clone());
            self.host.invoke(command, completion);
        }

        reply
    }

    /// Record the outcome of an earlier host command. Returns the message
    /// appended to the transcript, if the command reports one.
    pub fn complete(&mut self, event: &CompletionEvent) -> Option<String> {
        let text = self.synthesizer.outcome(event)?;
        debug!(command = %event.command, outcome = ?event.outcome, "host command completed");
        self.transcript.push(Speaker::Bot, text.clone());
        Some(text)
    }

    /// Save the memory. A failure is logged and left for the next call to
    /// retry.
    pub fn persist(&self) -> bool {
        match self.store.save(&self.memory) {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "failed to save memory");
                false
            }
        }
    }

    /// Whether the user said goodbye.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn user_name(&self) -> &str {
        self.dispatcher.user_name()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io;

    use super::*;
    use crate::host::completion_channel;
    use crate::respond::Phrase;
    use crate::scene::SimulatedHost;
    use crate::store::{StoreError, VolatileStore};
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn config() -> ChatConfig {
        ChatConfig {
            user_name: "Sam".into(),
            seed: Some(3),
            ..ChatConfig::default()
        }
    }

    fn session<S: MemoryStore>(
        store: S,
    ) -> (Session<SimulatedHost, S>, UnboundedReceiver<CompletionEvent>) {
        let (sender, receiver) = completion_channel();
        let session = Session::open(&config(), SimulatedHost::demo(), store, sender).unwrap();
        (session, receiver)
    }

    #[test]
    fn acknowledgment_precedes_outcome() {
        let (mut session, mut completions) = session(VolatileStore::default());
        let reply = session.say("select the first group");
        assert!(Phrase::Ok.synonyms().contains(&reply.as_str()));

        let event = completions.try_recv().unwrap();
        let outcome = session.complete(&event).unwrap();
        assert!(Phrase::Done.synonyms().contains(&outcome.as_str()));

        let speakers: Vec<Speaker> = session
            .transcript()
            .messages()
            .iter()
            .map(|message| message.speaker)
            .collect();
        assert_eq!(speakers, vec![Speaker::User, Speaker::Bot, Speaker::Bot]);
        assert_eq!(session.transcript().messages()[1].text, reply);
        assert_eq!(session.transcript().messages()[2].text, outcome);
    }

    #[test]
    fn negative_outcome_does_not_retract_acknowledgment() {
        let (mut session, mut completions) = session(VolatileStore::default());
        session.say("rotate selection by 45 degrees");
        let event = completions.try_recv().unwrap();
        assert_eq!(session.complete(&event).as_deref(), Some("Nothing is selected!"));
        assert_eq!(session.transcript().len(), 3);
        assert!(Phrase::Ok.synonyms().contains(&session.transcript().messages()[1].text.as_str()));
    }

    #[test]
    fn farewell_closes_without_outcome() {
        let (mut session, mut completions) = session(VolatileStore::default());
        assert_eq!(session.say("goodbye"), "Goodbye Sam!");
        assert!(session.is_closed());
        assert!(session.host().is_closed());
        assert!(completions.try_recv().is_err());
    }

    #[test]
    fn memory_round_trips_through_the_store() {
        let (mut session, _completions) = session(VolatileStore::default());
        session.say("Ball is a Toy");
        assert!(session.persist());
        let saved = session.store().snapshot();
        assert_eq!(&saved, session.memory());

        let (sender, _receiver) = completion_channel();
        let mut reopened = Session::open(
            &config(),
            SimulatedHost::new(),
            VolatileStore::new(saved),
            sender,
        )
        .unwrap();
        assert_eq!(reopened.say("what is the ball"), "Ball is a Toy.");
    }

    /// Fails the first `failures` saves.
    struct FlakyStore {
        failures: Cell<u32>,
        inner: VolatileStore,
    }

    impl MemoryStore for FlakyStore {
        fn load(&self) -> Result<Memory, StoreError> {
            self.inner.load()
        }

        fn save(&self, memory: &Memory) -> Result<(), StoreError> {
            if self.failures.get() > 0 {
                self.failures.set(self.failures.get() - 1);
                return Err(io::Error::other("disk full").into());
            }
            self.inner.save(memory)
        }
    }

    #[test]
    fn failed_save_is_retried() {
        let store = FlakyStore {
            failures: Cell::new(1),
            inner: VolatileStore::default(),
        };
        let (mut session, _completions) = session(store);
        session.say("Box has 4 Wheels");
        let before = session.memory().clone();

        assert!(!session.persist());
        assert_eq!(session.memory(), &before);
        assert_eq!(session.store().inner.snapshot(), Memory::new());

        assert!(session.persist());
        assert_eq!(session.store().inner.snapshot(), before);
    }
}
