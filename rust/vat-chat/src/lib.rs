//! # VAT Chat: a conversational front-end for a modelling host
//!
//! Free-text chat input is classified by a fixed table of declarative token
//! patterns and turned into reply text, updates to a small frame-based
//! memory, and structured commands for the host application.
//!
//! ## Core Ideas
//!
//! - **Rules are data**: each intent is a [`Rule`] with pattern triggers and
//!   an action; rules are arranged in independent [`RuleGroup`] ladders.
//! - **Memory is explicit**: the [`Memory`] fact base is owned by the
//!   [`Session`] and handed to the dispatcher by `&mut` for each utterance.
//! - **Commands are fire-and-forget**: the session acknowledges a command,
//!   invokes the [`Host`], and reports the outcome whenever the host
//!   resolves the [`Completion`].
//!
//! ## Architecture
//!
//! ```text
//! Input → tag (vat-pattern) → Dispatcher (rule groups, slots, memory)
//!   → replies + host commands → Synthesizer → Transcript
//!   host completions → Synthesizer → Transcript
//! ```

pub mod capability;
pub mod cli;
pub mod clock;
pub mod config;
pub mod dictation;
pub mod dispatch;
pub mod error;
pub mod fallback;
pub mod host;
pub mod memory;
pub mod respond;
pub mod rule;
pub mod scene;
pub mod session;
pub mod slot;
pub mod store;
pub mod tool;

pub use capability::{CAPABILITIES, listing, suggest};
pub use cli::VatCli;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ChatConfig;
pub use dictation::{Dictation, HttpDictation, QueuedDictation};
pub use dispatch::{Dispatcher, Response};
pub use error::ChatError;
pub use host::{
    Completion, CompletionEvent, Host, HostCommand, HostOutcome, completion_channel,
};
pub use memory::{Frame, Memory};
pub use respond::{Phrase, Reply, Synthesizer};
pub use rule::{Flow, Rule, RuleGroup, Trigger, Turn};
pub use scene::SimulatedHost;
pub use session::{Message, Session, Speaker, Transcript};
pub use store::{JsonFileStore, MemoryStore, StoreError, VolatileStore};
