//! The turn controller and its state machine.
//!
//! [`controller::TurnController`] drives the whole conversation: it emits
//! a prompt, waits for the end-of-speech completion, requests a listen,
//! classifies the resulting utterance (or timeout) through
//! [`crate::intent`], and consults the session, trivia and lifeline
//! modules to pick the next state.
//!
//! States live in [`phase`]; all spoken text is built by the pure
//! formatting functions in [`prompts`] so wording is testable without
//! driving the machine.

pub mod controller;
pub mod phase;
pub mod prompts;

pub use controller::{GameError, TurnController};
pub use phase::{GameOutcome, Phase, PlayLeaf, Rung};
