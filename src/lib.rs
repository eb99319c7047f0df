//! Voice Quiz — a voice-mediated "millionaire"-style trivia game engine.
//!
//! The heart of the crate is the turn/session controller in [`dialogue`]:
//! a hierarchical state machine that sequences prompts, listens,
//! confirmations and retries across asynchronous speech turns. It
//! classifies noisy free-form utterances through [`intent`], mutates the
//! single-source-of-truth [`session::Session`], and delegates scoring and
//! lifeline decisions to [`trivia`] and [`lifeline`].
//!
//! Speech recognition/synthesis and the trivia network fetch are external
//! collaborators, specified as async traits in [`speech`] and
//! [`trivia::source`]. The binary in `main.rs` wires console
//! implementations for a playable terminal demo.

pub mod config;
pub mod dialogue;
pub mod intent;
pub mod lifeline;
pub mod session;
pub mod speech;
pub mod trivia;
