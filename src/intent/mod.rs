//! Intent classification for spoken utterances.
//!
//! [`IntentClassifier`] maps a raw recogniser utterance to one of a closed
//! set of [`Intent`]s by walking an explicit, ordered rule table. The
//! ordering is a design contract, not an accident of evaluation: control
//! intents (quit, help, repeat, lifelines) outrank numeric option picks so
//! that a phrase containing both "quit" and a digit is treated as Quit.

pub mod classifier;

pub use classifier::{Intent, IntentClassifier};
