//! Speech I/O boundary: the recogniser and synthesiser collaborators.
//!
//! The controller never touches audio. It speaks through
//! [`SpeechOutput::speak`], whose future resolves at end of speech, and
//! hears through [`SpeechInput::listen`], whose future resolves with one
//! [`Hypothesis`] or [`ListenError::Timeout`]. At most one of each is
//! outstanding at a time — the controller awaits sequentially.
//!
//! Timeout supersession is a property of the implementations: a listen
//! whose deadline fires is cancelled by dropping the read future, so a
//! late hypothesis for that cycle can never be observed; a hypothesis
//! arriving first cancels the deadline the same way.

pub mod console;

use async_trait::async_trait;
use thiserror::Error;

pub use console::ConsoleVoice;

// ---------------------------------------------------------------------------
// Hypothesis
// ---------------------------------------------------------------------------

/// One recognition result. The controller only reads `utterance`;
/// `confidence` is carried for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct Hypothesis {
    pub utterance: String,
    pub confidence: f32,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures of a listen cycle.
#[derive(Debug, Clone, Error)]
pub enum ListenError {
    /// No utterance arrived before the deadline. The listen is cancelled;
    /// the controller treats this like a classification miss for ladder
    /// purposes.
    #[error("listen timed out")]
    Timeout,

    /// The recogniser is gone (device closed, stream ended).
    #[error("speech input unavailable: {0}")]
    Unavailable(String),
}

/// Failures of a speak operation. Fatal for the game — without a voice
/// there is no dialogue.
#[derive(Debug, Clone, Error)]
pub enum SpeakError {
    #[error("speech output unavailable: {0}")]
    Unavailable(String),
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Asynchronous speech recogniser.
#[async_trait]
pub trait SpeechInput: Send + Sync {
    /// Wait for the next utterance or a timeout.
    async fn listen(&self) -> Result<Hypothesis, ListenError>;
}

/// Asynchronous speech synthesiser.
#[async_trait]
pub trait SpeechOutput: Send + Sync {
    /// Speak `text`; resolves when the speech has finished.
    async fn speak(&self, text: &str) -> Result<(), SpeakError>;
}

// ---------------------------------------------------------------------------
// Scripted test doubles
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
