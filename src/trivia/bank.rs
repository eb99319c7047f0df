//! Question bank construction: shuffles, money ladder, session assembly.

use rand::rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use thiserror::Error;

use crate::session::{Difficulty, Session, SessionError};

/// Questions a full bank needs: 12 main + 1 backup for the switch
/// lifeline.
pub const QUESTION_BANK_SIZE: usize = 13;

// ---------------------------------------------------------------------------
// TriviaError
// ---------------------------------------------------------------------------

/// Errors raised while building a session from raw question data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriviaError {
    /// Fewer than 13 usable raw questions were supplied. Fatal for the
    /// current game; the resolution is to abort, never to play a short
    /// bank.
    #[error("insufficient question data: need {QUESTION_BANK_SIZE}, got {got}")]
    InsufficientData { got: usize },

    /// A raw record did not carry exactly three incorrect answers.
    #[error("malformed question record: {0}")]
    MalformedQuestion(String),
}

impl From<SessionError> for TriviaError {
    fn from(e: SessionError) -> Self {
        TriviaError::MalformedQuestion(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// RawQuestion
// ---------------------------------------------------------------------------

/// One record as fetched from the trivia source. Immutable once fetched.
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestion {
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

// ---------------------------------------------------------------------------
// PresentedQuestion
// ---------------------------------------------------------------------------

/// A question together with its session-specific randomised option
/// orderings.
///
/// Two independent shuffles are kept: the 2-way set must remain valid even
/// when the 4-way permutation is discarded by the fifty-fifty lifeline, so
/// it is never derived from `full_options`.
#[derive(Debug, Clone)]
pub struct PresentedQuestion {
    pub text: String,
    pub correct_answer: String,
    /// Uniform permutation of the correct answer and all three distractors.
    pub full_options: Vec<String>,
    /// Uniform permutation of the correct answer and one distractor.
    pub reduced_options: Vec<String>,
}

impl PresentedQuestion {
    /// Build the presented form of `raw` with fresh shuffles.
    pub fn from_raw(raw: &RawQuestion) -> Result<Self, TriviaError> {
        if raw.incorrect_answers.len() != 3 {
            return Err(TriviaError::MalformedQuestion(format!(
                "expected 3 incorrect answers, got {} for {:?}",
                raw.incorrect_answers.len(),
                raw.question
            )));
        }

        let mut rng = rng();

        let mut full_options = vec![raw.correct_answer.clone()];
        full_options.extend(raw.incorrect_answers.iter().cloned());
        full_options.shuffle(&mut rng);

        let mut reduced_options =
            vec![raw.correct_answer.clone(), raw.incorrect_answers[0].clone()];
        reduced_options.shuffle(&mut rng);

        Ok(Self {
            text: raw.question.clone(),
            correct_answer: raw.correct_answer.clone(),
            full_options,
            reduced_options,
        })
    }
}

// ---------------------------------------------------------------------------
// Money ladder
// ---------------------------------------------------------------------------

/// The fixed 12-entry stakes table, indexed by question index.
pub fn money_ladder() -> Vec<String> {
    [
        "$500", "$1000", "$2000", "$5000", "$10000", "$20000", "$50000", "$75000", "$150000",
        "$250000", "$500000", "$1000000",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

// ---------------------------------------------------------------------------
// build_session
// ---------------------------------------------------------------------------

/// Assemble a [`Session`] from raw fetched questions.
///
/// Takes the first [`QUESTION_BANK_SIZE`] usable records; fails with
/// [`TriviaError::InsufficientData`] when fewer arrive.
pub fn build_session(
    raw: &[RawQuestion],
    difficulty: Difficulty,
    username: &str,
) -> Result<Session, TriviaError> {
    let bank: Vec<PresentedQuestion> = raw
        .iter()
        .filter_map(|r| PresentedQuestion::from_raw(r).ok())
        .take(QUESTION_BANK_SIZE)
        .collect();

    if bank.len() < QUESTION_BANK_SIZE {
        return Err(TriviaError::InsufficientData { got: bank.len() });
    }

    let session = Session::new(username.to_string(), difficulty, bank, money_ladder())?;
    log::info!(
        "built session for {:?} ({} questions, difficulty {})",
        username,
        QUESTION_BANK_SIZE,
        difficulty.as_str()
    );
    Ok(session)
}

// ---------------------------------------------------------------------------
// Test support
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
