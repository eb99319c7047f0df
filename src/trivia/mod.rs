//! Trivia engine: question bank construction and the question source.
//!
//! [`build_session`] turns 13 raw fetched questions into a
//! [`crate::session::Session`] with per-question randomised option
//! orderings and the fixed 12-rung money ladder. [`source::QuestionSource`]
//! is the async boundary to the network; [`source::OpenTdbSource`] is the
//! production implementation against the Open Trivia DB.

pub mod bank;
pub mod source;

pub use bank::{build_session, money_ladder, PresentedQuestion, RawQuestion, TriviaError};
pub use source::{FetchError, OpenTdbSource, QuestionSource};

// test-only helpers shared by the session, lifeline and dialogue tests.
#[cfg(test)]
pub use bank::test_support;
#[cfg(test)]
pub use source::MockQuestionSource;
