//! Lifeline application: fifty-fifty and switch-question.
//!
//! Both lifelines are one-time-use for the whole session. They are
//! independent but not symmetric in ordering: a switched question may
//! still be reduced by fifty-fifty, while a question already reduced by
//! fifty-fifty can no longer be switched.

use thiserror::Error;

use crate::session::{Lifeline, Session, SessionError};
use crate::trivia::PresentedQuestion;

// ---------------------------------------------------------------------------
// LifelineError
// ---------------------------------------------------------------------------

/// Recoverable lifeline refusals. The controller speaks a notice and
/// leaves all session state (including the retry ladder) untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifelineError {
    /// The lifeline was already spent earlier in the session.
    #[error("the {0} lifeline has already been spent")]
    AlreadyUsed(Lifeline),

    /// Switch was requested after fifty-fifty already reduced this turn.
    #[error("a question reduced by fifty-fifty can no longer be switched")]
    NotSwitchable,
}

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

/// Spend the fifty-fifty lifeline and return the 2-way option set now in
/// effect. All correctness checks for the rest of this turn run against
/// the returned set, not the 4-way one.
pub fn apply_fifty_fifty(session: &mut Session) -> Result<&[String], LifelineError> {
    match session.record_lifeline_use(Lifeline::FiftyFifty) {
        Ok(()) => {
            log::info!("fifty-fifty spent at question {}", session.current_index());
            Ok(session.active_options())
        }
        Err(SessionError::LifelineSpent(which)) => Err(LifelineError::AlreadyUsed(which)),
        // record_lifeline_use only fails with LifelineSpent; anything else
        // would be a session-invariant bug, surfaced as already-used.
        Err(_) => Err(LifelineError::AlreadyUsed(Lifeline::FiftyFifty)),
    }
}

/// Spend the switch lifeline and return the backup question now in play.
/// For this turn only the backup's text and options are used; the scoring
/// slot (stakes, checkpoint) stays at the unchanged `current_index`.
pub fn apply_switch(session: &mut Session) -> Result<&PresentedQuestion, LifelineError> {
    if session.reduced_turn() {
        return Err(LifelineError::NotSwitchable);
    }
    match session.record_lifeline_use(Lifeline::Switch) {
        Ok(()) => {
            log::info!("switch spent at question {}", session.current_index());
            Ok(session.active_question())
        }
        Err(SessionError::LifelineSpent(which)) => Err(LifelineError::AlreadyUsed(which)),
        Err(_) => Err(LifelineError::AlreadyUsed(Lifeline::Switch)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trivia::test_support::sample_session;

    // ---- fifty-fifty ---

    #[test]
    fn fifty_fifty_returns_two_options_containing_the_answer() {
        let mut session = sample_session();
        let correct = session.active_question().correct_answer.clone();

        let reduced = apply_fifty_fifty(&mut session).unwrap();
        assert_eq!(reduced.len(), 2);
        assert!(reduced.contains(&correct));
        assert!(session.fifty_fifty_used());
    }

    #[test]
    fn second_fifty_fifty_is_already_used_and_changes_nothing() {
        let mut session = sample_session();
        apply_fifty_fifty(&mut session).unwrap();
        session.advance_question(false).unwrap();

        let index_before = session.current_index();
        let options_before: Vec<String> = session.active_options().to_vec();

        let err = apply_fifty_fifty(&mut session).unwrap_err();
        assert_eq!(err, LifelineError::AlreadyUsed(Lifeline::FiftyFifty));

        assert_eq!(session.current_index(), index_before);
        assert_eq!(session.active_options(), options_before.as_slice());
        assert!(session.fifty_fifty_used());
        assert!(!session.reduced_turn());
    }

    // ---- switch ---

    #[test]
    fn switch_serves_backup_without_moving_the_scoring_slot() {
        let mut session = sample_session();
        let original = session.active_question().text.clone();

        let backup = apply_switch(&mut session).unwrap().text.clone();
        assert_ne!(backup, original);
        assert_eq!(session.current_index(), 0);
        assert!(session.switch_used());
    }

    #[test]
    fn second_switch_is_already_used() {
        let mut session = sample_session();
        apply_switch(&mut session).unwrap();
        session.advance_question(false).unwrap();

        let err = apply_switch(&mut session).unwrap_err();
        assert_eq!(err, LifelineError::AlreadyUsed(Lifeline::Switch));
    }

    // ---- ordering rule ---

    #[test]
    fn switch_then_fifty_fifty_reduces_the_backup() {
        let mut session = sample_session();
        let backup_correct = {
            apply_switch(&mut session).unwrap();
            session.active_question().correct_answer.clone()
        };

        let reduced = apply_fifty_fifty(&mut session).unwrap();
        assert_eq!(reduced.len(), 2);
        assert!(reduced.contains(&backup_correct));
        assert!(session.switched_turn());
        assert!(session.reduced_turn());
    }

    #[test]
    fn fifty_fifty_then_switch_is_rejected() {
        let mut session = sample_session();
        apply_fifty_fifty(&mut session).unwrap();

        let err = apply_switch(&mut session).unwrap_err();
        assert_eq!(err, LifelineError::NotSwitchable);
        // Switch stays available for a later turn.
        assert!(!session.switch_used());
    }
}
