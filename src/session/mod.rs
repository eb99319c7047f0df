//! The game session — single source of truth for one contestant's run.
//!
//! [`Session`] is pure data plus atomic mutators. Every mutator enforces
//! the session invariants:
//!
//! - `current_index` is in `[0, 12]`, bumps by exactly 1 on each correctly
//!   confirmed answer and never decrements.
//! - `pending_answer` exists only while a confirmation is outstanding.
//! - `fifty_fifty_used` / `switch_used` go `false → true` at most once.
//! - `safe_point` upgrades only at the checkpoint indices (1 and 6) and
//!   only on a correct confirmed answer.
//! - `current_money` follows the ladder on success and never decreases.
//! - `retry` is in `[0, 3]`; 3 means the ladder is exhausted.
//!
//! The session is created in bulk by [`crate::trivia::build_session`] once
//! the question fetch completes, mutated turn by turn by the controller,
//! and dropped when the game ends.

use thiserror::Error;

use crate::dialogue::PlayLeaf;
use crate::trivia::PresentedQuestion;

/// Length of the no-match/timeout retry ladder: three rephrasings, then
/// give-up.
pub const RETRY_LADDER_LEN: u8 = 3;

/// Question indices at which a correct confirmed answer raises the
/// guaranteed minimum reward.
pub const CHECKPOINT_INDICES: [usize; 2] = [1, 6];

/// Index of the backup question reserved for the switch lifeline.
pub const BACKUP_QUESTION_INDEX: usize = 12;

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// Question difficulty requested from the trivia source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// The API query value for this difficulty.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Keyword-spot a difficulty in a free-form utterance.
    ///
    /// This is state-specific vocabulary owned by the difficulty-select
    /// phase, not part of the closed [`crate::intent::Intent`] set.
    pub fn from_utterance(utterance: &str) -> Option<Self> {
        let lowered = utterance.to_lowercase();
        if lowered.contains("easy") {
            Some(Difficulty::Easy)
        } else if lowered.contains("medium") {
            Some(Difficulty::Medium)
        } else if lowered.contains("hard") {
            Some(Difficulty::Hard)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Lifeline
// ---------------------------------------------------------------------------

/// The two one-time-use lifelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifeline {
    FiftyFifty,
    Switch,
}

impl std::fmt::Display for Lifeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lifeline::FiftyFifty => write!(f, "fifty-fifty"),
            Lifeline::Switch => write!(f, "switch question"),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionError
// ---------------------------------------------------------------------------

/// Invariant violations reported by the session mutators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// `advance_question` would push `current_index` past the backup slot.
    #[error("cannot advance past the final question")]
    PastFinalQuestion,

    /// The bank or money ladder handed to `Session::new` has the wrong
    /// length.
    #[error("malformed session data: {0}")]
    MalformedData(String),

    /// A lifeline was recorded as used a second time.
    #[error("the {0} lifeline has already been spent")]
    LifelineSpent(Lifeline),

    /// An answer slot outside `1..=4` was proposed.
    #[error("answer slot {0} is out of range")]
    SlotOutOfRange(u8),
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Mutable record of one game. See the module docs for the invariants.
#[derive(Debug, Clone)]
pub struct Session {
    username: String,
    difficulty: Difficulty,
    bank: Vec<PresentedQuestion>,
    money_ladder: Vec<String>,
    current_index: usize,
    remaining_questions: usize,
    current_money: String,
    safe_point: String,
    pending_answer: Option<u8>,
    retry: u8,
    fifty_fifty_used: bool,
    switch_used: bool,
    /// The current turn plays the backup question (switch lifeline).
    switched_turn: bool,
    /// The current turn uses the 2-way option set (fifty-fifty lifeline).
    reduced_turn: bool,
    /// Last active PlayRound leaf, written on every digression out of the
    /// round and read back when Help returns (history semantics).
    pub last_leaf: PlayLeaf,
}

impl Session {
    /// Assemble a session from a full 13-question bank and a 12-rung money
    /// ladder. Score starts at `$0` with the safe point also at `$0`.
    pub fn new(
        username: String,
        difficulty: Difficulty,
        bank: Vec<PresentedQuestion>,
        money_ladder: Vec<String>,
    ) -> Result<Self, SessionError> {
        if bank.len() != BACKUP_QUESTION_INDEX + 1 {
            return Err(SessionError::MalformedData(format!(
                "expected {} presented questions, got {}",
                BACKUP_QUESTION_INDEX + 1,
                bank.len()
            )));
        }
        if money_ladder.len() != BACKUP_QUESTION_INDEX {
            return Err(SessionError::MalformedData(format!(
                "expected {} money ladder rungs, got {}",
                BACKUP_QUESTION_INDEX,
                money_ladder.len()
            )));
        }

        Ok(Self {
            username,
            difficulty,
            bank,
            money_ladder,
            current_index: 0,
            remaining_questions: BACKUP_QUESTION_INDEX,
            current_money: "$0".into(),
            safe_point: "$0".into(),
            pending_answer: None,
            retry: 0,
            fifty_fifty_used: false,
            switch_used: false,
            switched_turn: false,
            reduced_turn: false,
            last_leaf: PlayLeaf::QuestionPrompt,
        })
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Zero-based index of the question currently being played, `0..=12`.
    /// 12 means all main questions have been answered (the game is won).
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn remaining_questions(&self) -> usize {
        self.remaining_questions
    }

    /// Currency label of the winnings banked so far.
    pub fn current_money(&self) -> &str {
        &self.current_money
    }

    /// Currency label of the guaranteed minimum reward.
    pub fn safe_point(&self) -> &str {
        &self.safe_point
    }

    pub fn money_ladder(&self) -> &[String] {
        &self.money_ladder
    }

    pub fn pending_answer(&self) -> Option<u8> {
        self.pending_answer
    }

    /// Consecutive no-match/timeout count within the current prompt cycle.
    pub fn retry(&self) -> u8 {
        self.retry
    }

    pub fn retry_exhausted(&self) -> bool {
        self.retry >= RETRY_LADDER_LEN
    }

    pub fn fifty_fifty_used(&self) -> bool {
        self.fifty_fifty_used
    }

    pub fn switch_used(&self) -> bool {
        self.switch_used
    }

    pub fn switched_turn(&self) -> bool {
        self.switched_turn
    }

    pub fn reduced_turn(&self) -> bool {
        self.reduced_turn
    }

    /// Whether the current index is a checkpoint slot.
    pub fn at_checkpoint(&self) -> bool {
        CHECKPOINT_INDICES.contains(&self.current_index)
    }

    /// The question the contestant is actually facing this turn — the
    /// backup question while a switch is in effect, otherwise the question
    /// at `current_index`.
    pub fn active_question(&self) -> &PresentedQuestion {
        if self.switched_turn {
            &self.bank[BACKUP_QUESTION_INDEX]
        } else {
            &self.bank[self.current_index]
        }
    }

    /// The option set correctness checks run against this turn: the 2-way
    /// set while fifty-fifty is in effect, otherwise the 4-way set.
    pub fn active_options(&self) -> &[String] {
        let question = self.active_question();
        if self.reduced_turn {
            &question.reduced_options
        } else {
            &question.full_options
        }
    }

    /// Whether the pending answer names the correct option in the active
    /// set. `None` when no answer is pending or the slot falls outside the
    /// active set.
    pub fn pending_answer_is_correct(&self) -> Option<bool> {
        let slot = self.pending_answer? as usize;
        let options = self.active_options();
        let picked = options.get(slot.checked_sub(1)?)?;
        Some(*picked == self.active_question().correct_answer)
    }

    // -----------------------------------------------------------------------
    // Atomic mutators
    // -----------------------------------------------------------------------

    /// Score a correct confirmed answer: bank the ladder value for the
    /// current slot, upgrade the safe point when `did_pass_checkpoint`,
    /// and move to the next question. Clears the pending answer, the retry
    /// counter and both per-turn lifeline flags.
    pub fn advance_question(&mut self, did_pass_checkpoint: bool) -> Result<(), SessionError> {
        if self.current_index >= BACKUP_QUESTION_INDEX {
            return Err(SessionError::PastFinalQuestion);
        }

        self.current_money = self.money_ladder[self.current_index].clone();
        if did_pass_checkpoint {
            self.safe_point = self.current_money.clone();
        }

        self.current_index += 1;
        self.remaining_questions -= 1;
        self.pending_answer = None;
        self.retry = 0;
        self.switched_turn = false;
        self.reduced_turn = false;
        Ok(())
    }

    /// Mark a lifeline as spent and arm its per-turn effect. Rejects a
    /// second use; the flags are monotone for the whole session.
    pub fn record_lifeline_use(&mut self, which: Lifeline) -> Result<(), SessionError> {
        match which {
            Lifeline::FiftyFifty => {
                if self.fifty_fifty_used {
                    return Err(SessionError::LifelineSpent(which));
                }
                self.fifty_fifty_used = true;
                self.reduced_turn = true;
            }
            Lifeline::Switch => {
                if self.switch_used {
                    return Err(SessionError::LifelineSpent(which));
                }
                self.switch_used = true;
                self.switched_turn = true;
            }
        }
        Ok(())
    }

    /// Record the option the contestant named but has not yet confirmed.
    pub fn set_pending_answer(&mut self, slot: u8) -> Result<(), SessionError> {
        if !(1..=4).contains(&slot) {
            return Err(SessionError::SlotOutOfRange(slot));
        }
        self.pending_answer = Some(slot);
        Ok(())
    }

    pub fn clear_pending_answer(&mut self) {
        self.pending_answer = None;
    }

    /// Count a no-match or timeout. Saturates at the ladder length.
    pub fn bump_retry(&mut self) {
        self.retry = (self.retry + 1).min(RETRY_LADDER_LEN);
    }

    pub fn reset_retry(&mut self) {
        self.retry = 0;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
