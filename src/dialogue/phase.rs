//! States of the dialogue machine.
//!
//! The machine is hierarchical: top-level [`Phase`]s sequence onboarding,
//! the fetch suspension and the game round; [`PlayLeaf`] names the leaves
//! inside the round composite. Transitions are:
//!
//! ```text
//! AskName ─▶ Greet ─▶ SmallTalkHome ─▶ SmallTalkJob ─▶ ExplainOffer
//!   ExplainOffer ──yes──▶ ExplainRules ─▶ DifficultySelect
//!                ──no───▶ DifficultySelect
//! DifficultySelect ─▶ FetchQuestions ──ok──▶ Play(QuestionPrompt)
//!                                    ──err─▶ abort (session discarded)
//! Play(QuestionPrompt) ──option──▶ Play(Confirm)
//! Play(Confirm) ──yes+right──▶ Play(ChitChat) │ Over(Win) at index 12
//!              ──yes+wrong──▶ Over(Loss)
//!              ──no─────────▶ Play(QuestionPrompt)
//! Play(ChitChat) ──yes──▶ Play(QuestionPrompt)
//!               ──walk away──▶ Over(Walkaway)
//! any listen state ──"quit"──▶ Over(Quit)
//! any Play leaf ──"help"──▶ help digression ─▶ last_leaf (history)
//! ```

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Top-level dialogue states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Collect the contestant's name (any non-quit utterance accepted).
    AskName,
    /// One-line welcome using the collected name.
    Greet,
    /// Small talk: where are you from?
    SmallTalkHome,
    /// Small talk: what do you do?
    SmallTalkJob,
    /// Offer to explain the rules (yes/no sub-protocol).
    ExplainOffer,
    /// Speak the rules, then move on.
    ExplainRules,
    /// Keyword-match easy/medium/hard.
    DifficultySelect,
    /// Suspended on the question source's async fetch.
    FetchQuestions,
    /// The game round composite.
    Play(PlayLeaf),
    /// Terminal narration, then the controller returns.
    Over(GameOutcome),
}

/// Leaves of the `Play` composite. The session's `last_leaf` field
/// remembers one of these across the Help digression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayLeaf {
    /// Read the active question and its options, retry ladder attached.
    QuestionPrompt,
    /// "Is that your final answer?" for the pending slot.
    Confirm,
    /// Post-answer interlude: continue, walk away, or ask for status.
    ChitChat,
}

/// How a game ended. Every outcome funnels the host loop back to Init.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// All twelve questions answered correctly.
    Win,
    /// Wrong confirmed answer or an exhausted retry ladder; reward is the
    /// safe point.
    Loss,
    /// Quit intent, at any listen state.
    Quit,
    /// Explicit leave during the interlude; reward is the banked money.
    Walkaway,
}

// ---------------------------------------------------------------------------
// Rung
// ---------------------------------------------------------------------------

/// Position on the three-step retry ladder. Selects which rephrasing of
/// the same content gets spoken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rung {
    First,
    Second,
    Third,
}

impl Rung {
    /// Map a retry count to a ladder rung; `None` means the ladder is
    /// exhausted and the give-up transition fires.
    pub fn from_retry(retry: u8) -> Option<Self> {
        match retry {
            0 => Some(Rung::First),
            1 => Some(Rung::Second),
            2 => Some(Rung::Third),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
