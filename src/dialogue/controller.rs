//! The turn controller: one contestant, one game.
//!
//! [`TurnController::run`] drives the phase machine of [`super::phase`]
//! to completion. Each phase handler speaks, listens for at most one
//! utterance, classifies it, and returns the next phase; `run` is a plain
//! loop over that transition function, which keeps every transition in
//! one exhaustive `match` per state.
//!
//! Turn discipline: a handler never listens before its `speak` future has
//! resolved, and never has more than one listen outstanding. A timed-out
//! listen is simply dropped by the speech layer, so a late hypothesis
//! cannot leak into the next turn.

use std::sync::Arc;

use thiserror::Error;

use crate::intent::{Intent, IntentClassifier};
use crate::lifeline::{apply_fifty_fifty, apply_switch, LifelineError};
use crate::session::{Difficulty, Session, SessionError};
use crate::speech::{ListenError, SpeakError, SpeechInput, SpeechOutput};
use crate::trivia::{build_session, FetchError, QuestionSource, TriviaError};

use super::phase::{GameOutcome, Phase, PlayLeaf, Rung};
use super::prompts;

// ---------------------------------------------------------------------------
// GameError
// ---------------------------------------------------------------------------

/// Unrecoverable failures of a game run. Everything the dialogue can talk
/// its way around (misheard utterances, spent lifelines, refusals) is
/// handled inside the phase machine and never surfaces here.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("question fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("question data unusable: {0}")]
    Trivia(#[from] TriviaError),

    #[error("speech output failed: {0}")]
    Speak(#[from] SpeakError),

    #[error("speech input failed: {0}")]
    Listen(#[from] ListenError),

    #[error("session rejected a transition: {0}")]
    Session(#[from] SessionError),

    /// A handler observed state it can never be in. Indicates a bug in
    /// the transition function, not bad input.
    #[error("dialogue invariant broken: {0}")]
    Internal(String),
}

// ---------------------------------------------------------------------------
// TurnController
// ---------------------------------------------------------------------------

/// Owns the collaborators and the per-game mutable state.
pub struct TurnController {
    output: Arc<dyn SpeechOutput>,
    input: Arc<dyn SpeechInput>,
    source: Arc<dyn QuestionSource>,
    classifier: IntentClassifier,
    username: Option<String>,
    difficulty: Option<Difficulty>,
    session: Option<Session>,
}

impl TurnController {
    pub fn new(
        output: Arc<dyn SpeechOutput>,
        input: Arc<dyn SpeechInput>,
        source: Arc<dyn QuestionSource>,
    ) -> Self {
        Self {
            output,
            input,
            source,
            classifier: IntentClassifier::new(),
            username: None,
            difficulty: None,
            session: None,
        }
    }

    /// Play one full game, from the name prompt to a terminal outcome.
    ///
    /// `Ok` carries how the game ended; `Err` means the game could not be
    /// played out (fetch failure, dead speech channel). The session, if
    /// one was built, stays on the controller for post-game inspection.
    pub async fn run(&mut self) -> Result<GameOutcome, GameError> {
        self.run_from(Phase::AskName).await
    }

    async fn run_from(&mut self, start: Phase) -> Result<GameOutcome, GameError> {
        let mut phase = start;
        loop {
            log::debug!("entering phase {phase:?}");
            phase = match phase {
                Phase::AskName => self.ask_name().await?,
                Phase::Greet => self.greet().await?,
                Phase::SmallTalkHome => self.small_talk_home().await?,
                Phase::SmallTalkJob => self.small_talk_job().await?,
                Phase::ExplainOffer => self.explain_offer().await?,
                Phase::ExplainRules => self.explain_rules().await?,
                Phase::DifficultySelect => self.select_difficulty().await?,
                Phase::FetchQuestions => self.fetch_questions().await?,
                Phase::Play(leaf) => match leaf {
                    PlayLeaf::QuestionPrompt => self.question_prompt().await?,
                    PlayLeaf::Confirm => self.confirm().await?,
                    PlayLeaf::ChitChat => self.chit_chat().await?,
                },
                Phase::Over(outcome) => {
                    log::info!("game over: {outcome:?}");
                    return Ok(outcome);
                }
            };
        }
    }

    // -----------------------------------------------------------------------
    // Plumbing
    // -----------------------------------------------------------------------

    async fn speak(&self, text: &str) -> Result<(), GameError> {
        log::debug!("speaking: {text}");
        self.output.speak(text).await?;
        Ok(())
    }

    /// One listen cycle. `Ok(None)` is a timeout; the caller decides what
    /// a missed turn means in its state. A dead recogniser is fatal.
    async fn listen(&self) -> Result<Option<String>, GameError> {
        match self.input.listen().await {
            Ok(hypothesis) => {
                log::debug!(
                    "heard {:?} (confidence {:.2})",
                    hypothesis.utterance,
                    hypothesis.confidence
                );
                Ok(Some(hypothesis.utterance))
            }
            Err(ListenError::Timeout) => {
                log::debug!("listen timed out");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn session(&self) -> Result<&Session, GameError> {
        self.session
            .as_ref()
            .ok_or_else(|| GameError::Internal("no active session".into()))
    }

    fn session_mut(&mut self) -> Result<&mut Session, GameError> {
        self.session
            .as_mut()
            .ok_or_else(|| GameError::Internal("no active session".into()))
    }

    fn username(&self) -> Result<&str, GameError> {
        self.username
            .as_deref()
            .ok_or_else(|| GameError::Internal("no username collected".into()))
    }

    async fn quit(&mut self) -> Result<Phase, GameError> {
        self.speak(&prompts::quit_farewell()).await?;
        Ok(Phase::Over(GameOutcome::Quit))
    }

    /// Give-up before a session exists: no winnings to settle.
    async fn onboarding_give_up(&mut self) -> Result<Phase, GameError> {
        self.speak(&prompts::onboarding_give_up()).await?;
        Ok(Phase::Over(GameOutcome::Quit))
    }

    /// Give-up inside the round: the contestant leaves with the safe
    /// point, same settlement as a wrong answer.
    async fn round_give_up(&mut self) -> Result<Phase, GameError> {
        let text = prompts::give_up(self.session()?);
        self.speak(&text).await?;
        Ok(Phase::Over(GameOutcome::Loss))
    }

    // -----------------------------------------------------------------------
    // Onboarding
    // -----------------------------------------------------------------------

    /// Any non-quit utterance is accepted as the contestant's name.
    async fn ask_name(&mut self) -> Result<Phase, GameError> {
        let mut retry = 0u8;
        while let Some(rung) = Rung::from_retry(retry) {
            self.speak(&prompts::welcome(rung)).await?;
            match self.listen().await? {
                None => retry += 1,
                Some(utterance) => {
                    if self.classifier.classify(&utterance) == Intent::Quit {
                        return self.quit().await;
                    }
                    let name = utterance.trim().trim_end_matches(['.', '!', '?']).to_string();
                    if name.is_empty() {
                        retry += 1;
                        continue;
                    }
                    self.username = Some(name);
                    return Ok(Phase::Greet);
                }
            }
        }
        self.onboarding_give_up().await
    }

    async fn greet(&mut self) -> Result<Phase, GameError> {
        let text = prompts::greet(self.username()?);
        self.speak(&text).await?;
        Ok(Phase::SmallTalkHome)
    }

    /// Small talk is one-shot: whatever the answer (or silence), the show
    /// moves on. Only Quit is honoured.
    async fn small_talk_home(&mut self) -> Result<Phase, GameError> {
        self.speak(&prompts::small_talk_home()).await?;
        if let Some(utterance) = self.listen().await? {
            if self.classifier.classify(&utterance) == Intent::Quit {
                return self.quit().await;
            }
        }
        Ok(Phase::SmallTalkJob)
    }

    async fn small_talk_job(&mut self) -> Result<Phase, GameError> {
        self.speak(&prompts::small_talk_job()).await?;
        if let Some(utterance) = self.listen().await? {
            if self.classifier.classify(&utterance) == Intent::Quit {
                return self.quit().await;
            }
        }
        self.speak(&prompts::small_talk_wrap_up()).await?;
        Ok(Phase::ExplainOffer)
    }

    async fn explain_offer(&mut self) -> Result<Phase, GameError> {
        let mut retry = 0u8;
        while let Some(rung) = Rung::from_retry(retry) {
            self.speak(&prompts::explain_offer(rung)).await?;
            match self.listen().await? {
                None => retry += 1,
                Some(utterance) => match self.classifier.classify(&utterance) {
                    Intent::Quit => return self.quit().await,
                    Intent::Confirmation => return Ok(Phase::ExplainRules),
                    Intent::Negation => return Ok(Phase::DifficultySelect),
                    _ => retry += 1,
                },
            }
        }
        self.onboarding_give_up().await
    }

    async fn explain_rules(&mut self) -> Result<Phase, GameError> {
        self.speak(&prompts::rules()).await?;
        Ok(Phase::DifficultySelect)
    }

    async fn select_difficulty(&mut self) -> Result<Phase, GameError> {
        let mut retry = 0u8;
        while let Some(rung) = Rung::from_retry(retry) {
            let text = prompts::difficulty_select(self.username()?, rung);
            self.speak(&text).await?;
            match self.listen().await? {
                None => retry += 1,
                Some(utterance) => {
                    if self.classifier.classify(&utterance) == Intent::Quit {
                        return self.quit().await;
                    }
                    match Difficulty::from_utterance(&utterance) {
                        Some(difficulty) => {
                            self.difficulty = Some(difficulty);
                            return Ok(Phase::FetchQuestions);
                        }
                        None => retry += 1,
                    }
                }
            }
        }
        self.onboarding_give_up().await
    }

    /// Fetch and assemble the question bank. Any failure here is spoken
    /// once and then surfaced as an error; a short bank is never played.
    async fn fetch_questions(&mut self) -> Result<Phase, GameError> {
        let difficulty = self
            .difficulty
            .ok_or_else(|| GameError::Internal("no difficulty selected".into()))?;
        self.speak(&prompts::fetch_wait(difficulty.as_str())).await?;

        let raw = match self.source.fetch(difficulty).await {
            Ok(raw) => raw,
            Err(e) => {
                self.speak(&prompts::fetch_failed()).await?;
                return Err(e.into());
            }
        };
        match build_session(&raw, difficulty, self.username()?) {
            Ok(session) => {
                self.session = Some(session);
                Ok(Phase::Play(PlayLeaf::QuestionPrompt))
            }
            Err(e) => {
                self.speak(&prompts::fetch_failed()).await?;
                Err(e.into())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Round leaves
    // -----------------------------------------------------------------------

    /// Read the active question; wait for an option pick, a lifeline, or
    /// one of the digressions. The retry counter is shared with Confirm.
    async fn question_prompt(&mut self) -> Result<Phase, GameError> {
        let Some(rung) = Rung::from_retry(self.session()?.retry()) else {
            return self.round_give_up().await;
        };
        self.session_mut()?.last_leaf = PlayLeaf::QuestionPrompt;

        let text = prompts::question(self.session()?, rung);
        let option_count = self.session()?.active_options().len();
        self.speak(&text).await?;

        let Some(utterance) = self.listen().await? else {
            self.session_mut()?.bump_retry();
            return Ok(Phase::Play(PlayLeaf::QuestionPrompt));
        };
        match self.classifier.classify(&utterance) {
            Intent::Quit => self.quit().await,
            Intent::Help => self.help_digression().await,
            Intent::Repeat => Ok(Phase::Play(PlayLeaf::QuestionPrompt)),
            Intent::FiftyFifty => {
                match apply_fifty_fifty(self.session_mut()?) {
                    Ok(_) => self.session_mut()?.reset_retry(),
                    Err(e) => self.speak(&lifeline_refusal(&e)).await?,
                }
                Ok(Phase::Play(PlayLeaf::QuestionPrompt))
            }
            Intent::SwitchQuestion => {
                match apply_switch(self.session_mut()?) {
                    Ok(_) => {
                        self.speak(&prompts::switch_notice()).await?;
                        self.session_mut()?.reset_retry();
                    }
                    Err(e) => self.speak(&lifeline_refusal(&e)).await?,
                }
                Ok(Phase::Play(PlayLeaf::QuestionPrompt))
            }
            Intent::SelectOption(slot) if (slot as usize) <= option_count => {
                self.session_mut()?.set_pending_answer(slot)?;
                Ok(Phase::Play(PlayLeaf::Confirm))
            }
            // A slot outside the active set (say "third" after fifty-fifty)
            // is a miss like any other.
            _ => self.miss(PlayLeaf::QuestionPrompt).await,
        }
    }

    /// "Is that your final answer?" for the pending slot.
    async fn confirm(&mut self) -> Result<Phase, GameError> {
        let Some(rung) = Rung::from_retry(self.session()?.retry()) else {
            return self.round_give_up().await;
        };
        self.session_mut()?.last_leaf = PlayLeaf::Confirm;

        let text = prompts::confirm(self.session()?, rung);
        self.speak(&text).await?;

        let Some(utterance) = self.listen().await? else {
            self.session_mut()?.bump_retry();
            return Ok(Phase::Play(PlayLeaf::Confirm));
        };
        match self.classifier.classify(&utterance) {
            Intent::Quit => self.quit().await,
            Intent::Help => self.help_digression().await,
            Intent::Repeat => Ok(Phase::Play(PlayLeaf::Confirm)),
            Intent::Confirmation => self.settle_answer().await,
            Intent::Negation => {
                let session = self.session_mut()?;
                session.clear_pending_answer();
                session.bump_retry();
                Ok(Phase::Play(PlayLeaf::QuestionPrompt))
            }
            _ => self.miss(PlayLeaf::Confirm).await,
        }
    }

    /// Resolve a confirmed answer against the active option set.
    async fn settle_answer(&mut self) -> Result<Phase, GameError> {
        let correct = self
            .session()?
            .pending_answer_is_correct()
            .ok_or_else(|| GameError::Internal("confirming without a pending answer".into()))?;

        if !correct {
            let text = prompts::wrong_answer(self.session()?);
            self.speak(&text).await?;
            return Ok(Phase::Over(GameOutcome::Loss));
        }

        let session = self.session_mut()?;
        let crossed_checkpoint = session.at_checkpoint();
        session.advance_question(crossed_checkpoint)?;

        let text = prompts::correct_answer(self.session()?);
        self.speak(&text).await?;

        if self.session()?.remaining_questions() == 0 {
            Ok(Phase::Over(GameOutcome::Win))
        } else {
            Ok(Phase::Play(PlayLeaf::ChitChat))
        }
    }

    /// Post-answer interlude: carry on, settle up, or ask for status.
    async fn chit_chat(&mut self) -> Result<Phase, GameError> {
        let Some(rung) = Rung::from_retry(self.session()?.retry()) else {
            return self.round_give_up().await;
        };
        self.session_mut()?.last_leaf = PlayLeaf::ChitChat;

        let text = prompts::chitchat(self.session()?, rung);
        self.speak(&text).await?;

        let Some(utterance) = self.listen().await? else {
            self.session_mut()?.bump_retry();
            return Ok(Phase::Play(PlayLeaf::ChitChat));
        };
        match self.classifier.classify(&utterance) {
            Intent::Quit => self.quit().await,
            Intent::Help => self.help_digression().await,
            Intent::Repeat => Ok(Phase::Play(PlayLeaf::ChitChat)),
            Intent::Confirmation => {
                self.session_mut()?.reset_retry();
                Ok(Phase::Play(PlayLeaf::QuestionPrompt))
            }
            Intent::WalkAway => {
                let text = prompts::walkaway(self.session()?);
                self.speak(&text).await?;
                Ok(Phase::Over(GameOutcome::Walkaway))
            }
            Intent::AskWinnings => {
                let text = prompts::winnings_report(self.session()?);
                self.speak(&text).await?;
                Ok(Phase::Play(PlayLeaf::ChitChat))
            }
            Intent::AskRemaining => {
                let text = prompts::remaining_report(self.session()?);
                self.speak(&text).await?;
                Ok(Phase::Play(PlayLeaf::ChitChat))
            }
            Intent::Negation => {
                self.speak(&prompts::chitchat_negation()).await?;
                self.session_mut()?.bump_retry();
                Ok(Phase::Play(PlayLeaf::ChitChat))
            }
            _ => self.miss(PlayLeaf::ChitChat).await,
        }
    }

    /// Speak the rules, then resume the leaf the contestant came from.
    async fn help_digression(&mut self) -> Result<Phase, GameError> {
        self.speak(&prompts::rules()).await?;
        Ok(Phase::Play(self.session()?.last_leaf))
    }

    /// Shared NoMatch handling inside the round: apologise and climb the
    /// ladder. (Timeouts climb silently; the rephrased prompt is enough.)
    async fn miss(&mut self, leaf: PlayLeaf) -> Result<Phase, GameError> {
        self.speak(&prompts::nomatch_apology()).await?;
        self.session_mut()?.bump_retry();
        Ok(Phase::Play(leaf))
    }
}

fn lifeline_refusal(e: &LifelineError) -> String {
    match e {
        LifelineError::AlreadyUsed(which) => prompts::lifeline_already_used(*which),
        LifelineError::NotSwitchable => prompts::not_switchable(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::scripted::{RecordingOutput, ScriptedInput};
    use crate::trivia::test_support::sample_raw_questions;
    use crate::trivia::{money_ladder, MockQuestionSource, PresentedQuestion};

    /// A question whose correct answer is always option 1, in both the
    /// full and the reduced set, so scripts can answer deterministically.
    fn rigged_question(i: usize) -> PresentedQuestion {
        PresentedQuestion {
            text: format!("Question number {i}?"),
            correct_answer: format!("right {i}"),
            full_options: vec![
                format!("right {i}"),
                format!("wrong {i} a"),
                format!("wrong {i} b"),
                format!("wrong {i} c"),
            ],
            reduced_options: vec![format!("right {i}"), format!("wrong {i} a")],
        }
    }

    fn rigged_session() -> Session {
        Session::new(
            "Ada".into(),
            Difficulty::Easy,
            (0..13).map(rigged_question).collect(),
            money_ladder(),
        )
        .unwrap()
    }

    /// Controller with a rigged session already installed, poised at the
    /// start of the round.
    fn in_round(
        script: Vec<Option<&str>>,
    ) -> (TurnController, Arc<RecordingOutput>) {
        let output = Arc::new(RecordingOutput::new());
        let mut controller = TurnController::new(
            output.clone(),
            Arc::new(ScriptedInput::from_utterances(script)),
            Arc::new(MockQuestionSource::ok(vec![])),
        );
        controller.username = Some("Ada".into());
        controller.session = Some(rigged_session());
        (controller, output)
    }

    fn onboarding(
        script: Vec<Option<&str>>,
        source: MockQuestionSource,
    ) -> (TurnController, Arc<RecordingOutput>) {
        let output = Arc::new(RecordingOutput::new());
        let controller = TurnController::new(
            output.clone(),
            Arc::new(ScriptedInput::from_utterances(script)),
            Arc::new(source),
        );
        (controller, output)
    }

    fn transcript_contains(output: &RecordingOutput, needle: &str) -> bool {
        output.transcript().iter().any(|line| line.contains(needle))
    }

    // ---- onboarding ---

    #[tokio::test]
    async fn quit_at_difficulty_select_ends_the_game_without_a_session() {
        let (mut controller, output) = onboarding(
            vec![
                Some("Ada"),
                Some("from town"),
                Some("I teach"),
                Some("No."),
                Some("Quit."),
            ],
            MockQuestionSource::ok(vec![]),
        );

        let outcome = controller.run().await.unwrap();
        assert_eq!(outcome, GameOutcome::Quit);
        assert!(controller.session.is_none());
        assert!(transcript_contains(&output, "thank you for playing"));
    }

    #[tokio::test]
    async fn declining_rules_skips_the_explanation() {
        let (mut controller, output) = onboarding(
            vec![
                Some("Ada"),
                Some("here"),
                Some("things"),
                Some("No."),
                Some("quit"),
            ],
            MockQuestionSource::ok(vec![]),
        );

        controller.run().await.unwrap();
        assert!(!transcript_contains(&output, "The goal of the game"));
        assert!(transcript_contains(&output, "What difficulty"));
    }

    #[tokio::test]
    async fn accepting_rules_speaks_them_before_difficulty() {
        let (mut controller, output) = onboarding(
            vec![
                Some("Ada"),
                Some("here"),
                Some("things"),
                Some("Yes."),
                Some("quit"),
            ],
            MockQuestionSource::ok(vec![]),
        );

        controller.run().await.unwrap();
        assert!(transcript_contains(&output, "The goal of the game"));
    }

    #[tokio::test]
    async fn silent_contestant_is_sent_home_after_three_prompts() {
        let (mut controller, output) = onboarding(vec![], MockQuestionSource::ok(vec![]));

        let outcome = controller.run().await.unwrap();
        assert_eq!(outcome, GameOutcome::Quit);

        let names_asked = output
            .transcript()
            .iter()
            .filter(|line| line.contains("name"))
            .count();
        assert_eq!(names_asked, 3);
    }

    #[tokio::test]
    async fn short_fetch_aborts_before_the_round() {
        let (mut controller, output) = onboarding(
            vec![Some("Ada"), Some("here"), Some("stuff"), Some("no"), Some("easy")],
            MockQuestionSource::ok(sample_raw_questions(5)),
        );

        let err = controller.run().await.unwrap_err();
        assert!(matches!(
            err,
            GameError::Trivia(TriviaError::InsufficientData { got: 5 })
        ));
        assert!(controller.session.is_none());
        assert!(transcript_contains(&output, "could not get the questions"));
        // The round never started.
        assert!(!transcript_contains(&output, "first question"));
    }

    #[tokio::test]
    async fn fetch_error_aborts_with_the_same_apology() {
        let (mut controller, output) = onboarding(
            vec![Some("Ada"), Some("here"), Some("stuff"), Some("no"), Some("hard")],
            MockQuestionSource::err(FetchError::Api(2)),
        );

        let err = controller.run().await.unwrap_err();
        assert!(matches!(err, GameError::Fetch(FetchError::Api(2))));
        assert!(transcript_contains(&output, "could not get the questions"));
    }

    // ---- answering ---

    #[tokio::test]
    async fn confirmed_correct_answer_banks_the_first_rung() {
        let (mut controller, output) =
            in_round(vec![Some("first"), Some("Yes."), Some("walk away")]);

        let outcome = controller
            .run_from(Phase::Play(PlayLeaf::QuestionPrompt))
            .await
            .unwrap();

        assert_eq!(outcome, GameOutcome::Walkaway);
        let session = controller.session.unwrap();
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.current_money(), "$500");
        assert!(transcript_contains(&output, "You are now at $500"));
        assert!(transcript_contains(&output, "leave with $500"));
    }

    #[tokio::test]
    async fn checkpoint_crossing_raises_the_safe_point() {
        let (mut controller, _) = in_round(vec![
            Some("answer 1"),
            Some("yes"),
            Some("yes"),
            Some("answer 1"),
            Some("yes"),
            Some("walk away"),
        ]);

        let outcome = controller
            .run_from(Phase::Play(PlayLeaf::QuestionPrompt))
            .await
            .unwrap();

        assert_eq!(outcome, GameOutcome::Walkaway);
        let session = controller.session.unwrap();
        assert_eq!(session.current_index(), 2);
        assert_eq!(session.safe_point(), "$1000");
    }

    #[tokio::test]
    async fn wrong_confirmed_answer_loses_with_the_safe_point() {
        let (mut controller, output) = in_round(vec![Some("second"), Some("yes")]);

        let outcome = controller
            .run_from(Phase::Play(PlayLeaf::QuestionPrompt))
            .await
            .unwrap();

        assert_eq!(outcome, GameOutcome::Loss);
        assert!(transcript_contains(&output, "the correct answer was right 0"));
        assert!(transcript_contains(&output, "go home with $0"));
    }

    #[tokio::test]
    async fn winning_the_final_question_is_a_win() {
        let mut script = Vec::new();
        for _ in 0..11 {
            script.extend([Some("answer 1"), Some("yes"), Some("yes")]);
        }
        script.extend([Some("answer 1"), Some("yes")]);

        let (mut controller, output) = in_round(script);
        let outcome = controller
            .run_from(Phase::Play(PlayLeaf::QuestionPrompt))
            .await
            .unwrap();

        assert_eq!(outcome, GameOutcome::Win);
        let session = controller.session.unwrap();
        assert_eq!(session.current_index(), 12);
        assert_eq!(session.current_money(), "$1000000");
        assert!(transcript_contains(&output, "millionaire"));
    }

    // ---- retry ladder ---

    #[tokio::test]
    async fn three_silent_turns_reach_give_up() {
        let (mut controller, output) = in_round(vec![]);

        let outcome = controller
            .run_from(Phase::Play(PlayLeaf::QuestionPrompt))
            .await
            .unwrap();

        assert_eq!(outcome, GameOutcome::Loss);
        let question_reads = output
            .transcript()
            .iter()
            .filter(|line| line.contains("Question number 0?"))
            .count();
        assert_eq!(question_reads, 3);
        assert!(transcript_contains(&output, "could not understand you"));
    }

    #[tokio::test]
    async fn three_nomatches_reach_give_up_with_apologies() {
        let (mut controller, output) =
            in_round(vec![Some("banana"), Some("potato"), Some("porridge")]);

        let outcome = controller
            .run_from(Phase::Play(PlayLeaf::QuestionPrompt))
            .await
            .unwrap();

        assert_eq!(outcome, GameOutcome::Loss);
        let apologies = output
            .transcript()
            .iter()
            .filter(|line| line.contains("did not get that"))
            .count();
        assert_eq!(apologies, 3);
    }

    #[tokio::test]
    async fn three_refusals_share_the_ladder_and_reach_give_up() {
        let (mut controller, _) = in_round(vec![
            Some("answer 1"),
            Some("no"),
            Some("answer 1"),
            Some("no"),
            Some("answer 1"),
            Some("no"),
        ]);

        let outcome = controller
            .run_from(Phase::Play(PlayLeaf::QuestionPrompt))
            .await
            .unwrap();
        assert_eq!(outcome, GameOutcome::Loss);
    }

    #[tokio::test]
    async fn refusal_returns_to_the_question_with_pending_cleared() {
        let (mut controller, output) =
            in_round(vec![Some("answer 2"), Some("no"), Some("answer 1"), Some("yes"), Some("quit")]);

        let outcome = controller
            .run_from(Phase::Play(PlayLeaf::QuestionPrompt))
            .await
            .unwrap();

        assert_eq!(outcome, GameOutcome::Quit);
        let session = controller.session.unwrap();
        assert_eq!(session.current_index(), 1);
        assert!(transcript_contains(&output, "Let me repeat"));
    }

    #[tokio::test]
    async fn repeat_respeaks_without_climbing_the_ladder() {
        let (mut controller, output) =
            in_round(vec![Some("repeat"), Some("repeat"), Some("repeat"), Some("quit")]);

        let outcome = controller
            .run_from(Phase::Play(PlayLeaf::QuestionPrompt))
            .await
            .unwrap();

        assert_eq!(outcome, GameOutcome::Quit);
        let first_rung_reads = output
            .transcript()
            .iter()
            .filter(|line| line.contains("first question is"))
            .count();
        assert_eq!(first_rung_reads, 4);
    }

    // ---- lifelines ---

    #[tokio::test]
    async fn fifty_fifty_reduces_the_prompt_and_second_use_is_refused() {
        let (mut controller, output) = in_round(vec![
            Some("fifty fifty"),
            Some("fifty fifty"),
            Some("quit"),
        ]);

        let outcome = controller
            .run_from(Phase::Play(PlayLeaf::QuestionPrompt))
            .await
            .unwrap();

        assert_eq!(outcome, GameOutcome::Quit);
        let session = controller.session.unwrap();
        assert!(session.fifty_fifty_used());
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.active_options().len(), 2);
        assert!(transcript_contains(&output, "After removing two incorrect answers"));
        assert!(transcript_contains(&output, "already used up your fifty-fifty"));
    }

    #[tokio::test]
    async fn switch_serves_the_backup_question() {
        let (mut controller, output) =
            in_round(vec![Some("switch"), Some("answer 1"), Some("yes"), Some("walk away")]);

        let outcome = controller
            .run_from(Phase::Play(PlayLeaf::QuestionPrompt))
            .await
            .unwrap();

        assert_eq!(outcome, GameOutcome::Walkaway);
        let session = controller.session.unwrap();
        assert!(session.switch_used());
        assert_eq!(session.current_index(), 1);
        assert!(transcript_contains(&output, "backup question"));
        assert!(transcript_contains(&output, "Question number 12?"));
    }

    #[tokio::test]
    async fn switch_after_fifty_fifty_is_refused() {
        let (mut controller, output) =
            in_round(vec![Some("fifty fifty"), Some("switch"), Some("quit")]);

        let outcome = controller
            .run_from(Phase::Play(PlayLeaf::QuestionPrompt))
            .await
            .unwrap();

        assert_eq!(outcome, GameOutcome::Quit);
        let session = controller.session.unwrap();
        assert!(!session.switch_used());
        assert!(transcript_contains(&output, "cannot switch a question"));
    }

    #[tokio::test]
    async fn slot_beyond_the_reduced_set_is_a_miss() {
        let (mut controller, output) =
            in_round(vec![Some("fifty fifty"), Some("third"), Some("quit")]);

        let outcome = controller
            .run_from(Phase::Play(PlayLeaf::QuestionPrompt))
            .await
            .unwrap();

        assert_eq!(outcome, GameOutcome::Quit);
        let session = controller.session.unwrap();
        assert_eq!(session.pending_answer(), None);
        assert!(transcript_contains(&output, "did not get that"));
    }

    // ---- digressions ---

    #[tokio::test]
    async fn help_resumes_the_leaf_it_interrupted() {
        let (mut controller, output) = in_round(vec![
            Some("answer 1"),
            Some("help"),
            Some("yes"),
            Some("walk away"),
        ]);

        let outcome = controller
            .run_from(Phase::Play(PlayLeaf::QuestionPrompt))
            .await
            .unwrap();

        // The "yes" after the rules confirms the still-pending answer.
        assert_eq!(outcome, GameOutcome::Walkaway);
        assert!(transcript_contains(&output, "The goal of the game"));
        assert_eq!(controller.session.unwrap().current_index(), 1);
    }

    #[tokio::test]
    async fn chitchat_reports_do_not_climb_the_ladder() {
        let (mut controller, output) = in_round(vec![
            Some("answer 1"),
            Some("yes"),
            Some("how much money do I have"),
            Some("how many questions are left"),
            Some("yes"),
            Some("quit"),
        ]);

        let outcome = controller
            .run_from(Phase::Play(PlayLeaf::QuestionPrompt))
            .await
            .unwrap();

        assert_eq!(outcome, GameOutcome::Quit);
        assert!(transcript_contains(&output, "potential winnings are $500"));
        assert!(transcript_contains(&output, "11 left to answer"));
        // The second question was reached, so the reports cost nothing.
        assert!(transcript_contains(&output, "Question number 1?"));
    }

    #[tokio::test]
    async fn chitchat_refusal_demands_a_decision() {
        let (mut controller, output) = in_round(vec![
            Some("answer 1"),
            Some("yes"),
            Some("no"),
            Some("walk away"),
        ]);

        let outcome = controller
            .run_from(Phase::Play(PlayLeaf::QuestionPrompt))
            .await
            .unwrap();

        assert_eq!(outcome, GameOutcome::Walkaway);
        assert!(transcript_contains(&output, "proceed or decide to leave"));
    }
}
