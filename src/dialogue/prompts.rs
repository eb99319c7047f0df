//! Spoken-text construction.
//!
//! Every template is a pure function of session fields (plus the ladder
//! rung), so wording is testable without driving the state machine. The
//! rung picks one of three escalating rephrasings of the same content;
//! the give-up texts are separate.

use crate::session::{Lifeline, Session};

use super::phase::Rung;

// ---------------------------------------------------------------------------
// Onboarding
// ---------------------------------------------------------------------------

pub fn welcome(rung: Rung) -> String {
    match rung {
        Rung::First => {
            "Welcome to Who Wants to be a Millionaire! Let's meet our first contestant. \
             Please tell us, what's your name?"
                .into()
        }
        Rung::Second => "Sorry, I did not catch that. What is your name?".into(),
        Rung::Third => "One more time: please tell me your name.".into(),
    }
}

pub fn greet(username: &str) -> String {
    format!("Welcome, nice to meet you, {username}.")
}

pub fn small_talk_home() -> String {
    "Where are you from?".into()
}

pub fn small_talk_job() -> String {
    "Sounds awesome! Tell us what you do for a living.".into()
}

pub fn small_talk_wrap_up() -> String {
    "That sounds really exciting! But enough talk, let's move on.".into()
}

pub fn explain_offer(rung: Rung) -> String {
    match rung {
        Rung::First => "Would you like me to explain the rules for you?".into(),
        Rung::Second => "Sorry, I did not get that. Should I explain the rules? Yes or no?".into(),
        Rung::Third => "Last try: do you want to hear the rules? Please say yes or no.".into(),
    }
}

/// The full rule explanation. Also spoken for the in-game Help digression.
pub fn rules() -> String {
    "The goal of the game is to answer 12 questions correctly. Answering each question \
     increases your reward. You can choose to walk away with your winnings after answering \
     a question correctly. Answering a question incorrectly means you will only receive \
     money from safety steps: $1000 at question 2 and $50000 at question 7. To help you, \
     you have 2 lifelines: fifty-fifty, which removes two of the incorrect answers, and \
     switch question, which changes the question altogether. You can fifty-fifty a switched \
     question, but you cannot switch a question you used fifty-fifty on. Answer by saying \
     answer 1 or first answer, answer 2 or second answer, and so on — include the number so \
     it is easy to understand you. Ask for a lifeline by saying its name, for the question \
     again by saying repeat, and for this explanation by saying help. Between questions you \
     can quit the game by saying quit, walk away with your winnings by saying walk away, \
     and ask how much money you have or how many questions are left. Make sure to speak \
     clearly and in phrases the game can understand."
        .into()
}

pub fn difficulty_select(username: &str, rung: Rung) -> String {
    match rung {
        Rung::First => format!("What difficulty would you like to play on, {username}?"),
        Rung::Second => "Sorry, I did not get what you said. Easy, medium, or hard?".into(),
        Rung::Third => "Please pick a difficulty: easy, medium, or hard.".into(),
    }
}

pub fn fetch_wait(difficulty: &str) -> String {
    format!("{difficulty} it is! Give me a moment while I get your questions ready.")
}

pub fn fetch_failed() -> String {
    "I am terribly sorry, but I could not get the questions ready. We will have to stop \
     here — please come back later."
        .into()
}

// ---------------------------------------------------------------------------
// Question round
// ---------------------------------------------------------------------------

/// Read the active question and its active option set, rung-rephrased.
pub fn question(session: &Session, rung: Rung) -> String {
    let q = session.active_question();

    let mut options = String::new();
    for (i, option) in session.active_options().iter().enumerate() {
        if i > 0 {
            options.push_str(", ");
        }
        options.push_str(&format!("{}, {}", i + 1, option));
    }

    let intro = match (rung, session.reduced_turn(), session.switched_turn()) {
        (Rung::First, true, _) => "After removing two incorrect answers the question is".into(),
        (Rung::First, false, true) => "Your backup question is".into(),
        (Rung::First, false, false) => match session.current_index() {
            0 => "Okay, your first question is".into(),
            11 => "Your final question is".into(),
            n => format!("Question {} is", n + 1),
        },
        (Rung::Second, _, _) => "Let me repeat".into(),
        (Rung::Third, _, _) => "I will say it one last time".into(),
    };

    format!("{intro}: {} The possible answers are: {options}.", q.text)
}

pub fn confirm(session: &Session, rung: Rung) -> String {
    match rung {
        Rung::First => "Is that your final answer?".into(),
        Rung::Second => format!("Are you sure it's that, {}?", session.username()),
        Rung::Third => "Last chance to tell me: is that your final answer? Yes or no?".into(),
    }
}

/// Congratulations, spoken after the session has advanced.
pub fn correct_answer(session: &Session) -> String {
    if session.current_index() == 12 {
        format!(
            "Correct! That was the right answer. Congratulations, {}! That was your last \
             question, which means you just won a million dollars! You are a millionaire!",
            session.username()
        )
    } else {
        format!(
            "Correct! That was the right answer. You are now at {}!",
            session.current_money()
        )
    }
}

/// Loss narration for a wrong confirmed answer. Call before any state is
/// torn down; it names the correct answer of the active question.
pub fn wrong_answer(session: &Session) -> String {
    format!(
        "I'm sorry, but the correct answer was {}. You will have to go home with {}.",
        session.active_question().correct_answer,
        session.safe_point()
    )
}

/// Loss narration for an exhausted retry ladder.
pub fn give_up(session: &Session) -> String {
    format!(
        "I could not understand you, so we have to stop here. You will go home with {}.",
        session.safe_point()
    )
}

// ---------------------------------------------------------------------------
// Interlude
// ---------------------------------------------------------------------------

pub fn chitchat(session: &Session, rung: Rung) -> String {
    match rung {
        Rung::First => format!("Okay, are you ready to continue, {}?", session.username()),
        Rung::Second => "Are you ready for the next question?".into(),
        Rung::Third => "Shall we move on to the next question? Yes or no?".into(),
    }
}

pub fn winnings_report(session: &Session) -> String {
    format!(
        "Let me have a look: your current potential winnings are {}, and your safety spot \
         lies at {}.",
        session.current_money(),
        session.safe_point()
    )
}

pub fn remaining_report(session: &Session) -> String {
    format!(
        "Let me have a look. You just answered question {}, so you still have {} left to \
         answer!",
        session.current_index(),
        session.remaining_questions()
    )
}

pub fn chitchat_negation() -> String {
    "I am sorry, but you must proceed or decide to leave now!".into()
}

pub fn walkaway(session: &Session) -> String {
    format!(
        "Okay! Thank you for playing, and you will now leave with {}.",
        session.current_money()
    )
}

// ---------------------------------------------------------------------------
// Lifelines
// ---------------------------------------------------------------------------

pub fn lifeline_already_used(which: Lifeline) -> String {
    format!("I am sorry, but you have already used up your {which} lifeline.")
}

pub fn not_switchable() -> String {
    "I am sorry, but you cannot switch a question after using fifty-fifty on it.".into()
}

pub fn switch_notice() -> String {
    "Okay, let me change your question to our backup question.".into()
}

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

pub fn nomatch_apology() -> String {
    "Sorry, I did not get that.".into()
}

pub fn quit_farewell() -> String {
    "Okay, thank you for playing. Goodbye!".into()
}

/// Spoken when an onboarding ladder runs out before a session exists.
pub fn onboarding_give_up() -> String {
    "I could not understand you, so we will have to stop here. Goodbye!".into()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifeline::apply_fifty_fifty;
    use crate::session::Lifeline;
    use crate::trivia::test_support::sample_session;

    #[test]
    fn question_lists_all_four_numbered_options() {
        let session = sample_session();
        let text = question(&session, Rung::First);

        assert!(text.contains("your first question"));
        assert!(text.contains(&session.active_question().text));
        for (i, option) in session.active_options().iter().enumerate() {
            assert!(text.contains(&format!("{}, {}", i + 1, option)));
        }
    }

    #[test]
    fn question_rungs_rephrase_the_same_content() {
        let session = sample_session();
        let first = question(&session, Rung::First);
        let second = question(&session, Rung::Second);
        let third = question(&session, Rung::Third);

        assert_ne!(first, second);
        assert_ne!(second, third);
        for text in [&second, &third] {
            assert!(text.contains(&session.active_question().text));
        }
    }

    #[test]
    fn reduced_question_lists_two_options() {
        let mut session = sample_session();
        apply_fifty_fifty(&mut session).unwrap();

        let text = question(&session, Rung::First);
        assert!(text.contains("After removing two incorrect answers"));
        assert!(text.contains("1, "));
        assert!(text.contains("2, "));
        assert!(!text.contains("3, "));
    }

    #[test]
    fn final_question_gets_its_own_intro() {
        let mut session = sample_session();
        for _ in 0..11 {
            session.advance_question(session.at_checkpoint()).unwrap();
        }
        assert_eq!(session.current_index(), 11);
        assert!(question(&session, Rung::First).contains("final question"));
    }

    #[test]
    fn congrats_names_the_new_winnings() {
        let mut session = sample_session();
        session.advance_question(false).unwrap();
        let text = correct_answer(&session);
        assert!(text.contains(session.current_money()));
    }

    #[test]
    fn millionaire_text_at_the_top() {
        let mut session = sample_session();
        for _ in 0..12 {
            session.advance_question(session.at_checkpoint()).unwrap();
        }
        let text = correct_answer(&session);
        assert!(text.contains("millionaire"));
        assert!(text.contains("Ada"));
    }

    #[test]
    fn loss_texts_name_the_safe_point() {
        let mut session = sample_session();
        session.advance_question(false).unwrap();
        session.advance_question(true).unwrap(); // checkpoint at index 1

        let wrong = wrong_answer(&session);
        assert!(wrong.contains(session.safe_point()));
        assert!(wrong.contains(&session.active_question().correct_answer));

        assert!(give_up(&session).contains(session.safe_point()));
    }

    #[test]
    fn reports_use_session_fields() {
        let mut session = sample_session();
        session.advance_question(false).unwrap();

        let money = winnings_report(&session);
        assert!(money.contains(session.current_money()));
        assert!(money.contains(session.safe_point()));

        let remaining = remaining_report(&session);
        assert!(remaining.contains("11 left"));
    }

    #[test]
    fn lifeline_notices_name_the_lifeline() {
        assert!(lifeline_already_used(Lifeline::FiftyFifty).contains("fifty-fifty"));
        assert!(lifeline_already_used(Lifeline::Switch).contains("switch question"));
    }

    #[test]
    fn walkaway_names_the_banked_money() {
        let mut session = sample_session();
        session.advance_question(false).unwrap();
        assert!(walkaway(&session).contains(session.current_money()));
    }
}
