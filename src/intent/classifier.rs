//! The `Intent` variant set and the ordered keyword rule table.
//!
//! Matching policy:
//!
//! 1. Keyword intents: case-insensitive substring containment, checked in
//!    a fixed priority order; the first matching rule wins.
//! 2. Confirmation / negation: exact match (after normalisation) against a
//!    small fixed-phrase table, checked only after every keyword rule has
//!    failed.
//! 3. Anything else is [`Intent::NoMatch`].
//!
//! `classify` is a pure function of the utterance and the tables — no
//! session state, no side effects.

// ---------------------------------------------------------------------------
// Intent
// ---------------------------------------------------------------------------

/// The closed set of things a contestant can mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Abandon the game entirely.
    Quit,
    /// Hear the rules again (in-game digression).
    Help,
    /// Hear the current prompt again.
    Repeat,
    /// Spend the switch-question lifeline.
    SwitchQuestion,
    /// Spend the fifty-fifty lifeline.
    FiftyFifty,
    /// Leave with the current winnings (post-answer interlude only).
    WalkAway,
    /// Ask for the current winnings and safe point.
    AskWinnings,
    /// Ask how many questions are left.
    AskRemaining,
    /// Pick answer option `1..=4` by numeral or ordinal.
    SelectOption(u8),
    /// An explicit yes.
    Confirmation,
    /// An explicit no.
    Negation,
    /// Nothing in the tables matched.
    NoMatch,
}

// ---------------------------------------------------------------------------
// Rule tables
// ---------------------------------------------------------------------------

/// Keyword rules in priority order. First hit wins.
///
/// Control intents come before the option picks because the keyword sets
/// overlap: "fifty" contains no digit, but "I'll quit at question 2" must
/// be Quit, and "how much money" must never fall through to option one
/// just because "money" contains "one".
const KEYWORD_RULES: &[(Intent, &[&str])] = &[
    (Intent::Quit, &["quit"]),
    (Intent::Help, &["help"]),
    (Intent::Repeat, &["repeat"]),
    (Intent::SwitchQuestion, &["switch", "change"]),
    (Intent::FiftyFifty, &["fifty", "50"]),
    (Intent::WalkAway, &["walk away", "leave"]),
    (Intent::AskWinnings, &["money", "winnings"]),
    (Intent::AskRemaining, &["questions"]),
    (Intent::SelectOption(1), &["first", "1st", "one", "1"]),
    (Intent::SelectOption(2), &["second", "2nd", "two", "2"]),
    (Intent::SelectOption(3), &["third", "3rd", "three", "3"]),
    (Intent::SelectOption(4), &["fourth", "4th", "four", "4"]),
];

/// Fixed confirmation phrases, matched exactly after normalisation.
const CONFIRMATION_PHRASES: &[&str] = &[
    "yes",
    "yeah",
    "yep",
    "sure",
    "of course",
    "exactly",
    "yeah, exactly",
];

/// Fixed negation phrases, matched exactly after normalisation.
const NEGATION_PHRASES: &[&str] = &["no", "nope", "no way", "not what i said", "nah"];

// ---------------------------------------------------------------------------
// IntentClassifier
// ---------------------------------------------------------------------------

/// Stateless utterance classifier over the fixed rule tables.
///
/// ```
/// use voice_quiz::intent::{Intent, IntentClassifier};
///
/// let classifier = IntentClassifier::new();
/// assert_eq!(classifier.classify("the first one"), Intent::SelectOption(1));
/// assert_eq!(classifier.classify("Yes."), Intent::Confirmation);
/// assert_eq!(classifier.classify("let me quit, answer 2"), Intent::Quit);
/// ```
#[derive(Debug, Default, Clone)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify `utterance` into an [`Intent`].
    pub fn classify(&self, utterance: &str) -> Intent {
        let lowered = utterance.to_lowercase();

        for (intent, keywords) in KEYWORD_RULES {
            if keywords.iter().any(|kw| lowered.contains(kw)) {
                return *intent;
            }
        }

        let normalised = normalise(&lowered);
        if CONFIRMATION_PHRASES.contains(&normalised.as_str()) {
            return Intent::Confirmation;
        }
        if NEGATION_PHRASES.contains(&normalised.as_str()) {
            return Intent::Negation;
        }

        Intent::NoMatch
    }
}

/// Trim whitespace and strip trailing sentence punctuation so that
/// recogniser output like `"Yes."` matches the phrase table entry `"yes"`.
fn normalise(lowered: &str) -> String {
    lowered
        .trim()
        .trim_end_matches(['.', '!', '?'])
        .trim_end()
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
