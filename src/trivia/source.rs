//! The question source boundary and the Open Trivia DB implementation.
//!
//! [`QuestionSource`] is the async interface the controller suspends on in
//! its fetch state. [`OpenTdbSource`] calls
//! `GET {base_url}/api.php?amount=N&difficulty=D&type=multiple`; all
//! connection details come from [`TriviaConfig`], nothing is hardcoded.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::TriviaConfig;
use crate::session::Difficulty;
use crate::trivia::bank::RawQuestion;

// ---------------------------------------------------------------------------
// FetchError
// ---------------------------------------------------------------------------

/// Errors from the question fetch. All are fatal for the current game —
/// the fetch is never retried automatically.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP transport or connection error.
    #[error("question request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("question request timed out")]
    Timeout,

    /// The response body could not be parsed as the expected JSON.
    #[error("failed to parse question response: {0}")]
    Parse(String),

    /// The API reported a non-success response code (e.g. not enough
    /// questions in the selected category/difficulty).
    #[error("trivia API returned response code {0}")]
    Api(u8),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// QuestionSource trait
// ---------------------------------------------------------------------------

/// Async source of raw trivia questions.
///
/// Implementors must be `Send + Sync` so they can be held behind an
/// `Arc<dyn QuestionSource>` by the controller.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch one game's worth of raw questions for `difficulty`.
    async fn fetch(&self, difficulty: Difficulty) -> Result<Vec<RawQuestion>, FetchError>;
}

// ---------------------------------------------------------------------------
// OpenTdbSource
// ---------------------------------------------------------------------------

/// Production [`QuestionSource`] against the Open Trivia Database.
pub struct OpenTdbSource {
    client: reqwest::Client,
    config: TriviaConfig,
}

/// Wire shape of an Open Trivia DB response.
#[derive(Debug, serde::Deserialize)]
struct OpenTdbResponse {
    response_code: u8,
    results: Vec<RawQuestion>,
}

impl OpenTdbSource {
    /// Build a source from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`. A default (no-timeout) client is used as a
    /// last-resort fallback if the builder fails (should never happen in
    /// practice).
    pub fn from_config(config: &TriviaConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl QuestionSource for OpenTdbSource {
    async fn fetch(&self, difficulty: Difficulty) -> Result<Vec<RawQuestion>, FetchError> {
        let url = format!(
            "{}/api.php?amount={}&difficulty={}&type=multiple",
            self.config.base_url,
            self.config.amount,
            difficulty.as_str()
        );

        log::debug!("fetching questions: {url}");

        let response = self.client.get(&url).send().await?;
        let body: OpenTdbResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        if body.response_code != 0 {
            return Err(FetchError::Api(body.response_code));
        }

        // Open Trivia DB ships HTML-encoded text; decode it before it ever
        // reaches a spoken prompt.
        let results = body
            .results
            .into_iter()
            .map(|mut raw| {
                raw.question = decode_entities(&raw.question);
                raw.correct_answer = decode_entities(&raw.correct_answer);
                for answer in &mut raw.incorrect_answers {
                    *answer = decode_entities(answer);
                }
                raw
            })
            .collect();

        Ok(results)
    }
}

/// Decode the handful of HTML entities Open Trivia DB actually emits.
fn decode_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&rsquo;", "'")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&eacute;", "é")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

// ---------------------------------------------------------------------------
// MockQuestionSource  (test-only)
// ---------------------------------------------------------------------------

/// A test double that returns a pre-configured response without touching
/// the network.
#[cfg(test)]
pub struct MockQuestionSource {
    response: std::sync::Mutex<Option<Result<Vec<RawQuestion>, FetchError>>>,
}

#[cfg(test)]
impl MockQuestionSource {
    /// Create a mock that returns `Ok(questions)` once.
    pub fn ok(questions: Vec<RawQuestion>) -> Self {
        Self {
            response: std::sync::Mutex::new(Some(Ok(questions))),
        }
    }

    /// Create a mock that returns `Err(error)` once.
    pub fn err(error: FetchError) -> Self {
        Self {
            response: std::sync::Mutex::new(Some(Err(error))),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl QuestionSource for MockQuestionSource {
    async fn fetch(&self, _difficulty: Difficulty) -> Result<Vec<RawQuestion>, FetchError> {
        self.response
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(FetchError::Request("mock already consumed".into())))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
