//! Console speech collaborators for the terminal demo.
//!
//! `speak` prints the line; `listen` reads one line from stdin on the
//! blocking thread pool under a `tokio::time::timeout`. When the deadline
//! fires the read future is dropped, which is exactly the cancellation
//! the dialogue loop requires: a line typed after the deadline belongs to
//! the next listen cycle, not the timed-out one.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Hypothesis, ListenError, SpeakError, SpeechInput, SpeechOutput};

/// Stdin/stdout "voice" used by the terminal demo.
pub struct ConsoleVoice {
    listen_timeout: Duration,
    // One reader at a time; a listen cancelled by timeout must not leave a
    // second reader racing for the same stdin line.
    lines: Mutex<tokio::io::Lines<tokio::io::BufReader<tokio::io::Stdin>>>,
}

impl ConsoleVoice {
    pub fn new(listen_timeout: Duration) -> Self {
        use tokio::io::AsyncBufReadExt;

        Self {
            listen_timeout,
            lines: Mutex::new(tokio::io::BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

#[async_trait]
impl SpeechInput for ConsoleVoice {
    async fn listen(&self) -> Result<Hypothesis, ListenError> {
        let mut lines = self.lines.lock().await;

        let line = tokio::time::timeout(self.listen_timeout, lines.next_line())
            .await
            .map_err(|_| ListenError::Timeout)?
            .map_err(|e| ListenError::Unavailable(e.to_string()))?
            .ok_or_else(|| ListenError::Unavailable("stdin closed".into()))?;

        log::debug!("heard: {line:?}");
        Ok(Hypothesis {
            utterance: line,
            confidence: 1.0,
        })
    }
}

#[async_trait]
impl SpeechOutput for ConsoleVoice {
    async fn speak(&self, text: &str) -> Result<(), SpeakError> {
        println!("HOST: {text}");
        Ok(())
    }
}
