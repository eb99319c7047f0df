//! Application entry point — terminal game host.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Wire the console speech stand-ins and the Open Trivia DB source.
//! 5. Run the host loop — one [`TurnController`] per contestant, until a
//!    game ends in Quit or an unrecoverable error.

use std::sync::Arc;
use std::time::Duration;

use voice_quiz::{
    config::AppConfig,
    dialogue::{GameOutcome, TurnController},
    speech::{ConsoleVoice, SpeechInput, SpeechOutput},
    trivia::{OpenTdbSource, QuestionSource},
};

fn main() {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("voice-quiz starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime (fetch + speech run concurrently)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    // 4. Collaborators. The console voice stands in for both directions of
    // the speech channel; typed lines are "utterances".
    let voice = Arc::new(ConsoleVoice::new(Duration::from_secs(
        config.dialogue.listen_timeout_secs,
    )));
    let output: Arc<dyn SpeechOutput> = voice.clone();
    let input: Arc<dyn SpeechInput> = voice;
    let source: Arc<dyn QuestionSource> = Arc::new(OpenTdbSource::from_config(&config.trivia));

    // 5. Host loop: fresh controller per contestant, back to the top after
    // every settled game.
    rt.block_on(async move {
        loop {
            let mut controller =
                TurnController::new(output.clone(), input.clone(), source.clone());
            match controller.run().await {
                Ok(GameOutcome::Quit) => {
                    log::info!("contestant quit; shutting down");
                    break;
                }
                Ok(outcome) => {
                    log::info!("game settled as {outcome:?}; waiting for the next contestant");
                }
                Err(e) => {
                    log::error!("game aborted: {e}");
                    break;
                }
            }
        }
    });
}
