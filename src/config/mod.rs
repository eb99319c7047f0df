//! Configuration module for Voice Quiz.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the trivia
//! source and the dialogue loop, `AppPaths` for the cross-platform config
//! directory, and TOML persistence via `AppConfig::load` /
//! `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, DialogueConfig, TriviaConfig};
