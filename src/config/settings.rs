//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across
//! threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// TriviaConfig
// ---------------------------------------------------------------------------

/// Settings for the Open Trivia DB question source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriviaConfig {
    /// Base URL of the trivia API.
    pub base_url: String,
    /// How many raw questions to request per game. Must stay at or above
    /// the 13-question bank size (12 main + 1 backup); requesting a couple
    /// of spares tolerates the occasional malformed record.
    pub amount: usize,
    /// Maximum seconds to wait for the fetch before giving up.
    pub timeout_secs: u64,
}

impl Default for TriviaConfig {
    fn default() -> Self {
        Self {
            base_url: "https://opentdb.com".into(),
            amount: 15,
            timeout_secs: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// DialogueConfig
// ---------------------------------------------------------------------------

/// Settings for the dialogue loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueConfig {
    /// Seconds a listen cycle waits for an utterance before it times out.
    /// Timeouts feed the same retry ladder as classification misses.
    pub listen_timeout_secs: u64,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            listen_timeout_secs: 8,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use voice_quiz::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Question source settings.
    pub trivia: TriviaConfig,
    /// Dialogue loop settings.
    pub dialogue: DialogueConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a
    /// missing file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
