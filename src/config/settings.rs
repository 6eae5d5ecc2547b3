//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// VoiceConfig
// ---------------------------------------------------------------------------

/// Settings for one-shot expense-capture sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// Recognition language tag passed to the speech capability.
    pub language: String,
    /// Maximum number of transcript alternatives requested per capture.
    /// Only the top alternative is used; the rest are logged.
    pub max_alternatives: usize,
    /// Wall-clock budget for a capture session in seconds.  The controller
    /// force-stops the capability when it is exceeded.
    pub capture_timeout_secs: u64,
    /// Minimum match confidence for automatic category assignment.  Below
    /// this the controller asks the user to confirm.
    pub confidence_threshold: f64,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            language: "es-ES".into(),
            max_alternatives: 5,
            capture_timeout_secs: 10,
            confidence_threshold: 0.5,
        }
    }
}

// ---------------------------------------------------------------------------
// HotwordConfig
// ---------------------------------------------------------------------------

/// Settings for the continuous activation-phrase listener.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotwordConfig {
    /// Whether hotword detection runs at all.
    pub enabled: bool,
    /// Accepted activation phrase variants, matched case-insensitively
    /// against each utterance.
    pub phrases: Vec<String>,
}

impl Default for HotwordConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            phrases: vec!["hey luzi".into(), "hey lusi".into(), "hey lucy".into()],
        }
    }
}

// ---------------------------------------------------------------------------
// ContextConfig
// ---------------------------------------------------------------------------

/// Settings for the parser's short-term phrase context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Number of recent transcripts kept for pattern learning.
    pub window_size: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self { window_size: 5 }
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
/// use voice_expense::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Capture-session settings.
    pub voice: VoiceConfig,
    /// Activation-phrase settings.
    pub hotword: HotwordConfig,
    /// Parser context settings.
    pub context: ContextConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify that a default `AppConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.voice.language, loaded.voice.language);
        assert_eq!(
            original.voice.max_alternatives,
            loaded.voice.max_alternatives
        );
        assert_eq!(
            original.voice.capture_timeout_secs,
            loaded.voice.capture_timeout_secs
        );
        assert_eq!(
            original.voice.confidence_threshold,
            loaded.voice.confidence_threshold
        );
        assert_eq!(original.hotword.enabled, loaded.hotword.enabled);
        assert_eq!(original.hotword.phrases, loaded.hotword.phrases);
        assert_eq!(original.context.window_size, loaded.context.window_size);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.voice.language, default.voice.language);
        assert_eq!(config.hotword.phrases, default.hotword.phrases);
        assert_eq!(config.context.window_size, default.context.window_size);
    }

    /// Verify the documented default values.
    #[test]
    fn default_values_are_stable() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.voice.language, "es-ES");
        assert_eq!(cfg.voice.max_alternatives, 5);
        assert_eq!(cfg.voice.capture_timeout_secs, 10);
        assert!((cfg.voice.confidence_threshold - 0.5).abs() < f64::EPSILON);
        assert!(cfg.hotword.enabled);
        assert_eq!(cfg.hotword.phrases.len(), 3);
        assert_eq!(cfg.context.window_size, 5);
    }

    /// Verify that modified non-default values survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.voice.language = "es-AR".into();
        cfg.voice.capture_timeout_secs = 15;
        cfg.voice.confidence_threshold = 0.6;
        cfg.hotword.enabled = false;
        cfg.hotword.phrases = vec!["oye luzi".into()];

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.voice.language, "es-AR");
        assert_eq!(loaded.voice.capture_timeout_secs, 15);
        assert!((loaded.voice.confidence_threshold - 0.6).abs() < f64::EPSILON);
        assert!(!loaded.hotword.enabled);
        assert_eq!(loaded.hotword.phrases, vec!["oye luzi".to_string()]);
    }
}
