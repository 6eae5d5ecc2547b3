//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout:
//!
//! Config dir (settings + user data):
//!   Windows: %APPDATA%\voice-expense\
//!   macOS:   ~/Library/Application Support/voice-expense/
//!   Linux:   ~/.config/voice-expense/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml` and `category-synonyms.json`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Full path to the user synonym overlay, `category-synonyms.json`.
    pub synonyms_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "voice-expense";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path (should be extremely rare in practice).
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");
        let synonyms_file = config_dir.join("category-synonyms.json");

        Self {
            config_dir,
            settings_file,
            synonyms_file,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
