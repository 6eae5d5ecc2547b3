//! Configuration: settings structs, TOML persistence, platform paths.
//!
//! [`AppConfig`] is the top-level settings struct, stored as `settings.toml`
//! in the platform config directory resolved by [`AppPaths`].  A missing
//! file loads as [`AppConfig::default`], so first-run needs no special
//! handling.

pub mod paths;
pub mod settings;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use paths::AppPaths;
pub use settings::{AppConfig, ContextConfig, HotwordConfig, VoiceConfig};
