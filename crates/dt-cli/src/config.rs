//! Configuration loading and management.

use std::path::{Path, PathBuf};

use chrono::Duration;
use dt_core::{AccumulatorConfig, DEFAULT_LOCK_SCREEN_APP};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Report entries at or below five minutes are hidden by default.
const DEFAULT_VISIBILITY_THRESHOLD_SECS: u32 = 5 * 60;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Foreground application that means the screen is locked.
    pub lock_screen_app: String,

    /// Entries must exceed this many seconds to appear in a report.
    pub visibility_threshold_secs: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lock_screen_app: DEFAULT_LOCK_SCREEN_APP.to_string(),
            visibility_threshold_secs: DEFAULT_VISIBILITY_THRESHOLD_SECS,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (DT_*)
        figment = figment.merge(Env::prefixed("DT_"));

        figment.extract()
    }

    pub fn visibility_threshold(&self) -> Duration {
        Duration::seconds(i64::from(self.visibility_threshold_secs))
    }

    pub fn accumulator_config(&self) -> AccumulatorConfig {
        AccumulatorConfig {
            lock_screen_app: self.lock_screen_app.clone(),
        }
    }
}

/// Returns the platform-specific config directory for dt.
///
/// On Linux: `~/.config/daytally`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("daytally"))
}
