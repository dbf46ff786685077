//! Settings file — plain JSON, every field optional.
//!
//! ```json
//! {
//!   "hash": { "mCost": 65536, "tCost": 3, "pCost": 4, "outputLen": 32 },
//!   "generator": { "length": 24, "symbols": false },
//!   "policy": { "minLength": 12 }
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use credkit_core::{Argon2idParams, GeneratorConfig, PolicyConfig};
use serde::{Deserialize, Serialize};

/// File consulted when no path is given.
pub const CONFIG_FILE: &str = "credkit.json";

/// Defaults for every command. Command-line flags override these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Parameters for newly created hashes. Verification ignores these.
    pub hash: Argon2idParams,
    /// Password generator defaults.
    pub generator: GeneratorConfig,
    /// Strength policy for `check` and `hash --enforce-policy`.
    pub policy: PolicyConfig,
}

impl Settings {
    /// Load settings from `path`, or from [`CONFIG_FILE`] in the working directory.
    ///
    /// A missing file yields [`Default::default()`]. An unreadable or
    /// invalid file also yields defaults, with a warning logged.
    #[must_use]
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.map_or_else(|| PathBuf::from(CONFIG_FILE), Path::to_path_buf);
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => {
                    tracing::debug!(path = %path.display(), "settings loaded");
                    settings
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "invalid settings file, using defaults");
                    Self::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable settings file, using defaults");
                Self::default()
            }
        }
    }
}
