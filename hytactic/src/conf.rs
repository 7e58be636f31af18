//! Tactic driver options, persisted as TOML.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::{TacticError, TacticResult},
    magic::ENV_TACTIC_CONFIG_PATH,
};

/// Source label used in parse errors for options given as text.
pub const INLINE_SOURCE: &str = "<string>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TacticOptions {
    /// Line width used when rendering proof states.
    pub pp_width: usize,
    /// Upper bound on the number of candidates [`crate::tactic::solve`] inspects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_candidates: Option<usize>,
    /// Emit colored output when rendering to a terminal.
    pub color: bool,
}

impl Default for TacticOptions {
    fn default() -> Self {
        Self {
            pp_width: hykernel::pretty::DEFAULT_WIDTH,
            max_candidates: None,
            color: true,
        }
    }
}

impl TacticOptions {
    /// Get the default path to the options file.
    pub fn default_path() -> PathBuf {
        if let Ok(config_path) = std::env::var(ENV_TACTIC_CONFIG_PATH) {
            return config_path.into();
        }

        let mut path = PathBuf::new();

        #[cfg(target_os = "windows")]
        {
            if let Ok(appdata) = std::env::var("APPDATA") {
                path.push(appdata);
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
                path.push(xdg_config_home);
            } else if let Ok(home) = std::env::var("HOME") {
                path.push(home);
                path.push(".config");
            }
        }

        path.push("hyperion");
        path.push("tactic.toml");
        path
    }

    /// Parse options from TOML text. Errors name the source as [`INLINE_SOURCE`].
    pub fn from_toml_str(s: &str) -> TacticResult<Self> {
        toml::from_str(s).map_err(|e| TacticError::ConfigParse {
            source: e,
            file: INLINE_SOURCE.to_string(),
        })
    }

    /// Load options from a TOML file.
    pub fn load_from_toml(path: &Path) -> TacticResult<Self> {
        let toml_str = std::fs::read_to_string(path)?;

        toml::from_str(&toml_str).map_err(|e| TacticError::ConfigParse {
            source: e,
            file: path.display().to_string(),
        })
    }

    /// Save options to a TOML file, creating parent directories as needed.
    pub fn save_to_toml(&self, path: &Path) -> TacticResult<()> {
        let toml_str = toml::to_string(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, toml_str)?;
        Ok(())
    }
}
