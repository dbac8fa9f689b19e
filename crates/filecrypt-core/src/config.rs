use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::FilecryptError;

/// Top-level configuration (loaded from filecrypt.toml, all sections optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilecryptConfig {
    pub browser: BrowserConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Starting directory when none is given on the command line
    pub start_dir: Option<PathBuf>,
    /// Show entries whose name starts with '.'
    pub show_hidden: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level filter (default: info)
    pub level: String,
    /// Append diagnostics to this file; unset disables logging entirely
    /// (the interactive shell owns the terminal)
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl FilecryptConfig {
    /// Default config location: `$HOME/.config/filecrypt/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".config/filecrypt/config.toml"))
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, FilecryptError> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| FilecryptError::Config(e.to_string()))
    }

    /// Load the given path, or the default location, falling back to
    /// defaults when no file exists. A file that exists but fails to parse
    /// is an error; silently ignoring it would mask operator typos.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, FilecryptError> {
        match path {
            Some(p) => Self::load_from(p),
            None => match Self::default_path() {
                Some(p) if p.exists() => Self::load_from(&p),
                _ => Ok(Self::default()),
            },
        }
    }
}
