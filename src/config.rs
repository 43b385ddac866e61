use std::{fs, path::{Path, PathBuf}};

use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};
use which::which;

use crate::{NotesError, Result};

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Directory holding the persisted note collection
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Default editor command (used when composing note content)
    #[serde(default)]
    pub editor_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: default_data_dir(),
            editor_command: None,
        }
    }
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "quicknotes")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".quicknotes"))
}

impl Config {
    /// Loads configuration from the given path, or from the default config
    /// location when no path is provided. Falls back to defaults when no
    /// config file exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(NotesError::ConfigError {
                        message: format!("Config file not found: {}", path.display()),
                    });
                }
                Some(path.to_path_buf())
            }
            None => Self::default_path().filter(|path| path.exists()),
        };

        match path {
            Some(path) => {
                let text = fs::read_to_string(&path)?;
                let config = serde_json::from_str(&text).map_err(|e| NotesError::ConfigError {
                    message: format!("Failed to parse {}: {}", path.display(), e),
                })?;
                debug!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            None => Ok(Config::default()),
        }
    }

    /// Default location of the config file, when the platform exposes one
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "quicknotes").map(|dirs| dirs.config_dir().join("config.json"))
    }

    // This method provides smart fallbacks when no editor is configured
    pub fn get_editor_command(&self) -> String {
        // First try the configured editor
        if let Some(editor) = &self.editor_command {
            return editor.clone();
        }

        // Then try environment variable
        if let Ok(editor) = std::env::var("EDITOR") {
            return editor;
        }

        // Fall back to platform defaults
        if cfg!(windows) {
            "notepad".to_string()
        } else if cfg!(target_os = "macos") {
            "open -t".to_string()
        } else {
            // Try common Linux editors
            for editor in &["nano", "vim", "vi", "emacs"] {
                if which(editor).is_ok() {
                    return editor.to_string();
                }
            }
            "nano".to_string()
        }
    }
}
