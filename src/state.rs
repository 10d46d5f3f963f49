//! Application state: persisted preferences and the current submission.
//!
//! Preferences (theme and language) survive between runs in
//! `<state dir>/preferences.toml`. The submission slot holds at most one
//! [`SubmissionResult`]; a new result replaces the old one wholesale.

use crate::generate::SubmissionResult;
use crate::input::Language;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub const PREFERENCES_FILE: &str = "preferences.toml";

#[derive(Error, Debug)]
pub enum StateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Report color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}' (expected light or dark)")),
        }
    }
}

/// User preferences persisted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: Theme,
    pub language: Language,
}

impl Preferences {
    /// Load preferences from `dir`, falling back to defaults when the file
    /// does not exist.
    pub fn load(dir: &Path) -> Result<Self, StateError> {
        let path = dir.join(PREFERENCES_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Write preferences to `dir`, creating it if needed.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, StateError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(PREFERENCES_FILE);
        fs::write(&path, toml::to_string(self)?)?;
        tracing::debug!(path = %path.display(), "saved preferences");
        Ok(path)
    }
}

/// Preferences plus the single current submission slot.
#[derive(Debug, Default)]
pub struct AppState {
    pub preferences: Preferences,
    current: Option<SubmissionResult>,
}

impl AppState {
    pub fn new(preferences: Preferences) -> Self {
        Self {
            preferences,
            current: None,
        }
    }

    /// Store `result`, returning the one it replaced.
    pub fn replace_result(&mut self, result: SubmissionResult) -> Option<SubmissionResult> {
        self.current.replace(result)
    }

    pub fn result(&self) -> Option<&SubmissionResult> {
        self.current.as_ref()
    }

    /// Drop the current result.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
