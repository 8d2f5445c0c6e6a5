//! Persisted player preferences
//!
//! Two string values survive restarts: whether the computer plays the right paddle,
//! and how well it plays. They live in `settings.toml`, separate from `config.toml`,
//! because the menu rewrites them while the config file is only ever edited by hand.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::ai::Difficulty;

pub const AI_ENABLED_KEY: &str = "ai_enabled";
pub const AI_LEVEL_KEY: &str = "ai_level";

/// String key-value store that outlives the process
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Settings backed by a flat TOML table on disk
pub struct FileSettings {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileSettings {
    /// Open the store. A missing or unreadable file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                warn!("ignoring malformed settings file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, values }
    }

    fn save(&self) -> Result<()> {
        let contents = toml::to_string(&self.values).context("serializing settings")?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        debug!("saving settings to {}", self.path.display());
        fs::write(&self.path, contents)
            .with_context(|| format!("writing {}", self.path.display()))
    }
}

impl SettingsStore for FileSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        if let Err(e) = self.save() {
            warn!("settings not persisted: {:#}", e);
        }
    }
}

/// Computer opponent preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AiSettings {
    pub enabled: bool,
    pub difficulty: Difficulty,
}

impl AiSettings {
    /// Read from the store; anything missing or unrecognized takes its default.
    pub fn load(store: &dyn SettingsStore) -> Self {
        let enabled = store
            .get(AI_ENABLED_KEY)
            .map(|v| v.trim() == "true")
            .unwrap_or(false);
        let difficulty = store
            .get(AI_LEVEL_KEY)
            .and_then(|v| Difficulty::parse(&v))
            .unwrap_or_default();
        debug!(enabled, ?difficulty, "loaded AI settings");
        Self {
            enabled,
            difficulty,
        }
    }

    pub fn save(&self, store: &mut dyn SettingsStore) {
        store.set(AI_ENABLED_KEY, if self.enabled { "true" } else { "false" });
        store.set(AI_LEVEL_KEY, self.difficulty.as_str());
    }
}

#[cfg(test)]
pub struct MemorySettings(pub BTreeMap<String, String>);

#[cfg(test)]
impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }
}
