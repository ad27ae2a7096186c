//! Tool settings and UI translations
//!
//! Both live as small JSON files next to each other. A missing or broken
//! file never stops the tool: settings fall back to defaults and
//! translation lookups fall back to the key itself.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use super::paths::AppPaths;

/// Persisted tool settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults when absent or invalid
    pub fn load(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => {
                info!(path = %path.display(), "No settings file, using defaults");
                return Self::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Invalid settings file, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, json).with_context(|| format!("Failed to write settings to {:?}", path))?;
        Ok(())
    }
}

/// Flat key → text table for one language
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations {
    table: HashMap<String, String>,
}

impl Translations {
    pub fn load(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str::<HashMap<String, String>>(&contents) {
            Ok(table) => {
                info!(path = %path.display(), keys = table.len(), "Loaded translations");
                Self { table }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Invalid translation table, using keys");
                Self::default()
            }
        }
    }

    /// Translated text, or the key when the table has no entry
    pub fn tr<'a>(&'a self, key: &'a str) -> &'a str {
        self.table.get(key).map_or(key, String::as_str)
    }
}

/// Paths, settings and translations, loaded once and passed explicitly
#[derive(Debug, Clone)]
pub struct AppContext {
    pub paths: AppPaths,
    pub settings: Settings,
    pub translations: Translations,
}

impl AppContext {
    pub fn load(paths: AppPaths) -> Self {
        let settings = Settings::load(&paths.settings_file());
        let translations = Translations::load(&paths.lang_file(&settings.language));
        Self {
            paths,
            settings,
            translations,
        }
    }

    /// Re-read settings and translations from disk
    pub fn reload(&mut self) {
        *self = Self::load(self.paths.clone());
    }

    /// Persist a new UI language and switch translations to it
    pub fn set_language(&mut self, code: &str) -> Result<()> {
        let code = code.trim();
        anyhow::ensure!(
            !code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
            "Invalid language code {code:?}"
        );

        self.settings.language = code.to_string();
        self.settings
            .save(&self.paths.settings_file())
            .with_context(|| format!("Failed to save language '{}'", code))?;
        self.translations = Translations::load(&self.paths.lang_file(code));
        info!(language = %code, "Language changed");
        Ok(())
    }

    pub fn tr<'a>(&'a self, key: &'a str) -> &'a str {
        self.translations.tr(key)
    }
}
