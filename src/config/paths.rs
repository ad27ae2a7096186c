//! On-disk locations of the bar documents and the tool's own files

use std::env;
use std::path::{Path, PathBuf};

use crate::constants::paths;

/// Every file and directory the tool reads or writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// Bar directory holding `config.jsonc` and `style.css`
    pub waybar_dir: PathBuf,
    /// Tool settings and translation tables
    pub config_dir: PathBuf,
    /// Theme storage
    pub data_dir: PathBuf,
}

impl AppPaths {
    /// Resolve the XDG locations. `WAYBAR_DIR` overrides the bar directory.
    pub fn resolve() -> Self {
        let config_root = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        let data_root = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));

        let waybar_dir = env::var_os(paths::WAYBAR_DIR_ENV)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| config_root.join(paths::WAYBAR_DIR));

        Self {
            waybar_dir,
            config_dir: config_root.join(paths::APP_DIR),
            data_dir: data_root.join(paths::APP_DIR),
        }
    }

    /// Lay every location out under one root
    pub fn with_root(root: &Path) -> Self {
        Self {
            waybar_dir: root.join(paths::WAYBAR_DIR),
            config_dir: root.join("config").join(paths::APP_DIR),
            data_dir: root.join("data").join(paths::APP_DIR),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.waybar_dir.join(paths::CONFIG_FILENAME)
    }

    pub fn style_file(&self) -> PathBuf {
        self.waybar_dir.join(paths::STYLE_FILENAME)
    }

    pub fn config_backup(&self) -> PathBuf {
        self.waybar_dir.join(paths::CONFIG_BACKUP_FILENAME)
    }

    pub fn style_backup(&self) -> PathBuf {
        self.waybar_dir.join(paths::STYLE_BACKUP_FILENAME)
    }

    pub fn backup_marker(&self) -> PathBuf {
        self.waybar_dir.join(paths::BACKUP_MARKER_FILENAME)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join(paths::SETTINGS_FILENAME)
    }

    /// Translation table for a language code
    pub fn lang_file(&self, code: &str) -> PathBuf {
        self.config_dir.join(paths::LANG_DIR).join(format!("{code}.json"))
    }

    pub fn themes_dir(&self) -> PathBuf {
        self.data_dir.join(paths::THEMES_DIR)
    }

    pub fn user_themes_dir(&self) -> PathBuf {
        self.data_dir.join(paths::USER_THEMES_DIR)
    }

    pub fn default_theme_file(&self) -> PathBuf {
        self.data_dir.join(paths::DEFAULT_THEME_FILENAME)
    }
}
