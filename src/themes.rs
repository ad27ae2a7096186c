//! Built-in and user stylesheets
//!
//! A theme is a whole stylesheet. Applying one replaces the session's
//! stylesheet; the bar config is left alone.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::AppPaths;
use crate::persistence::write_atomic;
use crate::session::{Edit, Session};

/// Stylesheet shipped with the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinTheme {
    pub name: &'static str,
    pub css: &'static str,
}

macro_rules! theme_css {
    ($text:literal, $bar_bg:literal, $bar_btn:literal, $active:literal, $active_text:literal, $module_bg:literal) => {
        concat!(
            "\n#waybar { background-color: rgba(0,0,0,0.0); color: ", $text, "; }\n",
            "#workspaces { background-color: ", $bar_bg, "; border-radius: 14px; }\n",
            "#workspaces button { background-color: ", $bar_btn, "; border-radius: 6px; color: ", $text, "; }\n",
            "#workspaces button.active { background-color: ", $active, "; border-radius: 6px; color: ", $active_text, "; }\n",
            "#clock,#battery,#cpu,#memory,#disk,#temperature,#backlight,#network,#pulseaudio,#wireplumber,#custom-media,#mode,#idle_inhibitor,#mpd,#bluetooth,#custom-spotify,#custom-weather,#custom-screenshot_t,#custom-power,#tray,#custom-storage {\n",
            "  background-color: ", $module_bg, "; border-radius: 14px; color: ", $text, ";\n",
            "}\n"
        )
    };
}

pub const BUILTIN_THEMES: [BuiltinTheme; 5] = [
    BuiltinTheme {
        name: "Dark Emerald",
        css: theme_css!("#e0e0e0", "rgba(17,24,39,0.85)", "rgba(17,24,39,0.85)", "rgba(2,89,57,0.95)", "#ffffff", "rgba(17,24,39,0.85)"),
    },
    BuiltinTheme {
        name: "Sunrise Blue",
        css: theme_css!("#ffffff", "rgba(10,25,47,0.85)", "rgba(10,25,47,0.85)", "rgba(255,179,71,0.95)", "#1a1a1a", "rgba(10,25,47,0.78)"),
    },
    BuiltinTheme {
        name: "Sunset Orange",
        css: theme_css!("#f5f5f5", "rgba(28,27,26,0.85)", "rgba(28,27,26,0.85)", "rgba(255,112,67,0.95)", "#1a1a1a", "rgba(28,27,26,0.80)"),
    },
    BuiltinTheme {
        name: "Sakura Light",
        css: theme_css!("#2e2e2e", "rgba(248,241,241,0.68)", "rgba(255,183,197,0.82)", "rgba(255,183,197,0.95)", "#1a1a1a", "rgba(248,241,241,0.72)"),
    },
    BuiltinTheme {
        name: "Glacier Minimal",
        css: theme_css!("#1e1e1e", "rgba(232,240,248,0.80)", "rgba(232,240,248,0.80)", "rgba(0,122,204,0.92)", "#ffffff", "rgba(255,255,255,0.80)"),
    },
];

/// Built-in theme by name, ignoring case
pub fn builtin(name: &str) -> Option<&'static BuiltinTheme> {
    BUILTIN_THEMES
        .iter()
        .find(|theme| theme.name.eq_ignore_ascii_case(name.trim()))
}

/// Reject names that are empty or would escape the themes directory
pub fn validate_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Theme name is empty");
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." || name.contains('\0') {
        bail!("Invalid theme name {name:?}");
    }
    Ok(name)
}

fn user_theme_path(paths: &AppPaths, name: &str) -> Result<PathBuf> {
    let name = validate_name(name)?;
    Ok(paths.user_themes_dir().join(format!("{name}.css")))
}

/// Names of saved user themes, sorted
pub fn list_user_themes(paths: &AppPaths) -> Result<Vec<String>> {
    let dir = paths.user_themes_dir();
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut names: Vec<String> = fs::read_dir(&dir)
        .with_context(|| format!("Failed to list themes in {:?}", dir))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "css"))
        .filter_map(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .collect();
    names.sort();
    Ok(names)
}

/// Save `stylesheet` as a user theme, replacing one with the same name
pub fn save_user_theme(paths: &AppPaths, name: &str, stylesheet: &str) -> Result<PathBuf> {
    let path = user_theme_path(paths, name)?;
    write_atomic(&path, stylesheet)
        .with_context(|| format!("Failed to save theme '{}'", name.trim()))?;
    info!(theme = %name.trim(), "Saved user theme");
    Ok(path)
}

pub fn load_user_theme(paths: &AppPaths, name: &str) -> Result<String> {
    let path = user_theme_path(paths, name)?;
    fs::read_to_string(&path).with_context(|| format!("Failed to read theme {:?}", path))
}

/// Stylesheet of a built-in theme, or else of a user theme
pub fn resolve(paths: &AppPaths, name: &str) -> Result<String> {
    if let Some(theme) = builtin(name) {
        return Ok(theme.css.to_string());
    }
    load_user_theme(paths, name).with_context(|| format!("Theme not found: '{}'", name.trim()))
}

/// Apply a theme to the session
pub fn apply(paths: &AppPaths, session: &Session, name: &str) -> Result<Session> {
    let css = resolve(paths, name)?;
    info!(theme = %name.trim(), "Applied theme");
    Ok(session.apply(Edit::ReplaceStylesheet(css)))
}

/// Remember `stylesheet` as the setup applied on every start
pub fn save_default(paths: &AppPaths, stylesheet: &str) -> Result<()> {
    write_atomic(&paths.default_theme_file(), stylesheet).context("Failed to save default setup")?;
    info!("Saved default setup");
    Ok(())
}

/// Replace the session's stylesheet with the saved default setup, if any
pub fn auto_apply_default(paths: &AppPaths, session: &Session) -> Session {
    let path = paths.default_theme_file();
    if !path.exists() {
        return session.clone();
    }
    match fs::read_to_string(&path) {
        Ok(css) => {
            info!(path = %path.display(), "Applying default setup");
            session.apply(Edit::ReplaceStylesheet(css))
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not read default setup, skipping");
            session.clone()
        }
    }
}
