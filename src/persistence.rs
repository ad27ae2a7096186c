//! Reading and writing the bar documents
//!
//! The editing core only ever sees text. This module is the boundary that
//! turns files into that text and back, keeps a first-run backup, and
//! restarts the bar so it picks up a saved config.

use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

use crate::config::AppPaths;
use crate::constants::process;
use crate::notice::Notice;

/// Config and stylesheet text as found on disk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Documents {
    pub config: String,
    pub stylesheet: String,
    /// Files that could not be read and were taken as empty
    pub notices: Vec<Notice>,
}

/// Load both documents. Missing files are empty; unreadable files are empty
/// and reported.
pub fn load_documents(paths: &AppPaths) -> Documents {
    let mut notices = Vec::new();
    let config = read_or_empty(&paths.config_file(), &mut notices);
    let stylesheet = read_or_empty(&paths.style_file(), &mut notices);
    Documents {
        config,
        stylesheet,
        notices,
    }
}

fn read_or_empty(path: &Path, notices: &mut Vec<Notice>) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "document absent, starting empty");
            String::new()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "document unreadable, treating as empty");
            notices.push(Notice::DocumentUnreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
            String::new()
        }
    }
}

impl Documents {
    /// Whether `path` was taken as empty because it could not be read
    pub fn was_unreadable(&self, path: &Path) -> bool {
        self.notices.iter().any(|notice| {
            matches!(notice, Notice::DocumentUnreadable { path: unreadable, .. } if unreadable == path)
        })
    }
}

/// Write the documents that differ from `loaded`. Returns how many were
/// written. A document that could not be read is never overwritten, since
/// its on-disk bytes were never seen.
pub fn save_documents(
    paths: &AppPaths,
    loaded: &Documents,
    config: &str,
    stylesheet: &str,
) -> Result<usize> {
    let targets = [
        (paths.config_file(), loaded.config.as_str(), config),
        (paths.style_file(), loaded.stylesheet.as_str(), stylesheet),
    ];

    for (path, before, after) in &targets {
        if before != after && loaded.was_unreadable(path) {
            bail!(
                "Refusing to overwrite {:?}: it could not be read, so saving would discard its contents",
                path
            );
        }
    }

    let mut written = 0;
    for (path, before, after) in &targets {
        if before == after {
            debug!(path = %path.display(), "document unchanged, not writing");
            continue;
        }
        write_atomic(path, after)?;
        written += 1;
    }

    info!(dir = %paths.waybar_dir.display(), count = written, "Saved bar documents");
    Ok(written)
}

/// Write through a sibling temp file so a reader never sees half a document
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory {:?}", parent))?;

    let file_name = path
        .file_name()
        .with_context(|| format!("No file name in {:?}", path))?;
    let tmp = parent.join(format!(".{}.tmp", file_name.to_string_lossy()));

    let mut file =
        fs::File::create(&tmp).with_context(|| format!("Failed to create {:?}", tmp))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write {:?}", tmp))?;
    file.sync_all()
        .with_context(|| format!("Failed to flush {:?}", tmp))?;
    drop(file);

    fs::rename(&tmp, path).with_context(|| format!("Failed to replace {:?}", path))?;
    Ok(())
}

/// Copy the documents to their backups the first time the tool runs.
/// Returns whether a backup was taken.
pub fn ensure_backup(paths: &AppPaths) -> Result<bool> {
    if paths.backup_marker().exists() {
        return Ok(false);
    }
    fs::create_dir_all(&paths.waybar_dir)
        .with_context(|| format!("Failed to create directory {:?}", paths.waybar_dir))?;

    for (document, backup) in [
        (paths.config_file(), paths.config_backup()),
        (paths.style_file(), paths.style_backup()),
    ] {
        if document.exists() {
            fs::copy(&document, &backup)
                .with_context(|| format!("Failed to back up {:?}", document))?;
        }
    }

    fs::write(paths.backup_marker(), "backup_done\n")
        .with_context(|| format!("Failed to write {:?}", paths.backup_marker()))?;
    info!(dir = %paths.waybar_dir.display(), "Backed up original bar documents");
    Ok(true)
}

/// Put the first-run backups back. Returns how many files were restored.
pub fn restore_backup(paths: &AppPaths) -> Result<usize> {
    let mut restored = 0;
    for (backup, document) in [
        (paths.config_backup(), paths.config_file()),
        (paths.style_backup(), paths.style_file()),
    ] {
        if backup.exists() {
            fs::copy(&backup, &document)
                .with_context(|| format!("Failed to restore {:?}", document))?;
            restored += 1;
        }
    }

    if restored == 0 {
        warn!(dir = %paths.waybar_dir.display(), "No backups to restore");
    } else {
        info!(count = restored, "Restored bar documents from backup");
    }
    Ok(restored)
}

/// Restart the bar, detached from this process
pub fn restart_bar() -> Result<()> {
    Command::new("bash")
        .arg("-c")
        .arg(process::RESTART_SCRIPT)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("Failed to spawn bar restart")?;
    info!("Restarting bar");
    Ok(())
}
