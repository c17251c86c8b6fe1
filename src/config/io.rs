//! Configuration file I/O operations

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use tracing::debug;

use super::Config;

impl Config {
    /// Get the global config directory path (~/.tradequest/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tradequest")
    }

    /// Get the global config file path (~/.tradequest/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from a directory.
    ///
    /// Looks for `.tradequest/config.toml` in `dir`, then the global config,
    /// then falls back to defaults.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let local_path = dir.join(".tradequest/config.toml");
        if local_path.exists() {
            return Self::from_file(&local_path);
        }

        let global_path = Self::global_config_path();
        if global_path.exists() {
            return Self::from_file(&global_path);
        }

        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;
        write_locked(path, &content)
    }

    /// Write hand-written config text (e.g. the commented init template).
    ///
    /// The text must parse as a `Config`, so a broken template never lands
    /// on disk.
    pub fn write_text(path: &Path, content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .with_context(|| format!("Refusing to write invalid config: {}", path.display()))?;
        write_locked(path, content)?;
        Ok(config)
    }
}

/// Replace `path` with `content` under an exclusive `<name>.lock` lock.
///
/// Content goes to a temp file first and is renamed into place, so readers
/// never see a partial config.
fn write_locked(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    let lock_path = path.with_extension("toml.lock");
    let lock = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to open lock file: {}", lock_path.display()))?;
    lock.lock_exclusive()
        .with_context(|| format!("Failed to lock {}", lock_path.display()))?;

    let temp_path = path.with_extension("toml.tmp");
    {
        let mut temp = std::fs::File::create(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;
        temp.write_all(content.as_bytes())
            .and_then(|_| temp.sync_all())
            .with_context(|| format!("Failed to write config: {}", temp_path.display()))?;
    }

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to replace config file: {}", path.display()))?;
    debug!(path = %path.display(), bytes = content.len(), "Wrote config");

    Ok(())
}
