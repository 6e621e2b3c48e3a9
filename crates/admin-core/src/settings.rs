use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, Parser};
use serde::{Deserialize, Serialize};

use crate::error::{AdminError, Result};

/// Default REST endpoint when neither `--api-url` nor `FORMATION_API_URL` is set.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Terminal administration for the formation-tracking system
#[derive(Parser, Debug, Clone)]
#[command(
    name = "formation-admin",
    about = "Terminal administration for the formation-tracking system",
    version
)]
pub struct Settings {
    /// Base URL of the formation REST API
    #[arg(long, env = "FORMATION_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Page shown after sign-in
    #[arg(long, default_value = "home", value_parser = ["home", "users", "stages", "roles", "locations"])]
    pub view: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "auto"])]
    pub theme: String,

    /// Directory holding the stored session (defaults to ~/.formation-admin/storage)
    #[arg(long)]
    pub storage_dir: Option<PathBuf>,

    /// Keep the session in memory only; nothing is written to disk
    #[arg(long)]
    pub ephemeral: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path (defaults to ~/.formation-admin/logs/formation-admin.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,

    /// Sign out (remove the stored session) and exit
    #[arg(long)]
    pub logout: bool,

    /// Upload a file to the document with this id, then exit
    #[arg(long, value_name = "ID", requires = "file")]
    pub upload_document: Option<i64>,

    /// File to upload with --upload-document
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Download the file of the document with this id, then exit
    #[arg(long, value_name = "ID", requires = "output")]
    pub download_document: Option<i64>,

    /// Destination for --download-document
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Theme, start page and API URL remembered between runs in
/// `~/.formation-admin/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl LastUsedParams {
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// `<base_dir>/.formation-admin/last_used.json`
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".formation-admin").join("last_used.json")
    }

    /// Read the remembered values. A missing file means nothing is
    /// remembered; a corrupt one is logged and ignored.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read last-used parameters");
                return Self::default();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt last-used parameters");
            Self::default()
        })
    }

    /// Replace the file at `path` in one rename.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let dir = path
            .parent()
            .ok_or_else(|| AdminError::Config(format!("no parent directory for {}", path.display())))?;
        std::fs::create_dir_all(dir)?;

        let staged = path.with_extension("json.tmp");
        std::fs::write(&staged, serde_json::to_vec_pretty(self)?)?;
        std::fs::rename(&staged, path)?;
        Ok(())
    }

    /// Forget everything remembered. Succeeds when there was nothing to forget.
    pub fn clear_at(path: &Path) -> Result<()> {
        match std::fs::remove_file(path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    /// Fill every field of `settings` the user did not pass explicitly.
    fn fill_unset(self, settings: &mut Settings, matches: &ArgMatches) {
        let slots = [
            ("view", self.view, &mut settings.view),
            ("theme", self.theme, &mut settings.theme),
            ("api_url", self.api_url, &mut settings.api_url),
        ];
        for (name, remembered, slot) in slots {
            if let Some(value) = remembered.filter(|_| !is_explicit(matches, name)) {
                *slot = value;
            }
        }
    }
}

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        Self {
            theme: Some(s.theme.clone()),
            view: Some(s.view.clone()),
            api_url: Some(s.api_url.clone()),
        }
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments on top of the remembered values and
    /// remember the outcome for next time.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// [`Settings::load_with_last_used`] with explicit arguments and file.
    pub fn load_with_last_used_impl(args: Vec<OsString>, config_path: &Path) -> Self {
        let matches = Settings::command().get_matches_from(args.iter().cloned());
        let mut settings = Settings::parse_from(args);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!(error = %e, "failed to clear saved configuration");
            }
            return settings;
        }

        LastUsedParams::load_from(config_path).fill_unset(&mut settings, &matches);

        if let Err(e) = LastUsedParams::from(&settings).save_to(config_path) {
            tracing::warn!(error = %e, "failed to persist last-used parameters");
        }
        settings
    }
}

/// Supplied on the command line or through the environment, as opposed to a
/// clap default.
fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

// ── Tests ──────────────────────────────────────────────────────────────────────
