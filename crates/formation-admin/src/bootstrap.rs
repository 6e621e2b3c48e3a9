use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

fn base_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".formation-admin")
}

/// Ensure the standard `~/.formation-admin/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing parents):
/// - `~/.formation-admin/`
/// - `~/.formation-admin/logs/`
/// - `~/.formation-admin/storage/`
pub fn ensure_directories() -> anyhow::Result<()> {
    let dir = base_dir();
    std::fs::create_dir_all(dir.join("logs"))?;
    std::fs::create_dir_all(dir.join("storage"))?;
    Ok(())
}

/// `~/.formation-admin/logs/formation-admin.log`
pub fn default_log_file() -> PathBuf {
    base_dir().join("logs").join("formation-admin.log")
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a CLI level name (`DEBUG`, `INFO`, `WARNING`, `ERROR`, `CRITICAL`) to
/// an `EnvFilter` directive. Unknown names pass through lowercased.
pub fn filter_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        other => other.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Output is appended to `log_file` (or [`default_log_file`]) rather than
/// stderr, which the TUI owns. Falls back to `"info"` if the level string is
/// not a valid filter.
pub fn setup_logging(log_level: &str, log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let path = log_file.cloned().unwrap_or_else(default_log_file);
    let file = open_log_file(&path)?;

    let filter = EnvFilter::try_new(filter_directive(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry().with(filter).with(layer).init();

    Ok(())
}

fn open_log_file(path: &Path) -> anyhow::Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    static HOME_LOCK: Mutex<()> = Mutex::new(());

    fn with_home<T>(home: &Path, f: impl FnOnce() -> T) -> T {
        let _guard = HOME_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let original_home = std::env::var_os("HOME");
        std::env::set_var("HOME", home);
        let result = f();
        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }
        result
    }

    // ── directories ───────────────────────────────────────────────────────────

    #[test]
    fn test_ensure_directories() {
        let tmp = TempDir::new().expect("tempdir");

        with_home(tmp.path(), ensure_directories).expect("ensure_directories should succeed");

        let dir = tmp.path().join(".formation-admin");
        assert!(dir.is_dir(), ".formation-admin dir must exist");
        assert!(dir.join("logs").is_dir(), "logs subdir must exist");
        assert!(dir.join("storage").is_dir(), "storage subdir must exist");
    }

    #[test]
    fn test_default_log_file_under_home() {
        let tmp = TempDir::new().expect("tempdir");
        let path = with_home(tmp.path(), default_log_file);
        assert_eq!(
            path,
            tmp.path()
                .join(".formation-admin")
                .join("logs")
                .join("formation-admin.log")
        );
    }

    // ── logging ───────────────────────────────────────────────────────────────

    #[test]
    fn test_filter_directive_mapping() {
        assert_eq!(filter_directive("DEBUG"), "debug");
        assert_eq!(filter_directive("info"), "info");
        assert_eq!(filter_directive("WARNING"), "warn");
        assert_eq!(filter_directive("ERROR"), "error");
        assert_eq!(filter_directive("CRITICAL"), "error");
        assert_eq!(filter_directive("Trace"), "trace");
    }

    #[test]
    fn test_open_log_file_creates_parents() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("nested").join("admin.log");
        open_log_file(&path).expect("open log");
        assert!(path.is_file());
    }
}
