use chrono::Utc;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn hook_log_path(state_dir: &Path) -> PathBuf {
    state_dir.join("logs/hooks.log")
}

/// Append-only diagnostics for degraded hook paths. Hooks must stay silent on
/// stdout/stderr when they fail open, so this file is the only trace left.
pub fn append_hook_log_line(state_dir: &Path, line: &str) -> std::io::Result<()> {
    let path = hook_log_path(state_dir);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;
    writeln!(file, "{} {line}", Utc::now().format("%Y-%m-%dT%H:%M:%SZ"))
}
