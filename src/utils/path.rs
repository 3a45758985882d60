//! Path utilities: expand ~, build export file names.

use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// Replace characters that cannot appear in a single file name component.
pub fn sanitize_component(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// `<dir>/<prefix>-<epoch-ms>.<ext>`
pub fn timestamped(dir: &Path, prefix: &str, epoch_ms: i64, ext: &str) -> PathBuf {
    dir.join(format!("{prefix}-{epoch_ms}.{ext}"))
}
