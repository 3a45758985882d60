use crate::core::persistence::PersistenceLogic;
use crate::core::store::AppState;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::models::FormData;
use crate::ui::messages::{info, warning};
use crate::utils::path::timestamped;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// `<dir>/km-data-<epoch-ms>.json`
    pub fn default_path(dir: &Path, epoch_ms: i64) -> PathBuf {
        timestamped(dir, "km-data", epoch_ms, "json")
    }

    /// Serialize `form` as pretty-printed UTF-8 JSON into `dest`.
    ///
    /// With `compress` the JSON is zipped next to `dest` and the plain copy
    /// removed. Returns the path actually written.
    pub fn export_json(form: &FormData, dest: &Path, force: bool, compress: bool) -> AppResult<PathBuf> {
        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        ensure_writable(dest, force)?;
        let zip_path = dest.with_extension("zip");
        if compress {
            ensure_writable(&zip_path, force)?;
        }

        let json = serde_json::to_string_pretty(form)?;
        fs::write(dest, json)?;

        if !compress {
            return Ok(dest.to_path_buf());
        }

        let zipped = compress_backup(dest, &zip_path)?;
        if let Err(e) = fs::remove_file(dest) {
            warning(format!("Failed to remove uncompressed backup: {e}"));
        }
        Ok(zipped)
    }

    /// Read a backup file and adopt it.
    ///
    /// The in-memory state and the durable slot change only when the file
    /// parses; otherwise `AppError::InvalidBackup` is returned and nothing is
    /// touched.
    pub fn import_json(pool: &mut DbPool, state: &AppState, path: &Path) -> AppResult<AppState> {
        let form = read_backup(path)?;
        let next = state.replace(form);

        PersistenceLogic::save(pool, &next)?;
        ttlog_quiet(
            &pool.conn,
            "restore",
            &path.to_string_lossy(),
            &format!("Loaded {} entries", next.form.entries.len()),
        );

        Ok(next)
    }
}

/// Parse a backup file without side effects.
///
/// The document must be a JSON object whose entries are objects with
/// distinct ids.
pub fn read_backup(path: &Path) -> AppResult<FormData> {
    let invalid = |msg: String| AppError::InvalidBackup(format!("{}: {msg}", path.display()));

    let raw = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    let value: Value = serde_json::from_str(&raw).map_err(|e| invalid(e.to_string()))?;

    let Some(doc) = value.as_object() else {
        return Err(invalid("top level is not a JSON object".into()));
    };
    if let Some(entries) = doc.get("entries")
        && !entries
            .as_array()
            .is_some_and(|list| list.iter().all(Value::is_object))
    {
        return Err(invalid("`entries` must be a list of objects".into()));
    }

    let form: FormData = serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?;

    let mut seen = HashSet::new();
    if let Some(dup) = form.entries.iter().find(|e| !seen.insert(e.id.as_str())) {
        return Err(invalid(format!("duplicate entry id {}", dup.id)));
    }

    Ok(form)
}

/// Compress a backup using .zip
fn compress_backup(path: &Path, zip_path: &Path) -> AppResult<PathBuf> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "km-data.json".to_string());

    let mut f = fs::File::open(path)?;
    zip.start_file(name, options).map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    info(format!("Compressed: {}", zip_path.display()));

    Ok(zip_path.to_path_buf())
}
