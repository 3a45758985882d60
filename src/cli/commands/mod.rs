pub mod add;
pub mod attach;
pub mod backup;
pub mod clear;
pub mod config;
pub mod del;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod meta;
pub mod restore;

use crate::config::Config;
use crate::core::image::ImageSource;
use crate::core::persistence::PersistenceLogic;
use crate::core::store::AppState;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_date_local;
use crate::utils::path::expand_tilde;
use std::fs;
use std::path::PathBuf;

/// Open the database and load the current snapshot from the durable slot.
pub(crate) fn open_state(cfg: &Config) -> AppResult<(DbPool, AppState)> {
    let pool = DbPool::open(&cfg.database)?;
    let state = PersistenceLogic::load(&pool);
    Ok((pool, state))
}

/// Validate a `YYYY-MM-DD` argument and return it normalized.
pub(crate) fn checked_date(s: &str) -> AppResult<String> {
    parse_date_local(s)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Read a photo from disk together with the source it counts as.
///
/// A declared media type makes it a dropped image (checked against
/// `image/*`); otherwise it is treated as picked.
pub(crate) fn read_image(path: &str, mime: Option<&str>) -> AppResult<(Vec<u8>, ImageSource)> {
    let source = match mime {
        Some(m) => ImageSource::Dropped {
            media_type: m.to_string(),
        },
        None => ImageSource::Picker,
    };
    source.check()?;

    let path: PathBuf = expand_tilde(path);
    let bytes = fs::read(&path).map_err(|e| {
        AppError::from(std::io::Error::new(
            e.kind(),
            format!("cannot read {}: {e}", path.display()),
        ))
    })?;

    Ok((bytes, source))
}
