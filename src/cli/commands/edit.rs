use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::image::compress;
use crate::core::persistence::PersistenceLogic;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::models::{EntryPatch, EntryType};
use crate::ui::messages::{info, success, warning};

use super::{checked_date, open_state, read_image};

/// Partial update of one entry.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        date,
        kind,
        image,
        mime,
        clear_image,
    } = cmd
    {
        let (mut pool, state) = open_state(cfg)?;

        if !state.form.contains(id) {
            warning(format!("No entry with id {id}. Nothing changed."));
            return Ok(());
        }

        let date = date.as_deref().map(checked_date).transpose()?;
        let kind = kind
            .as_deref()
            .map(|k| EntryType::parse(k).ok_or_else(|| AppError::InvalidEntryType(k.into())))
            .transpose()?;

        let image_data = if *clear_image {
            Some(String::new())
        } else if let Some(path) = image {
            let (bytes, source) = read_image(path, mime.as_deref())?;
            Some(compress(&bytes, &source, cfg.compress_options())?)
        } else {
            None
        };

        let patch = EntryPatch {
            image_data,
            date,
            kind,
        };

        if patch.is_empty() {
            info("Nothing to change.");
            return Ok(());
        }

        let next = state.update(id, patch);
        PersistenceLogic::save(&mut pool, &next)?;
        ttlog_quiet(&pool.conn, "edit", id, "Entry updated");
        success(format!("Entry {id} updated."));
    }

    Ok(())
}
