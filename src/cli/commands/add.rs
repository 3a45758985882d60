use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::image::compress;
use crate::core::persistence::PersistenceLogic;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::models::EntryPatch;
use crate::ui::messages::success;
use crate::utils::date::format_date_br;
use chrono::Local;

use super::{checked_date, open_state, read_image};

/// Append an entry with the next alternating type.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add { date, image } = cmd {
        // validate everything before touching the state
        let date = date.as_deref().map(checked_date).transpose()?;
        let image_data = match image {
            Some(path) => {
                let (bytes, source) = read_image(path, None)?;
                Some(compress(&bytes, &source, cfg.compress_options())?)
            }
            None => None,
        };

        let (mut pool, state) = open_state(cfg)?;

        let (mut next, id) = state.add(Local::now());

        let patch = EntryPatch {
            image_data,
            date,
            kind: None,
        };
        if !patch.is_empty() {
            next = next.update(&id, patch);
        }

        PersistenceLogic::save(&mut pool, &next)?;

        if let Some(entry) = next.form.find(&id) {
            ttlog_quiet(&pool.conn, "add", &id, &format!("{} {}", entry.kind, entry.date));
            success(format!(
                "Added entry {} ({}, {}){}",
                id,
                entry.kind,
                format_date_br(&entry.date),
                if entry.has_image() { " with photo" } else { "" }
            ));
        }
    }

    Ok(())
}
