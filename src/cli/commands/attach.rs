use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::image::CompressionQueue;
use crate::core::persistence::PersistenceLogic;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::models::EntryPatch;
use crate::ui::messages::{error, info, success, warning};

use super::{open_state, read_image};

/// Compress several photos in parallel and attach each to its entry.
///
/// Completions are applied in the order they finish; every one is keyed to
/// its own entry, so ordering does not matter. Failures are reported one by
/// one and make the command exit with an error once the successful
/// attachments are saved.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Attach { items, mime } = cmd {
        let (mut pool, mut state) = open_state(cfg)?;
        let mut queue = CompressionQueue::new(cfg.compress_options());
        let mut failures = 0usize;

        for item in items {
            let Some((id, path)) = item.split_once('=') else {
                error(format!("Invalid item '{item}': expected ID=FILE"));
                failures += 1;
                continue;
            };

            if !state.form.contains(id) {
                warning(format!("No entry with id {id}. Skipped."));
                continue;
            }

            match read_image(path, mime.as_deref()) {
                Ok((bytes, source)) => queue.submit(id, bytes, source),
                Err(e) => {
                    error(format!("Entry {id}: {e}"));
                    failures += 1;
                }
            }
        }

        if queue.pending() > 0 {
            info(format!("Compressing {} photo(s)…", queue.pending()));
        }

        let mut attached = 0usize;
        for done in queue.completions() {
            match done.result {
                Ok(payload) => {
                    state = state.update(&done.entry_id, EntryPatch::image(payload));
                    ttlog_quiet(&pool.conn, "attach", &done.entry_id, "Photo attached");
                    success(format!("Photo attached to entry {}", done.entry_id));
                    attached += 1;
                }
                Err(e) => {
                    error(format!("Entry {}: {e}", done.entry_id));
                    failures += 1;
                }
            }
        }

        if attached > 0 {
            PersistenceLogic::save(&mut pool, &state)?;
        }

        if failures > 0 {
            return Err(AppError::ImageDecode(format!(
                "{failures} photo(s) could not be attached"
            )));
        }
    }

    Ok(())
}
