use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::persistence::PersistenceLogic;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

use super::open_state;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id } = cmd {
        let (mut pool, state) = open_state(cfg)?;

        if !state.form.contains(id) {
            warning(format!("No entry with id {id}. Nothing deleted."));
            return Ok(());
        }

        let next = state.remove(id);
        PersistenceLogic::save(&mut pool, &next)?;
        ttlog_quiet(&pool.conn, "del", id, "Entry removed");
        success(format!("Entry {id} has been deleted."));
    }

    Ok(())
}
