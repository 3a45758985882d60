use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;

use super::open_state;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Restore { file } = cmd {
        let (mut pool, state) = open_state(cfg)?;

        let next = BackupLogic::import_json(&mut pool, &state, &expand_tilde(file))?;

        success(format!(
            "Backup loaded: {} entries restored.",
            next.form.entries.len()
        ));
    }

    Ok(())
}
