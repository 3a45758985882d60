use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;
use chrono::Local;

use super::open_state;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let (pool, state) = open_state(cfg)?;

        let dest = match file {
            Some(f) => expand_tilde(f),
            None => BackupLogic::default_path(
                &expand_tilde(&cfg.export_dir),
                Local::now().timestamp_millis(),
            ),
        };

        let written = BackupLogic::export_json(&state.form, &dest, *force, *compress)?;

        ttlog_quiet(
            &pool.conn,
            "backup",
            &written.to_string_lossy(),
            if *compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );
        success(format!("Backup created: {}", written.display()));
    }

    Ok(())
}
