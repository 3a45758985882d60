use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::utils::date::today;
use crate::utils::path::expand_tilde;
use chrono::Local;

use super::open_state;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        let (pool, state) = open_state(cfg)?;

        let path = match file {
            Some(f) => expand_tilde(f),
            None => ExportLogic::default_path(
                &state.form,
                *format,
                &expand_tilde(&cfg.export_dir),
                Local::now().timestamp_millis(),
            ),
        };

        let written = ExportLogic::export(&state.form, *format, &path, *force, today())?;
        ttlog_quiet(
            &pool.conn,
            "export",
            &written.to_string_lossy(),
            &format!("{} export of {} entries", format.as_str(), state.form.entries.len()),
        );
    }

    Ok(())
}
