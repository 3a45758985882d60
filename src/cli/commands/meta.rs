use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::persistence::PersistenceLogic;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::models::{Branch, FormData, MetaPatch, Sector};
use crate::ui::messages::{info, success};
use crate::utils::date::{format_cycle, parse_cycle};

use super::open_state;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Meta {
        cycle,
        employee,
        sector,
        branch,
    } = cmd
    {
        let patch = MetaPatch {
            cycle: cycle.as_deref().map(checked_cycle).transpose()?,
            employee_name: employee.as_ref().map(|s| s.trim().to_string()),
            sector: sector
                .as_deref()
                .map(|s| Sector::from_code(s).ok_or_else(|| AppError::InvalidSector(s.into())))
                .transpose()?,
            branch: branch
                .as_deref()
                .map(|b| Branch::from_code(b).ok_or_else(|| AppError::InvalidBranch(b.into())))
                .transpose()?,
        };

        let (mut pool, state) = open_state(cfg)?;

        let form = if patch.is_empty() {
            info("Nothing to change.");
            state.form
        } else {
            let next = state.set_meta(patch);
            PersistenceLogic::save(&mut pool, &next)?;
            ttlog_quiet(&pool.conn, "meta", "form", "Metadata updated");
            success("Metadata saved.");
            next.form
        };

        print_meta(&form);
    }

    Ok(())
}

/// Empty clears the cycle; anything else must be `YYYY-MM`.
fn checked_cycle(s: &str) -> AppResult<String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(String::new());
    }
    parse_cycle(s)
        .map(|(y, m)| format!("{y:04}-{m:02}"))
        .ok_or_else(|| AppError::InvalidCycle(s.to_string()))
}

pub(crate) fn print_meta(form: &FormData) {
    println!("Ciclo       : {}", format_cycle(&form.cycle));
    println!("Colaborador : {}", form.employee_name);
    println!("Setor       : {}", form.sector);
    println!("Filial      : {}", form.branch);
}
