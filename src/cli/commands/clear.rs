use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::persistence::PersistenceLogic;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info, success};

use super::open_state;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clear { yes } = cmd {
        let (mut pool, state) = open_state(cfg)?;

        let confirmed = *yes || confirm("Tem certeza que deseja limpar todos os dados?");

        match PersistenceLogic::clear(&mut pool, &state, confirmed)? {
            Some(_) => success("Dados limpos: todos os dados foram removidos."),
            None => info("Operation cancelled."),
        }
    }

    Ok(())
}
