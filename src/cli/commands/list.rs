use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::FormData;
use crate::ui::messages::{header, info};
use crate::utils::colors::{colorize_entry_type, colorize_image_status};
use crate::utils::date::{format_date_br, format_full_date_br, group_by_date};
use crate::utils::describe_image;
use crate::utils::formatting::{bold, payload_size};
use crate::utils::table::Table;

use super::meta::print_meta;
use super::open_state;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { grouped } = cmd {
        let (_pool, state) = open_state(cfg)?;

        header("Formulário de KM");
        print_meta(&state.form);
        println!();

        if state.form.entries.is_empty() {
            info("No entries yet. Use `kmlogger add` to create one.");
            return Ok(());
        }

        if *grouped {
            print_grouped(&state.form);
        } else {
            print_flat(&state.form);
        }

        println!("Total de Registros: {}", state.form.entries.len());
        println!("Próximo tipo      : {}", state.next_type);
    }

    Ok(())
}

fn print_flat(form: &FormData) {
    let mut table = Table::with_headers(&["#", "ID", "Tipo", "Data", "Imagem", "Tamanho"]);

    for (i, e) in form.entries.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            e.id.clone(),
            e.kind.to_string(),
            format_date_br(&e.date),
            describe_image(e.has_image()).to_string(),
            payload_size(&e.image_data),
        ]);
    }

    print!("{}", table.render());
}

fn print_grouped(form: &FormData) {
    for group in group_by_date(&form.entries) {
        println!("{}", bold(&format_full_date_br(group.date)));
        for e in group.entries {
            println!(
                "  {}  {}  {}  [{}]",
                colorize_entry_type(e.kind.as_str(), e.kind.is_entrada()),
                format_date_br(&e.date),
                colorize_image_status(describe_image(e.has_image()), e.has_image()),
                e.id
            );
        }
        println!();
    }
}
