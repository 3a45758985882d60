// src/export/print_view.rs

//! Print-oriented projection of the form: a header block and the entries
//! grouped by day. Rendering is left to `pdf.rs`.

use crate::models::{EntryType, FormData};
use crate::utils::date::{format_cycle, format_full_date_br, format_date_br, group_by_date};

pub const PRINT_TITLE: &str = "Formulário de KM";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintView {
    pub title: String,
    /// (label, value) pairs: Ciclo, Colaborador, Setor, Filial.
    pub header: Vec<(String, String)>,
    pub groups: Vec<PrintGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintGroup {
    /// Long pt-BR date, e.g. `terça-feira, 5 de março de 2024`.
    pub heading: String,
    pub cards: Vec<PrintCard>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintCard {
    pub entry_id: String,
    pub kind: EntryType,
    /// Embedded payload, empty when no photo is attached.
    pub image_data: String,
    /// `dd/mm/yyyy`
    pub date_label: String,
}

pub fn project(form: &FormData) -> PrintView {
    let header = vec![
        ("Ciclo".to_string(), format_cycle(&form.cycle)),
        ("Colaborador".to_string(), form.employee_name.clone()),
        ("Setor".to_string(), form.sector.code().to_string()),
        ("Filial".to_string(), form.branch.code().to_string()),
    ];

    let groups = group_by_date(&form.entries)
        .into_iter()
        .map(|g| PrintGroup {
            heading: format_full_date_br(g.date),
            cards: g
                .entries
                .into_iter()
                .map(|e| PrintCard {
                    entry_id: e.id.clone(),
                    kind: e.kind,
                    image_data: e.image_data.clone(),
                    date_label: format_date_br(&e.date),
                })
                .collect(),
        })
        .collect();

    PrintView {
        title: PRINT_TITLE.to_string(),
        header,
        groups,
    }
}

impl PrintView {
    pub fn card_count(&self) -> usize {
        self.groups.iter().map(|g| g.cards.len()).sum()
    }
}
