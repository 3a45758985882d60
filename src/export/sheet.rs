// src/export/sheet.rs

//! Row-oriented layout of the spreadsheet export.
//!
//! Everything here is pure: the grid and the style of every cell are
//! derived from the form and the entry count. `xlsx.rs` only writes it out.

use crate::models::FormData;
use crate::utils::date::{format_date_br, format_short};
use crate::utils::describe_image;
use chrono::NaiveDate;

pub const SHEET_NAME: &str = "Registro KM";
pub const COLUMN_WIDTHS: [f64; 5] = [5.0, 12.0, 15.0, 18.0, 30.0];
pub const LAST_COL: u16 = 4;

pub const TITLE: &str = "FORMULÁRIO DE REGISTRO DE QUILOMETRAGEM";
pub const INFO_SECTION: &str = "INFORMAÇÕES DO COLABORADOR";
pub const ENTRIES_SECTION: &str = "REGISTROS DE ENTRADA E SAÍDA";
pub const HEADERS: [&str; 5] = ["#", "Tipo", "Data", "Status da Imagem", "Observações"];

pub const TITLE_ROW: u32 = 0;
pub const INFO_ROW: u32 = 2;
pub const META_FIRST_ROW: u32 = 3;
pub const META_LAST_ROW: u32 = 6;
pub const ENTRIES_ROW: u32 = 8;
pub const HEADER_ROW: u32 = 9;
pub const DATA_START_ROW: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    /// Bold 16pt white on dark blue, centered.
    Title,
    /// Bold 12pt white on orange, centered.
    Section,
    /// Bold white on dark blue, centered, black borders.
    Header,
    /// Entry row: grey or white band, light borders.
    Band { shaded: bool, centered: bool },
    /// Bold label on light indigo.
    MetaLabel,
    Plain,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetGrid {
    pub rows: Vec<Vec<CellValue>>,
    pub entry_count: usize,
}

/// Build the grid for `form`, stamping `export_date` in the summary.
pub fn build_sheet(form: &FormData, export_date: NaiveDate) -> SheetGrid {
    let mut rows: Vec<Vec<CellValue>> = vec![
        vec![CellValue::text(TITLE)],
        vec![],
        vec![CellValue::text(INFO_SECTION)],
        vec![CellValue::text("Ciclo"), CellValue::text(&form.cycle)],
        vec![
            CellValue::text("Colaborador"),
            CellValue::text(&form.employee_name),
        ],
        vec![CellValue::text("Setor"), CellValue::text(form.sector.code())],
        vec![CellValue::text("Filial"), CellValue::text(form.branch.code())],
        vec![],
        vec![CellValue::text(ENTRIES_SECTION)],
        HEADERS.iter().map(|h| CellValue::text(*h)).collect(),
    ];

    for (index, entry) in form.entries.iter().enumerate() {
        rows.push(vec![
            CellValue::Number((index + 1) as f64),
            CellValue::text(entry.kind.as_str()),
            CellValue::text(format_date_br(&entry.date)),
            CellValue::text(describe_image(entry.has_image())),
            CellValue::text(""),
        ]);
    }

    rows.push(vec![]);
    rows.push(vec![
        CellValue::text("Total de Registros"),
        CellValue::Number(form.entries.len() as f64),
    ]);
    rows.push(vec![
        CellValue::text("Data de Exportação"),
        CellValue::text(format_short(export_date)),
    ]);

    SheetGrid {
        rows,
        entry_count: form.entries.len(),
    }
}

impl SheetGrid {
    /// Last entry row, if there is any entry.
    pub fn data_end_row(&self) -> Option<u32> {
        (self.entry_count > 0).then(|| DATA_START_ROW + self.entry_count as u32 - 1)
    }

    /// Rows merged across all five columns.
    pub fn merged_rows(&self) -> [u32; 3] {
        [TITLE_ROW, INFO_ROW, ENTRIES_ROW]
    }

    pub fn value(&self, row: u32, col: u16) -> &CellValue {
        self.rows
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .unwrap_or(&CellValue::Empty)
    }

    /// Style of the cell at absolute coordinates.
    pub fn style_at(&self, row: u32, col: u16) -> CellStyle {
        match row {
            TITLE_ROW if col == 0 => CellStyle::Title,
            INFO_ROW | ENTRIES_ROW if col == 0 => CellStyle::Section,
            HEADER_ROW if col <= LAST_COL => CellStyle::Header,
            META_FIRST_ROW..=META_LAST_ROW if col == 0 => CellStyle::MetaLabel,
            r if r >= DATA_START_ROW
                && self.data_end_row().is_some_and(|end| r <= end)
                && col <= LAST_COL =>
            {
                CellStyle::Band {
                    shaded: (r - DATA_START_ROW) % 2 == 0,
                    centered: col == 0,
                }
            }
            _ => CellStyle::Plain,
        }
    }
}
