// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::notify_export_success;
use crate::export::sheet::{CellStyle, CellValue, COLUMN_WIDTHS, LAST_COL, SHEET_NAME, SheetGrid};
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::io;
use std::path::Path;

const DARK_BLUE: u32 = 0x1E3A8A;
const ORANGE: u32 = 0xFB923C;
const LIGHT_INDIGO: u32 = 0xE0E7FF;
const BAND_GREY: u32 = 0xF3F4F6;
const BAND_WHITE: u32 = 0xFFFFFF;
const BAND_BORDER: u32 = 0xE5E7EB;

/// Write a prepared grid as a single-sheet XLSX file.
pub(crate) fn export_xlsx(grid: &SheetGrid, path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(to_io_app_error)?;

    for (c, w) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w)
            .map_err(to_io_app_error)?;
    }

    let merged = grid.merged_rows();

    for (r, cells) in grid.rows.iter().enumerate() {
        let row = r as u32;

        if merged.contains(&row) {
            let text = grid.value(row, 0).as_text().unwrap_or("");
            worksheet
                .merge_range(row, 0, row, LAST_COL, text, &format_for(grid.style_at(row, 0)))
                .map_err(to_io_app_error)?;
            continue;
        }

        for (c, value) in cells.iter().enumerate() {
            let col = c as u16;
            write_cell(worksheet, row, col, value, grid.style_at(row, col))?;
        }
    }

    workbook.save(path).map_err(to_io_app_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    style: CellStyle,
) -> AppResult<()> {
    let fmt = format_for(style);

    match value {
        CellValue::Empty => worksheet.write_blank(row, col, &fmt),
        CellValue::Text(s) => worksheet.write_with_format(row, col, s.as_str(), &fmt),
        CellValue::Number(n) => worksheet.write_with_format(row, col, *n, &fmt),
    }
    .map_err(to_io_app_error)?;

    Ok(())
}

fn format_for(style: CellStyle) -> Format {
    match style {
        CellStyle::Title => Format::new()
            .set_bold()
            .set_font_size(16)
            .set_font_color(Color::RGB(0xFFFFFF))
            .set_background_color(Color::RGB(DARK_BLUE))
            .set_pattern(FormatPattern::Solid)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter),

        CellStyle::Section => Format::new()
            .set_bold()
            .set_font_size(12)
            .set_font_color(Color::RGB(0xFFFFFF))
            .set_background_color(Color::RGB(ORANGE))
            .set_pattern(FormatPattern::Solid)
            .set_align(FormatAlign::Center),

        CellStyle::Header => Format::new()
            .set_bold()
            .set_font_color(Color::RGB(0xFFFFFF))
            .set_background_color(Color::RGB(DARK_BLUE))
            .set_pattern(FormatPattern::Solid)
            .set_align(FormatAlign::Center)
            .set_border(FormatBorder::Thin)
            .set_border_color(Color::RGB(0x000000)),

        CellStyle::Band { shaded, centered } => Format::new()
            .set_background_color(Color::RGB(if shaded { BAND_GREY } else { BAND_WHITE }))
            .set_pattern(FormatPattern::Solid)
            .set_align(if centered {
                FormatAlign::Center
            } else {
                FormatAlign::Left
            })
            .set_border(FormatBorder::Thin)
            .set_border_color(Color::RGB(BAND_BORDER)),

        CellStyle::MetaLabel => Format::new()
            .set_bold()
            .set_background_color(Color::RGB(LIGHT_INDIGO))
            .set_pattern(FormatPattern::Solid),

        CellStyle::Plain => Format::new(),
    }
}

fn to_io_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::from(io::Error::other(e.to_string()))
}
