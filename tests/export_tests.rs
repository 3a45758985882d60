mod common;
use chrono::NaiveDate;
use common::{at, png_bytes, temp_out};
use kmlogger::core::image::{CompressOptions, ImageSource, compress};
use kmlogger::core::store::AppState;
use kmlogger::export::ExportFormat;
use kmlogger::export::ExportLogic;
use kmlogger::export::print_view::{PRINT_TITLE, project};
use kmlogger::export::sheet::{
    CellStyle, CellValue, DATA_START_ROW, HEADER_ROW, SHEET_NAME, build_sheet,
};
use kmlogger::models::{EntryPatch, EntryType, FormData, MetaPatch, Sector};
use std::fs;
use std::io::Read;
use std::path::Path;

fn export_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

fn sample_form(with_photo: bool) -> FormData {
    let state = AppState::default().set_meta(MetaPatch {
        cycle: Some("2024-03".into()),
        employee_name: Some("Maria".into()),
        sector: Some(Sector::Adm),
        branch: None,
    });
    let (state, a) = state.add(at(2024, 3, 6, 8));
    let (state, _) = state.add(at(2024, 3, 6, 17));
    let (mut state, c) = state.add(at(2024, 3, 5, 8));
    state = state.update(&c, EntryPatch::date("2024-03-05"));

    if with_photo {
        let payload = compress(
            &png_bytes(640, 480),
            &ImageSource::Picker,
            CompressOptions::default(),
        )
        .unwrap();
        state = state.update(&a, EntryPatch::image(payload));
    }
    state.form
}

#[test]
fn test_sheet_layout() {
    let form = sample_form(false);
    let grid = build_sheet(&form, export_day());

    assert_eq!(grid.value(3, 1), &CellValue::Text("2024-03".into()));
    assert_eq!(grid.value(4, 1), &CellValue::Text("Maria".into()));
    assert_eq!(grid.value(5, 1), &CellValue::Text("ADM".into()));
    assert_eq!(grid.value(6, 1), &CellValue::Text("IMP".into()));

    assert_eq!(grid.value(HEADER_ROW, 3).as_text(), Some("Status da Imagem"));

    // entries keep insertion order in the sheet
    assert_eq!(grid.value(DATA_START_ROW, 0), &CellValue::Number(1.0));
    assert_eq!(grid.value(DATA_START_ROW, 1).as_text(), Some("Entrada"));
    assert_eq!(grid.value(DATA_START_ROW, 2).as_text(), Some("06/03/2024"));
    assert_eq!(grid.value(DATA_START_ROW + 1, 1).as_text(), Some("Saída"));
    assert_eq!(grid.value(DATA_START_ROW + 2, 2).as_text(), Some("05/03/2024"));
    assert_eq!(grid.value(DATA_START_ROW, 3).as_text(), Some("✗ Sem imagem"));
    assert_eq!(grid.value(DATA_START_ROW, 4).as_text(), Some(""));

    // blank row, then the summary
    let total_row = DATA_START_ROW + 4;
    assert_eq!(grid.value(total_row, 0).as_text(), Some("Total de Registros"));
    assert_eq!(grid.value(total_row, 1), &CellValue::Number(3.0));
    assert_eq!(grid.value(total_row + 1, 0).as_text(), Some("Data de Exportação"));
    assert_eq!(grid.value(total_row + 1, 1).as_text(), Some("10/03/2024"));
}

#[test]
fn test_sheet_styles() {
    let grid = build_sheet(&sample_form(false), export_day());

    assert_eq!(grid.style_at(0, 0), CellStyle::Title);
    assert_eq!(grid.style_at(2, 0), CellStyle::Section);
    assert_eq!(grid.style_at(8, 0), CellStyle::Section);
    assert_eq!(grid.style_at(HEADER_ROW, 4), CellStyle::Header);
    assert_eq!(grid.style_at(3, 0), CellStyle::MetaLabel);
    assert_eq!(grid.style_at(3, 1), CellStyle::Plain);

    assert_eq!(
        grid.style_at(DATA_START_ROW, 0),
        CellStyle::Band { shaded: true, centered: true }
    );
    assert_eq!(
        grid.style_at(DATA_START_ROW + 1, 2),
        CellStyle::Band { shaded: false, centered: false }
    );
    assert_eq!(grid.style_at(DATA_START_ROW + 3, 0), CellStyle::Plain);
    assert_eq!(grid.data_end_row(), Some(DATA_START_ROW + 2));
}

#[test]
fn test_sheet_without_entries() {
    let grid = build_sheet(&FormData::default(), export_day());
    assert_eq!(grid.data_end_row(), None);
    assert_eq!(
        grid.value(DATA_START_ROW + 1, 0).as_text(),
        Some("Total de Registros")
    );
    assert_eq!(grid.value(DATA_START_ROW + 1, 1), &CellValue::Number(0.0));
}

#[test]
fn test_print_view_groups_by_day() {
    let form = sample_form(true);
    let view = project(&form);

    assert_eq!(view.title, PRINT_TITLE);
    assert_eq!(view.header[0], ("Ciclo".to_string(), "Março de 2024".to_string()));
    assert_eq!(view.header[1].1, "Maria");
    assert_eq!(view.header[2].1, "ADM");
    assert_eq!(view.header[3].1, "IMP");

    let headings: Vec<&str> = view.groups.iter().map(|g| g.heading.as_str()).collect();
    assert_eq!(
        headings,
        vec![
            "terça-feira, 5 de março de 2024",
            "quarta-feira, 6 de março de 2024"
        ]
    );

    assert_eq!(view.card_count(), form.entries.len());
    let second_day = &view.groups[1];
    assert_eq!(second_day.cards[0].kind, EntryType::Entrada);
    assert_eq!(second_day.cards[1].kind, EntryType::Saida);
    assert!(second_day.cards[0].image_data.starts_with("data:image/jpeg"));
    assert_eq!(second_day.cards[1].date_label, "06/03/2024");
}

#[test]
fn test_xlsx_export_writes_named_sheet() {
    let out = temp_out("export_xlsx", "xlsx");
    let written = ExportLogic::export(
        &sample_form(false),
        ExportFormat::Xlsx,
        Path::new(&out),
        true,
        export_day(),
    )
    .unwrap();
    assert!(written.exists());

    let mut archive = zip::ZipArchive::new(fs::File::open(&written).unwrap()).unwrap();

    let mut workbook = String::new();
    archive
        .by_name("xl/workbook.xml")
        .unwrap()
        .read_to_string(&mut workbook)
        .unwrap();
    assert!(workbook.contains(SHEET_NAME));

    let mut strings = String::new();
    archive
        .by_name("xl/sharedStrings.xml")
        .unwrap()
        .read_to_string(&mut strings)
        .unwrap();
    assert!(strings.contains("FORMULÁRIO DE REGISTRO DE QUILOMETRAGEM"));
    assert!(strings.contains("Total de Registros"));
    assert!(strings.contains("10/03/2024"));
}

#[test]
fn test_pdf_export_embeds_photos() {
    let out = temp_out("export_pdf", "pdf");
    let written = ExportLogic::export(
        &sample_form(true),
        ExportFormat::Pdf,
        Path::new(&out),
        true,
        export_day(),
    )
    .unwrap();

    let bytes = fs::read(&written).unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("DCTDecode"));
    assert!(text.contains("Helvetica"));
}

#[test]
fn test_pdf_export_without_entries() {
    let out = temp_out("export_pdf_empty", "pdf");
    let written = ExportLogic::export(
        &FormData::default(),
        ExportFormat::Pdf,
        Path::new(&out),
        true,
        export_day(),
    )
    .unwrap();
    assert!(fs::read(&written).unwrap().starts_with(b"%PDF"));
}

#[test]
fn test_default_export_names() {
    let dir = Path::new("/tmp/km");
    let mut form = FormData::default();

    assert_eq!(
        ExportLogic::default_path(&form, ExportFormat::Xlsx, dir, 42),
        dir.join("km-registro-dados-42.xlsx")
    );
    assert_eq!(
        ExportLogic::default_path(&form, ExportFormat::Json, dir, 42),
        dir.join("km-data-42.json")
    );

    form.employee_name = "Ana/Paula".into();
    assert_eq!(
        ExportLogic::default_path(&form, ExportFormat::Pdf, dir, 7),
        dir.join("km-registro-Ana_Paula-7.pdf")
    );
}
