// src/export/logic.rs

use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::export::pdf::PdfManager;
use crate::export::print_view::project;
use crate::export::sheet::build_sheet;
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, notify_export_success};
use crate::models::FormData;
use crate::ui::messages::info;
use crate::utils::path::{sanitize_component, timestamped};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Logica di alto livello per l'export.
pub struct ExportLogic;

impl ExportLogic {
    /// Default file name for `format` inside `dir`:
    ///
    /// - json → `km-data-<epoch-ms>.json`
    /// - xlsx → `km-registro-<name|dados>-<epoch-ms>.xlsx`
    /// - pdf  → `km-registro-<name|dados>-<epoch-ms>.pdf`
    pub fn default_path(form: &FormData, format: ExportFormat, dir: &Path, epoch_ms: i64) -> PathBuf {
        match format {
            ExportFormat::Json => BackupLogic::default_path(dir, epoch_ms),
            ExportFormat::Xlsx | ExportFormat::Pdf => {
                let prefix = format!("km-registro-{}", sanitize_component(form.export_name()));
                timestamped(dir, &prefix, epoch_ms, format.as_str())
            }
        }
    }

    /// Write `form` to `path` in the requested format.
    ///
    /// `today` is stamped into the spreadsheet summary.
    pub fn export(
        form: &FormData,
        format: ExportFormat,
        path: &Path,
        force: bool,
        today: NaiveDate,
    ) -> AppResult<PathBuf> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        match format {
            ExportFormat::Json => {
                let written = BackupLogic::export_json(form, path, force, false)?;
                notify_export_success("JSON", &written);
                Ok(written)
            }
            ExportFormat::Xlsx => {
                ensure_writable(path, force)?;
                export_xlsx(&build_sheet(form, today), path)?;
                Ok(path.to_path_buf())
            }
            ExportFormat::Pdf => {
                ensure_writable(path, force)?;
                info(format!("Exporting to PDF: {}", path.display()));

                let view = project(form);
                let mut pdf = PdfManager::new();
                pdf.write_view(&view);
                pdf.save(path)?;

                notify_export_success("PDF", path);
                Ok(path.to_path_buf())
            }
        }
    }
}
