//! Unified application error type.
//! All modules (db, core, cli, export, utils) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Invalid cycle format (expected YYYY-MM): {0}")]
    InvalidCycle(String),

    #[error("Invalid entry type: {0} (use Entrada or Saída)")]
    InvalidEntryType(String),

    #[error("Invalid sector: {0} (use ADM, COBRANÇA, CPD or COMERCIAL)")]
    InvalidSector(String),

    #[error("Invalid branch: {0} (use IMP, AÇA, MAR or SSL)")]
    InvalidBranch(String),

    // ---------------------------
    // Image errors
    // ---------------------------
    #[error("Unsupported media type: {0} (only image/* is accepted)")]
    UnsupportedMediaType(String),

    #[error("Unable to decode image: {0}")]
    ImageDecode(String),

    #[error("Unable to encode image: {0}")]
    ImageEncode(String),

    // ---------------------------
    // Backup errors
    // ---------------------------
    #[error("Invalid backup file: {0}")]
    InvalidBackup(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export format not supported: {0}")]
    InvalidExportFormat(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
