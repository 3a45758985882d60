//! Formatting utilities used for CLI and export outputs.

use unicode_width::UnicodeWidthStr;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Left-align `s` in `width` terminal columns (accents count as one column).
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

/// Image-presence indicator shown in listings and in the spreadsheet.
pub fn describe_image(has_image: bool) -> &'static str {
    if has_image {
        "✓ Anexada"
    } else {
        "✗ Sem imagem"
    }
}

/// Human-readable size of an embedded payload (`12.3 KiB`).
pub fn payload_size(image_data: &str) -> String {
    if image_data.is_empty() {
        return "-".to_string();
    }
    let kib = image_data.len() as f64 / 1024.0;
    format!("{kib:.1} KiB")
}
