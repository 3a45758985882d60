/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";

/// Entrada in blue, Saída in yellow (the card accents of the form).
pub fn colorize_entry_type(value: &str, is_entrada: bool) -> String {
    if is_entrada {
        format!("{BLUE}{value}{RESET}")
    } else {
        format!("{YELLOW}{value}{RESET}")
    }
}

/// Grey out empty placeholders, green for attached images.
pub fn colorize_image_status(value: &str, has_image: bool) -> String {
    if has_image {
        format!("{GREEN}{value}{RESET}")
    } else {
        format!("{GREY}{value}{RESET}")
    }
}
