//! Calendar helpers: local-date parsing, pt-BR rendering and date grouping.

use crate::models::Entry;
use chrono::{Datelike, NaiveDate, Weekday};

const MONTHS: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse `YYYY-MM-DD` as a plain calendar date.
///
/// The string is split on `-` so the result never shifts with the local
/// time zone.
pub fn parse_date_local(s: &str) -> Option<NaiveDate> {
    let mut parts = s.trim().split('-');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let day = parts.next()?.parse::<u32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse `YYYY-MM` into (year, month).
pub fn parse_cycle(s: &str) -> Option<(i32, u32)> {
    let (y, m) = s.trim().split_once('-')?;
    let year = y.parse::<i32>().ok()?;
    let month = m.parse::<u32>().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

/// `dd/mm/yyyy`
pub fn format_short(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// pt-BR long form, e.g. `terça-feira, 5 de março de 2024`.
pub fn format_long(date: NaiveDate) -> String {
    format!(
        "{}, {} de {} de {}",
        weekday_name(date.weekday()),
        date.day(),
        MONTHS[date.month0() as usize].to_lowercase(),
        date.year()
    )
}

/// `2024-03` → `Março de 2024`.
///
/// Empty input gives an empty label; anything unparsable is echoed back.
pub fn format_cycle(cycle: &str) -> String {
    if cycle.trim().is_empty() {
        return String::new();
    }

    match parse_cycle(cycle) {
        Some((year, month)) => format!("{} de {}", MONTHS[(month - 1) as usize], year),
        None => cycle.to_string(),
    }
}

/// Short form of a stored date string, or the raw string if it does not parse.
pub fn format_date_br(s: &str) -> String {
    parse_date_local(s)
        .map(format_short)
        .unwrap_or_else(|| s.to_string())
}

/// Long form of a stored date string, or the raw string if it does not parse.
pub fn format_full_date_br(s: &str) -> String {
    parse_date_local(s)
        .map(format_long)
        .unwrap_or_else(|| s.to_string())
}

fn weekday_name(w: Weekday) -> &'static str {
    match w {
        Weekday::Mon => "segunda-feira",
        Weekday::Tue => "terça-feira",
        Weekday::Wed => "quarta-feira",
        Weekday::Thu => "quinta-feira",
        Weekday::Fri => "sexta-feira",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

/// Entries sharing the same date string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGroup<'a> {
    pub date: &'a str,
    pub entries: Vec<&'a Entry>,
}

/// Bucket entries by date, ascending.
///
/// Insertion order is kept inside each bucket. Dates that do not parse are
/// placed after every valid date, in the order they were first seen.
pub fn group_by_date(entries: &[Entry]) -> Vec<DateGroup<'_>> {
    let mut groups: Vec<DateGroup<'_>> = Vec::new();

    for entry in entries {
        match groups.iter_mut().find(|g| g.date == entry.date) {
            Some(group) => group.entries.push(entry),
            None => groups.push(DateGroup {
                date: &entry.date,
                entries: vec![entry],
            }),
        }
    }

    // stable: equal keys keep first-seen order
    groups.sort_by_key(|g| match parse_date_local(g.date) {
        Some(d) => (0u8, Some(d)),
        None => (1u8, None),
    });

    groups
}
