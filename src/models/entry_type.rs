use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a mileage record: check-in (`Entrada`) or check-out (`Saída`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryType {
    #[default]
    Entrada,
    #[serde(rename = "Saída")]
    Saida,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Entrada => "Entrada",
            EntryType::Saida => "Saída",
        }
    }

    /// Accepts the display spelling, the unaccented one and the in/out shorthands.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "entrada" | "in" | "e" => Some(EntryType::Entrada),
            "saída" | "saida" | "out" | "s" => Some(EntryType::Saida),
            _ => None,
        }
    }

    /// The type the next appended entry gets after this one.
    pub fn toggled(self) -> Self {
        match self {
            EntryType::Entrada => EntryType::Saida,
            EntryType::Saida => EntryType::Entrada,
        }
    }

    pub fn is_entrada(&self) -> bool {
        matches!(self, EntryType::Entrada)
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
