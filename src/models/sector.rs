use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sector {
    #[serde(rename = "ADM")]
    Adm,
    #[serde(rename = "COBRANÇA")]
    Cobranca,
    #[default]
    #[serde(rename = "CPD")]
    Cpd,
    #[serde(rename = "COMERCIAL")]
    Comercial,
}

impl Sector {
    pub fn code(&self) -> &'static str {
        match self {
            Sector::Adm => "ADM",
            Sector::Cobranca => "COBRANÇA",
            Sector::Cpd => "CPD",
            Sector::Comercial => "COMERCIAL",
        }
    }

    /// Convert input code from CLI (any case, with or without the cedilla)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "ADM" => Some(Sector::Adm),
            "COBRANÇA" | "COBRANCA" => Some(Sector::Cobranca),
            "CPD" => Some(Sector::Cpd),
            "COMERCIAL" => Some(Sector::Comercial),
            _ => None,
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
