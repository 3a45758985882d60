use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Branch {
    #[default]
    #[serde(rename = "IMP")]
    Imp,
    #[serde(rename = "AÇA")]
    Aca,
    #[serde(rename = "MAR")]
    Mar,
    #[serde(rename = "SSL")]
    Ssl,
}

impl Branch {
    pub fn code(&self) -> &'static str {
        match self {
            Branch::Imp => "IMP",
            Branch::Aca => "AÇA",
            Branch::Mar => "MAR",
            Branch::Ssl => "SSL",
        }
    }

    /// Convert input code from CLI (any case, with or without the cedilla)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "IMP" => Some(Branch::Imp),
            "AÇA" | "ACA" => Some(Branch::Aca),
            "MAR" => Some(Branch::Mar),
            "SSL" => Some(Branch::Ssl),
            _ => None,
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
