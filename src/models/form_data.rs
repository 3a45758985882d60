use super::{branch::Branch, entry::Entry, sector::Sector};
use serde::{Deserialize, Serialize};

/// The whole form: trip metadata plus the ordered entries.
/// Persisted as one JSON blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormData {
    /// `YYYY-MM`, or empty when not chosen yet.
    pub cycle: String,
    pub employee_name: String,
    pub sector: Sector,
    pub branch: Branch,
    pub entries: Vec<Entry>,
}

impl FormData {
    pub fn find(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Name used in export file names.
    pub fn export_name(&self) -> &str {
        if self.employee_name.is_empty() {
            "dados"
        } else {
            &self.employee_name
        }
    }
}

/// Partial update of the top-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaPatch {
    pub cycle: Option<String>,
    pub employee_name: Option<String>,
    pub sector: Option<Sector>,
    pub branch: Option<Branch>,
}

impl MetaPatch {
    pub fn is_empty(&self) -> bool {
        self.cycle.is_none()
            && self.employee_name.is_none()
            && self.sector.is_none()
            && self.branch.is_none()
    }
}
