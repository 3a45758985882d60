use super::entry_type::EntryType;
use serde::{Deserialize, Serialize};

/// One check-in/check-out record.
///
/// Field names follow the JSON document stored in the durable slot and in
/// backup files (`imageData`, `type`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Entry {
    pub id: String,
    /// Empty, or a `data:<mime>;base64,<payload>` string.
    pub image_data: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    #[serde(rename = "type")]
    pub kind: EntryType,
}

impl Entry {
    pub fn new(id: String, date: String, kind: EntryType) -> Self {
        Self {
            id,
            image_data: String::new(),
            date,
            kind,
        }
    }

    pub fn has_image(&self) -> bool {
        !self.image_data.is_empty()
    }

    /// Apply only the fields set in `patch`.
    pub fn patched(&self, patch: &EntryPatch) -> Self {
        Self {
            id: self.id.clone(),
            image_data: patch
                .image_data
                .clone()
                .unwrap_or_else(|| self.image_data.clone()),
            date: patch.date.clone().unwrap_or_else(|| self.date.clone()),
            kind: patch.kind.unwrap_or(self.kind),
        }
    }
}

/// Partial update of an entry; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub image_data: Option<String>,
    pub date: Option<String>,
    pub kind: Option<EntryType>,
}

impl EntryPatch {
    pub fn image(data: impl Into<String>) -> Self {
        Self {
            image_data: Some(data.into()),
            ..Self::default()
        }
    }

    pub fn date(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.image_data.is_none() && self.date.is_none() && self.kind.is_none()
    }
}
