//! Entry store: the application state container and its transitions.
//!
//! Every operation takes a snapshot and returns a new one. Nothing here
//! fails; unknown ids are no-ops.

use crate::models::{Entry, EntryPatch, EntryType, FormData, MetaPatch};
use chrono::{DateTime, Local};

/// Current form plus the type the next `add` will use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub form: FormData,
    /// Advisory: alternates on every add, starting from `Entrada`.
    pub next_type: EntryType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add { id: String, date: String },
    Update { id: String, patch: EntryPatch },
    Remove { id: String },
    SetMeta(MetaPatch),
    Replace(FormData),
    Reset,
}

/// Pure transition function.
pub fn reduce(state: &AppState, action: Action) -> AppState {
    match action {
        Action::Add { id, date } => {
            let mut form = state.form.clone();
            form.entries.push(Entry::new(id, date, state.next_type));
            AppState {
                form,
                next_type: state.next_type.toggled(),
            }
        }

        Action::Update { id, patch } => {
            let mut next = state.clone();
            next.form.entries = state
                .form
                .entries
                .iter()
                .map(|e| if e.id == id { e.patched(&patch) } else { e.clone() })
                .collect();
            next
        }

        Action::Remove { id } => {
            let mut next = state.clone();
            next.form.entries.retain(|e| e.id != id);
            next
        }

        Action::SetMeta(meta) => {
            let mut next = state.clone();
            if let Some(cycle) = meta.cycle {
                next.form.cycle = cycle;
            }
            if let Some(name) = meta.employee_name {
                next.form.employee_name = name;
            }
            if let Some(sector) = meta.sector {
                next.form.sector = sector;
            }
            if let Some(branch) = meta.branch {
                next.form.branch = branch;
            }
            next
        }

        Action::Replace(form) => AppState {
            form,
            next_type: state.next_type,
        },

        Action::Reset => AppState::default(),
    }
}

/// Time-derived id (epoch milliseconds), bumped until unique in `form`.
pub fn fresh_id(form: &FormData, now: DateTime<Local>) -> String {
    let mut millis = now.timestamp_millis();
    loop {
        let candidate = millis.to_string();
        if !form.contains(&candidate) {
            return candidate;
        }
        millis += 1;
    }
}

impl AppState {
    pub fn new(form: FormData, next_type: EntryType) -> Self {
        Self { form, next_type }
    }

    /// Append an entry dated `now`'s local day with the next alternating type.
    /// Returns the new snapshot and the id of the appended entry.
    pub fn add(&self, now: DateTime<Local>) -> (AppState, String) {
        let id = fresh_id(&self.form, now);
        let date = now.date_naive().format("%Y-%m-%d").to_string();
        let next = reduce(
            self,
            Action::Add {
                id: id.clone(),
                date,
            },
        );
        (next, id)
    }

    pub fn update(&self, id: &str, patch: EntryPatch) -> AppState {
        reduce(
            self,
            Action::Update {
                id: id.to_string(),
                patch,
            },
        )
    }

    pub fn remove(&self, id: &str) -> AppState {
        reduce(self, Action::Remove { id: id.to_string() })
    }

    pub fn set_meta(&self, meta: MetaPatch) -> AppState {
        reduce(self, Action::SetMeta(meta))
    }

    pub fn replace(&self, form: FormData) -> AppState {
        reduce(self, Action::Replace(form))
    }
}
