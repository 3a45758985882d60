use crate::core::store::{Action, AppState, reduce};
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::slot::{FORM_KEY, NEXT_TYPE_KEY, delete_slots, read_slot, write_slots};
use crate::errors::AppResult;
use crate::models::{EntryType, FormData};

pub struct PersistenceLogic;

impl PersistenceLogic {
    /// Write the whole form (and the advisory next type) to the durable slot.
    pub fn save(pool: &mut DbPool, state: &AppState) -> AppResult<()> {
        let form_json = serde_json::to_string(&state.form)?;
        let next_json = serde_json::to_string(&state.next_type)?;
        write_slots(pool, &[(FORM_KEY, &form_json), (NEXT_TYPE_KEY, &next_json)])
    }

    /// Read the durable slot.
    ///
    /// A missing or unparsable slot yields the default state; the failure is
    /// recorded in the internal log only.
    pub fn load(pool: &DbPool) -> AppState {
        let form = match read_slot(pool, FORM_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<FormData>(&raw) {
                Ok(form) => form,
                Err(e) => {
                    ttlog_quiet(&pool.conn, "load_error", FORM_KEY, &e.to_string());
                    return AppState::default();
                }
            },
            Ok(None) => return AppState::default(),
            Err(e) => {
                ttlog_quiet(&pool.conn, "load_error", FORM_KEY, &e.to_string());
                return AppState::default();
            }
        };

        let next_type = read_slot(pool, NEXT_TYPE_KEY)
            .ok()
            .flatten()
            .and_then(|raw| serde_json::from_str::<EntryType>(&raw).ok())
            .unwrap_or_default();

        AppState::new(form, next_type)
    }

    /// Reset everything, but only once the user has confirmed.
    ///
    /// Returns `None` (and touches nothing) when `confirmed` is false.
    pub fn clear(pool: &mut DbPool, state: &AppState, confirmed: bool) -> AppResult<Option<AppState>> {
        if !confirmed {
            return Ok(None);
        }

        delete_slots(pool, &[FORM_KEY, NEXT_TYPE_KEY])?;
        ttlog_quiet(&pool.conn, "clear", FORM_KEY, "All data removed");

        Ok(Some(reduce(state, Action::Reset)))
    }
}
