//! The durable slot: a tiny key/value table, one JSON blob per key.

use crate::db::pool::DbPool;
use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{OptionalExtension, params};

/// Key holding the serialized form.
pub const FORM_KEY: &str = "kmData";
/// Key holding the type the next added entry gets.
pub const NEXT_TYPE_KEY: &str = "kmNextType";

pub fn read_slot(pool: &DbPool, key: &str) -> AppResult<Option<String>> {
    let value = pool
        .conn
        .query_row("SELECT value FROM slot WHERE key = ?1", [key], |row| {
            row.get::<_, String>(0)
        })
        .optional()?;
    Ok(value)
}

/// Write several keys at once; either all land or none do.
pub fn write_slots(pool: &mut DbPool, pairs: &[(&str, &str)]) -> AppResult<()> {
    let now = Local::now().to_rfc3339();

    pool.with_conn(|conn| {
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO slot (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                                updated_at = excluded.updated_at",
            )?;
            for (key, value) in pairs {
                stmt.execute(params![key, value, now])?;
            }
        }
        tx.commit()
    })?;

    Ok(())
}

pub fn delete_slots(pool: &mut DbPool, keys: &[&str]) -> AppResult<()> {
    pool.with_conn(|conn| {
        let tx = conn.transaction()?;
        for key in keys {
            tx.execute("DELETE FROM slot WHERE key = ?1", [key])?;
        }
        tx.commit()
    })?;
    Ok(())
}
