mod common;
use common::{at, setup_test_db, temp_out};
use kmlogger::core::backup::BackupLogic;
use kmlogger::core::persistence::PersistenceLogic;
use kmlogger::core::store::AppState;
use kmlogger::db::log::load_log;
use kmlogger::db::pool::DbPool;
use kmlogger::db::slot::{FORM_KEY, NEXT_TYPE_KEY, read_slot, write_slots};
use kmlogger::errors::AppError;
use kmlogger::models::{Branch, EntryPatch, EntryType, MetaPatch, Sector};
use std::fs;
use std::path::Path;

fn sample_state() -> AppState {
    let state = AppState::default().set_meta(MetaPatch {
        cycle: Some("2024-03".into()),
        employee_name: Some("João da Silva".into()),
        sector: Some(Sector::Comercial),
        branch: Some(Branch::Aca),
    });
    let (state, first) = state.add(at(2024, 3, 5, 8));
    let (state, _) = state.add(at(2024, 3, 5, 18));
    state.update(&first, EntryPatch::image("data:image/jpeg;base64,/9j/AA=="))
}

#[test]
fn test_save_then_load_restores_everything() {
    let db = setup_test_db("persist_roundtrip");
    let mut pool = DbPool::open(&db).unwrap();

    let state = sample_state();
    PersistenceLogic::save(&mut pool, &state).unwrap();

    let reopened = DbPool::open(&db).unwrap();
    let loaded = PersistenceLogic::load(&reopened);
    assert_eq!(loaded, state);
    assert_eq!(loaded.next_type, EntryType::Entrada);
}

#[test]
fn test_missing_slot_loads_defaults() {
    let db = setup_test_db("persist_missing");
    let pool = DbPool::open(&db).unwrap();

    assert_eq!(PersistenceLogic::load(&pool), AppState::default());
}

#[test]
fn test_corrupt_slot_loads_defaults_and_logs() {
    let db = setup_test_db("persist_corrupt");
    let mut pool = DbPool::open(&db).unwrap();
    write_slots(&mut pool, &[(FORM_KEY, "{\"entries\": [")]).unwrap();

    let loaded = PersistenceLogic::load(&pool);
    assert_eq!(loaded, AppState::default());

    let log = load_log(&pool.conn).unwrap();
    assert!(log.iter().any(|r| r.operation == "load_error"));
}

#[test]
fn test_clear_requires_confirmation() {
    let db = setup_test_db("persist_clear");
    let mut pool = DbPool::open(&db).unwrap();
    let state = sample_state();
    PersistenceLogic::save(&mut pool, &state).unwrap();

    let declined = PersistenceLogic::clear(&mut pool, &state, false).unwrap();
    assert!(declined.is_none());
    assert!(read_slot(&pool, FORM_KEY).unwrap().is_some());

    let cleared = PersistenceLogic::clear(&mut pool, &state, true)
        .unwrap()
        .expect("confirmed");
    assert_eq!(cleared.form.cycle, "");
    assert_eq!(cleared.form.employee_name, "");
    assert_eq!(cleared.form.sector, Sector::Cpd);
    assert_eq!(cleared.form.branch, Branch::Imp);
    assert!(cleared.form.entries.is_empty());

    assert!(read_slot(&pool, FORM_KEY).unwrap().is_none());
    assert!(read_slot(&pool, NEXT_TYPE_KEY).unwrap().is_none());
}

#[test]
fn test_backup_round_trip_is_deep_equal() {
    let db = setup_test_db("backup_roundtrip");
    let mut pool = DbPool::open(&db).unwrap();
    let state = sample_state();

    let out = temp_out("backup_roundtrip", "json");
    let written = BackupLogic::export_json(&state.form, Path::new(&out), true, false).unwrap();

    let imported = BackupLogic::import_json(&mut pool, &AppState::default(), &written).unwrap();
    assert_eq!(imported.form, state.form);

    // adopted and persisted
    assert_eq!(PersistenceLogic::load(&pool).form, state.form);
}

#[test]
fn test_backup_uses_wire_field_names() {
    let state = sample_state();
    let out = temp_out("backup_fields", "json");
    BackupLogic::export_json(&state.form, Path::new(&out), true, false).unwrap();

    let raw = fs::read_to_string(&out).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["cycle"], "2024-03");
    assert_eq!(json["employeeName"], "João da Silva");
    assert_eq!(json["sector"], "COMERCIAL");
    assert_eq!(json["branch"], "AÇA");
    assert_eq!(json["entries"][0]["type"], "Entrada");
    assert_eq!(json["entries"][1]["type"], "Saída");
    assert_eq!(json["entries"][1]["imageData"], "");
    assert_eq!(json["entries"][0]["date"], "2024-03-05");
}

#[test]
fn test_malformed_backup_leaves_state_and_slot_untouched() {
    let db = setup_test_db("backup_malformed");
    let mut pool = DbPool::open(&db).unwrap();
    let state = sample_state();
    PersistenceLogic::save(&mut pool, &state).unwrap();
    let before = read_slot(&pool, FORM_KEY).unwrap();

    let bad = temp_out("backup_malformed", "json");
    fs::write(&bad, "{\"cycle\": \"2024-03\", \"entries\": [").unwrap();

    let err = BackupLogic::import_json(&mut pool, &state, Path::new(&bad)).unwrap_err();
    assert!(matches!(err, AppError::InvalidBackup(_)));
    assert_eq!(read_slot(&pool, FORM_KEY).unwrap(), before);
}

#[test]
fn test_backup_with_unknown_sector_is_rejected() {
    let db = setup_test_db("backup_bad_sector");
    let mut pool = DbPool::open(&db).unwrap();

    let bad = temp_out("backup_bad_sector", "json");
    fs::write(
        &bad,
        r#"{"cycle":"","employeeName":"","sector":"RH","branch":"IMP","entries":[]}"#,
    )
    .unwrap();

    let err = BackupLogic::import_json(&mut pool, &AppState::default(), Path::new(&bad))
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidBackup(_)));
    assert!(read_slot(&pool, FORM_KEY).unwrap().is_none());
}

#[test]
fn test_compressed_backup_replaces_plain_file() {
    let state = sample_state();
    let out = temp_out("backup_zip", "json");
    fs::remove_file(Path::new(&out).with_extension("zip")).ok();

    let written = BackupLogic::export_json(&state.form, Path::new(&out), true, true).unwrap();

    assert_eq!(written.extension().unwrap(), "zip");
    assert!(written.exists());
    assert!(!Path::new(&out).exists());
}

#[test]
fn test_default_backup_name() {
    let p = BackupLogic::default_path(Path::new("/tmp/out"), 1709632800000);
    assert_eq!(p, Path::new("/tmp/out/km-data-1709632800000.json"));
}

#[test]
fn test_backup_that_is_not_an_object_is_rejected() {
    let db = setup_test_db("backup_not_object");
    let mut pool = DbPool::open(&db).unwrap();
    let state = sample_state();
    PersistenceLogic::save(&mut pool, &state).unwrap();
    let before = read_slot(&pool, FORM_KEY).unwrap();

    for (i, doc) in ["[]", "[\"2024-03\"]", "42", "null", "{\"entries\": [[\"1\"]]}"]
        .iter()
        .enumerate()
    {
        let bad = temp_out(&format!("backup_not_object_{i}"), "json");
        fs::write(&bad, doc).unwrap();

        let err = BackupLogic::import_json(&mut pool, &state, Path::new(&bad)).unwrap_err();
        assert!(matches!(err, AppError::InvalidBackup(_)), "{doc} accepted");
        assert_eq!(read_slot(&pool, FORM_KEY).unwrap(), before);
    }
}

#[test]
fn test_backup_with_duplicate_ids_is_rejected() {
    let db = setup_test_db("backup_duplicate_ids");
    let mut pool = DbPool::open(&db).unwrap();

    let bad = temp_out("backup_duplicate_ids", "json");
    fs::write(
        &bad,
        r#"{"entries":[
            {"id":"1","imageData":"","date":"2024-03-05","type":"Entrada"},
            {"id":"1","imageData":"","date":"2024-03-06","type":"Saída"}
        ]}"#,
    )
    .unwrap();

    let err = BackupLogic::import_json(&mut pool, &AppState::default(), Path::new(&bad))
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidBackup(ref m) if m.contains("duplicate entry id 1")));
    assert!(read_slot(&pool, FORM_KEY).unwrap().is_none());
}
