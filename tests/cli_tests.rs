mod common;
use common::{init_db, km, setup_test_db, temp_out, temp_png};
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;

/// Run `add` and return the id printed in the confirmation line.
fn add_entry(db: &str, extra: &[&str]) -> String {
    let mut args = vec!["--db", db, "add"];
    args.extend_from_slice(extra);

    let out = km().args(&args).output().expect("run add");
    assert!(out.status.success(), "add failed: {:?}", out);

    let stdout = String::from_utf8_lossy(&out.stdout);
    stdout
        .split("Added entry ")
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next())
        .expect("id in add output")
        .to_string()
}

#[test]
fn test_init_creates_database() {
    let db = setup_test_db("cli_init");

    km().args(["--db", &db, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    assert!(fs::metadata(&db).is_ok());
}

#[test]
fn test_add_alternates_and_list_shows_entries() {
    let db = setup_test_db("cli_add_list");
    init_db(&db);

    km().args(["--db", &db, "add", "--date", "2024-03-05"])
        .assert()
        .success()
        .stdout(contains("Entrada").and(contains("05/03/2024")));

    km().args(["--db", &db, "add", "--date", "2024-03-05"])
        .assert()
        .success()
        .stdout(contains("Saída"));

    km().args(["--db", &db, "list"])
        .assert()
        .success()
        .stdout(
            contains("Total de Registros: 2")
                .and(contains("Próximo tipo      : Entrada"))
                .and(contains("✗ Sem imagem")),
        );
}

#[test]
fn test_add_rejects_bad_date() {
    let db = setup_test_db("cli_bad_date");
    init_db(&db);

    km().args(["--db", &db, "add", "--date", "05/03/2024"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));

    km().args(["--db", &db, "list"])
        .assert()
        .success()
        .stdout(contains("No entries yet"));
}

#[test]
fn test_list_grouped_uses_long_dates() {
    let db = setup_test_db("cli_grouped");
    init_db(&db);
    add_entry(&db, &["--date", "2024-03-06"]);
    add_entry(&db, &["--date", "2024-03-05"]);

    km().args(["--db", &db, "list", "--grouped"])
        .assert()
        .success()
        .stdout(
            contains("terça-feira, 5 de março de 2024")
                .and(contains("quarta-feira, 6 de março de 2024")),
        );
}

#[test]
fn test_meta_sets_header_fields() {
    let db = setup_test_db("cli_meta");
    init_db(&db);

    km().args([
        "--db",
        &db,
        "meta",
        "--cycle",
        "2024-03",
        "--employee",
        "Ana Souza",
        "--sector",
        "cobranca",
        "--branch",
        "ssl",
    ])
    .assert()
    .success()
    .stdout(contains("Metadata saved"));

    km().args(["--db", &db, "list"])
        .assert()
        .success()
        .stdout(
            contains("Março de 2024")
                .and(contains("Ana Souza"))
                .and(contains("COBRANÇA"))
                .and(contains("SSL")),
        );
}

#[test]
fn test_meta_rejects_unknown_sector() {
    let db = setup_test_db("cli_meta_bad");
    init_db(&db);

    km().args(["--db", &db, "meta", "--sector", "RH"])
        .assert()
        .failure()
        .stderr(contains("Invalid sector"));
}

#[test]
fn test_edit_and_delete() {
    let db = setup_test_db("cli_edit_del");
    init_db(&db);
    let id = add_entry(&db, &["--date", "2024-03-05"]);

    km().args(["--db", &db, "edit", &id, "--type", "saida", "--date", "2024-03-09"])
        .assert()
        .success()
        .stdout(contains("updated"));

    km().args(["--db", &db, "list"])
        .assert()
        .success()
        .stdout(contains("09/03/2024").and(contains("Saída")));

    km().args(["--db", &db, "del", &id])
        .assert()
        .success()
        .stdout(contains("has been deleted"));

    km().args(["--db", &db, "list"])
        .assert()
        .success()
        .stdout(contains("No entries yet"));
}

#[test]
fn test_delete_unknown_id_is_a_warning() {
    let db = setup_test_db("cli_del_unknown");
    init_db(&db);

    km().args(["--db", &db, "del", "12345"])
        .assert()
        .success()
        .stdout(contains("Nothing deleted"));
}

#[test]
fn test_add_with_photo_and_attach() {
    let db = setup_test_db("cli_photo");
    init_db(&db);
    let photo = temp_png("cli_photo", 900, 600);

    let first = add_entry(&db, &["--image", &photo]);
    let second = add_entry(&db, &[]);

    km().args(["--db", &db, "attach", &format!("{second}={photo}")])
        .assert()
        .success()
        .stdout(contains(format!("Photo attached to entry {second}")));

    km().args(["--db", &db, "list"])
        .assert()
        .success()
        .stdout(contains(first.as_str()).and(contains("✓ Anexada")).and(contains("✗ Sem imagem").not()));
}

#[test]
fn test_attach_reports_failures() {
    let db = setup_test_db("cli_attach_fail");
    init_db(&db);
    let id = add_entry(&db, &[]);
    let not_an_image = temp_out("cli_attach_fail", "png");
    fs::write(&not_an_image, "plain text").unwrap();

    km().args(["--db", &db, "attach", &format!("{id}={not_an_image}")])
        .assert()
        .failure()
        .stderr(contains("could not be attached"));

    km().args(["--db", &db, "attach", "--mime", "text/plain", &format!("{id}={not_an_image}")])
        .assert()
        .failure()
        .stderr(contains("Unsupported media type"));
}

#[test]
fn test_clear_asks_for_confirmation() {
    let db = setup_test_db("cli_clear");
    init_db(&db);
    add_entry(&db, &[]);

    km().args(["--db", &db, "clear"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    km().args(["--db", &db, "list"])
        .assert()
        .success()
        .stdout(contains("Total de Registros: 1"));

    km().args(["--db", &db, "clear"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("Dados limpos"));

    km().args(["--db", &db, "list"])
        .assert()
        .success()
        .stdout(contains("No entries yet").and(contains("CPD")).and(contains("IMP")));
}

#[test]
fn test_backup_and_restore() {
    let db = setup_test_db("cli_backup");
    init_db(&db);
    km().args(["--db", &db, "meta", "--employee", "Carlos"])
        .assert()
        .success();
    add_entry(&db, &["--date", "2024-03-05"]);
    add_entry(&db, &["--date", "2024-03-05"]);

    let file = temp_out("cli_backup", "json");
    km().args(["--db", &db, "backup", "--file", &file])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    km().args(["--db", &db, "clear", "--yes"]).assert().success();

    km().args(["--db", &db, "restore", "--file", &file])
        .assert()
        .success()
        .stdout(contains("2 entries restored"));

    km().args(["--db", &db, "list"])
        .assert()
        .success()
        .stdout(contains("Carlos").and(contains("Total de Registros: 2")));
}

#[test]
fn test_restore_of_truncated_file_fails_and_keeps_data() {
    let db = setup_test_db("cli_restore_bad");
    init_db(&db);
    add_entry(&db, &[]);

    let file = temp_out("cli_restore_bad", "json");
    fs::write(&file, "{\"entries\": [{\"id\": \"1\"").unwrap();

    km().args(["--db", &db, "restore", "--file", &file])
        .assert()
        .failure()
        .stderr(contains("Invalid backup file"));

    km().args(["--db", &db, "list"])
        .assert()
        .success()
        .stdout(contains("Total de Registros: 1"));
}

#[test]
fn test_backup_refuses_to_overwrite_without_confirmation() {
    let db = setup_test_db("cli_backup_overwrite");
    init_db(&db);
    let file = temp_out("cli_backup_overwrite", "json");
    fs::write(&file, "keep me").unwrap();

    km().args(["--db", &db, "backup", "--file", &file])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("not overwritten"));

    assert_eq!(fs::read_to_string(&file).unwrap(), "keep me");

    km().args(["--db", &db, "backup", "--file", &file, "--force"])
        .assert()
        .success();
    assert_ne!(fs::read_to_string(&file).unwrap(), "keep me");
}

#[test]
fn test_compressed_backup_asks_before_replacing_zip() {
    let db = setup_test_db("cli_backup_zip_overwrite");
    init_db(&db);
    let file = temp_out("cli_backup_zip_overwrite", "json");
    let zip = temp_out("cli_backup_zip_overwrite", "zip");
    fs::write(&zip, "old archive").unwrap();

    km().args(["--db", &db, "backup", "--file", &file, "--compress"])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("not overwritten"));

    assert_eq!(fs::read_to_string(&zip).unwrap(), "old archive");
    assert!(fs::metadata(&file).is_err());

    km().args(["--db", &db, "backup", "--file", &file, "--compress", "--force"])
        .assert()
        .success();
    assert_ne!(fs::read(&zip).unwrap(), b"old archive");
}

#[test]
fn test_export_xlsx_pdf_and_json() {
    let db = setup_test_db("cli_export");
    init_db(&db);
    let photo = temp_png("cli_export", 500, 700);
    add_entry(&db, &["--image", &photo]);
    add_entry(&db, &[]);

    for format in ["xlsx", "pdf", "json"] {
        let out = temp_out("cli_export", format);
        km().args(["--db", &db, "export", "--format", format, "--file", &out])
            .assert()
            .success();
        assert!(fs::metadata(&out).map(|m| m.len() > 0).unwrap_or(false));
    }
}

#[test]
fn test_export_rejects_unknown_format() {
    let db = setup_test_db("cli_export_bad");
    init_db(&db);

    km().args(["--db", &db, "export", "--format", "csv"])
        .assert()
        .failure();
}

#[test]
fn test_log_lists_operations() {
    let db = setup_test_db("cli_log");
    init_db(&db);
    add_entry(&db, &[]);

    km().args(["--db", &db, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init").and(contains("add")));
}
