#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Local, TimeZone};
use image::{ImageFormat, RgbImage};
use std::env;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

/// The binary, with HOME pointed at a scratch dir so no user config leaks in.
pub fn km() -> Command {
    let mut cmd = cargo_bin_cmd!("kmlogger");
    let home = env::temp_dir().join("kmlogger_test_home");
    fs::create_dir_all(&home).ok();
    cmd.env("HOME", home);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_kmlogger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// PNG bytes of a `w`×`h` gradient.
pub fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(w, h, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("encode png");
    buf
}

/// Write a PNG to the temp dir and return its path.
pub fn temp_png(name: &str, w: u32, h: u32) -> String {
    let p = temp_out(name, "png");
    fs::write(&p, png_bytes(w, h)).expect("write png");
    p
}

/// Fixed local instant used to make ids and dates predictable.
pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(y, m, d, h, 0, 0)
        .single()
        .expect("unambiguous local time")
}

/// Initialize a test database through the CLI.
pub fn init_db(db_path: &str) {
    km().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}
