//! End-to-end batch tests: CSV in, PNG files out.

use std::fs;
use std::path::{Path, PathBuf};

use laurel_batch::{BatchDriver, BatchError, Config, RecipientTable};
use laurel_render::{FontBook, load_backdrop};
use tempfile::TempDir;

fn write_csv(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("recipients.csv");
    fs::write(&path, contents).unwrap();
    path
}

fn config_in(dir: &Path) -> Config {
    Config {
        output_dir: dir.join("certificates"),
        ..Config::default()
    }
}

fn output_files(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_two_rows_produce_two_named_files() {
    let scratch = TempDir::new().unwrap();
    let csv = write_csv(
        scratch.path(),
        "name,course,date,grade\nAlice Smith,Physics 101,2025-01-01,A\nBob,Math,,\n",
    );
    let config = config_in(scratch.path());
    let out_dir = config.output_dir.clone();

    let fonts = FontBook::bitmap();
    let table = RecipientTable::from_path(&csv).unwrap();
    let driver = BatchDriver::new(config, &fonts).unwrap();

    let mut progress = Vec::new();
    let summary = driver
        .run(&table, |generated| progress.push(generated.name.clone()))
        .unwrap();

    assert_eq!(summary.count(), 2);
    assert_eq!(progress, ["Alice Smith", "Bob"]);
    assert_eq!(
        output_files(&out_dir),
        ["Alice Smith_certificate.png", "Bob_certificate.png"]
    );
    assert!(summary.output_dir.is_absolute());

    let alice = load_backdrop(&summary.paths[0]).unwrap();
    assert_eq!((alice.width(), alice.height()), (1400, 1000));
}

#[test]
fn test_missing_name_header_writes_nothing() {
    let scratch = TempDir::new().unwrap();
    let csv = write_csv(scratch.path(), "student,course\nAlice,Physics\n");
    let out_dir = scratch.path().join("certificates");

    let err = RecipientTable::from_path(&csv).unwrap_err();
    assert!(matches!(err, BatchError::MissingColumn("name")));
    assert!(output_files(&out_dir).is_empty());
}

#[test]
fn test_blank_name_stops_batch_at_that_row() {
    let scratch = TempDir::new().unwrap();
    let csv = write_csv(scratch.path(), "name,course\nAlice,A\n,B\nCarol,C\n");
    let config = config_in(scratch.path());
    let out_dir = config.output_dir.clone();

    let fonts = FontBook::bitmap();
    let table = RecipientTable::from_path(&csv).unwrap();
    let driver = BatchDriver::new(config, &fonts).unwrap();
    let err = driver.run(&table, |_| {}).unwrap_err();

    assert!(matches!(err, BatchError::MissingField { row: 2, .. }));
    assert_eq!(output_files(&out_dir), ["Alice_certificate.png"]);
}

#[test]
fn test_static_template_sets_output_size() {
    let scratch = TempDir::new().unwrap();
    let template = scratch.path().join("frame.svg");
    fs::write(
        &template,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="600" height="400">
            <rect width="600" height="400" fill="#f0e6c8"/>
        </svg>"##,
    )
    .unwrap();
    let csv = write_csv(scratch.path(), "name\nDana\n");
    let config = Config {
        template: Some(template),
        ..config_in(scratch.path())
    };

    let fonts = FontBook::bitmap();
    let table = RecipientTable::from_path(&csv).unwrap();
    let driver = BatchDriver::new(config, &fonts).unwrap();
    assert!(driver.uses_static_template());

    let summary = driver.run(&table, |_| {}).unwrap();
    let image = load_backdrop(&summary.paths[0]).unwrap();
    assert_eq!((image.width(), image.height()), (600, 400));
    assert_eq!(image.pixel(5, 5), Some([0xf0, 0xe6, 0xc8, 0xff]));
}

#[test]
fn test_unsanitizable_name_uses_row_number() {
    let scratch = TempDir::new().unwrap();
    let csv = write_csv(scratch.path(), "name\n\"?!.\"\n");
    let config = config_in(scratch.path());
    let out_dir = config.output_dir.clone();

    let fonts = FontBook::bitmap();
    let table = RecipientTable::from_path(&csv).unwrap();
    let _ = BatchDriver::new(config, &fonts)
        .unwrap()
        .run(&table, |_| {})
        .unwrap();

    assert_eq!(output_files(&out_dir), ["recipient-1_certificate.png"]);
}

#[test]
fn test_missing_input_file() {
    let scratch = TempDir::new().unwrap();
    let err = RecipientTable::from_path(&scratch.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, BatchError::InputNotFound(_)));
}

#[test]
fn test_unusable_output_dir_stops_before_rendering() {
    let scratch = TempDir::new().unwrap();
    let csv = write_csv(scratch.path(), "name\nAlice\nBob\n");
    let blocker = scratch.path().join("certificates");
    fs::write(&blocker, "not a directory").unwrap();
    let config = Config {
        output_dir: blocker.clone(),
        ..Config::default()
    };

    let fonts = FontBook::bitmap();
    let table = RecipientTable::from_path(&csv).unwrap();
    let driver = BatchDriver::new(config, &fonts).unwrap();
    let mut generated = 0;
    let err = driver.run(&table, |_| generated += 1).unwrap_err();

    assert!(matches!(err, BatchError::OutputDir { ref path, .. } if *path == blocker));
    assert_eq!(generated, 0);
    assert!(blocker.is_file());
}

#[test]
fn test_zero_width_fails_before_creating_output() {
    let scratch = TempDir::new().unwrap();
    let mut config = config_in(scratch.path());
    config.canvas.width = 0;
    let out_dir = config.output_dir.clone();

    let fonts = FontBook::bitmap();
    assert!(BatchDriver::new(config, &fonts).is_err());
    assert!(!out_dir.exists());
}
