//! Correction log on disk

use chrono::NaiveDate;
use lcr_pro::error::LcrError;
use lcr_pro::lcr_common::{
    CorrectionField, CorrectionFields, MatchRecord, Status, LOG_COLUMNS,
};
use lcr_pro::recorder::CorrectionLog;
use lcr_pro::workbook::{read_table, write_table, Table};
use tempfile::tempdir;

fn at(h: u32, m: u32, s: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

fn matched() -> MatchRecord {
    MatchRecord::new("100-2001", "CAP CER 10uF X7R 0603", "bom_a.xlsx")
}

#[test]
fn test_first_save_creates_log_with_full_header() {
    let dir = tempdir().expect("Failed to create temp dir");
    let log = CorrectionLog::new(dir.path().join("SMT_LCR").join("LCR-Correction Record.xlsx"));

    let fields = CorrectionFields::new()
        .with(CorrectionField::Line, "L3")
        .with(CorrectionField::MeasuredValue, "9.1uF");
    let record = log.save_at(matched(), fields, at(9, 30, 0)).unwrap();
    assert_eq!(record.status, Status::Saved);

    let table = read_table(log.path()).unwrap();
    assert_eq!(table.headers, LOG_COLUMNS.to_vec());
    assert_eq!(table.len(), 1);

    let col = |name: &str| table.column_index(name).unwrap();
    assert_eq!(table.cell(0, col("Material")), "100-2001");
    assert_eq!(table.cell(0, col("Description")), "CAP CER 10uF X7R 0603");
    assert_eq!(table.cell(0, col("Line")), "L3");
    assert_eq!(table.cell(0, col("Measured Value")), "9.1uF");
    assert_eq!(table.cell(0, col("AVL")), "");
    assert_eq!(table.cell(0, col("Timestamp")), "2024-03-05 09:30:00");
    assert_eq!(table.cell(0, col("Status")), "Saved");
}

#[test]
fn test_appends_keep_existing_rows() {
    let dir = tempdir().expect("Failed to create temp dir");
    let log = CorrectionLog::new(dir.path().join("log.xlsx"));

    log.save_at(matched(), CorrectionFields::new(), at(9, 0, 0)).unwrap();
    log.save_at(
        MatchRecord::new("200-0001", "IND 10mH", "bom_b.xlsx"),
        CorrectionFields::new().with(CorrectionField::Remarks, "second"),
        at(9, 5, 0),
    )
    .unwrap();

    let table = log.read().unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.cell(0, 0), "100-2001");
    assert_eq!(table.cell(1, 0), "200-0001");
    let remarks = table.column_index("Remarks").unwrap();
    assert_eq!(table.cell(1, remarks), "second");
}

#[test]
fn test_unknown_column_rejected_and_file_untouched() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("log.xlsx");

    let mut foreign = Table::with_headers(&["Material", "Supplier"]);
    foreign.rows.push(vec!["100-2001".into(), "ACME".into()]);
    write_table(&path, &foreign).unwrap();
    let before = std::fs::read(&path).unwrap();

    let log = CorrectionLog::new(&path);
    let result = log.save_at(matched(), CorrectionFields::new(), at(10, 0, 0));
    assert!(matches!(result, Err(LcrError::SchemaMismatch { .. })));

    let after = std::fs::read(&path).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_older_log_missing_columns_is_filled() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("log.xlsx");

    let mut old = Table::with_headers(&["Material", "Description", "Timestamp"]);
    old.rows.push(vec!["OLD-1".into(), "old row".into(), "2023-01-01 00:00:00".into()]);
    write_table(&path, &old).unwrap();

    let log = CorrectionLog::new(&path);
    log.save_at(matched(), CorrectionFields::new(), at(11, 0, 0)).unwrap();

    let table = read_table(&path).unwrap();
    assert_eq!(table.headers, LOG_COLUMNS.to_vec());
    assert_eq!(table.len(), 2);
    assert_eq!(table.cell(0, 0), "OLD-1");
    let status = table.column_index("Status").unwrap();
    assert_eq!(table.cell(0, status), "");
    assert_eq!(table.cell(1, status), "Saved");
}

#[test]
fn test_ensure_created_only_once() {
    let dir = tempdir().expect("Failed to create temp dir");
    let log = CorrectionLog::new(dir.path().join("log.xlsx"));

    assert!(log.ensure_created().unwrap());
    assert!(!log.ensure_created().unwrap());
    assert!(log.read().unwrap().is_empty());
}

#[test]
fn test_duplicated_column_rejected_and_file_untouched() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("log.xlsx");

    let mut dup = Table::with_headers(&["Material", "Remarks", "Remarks"]);
    dup.rows.push(vec!["100-2001".into(), "first".into(), "second".into()]);
    write_table(&path, &dup).unwrap();
    let before = std::fs::read(&path).unwrap();

    let log = CorrectionLog::new(&path);
    let result = log.save_at(matched(), CorrectionFields::new(), at(12, 0, 0));
    assert!(matches!(result, Err(LcrError::SchemaMismatch { .. })));
    assert_eq!(std::fs::read(&path).unwrap(), before);
}
