//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use calamine::{open_workbook, Data, Reader, Xlsx};
use std::io::Read;
use std::path::Path;
use std::process::{Command, Output};

/// A workbook cell reduced to what the tests compare.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Empty,
    Num(f64),
    Text(String),
    Bool(bool),
}

/// Shorthand for a text cell.
pub fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

/// Read every row of a worksheet, header included.
pub fn read_sheet(path: &Path, sheet: &str) -> Vec<Vec<Value>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("Failed to open workbook");
    let range = workbook
        .worksheet_range(sheet)
        .expect("Failed to read worksheet");

    range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::Empty => Value::Empty,
                    Data::Int(i) => Value::Num(*i as f64),
                    Data::Float(f) => Value::Num(*f),
                    Data::String(s) => Value::Text(s.clone()),
                    Data::Bool(b) => Value::Bool(*b),
                    other => panic!("Unexpected cell type: {other:?}"),
                })
                .collect()
        })
        .collect()
}

/// Names of all worksheets in a workbook.
pub fn sheet_names(path: &Path) -> Vec<String> {
    let workbook: Xlsx<_> = open_workbook(path).expect("Failed to open workbook");
    workbook.sheet_names()
}

/// Raw XML of the first worksheet, for layout the cell reader does not expose.
pub fn first_sheet_xml(path: &Path) -> String {
    let file = std::fs::File::open(path).expect("Failed to open workbook");
    let mut archive = zip::ZipArchive::new(file).expect("Workbook should be a zip archive");
    let mut entry = archive
        .by_name("xl/worksheets/sheet1.xml")
        .expect("Workbook should contain sheet1.xml");
    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .expect("Failed to read sheet1.xml");
    xml
}

/// Write a JSONL fixture into `dir` and return its path.
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write fixture");
    path
}

/// Run the sheetsmith binary in the specified directory
pub fn run_sheetsmith_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sheetsmith"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute sheetsmith binary")
}
