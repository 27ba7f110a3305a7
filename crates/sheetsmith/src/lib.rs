//! Sheetsmith - convert JSON Lines files into Excel workbooks.
//!
//! The conversion is a straight line: load the JSONL records
//! ([`sheetsmith_jsonl`]), gather them into a [`table::Table`] whose columns
//! are the union of all record keys, and write that table to an `.xlsx`
//! workbook ([`export`]). [`convert`] ties the steps together; [`cli`] is the
//! command-line front end used by the `sheetsmith` binary.

#![forbid(unsafe_code)]

pub mod atomic;
pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod table;

// Public CLI module (needed by binary)
pub mod cli;

// Command implementations
pub mod commands;

pub mod output;
