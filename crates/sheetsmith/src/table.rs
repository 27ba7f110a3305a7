//! In-memory tabular form of a JSONL document.
//!
//! A [`Table`] is built from a sequence of JSON objects. Every distinct key
//! becomes a column, in the order the keys are first seen: all keys of the
//! first record in document order, then any keys the second record adds, and
//! so on. Records that lack a column hold [`Cell::Empty`] there.

use serde_json::{Map, Value};
use std::collections::HashMap;

/// A single spreadsheet value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// No value: JSON `null`, or the key is absent from the record.
    Empty,
    /// A JSON boolean.
    Bool(bool),
    /// A JSON number that fits in an `i64`.
    Integer(i64),
    /// A JSON number with a fraction or exponent.
    Float(f64),
    /// A JSON string, the compact JSON text of an array or object, or the
    /// decimal digits of an integer above `i64::MAX`.
    Text(String),
}

impl Cell {
    /// Returns `true` for [`Cell::Empty`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else if n.is_u64() {
                    Self::Text(n.to_string())
                } else {
                    n.as_f64().map_or(Self::Empty, Self::Float)
                }
            }
            Value::String(s) => Self::Text(s),
            nested @ (Value::Array(_) | Value::Object(_)) => Self::Text(nested.to_string()),
        }
    }
}

/// Rows and columns gathered from JSON records.
///
/// Every row holds exactly [`column_count`](Self::column_count) cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Builds a table from JSON objects, one row per record.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use sheetsmith::table::{Cell, Table};
    ///
    /// let records = [json!({"a": 1, "b": "x"}), json!({"c": true, "a": 2})]
    ///     .into_iter()
    ///     .filter_map(|v| v.as_object().cloned());
    /// let table = Table::from_records(records);
    ///
    /// assert_eq!(table.columns(), ["a", "b", "c"]);
    /// assert_eq!(table.get(1, "b"), Some(&Cell::Empty));
    /// ```
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Map<String, Value>>,
    {
        let mut columns: Vec<String> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut rows = Vec::new();

        for record in records {
            let mut row = vec![Cell::Empty; columns.len()];
            for (key, value) in record {
                let position = if let Some(&position) = positions.get(&key) {
                    position
                } else {
                    let position = columns.len();
                    positions.insert(key.clone(), position);
                    columns.push(key);
                    row.push(Cell::Empty);
                    position
                };
                row[position] = Cell::from(value);
            }
            rows.push(row);
        }

        // Rows read before a column first appeared are short.
        for row in &mut rows {
            row.resize(columns.len(), Cell::Empty);
        }

        tracing::debug!(
            rows = rows.len(),
            columns = columns.len(),
            "Built table from records"
        );
        Self { columns, rows }
    }

    /// Column names, in first-seen order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows, in record order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of data rows (records).
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the named column.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// The cell at `row` in the named column.
    #[must_use]
    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let position = self.column_index(column)?;
        self.rows.get(row).map(|cells| &cells[position])
    }
}
