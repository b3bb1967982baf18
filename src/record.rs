use crate::error::{DedupError, DedupResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

///
/// One table cell. Equality and hashing are literal: no case folding, no
/// trimming, floats compared bitwise so a value always equals itself, and
/// `Missing` equals only `Missing`.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl FieldValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// The kind of a present value; `None` for `Missing`.
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            FieldValue::Text(_) => Some(FieldKind::Text),
            FieldValue::Integer(_) => Some(FieldKind::Integer),
            FieldValue::Float(_) => Some(FieldKind::Float),
            FieldValue::Missing => None,
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a == b,
            (FieldValue::Float(a), FieldValue::Float(b)) => a.to_bits() == b.to_bits(),
            (FieldValue::Missing, FieldValue::Missing) => true,
            _ => false,
        }
    }
}

impl Eq for FieldValue {}

impl Hash for FieldValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            FieldValue::Text(s) => s.hash(state),
            FieldValue::Integer(i) => i.hash(state),
            FieldValue::Float(f) => f.to_bits().hash(state),
            FieldValue::Missing => {}
        }
    }
}

/// Textual coercion used when building fuzzy comparison keys: text verbatim,
/// numbers in decimal, `Missing` as the empty string.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Missing => Ok(()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }
}

/// Per-column type summary reported by the missing-value profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    Mixed,
    Empty,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Mixed => "mixed",
            FieldKind::Empty => "empty",
        };
        write!(f, "{}", name)
    }
}

///
/// An ordered table of records: a schema of field names plus rows of cells.
/// Records have no identity beyond their position. Rows are validated on
/// insertion; a row whose width differs from the schema is rejected.
///
#[derive(Clone, Debug, PartialEq)]
pub struct RecordTable {
    fields: Vec<String>,
    rows: Vec<Vec<FieldValue>>,
}

impl RecordTable {
    pub fn new(fields: Vec<String>) -> Self {
        RecordTable {
            fields,
            rows: Vec::new(),
        }
    }

    ///
    /// Builds a table from a schema and pre-assembled rows.
    ///
    /// ## Arguments
    ///
    /// * `fields` - The schema, in column order.
    /// * `rows` - The record rows; every row must match the schema width.
    ///
    pub fn from_rows(fields: Vec<String>, rows: Vec<Vec<FieldValue>>) -> DedupResult<Self> {
        let mut table = RecordTable::new(fields);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn push_row(&mut self, row: Vec<FieldValue>) -> DedupResult<()> {
        if row.len() != self.fields.len() {
            return Err(DedupError::RaggedRow {
                row: self.rows.len(),
                got: row.len(),
                expected: self.fields.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> &[FieldValue] {
        &self.rows[index]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[FieldValue]> {
        self.rows.iter().map(|row| row.as_slice())
    }

    pub fn column(&self, index: usize) -> impl Iterator<Item = &FieldValue> {
        self.rows.iter().map(move |row| &row[index])
    }

    /// Resolves a field name to its column index, or fails with the schema
    /// error. Callers resolve once, up front, never inside a comparison loop.
    pub fn resolve_field(&self, name: &str) -> DedupResult<usize> {
        self.fields
            .iter()
            .position(|field| field == name)
            .ok_or_else(|| DedupError::unknown_field(name, &self.fields))
    }
}
