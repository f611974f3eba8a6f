//! Minimal comma-separated table reader for the bulk import format.
//!
//! Comma-delimited, first non-blank row is the header, every field is
//! whitespace-trimmed. Quoting is not supported; the import format does not
//! produce quoted fields.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsvError {
    #[error("missing column '{column}' in header row")]
    MissingColumn { column: String },
    #[error("line {line}: row is missing a value for column '{column}'")]
    MissingField { column: String, line: usize },
}

#[derive(Debug)]
struct RawRecord {
    line: usize,
    fields: Vec<String>,
}

/// A parsed table: one header row plus zero or more data records.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    records: Vec<RawRecord>,
}

impl Table {
    /// Splits `input` into a header row and data records. Blank lines are
    /// skipped; fields are trimmed.
    pub fn parse(input: &str) -> Self {
        let mut lines = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        let headers = match lines.next() {
            Some((_, header)) => split_fields(header),
            None => Vec::new(),
        };

        let records = lines
            .map(|(index, line)| RawRecord {
                line: index + 1,
                fields: split_fields(line),
            })
            .collect();

        Self { headers, records }
    }

    /// Returns `true` when the table holds no data records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the data records with header-indexed field access.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.records.iter().map(move |record| Record {
            headers: &self.headers,
            record,
        })
    }
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(',').map(|field| field.trim().to_string()).collect()
}

/// A single data record, addressed by header column name.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    headers: &'a [String],
    record: &'a RawRecord,
}

impl Record<'_> {
    /// Returns the trimmed value under `column`.
    pub fn get(&self, column: &str) -> Result<&str, CsvError> {
        let index = self
            .headers
            .iter()
            .position(|header| header == column)
            .ok_or_else(|| CsvError::MissingColumn {
                column: column.to_string(),
            })?;

        self.record
            .fields
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| CsvError::MissingField {
                column: column.to_string(),
                line: self.record.line,
            })
    }

    /// 1-based source line number of this record.
    pub fn line(&self) -> usize {
        self.record.line
    }
}
