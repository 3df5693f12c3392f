//! Core types for tabular input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort a run before any row is processed.
#[derive(Debug, Error)]
pub enum InputError {
    /// The table has fewer than the two required columns.
    #[error("Input needs at least two columns (label, URL), found {found}")]
    TooFewColumns { found: usize },

    /// The upload contained no bytes.
    #[error("Input file is empty")]
    EmptyFile,

    /// The XLSX container could not be opened.
    #[error("Unreadable spreadsheet archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Workbook XML could not be parsed.
    #[error("Malformed spreadsheet XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The workbook has no readable worksheet.
    #[error("Spreadsheet has no worksheet")]
    NoWorksheet,

    /// I/O error while reading an archive member.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    Csv,
    Tsv,
    Xlsx,
}

impl TableFormat {
    /// Guess the format from the file name and leading bytes.
    ///
    /// A ZIP signature always means XLSX; otherwise `.tsv`/`.tab` select
    /// tab-separated and everything else is read as CSV.
    pub fn detect(file_name: &str, data: &[u8]) -> Self {
        if data.starts_with(b"PK\x03\x04") {
            return TableFormat::Xlsx;
        }
        let lower = file_name.to_ascii_lowercase();
        if lower.ends_with(".tsv") || lower.ends_with(".tab") {
            TableFormat::Tsv
        } else {
            TableFormat::Csv
        }
    }
}

/// Options for reading a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReadOptions {
    /// Treat the first non-empty row as column names.
    pub has_header: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { has_header: true }
    }
}

/// One row of input: a display label and the target to encode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRow {
    pub label: String,
    pub target: Option<String>,
}

impl InputRow {
    pub fn new(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: Some(target.into()),
        }
    }

    /// A row whose target cell is absent.
    pub fn without_target(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: None,
        }
    }

    /// The trimmed target, or `None` if it is absent or blank.
    pub fn trimmed_target(&self) -> Option<&str> {
        self.target
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Names of the columns used for labels and targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    pub label: String,
    pub target: String,
}

/// A parsed sheet: optional header plus data rows of optional cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<Option<String>>>,
    pub column_count: usize,
}

impl Table {
    /// Build a table from raw rows, splitting off the header if requested.
    pub fn from_rows(mut rows: Vec<Vec<Option<String>>>, options: ReadOptions) -> Self {
        let column_count = rows.iter().map(Vec::len).max().unwrap_or(0);
        let headers = if options.has_header && !rows.is_empty() {
            let header = rows.remove(0);
            Some(header.into_iter().map(Option::unwrap_or_default).collect())
        } else {
            None
        };
        Self {
            headers,
            rows,
            column_count,
        }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fail with [`InputError::TooFewColumns`] unless label and target
    /// columns both exist.
    pub fn ensure_columns(&self) -> Result<(), InputError> {
        if self.column_count < 2 {
            return Err(InputError::TooFewColumns {
                found: self.column_count,
            });
        }
        Ok(())
    }

    /// Names of the label and target columns.
    ///
    /// Header text is used when present and non-empty, otherwise
    /// `Column 1` / `Column 2`.
    pub fn column_mapping(&self) -> Result<ColumnMapping, InputError> {
        self.ensure_columns()?;
        let name = |idx: usize| {
            self.headers
                .as_ref()
                .and_then(|h| h.get(idx))
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Column {}", idx + 1))
        };
        Ok(ColumnMapping {
            label: name(0),
            target: name(1),
        })
    }

    /// The first `n` data rows, for display before processing.
    pub fn preview(&self, n: usize) -> &[Vec<Option<String>>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Project the first two columns into ordered input rows.
    pub fn input_rows(&self) -> Result<Vec<InputRow>, InputError> {
        self.ensure_columns()?;
        Ok(self
            .rows
            .iter()
            .map(|row| InputRow {
                label: row.first().cloned().flatten().unwrap_or_default(),
                target: row.get(1).cloned().flatten(),
            })
            .collect())
    }
}
