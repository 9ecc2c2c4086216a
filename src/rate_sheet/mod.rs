//! Loading bank rate sheets from CSV and persisting qualifying lenders.

mod parser;
mod writer;

use crate::qualifier::RateSheetRow;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Errors raised while loading a rate sheet.
#[derive(Debug, thiserror::Error)]
pub enum RateSheetError {
    #[error("can't find this path: {}", path.display())]
    InputPathNotFound { path: PathBuf },
    #[error("failed to read rate sheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid rate sheet CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("rate sheet line {line} has {found} fields, expected 5")]
    FieldCount { line: u64, found: usize },
    #[error("rate sheet line {line}: {field} must be numeric, found '{value}'")]
    MalformedField {
        line: u64,
        field: &'static str,
        value: String,
    },
}

/// Errors raised while writing qualifying loans.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write qualifying loans: {0}")]
    Csv(#[from] csv::Error),
}

/// Ordered, typed rows of a bank rate sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateSheet {
    rows: Vec<RateSheetRow>,
}

impl RateSheet {
    pub fn new(rows: Vec<RateSheetRow>) -> Self {
        Self { rows }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RateSheetError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RateSheetError::InputPathNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)?;
        let sheet = Self::from_reader(file)?;
        info!(path = %path.display(), lenders = sheet.len(), "loaded rate sheet");
        Ok(sheet)
    }

    /// Parse CSV text whose first line is a header.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RateSheetError> {
        parser::parse_rows(reader).map(Self::new)
    }

    pub fn rows(&self) -> &[RateSheetRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<RateSheetRow> {
        self.rows
    }
}

/// Write qualifying loans to `path`, returning the number of rows written.
pub fn write_qualifying_loans<P: AsRef<Path>>(
    path: P,
    rows: &[RateSheetRow],
) -> Result<usize, PersistError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| PersistError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    let written = write_qualifying_loans_to(file, rows)?;
    info!(path = %path.display(), rows = written, "saved qualifying loans");
    Ok(written)
}

pub fn write_qualifying_loans_to<W: Write>(
    writer: W,
    rows: &[RateSheetRow],
) -> Result<usize, PersistError> {
    Ok(writer::write_rows(writer, rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SHEET: &str = "Lender,Max Loan Amount,Max LTV,Max DTI,Min Credit Score\n\
Bank of Big - Premier Option,300000,0.85,0.47,740\n\
West Central Credit Union - Premier Option,400000,0.9,0.35,760\n";

    #[test]
    fn parses_positional_rows_and_skips_header() {
        let sheet = RateSheet::from_reader(Cursor::new(SHEET)).expect("sheet parses");

        assert_eq!(sheet.len(), 2);
        assert_eq!(
            sheet.rows()[0],
            RateSheetRow::new("Bank of Big - Premier Option", 300_000, 0.85, 0.47, 740)
        );
    }

    #[test]
    fn trims_whitespace_around_fields() {
        let sheet = RateSheet::from_reader(Cursor::new(
            "a,b,c,d,e\n  Bank A , 500000 , 0.8 , 0.45 , 640 \n",
        ))
        .expect("sheet parses");

        assert_eq!(
            sheet.into_rows(),
            vec![RateSheetRow::new("Bank A", 500_000, 0.8, 0.45, 640)]
        );
    }

    #[test]
    fn header_only_sheet_is_empty() {
        let sheet = RateSheet::from_reader(Cursor::new("a,b,c,d,e\n")).expect("sheet parses");
        assert!(sheet.is_empty());
    }

    #[test]
    fn malformed_numeric_field_names_the_column() {
        let error = RateSheet::from_reader(Cursor::new("a,b,c,d,e\nBank A,lots,0.8,0.45,640\n"))
            .expect_err("malformed amount");

        match error {
            RateSheetError::MalformedField { line, field, value } => {
                assert_eq!(line, 2);
                assert_eq!(field, "max_loan_amount");
                assert_eq!(value, "lots");
            }
            other => panic!("expected malformed field, got {other:?}"),
        }
    }

    #[test]
    fn infinite_ratio_is_malformed() {
        let error = RateSheet::from_reader(Cursor::new("a,b,c,d,e\nBank A,1,inf,0.45,640\n"))
            .expect_err("infinite ratio");
        assert!(matches!(
            error,
            RateSheetError::MalformedField {
                field: "max_loan_to_value_ratio",
                ..
            }
        ));
    }

    #[test]
    fn short_record_is_rejected() {
        let error = RateSheet::from_reader(Cursor::new("a,b,c,d,e\nBank A,1,0.8\n"))
            .expect_err("short record");
        assert!(matches!(
            error,
            RateSheetError::FieldCount { line: 2, found: 3 }
        ));
    }

    #[test]
    fn missing_path_is_reported() {
        let error = RateSheet::from_path("./does-not-exist.csv").expect_err("missing path");
        assert!(matches!(error, RateSheetError::InputPathNotFound { .. }));
        assert_eq!(error.to_string(), "can't find this path: ./does-not-exist.csv");
    }

    #[test]
    fn writes_rows_without_header() {
        let rows = vec![
            RateSheetRow::new("Bank A", 500_000, 0.8, 0.45, 640),
            RateSheetRow::new("Bank, Trust & Co", 250_000, 0.95, 0.5, 600),
        ];
        let mut buffer = Vec::new();

        let written = write_qualifying_loans_to(&mut buffer, &rows).expect("rows written");

        assert_eq!(written, 2);
        assert_eq!(
            String::from_utf8(buffer).expect("utf8"),
            "Bank A,500000,0.8,0.45,640\n\"Bank, Trust & Co\",250000,0.95,0.5,600\n"
        );
    }
}
