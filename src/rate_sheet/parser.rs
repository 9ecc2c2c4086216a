use crate::qualifier::RateSheetRow;
use csv::StringRecord;
use std::io::Read;
use std::str::FromStr;

use super::RateSheetError;

pub(crate) const COLUMNS: [&str; 5] = [
    "lender_name",
    "max_loan_amount",
    "max_loan_to_value_ratio",
    "max_debt_to_income_ratio",
    "min_credit_score",
];

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<RateSheetRow>, RateSheetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        rows.push(parse_record(&record, line)?);
    }

    Ok(rows)
}

fn parse_record(record: &StringRecord, line: u64) -> Result<RateSheetRow, RateSheetError> {
    if record.len() != COLUMNS.len() {
        return Err(RateSheetError::FieldCount {
            line,
            found: record.len(),
        });
    }

    Ok(RateSheetRow {
        lender_name: record[0].to_string(),
        max_loan_amount: parse_field(record, line, 1)?,
        max_loan_to_value_ratio: parse_ratio(record, line, 2)?,
        max_debt_to_income_ratio: parse_ratio(record, line, 3)?,
        min_credit_score: parse_field(record, line, 4)?,
    })
}

fn parse_field<T: FromStr>(
    record: &StringRecord,
    line: u64,
    index: usize,
) -> Result<T, RateSheetError> {
    record[index]
        .parse::<T>()
        .map_err(|_| malformed(record, line, index))
}

fn parse_ratio(record: &StringRecord, line: u64, index: usize) -> Result<f64, RateSheetError> {
    let value: f64 = parse_field(record, line, index)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(malformed(record, line, index))
    }
}

fn malformed(record: &StringRecord, line: u64, index: usize) -> RateSheetError {
    RateSheetError::MalformedField {
        line,
        field: COLUMNS[index],
        value: record[index].to_string(),
    }
}
