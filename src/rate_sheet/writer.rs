use crate::qualifier::RateSheetRow;
use std::io::Write;

/// Serialize rows without a header, one lender per line, in rate-sheet column order.
pub(crate) fn write_rows<W: Write>(writer: W, rows: &[RateSheetRow]) -> Result<usize, csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    for row in rows {
        csv_writer.serialize((
            &row.lender_name,
            row.max_loan_amount,
            row.max_loan_to_value_ratio,
            row.max_debt_to_income_ratio,
            row.min_credit_score,
        ))?;
    }

    csv_writer.flush()?;
    Ok(rows.len())
}
