//! Single-criterion filters over rate-sheet rows.
//!
//! Every filter is inclusive: an applicant exactly at a lender's limit still
//! qualifies. Inputs are borrowed and survivors are cloned into a new vector in
//! their original order.

use super::domain::RateSheetRow;

/// Keep lenders whose maximum loan covers the requested amount.
pub fn filter_max_loan_size(loan_amount: f64, rows: &[RateSheetRow]) -> Vec<RateSheetRow> {
    retain(rows, |row| within_loan_limit(row, loan_amount))
}

/// Keep lenders whose minimum credit score the applicant meets.
pub fn filter_credit_score(credit_score: u32, rows: &[RateSheetRow]) -> Vec<RateSheetRow> {
    retain(rows, |row| meets_credit_minimum(row, credit_score))
}

/// Keep lenders whose debt-to-income ceiling is not exceeded.
pub fn filter_debt_to_income(
    monthly_debt_ratio: f64,
    rows: &[RateSheetRow],
) -> Vec<RateSheetRow> {
    retain(rows, |row| within_debt_to_income(row, monthly_debt_ratio))
}

/// Keep lenders whose loan-to-value ceiling is not exceeded.
pub fn filter_loan_to_value(
    loan_to_value_ratio: f64,
    rows: &[RateSheetRow],
) -> Vec<RateSheetRow> {
    retain(rows, |row| within_loan_to_value(row, loan_to_value_ratio))
}

pub(crate) fn within_loan_limit(row: &RateSheetRow, loan_amount: f64) -> bool {
    row.max_loan_amount as f64 >= loan_amount
}

pub(crate) fn meets_credit_minimum(row: &RateSheetRow, credit_score: u32) -> bool {
    row.min_credit_score <= credit_score
}

pub(crate) fn within_debt_to_income(row: &RateSheetRow, monthly_debt_ratio: f64) -> bool {
    row.max_debt_to_income_ratio >= monthly_debt_ratio
}

pub(crate) fn within_loan_to_value(row: &RateSheetRow, loan_to_value_ratio: f64) -> bool {
    row.max_loan_to_value_ratio >= loan_to_value_ratio
}

fn retain<F>(rows: &[RateSheetRow], keep: F) -> Vec<RateSheetRow>
where
    F: Fn(&RateSheetRow) -> bool,
{
    rows.iter().filter(|row| keep(*row)).cloned().collect()
}
