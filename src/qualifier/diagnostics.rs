use super::domain::{
    ApplicantProfile, DerivedRatios, DisqualificationReason, NonQualifyingLoan,
    QualificationError, RateSheetRow,
};
use super::filters::{
    meets_credit_minimum, within_debt_to_income, within_loan_limit, within_loan_to_value,
};
use tracing::info;

/// Explain why the applicant fails each lender they do not qualify for.
///
/// Checks run per row in the order credit score, loan size, debt-to-income,
/// loan-to-value, and only the first failing check is reported. This starts
/// with credit score, unlike [`find_qualifying_loans`](super::find_qualifying_loans)
/// which starts with loan size.
pub fn explain_non_qualifying(
    rate_sheet: &[RateSheetRow],
    profile: &ApplicantProfile,
) -> Result<Vec<NonQualifyingLoan>, QualificationError> {
    let ratios = DerivedRatios::from_profile(profile)?;
    Ok(explain_with_ratios(rate_sheet, profile, &ratios))
}

pub(crate) fn explain_with_ratios(
    rate_sheet: &[RateSheetRow],
    profile: &ApplicantProfile,
    ratios: &DerivedRatios,
) -> Vec<NonQualifyingLoan> {
    let report: Vec<NonQualifyingLoan> = rate_sheet
        .iter()
        .filter_map(|row| {
            first_failure(row, profile, ratios).map(|reason| NonQualifyingLoan {
                row: row.clone(),
                reason,
            })
        })
        .collect();

    info!(
        non_qualifying = report.len(),
        total = rate_sheet.len(),
        "explained non-qualifying loans"
    );
    report
}

fn first_failure(
    row: &RateSheetRow,
    profile: &ApplicantProfile,
    ratios: &DerivedRatios,
) -> Option<DisqualificationReason> {
    if !meets_credit_minimum(row, profile.credit_score) {
        return Some(DisqualificationReason::CreditScoreTooLow {
            credit_score: profile.credit_score,
            minimum: row.min_credit_score,
        });
    }

    if !within_loan_limit(row, profile.loan_amount) {
        return Some(DisqualificationReason::LoanAmountTooHigh {
            loan_amount: profile.loan_amount,
            maximum: row.max_loan_amount,
        });
    }

    if !within_debt_to_income(row, ratios.monthly_debt_ratio) {
        return Some(DisqualificationReason::DebtToIncomeTooHigh {
            ratio: ratios.monthly_debt_ratio,
            maximum: row.max_debt_to_income_ratio,
        });
    }

    if !within_loan_to_value(row, ratios.loan_to_value_ratio) {
        return Some(DisqualificationReason::LoanToValueTooHigh {
            ratio: ratios.loan_to_value_ratio,
            maximum: row.max_loan_to_value_ratio,
        });
    }

    None
}
