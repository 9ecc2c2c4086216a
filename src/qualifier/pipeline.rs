use super::domain::{ApplicantProfile, DerivedRatios, QualificationError, RateSheetRow};
use super::filters::{
    filter_credit_score, filter_debt_to_income, filter_loan_to_value, filter_max_loan_size,
};
use tracing::{debug, info};

/// Determine which lenders would underwrite the applicant's loan.
///
/// Filters run in a fixed order: loan size, credit score, debt-to-income,
/// loan-to-value. The surviving count after each stage is logged at debug
/// level, so the order is observable even though the final set is not
/// affected by it.
pub fn find_qualifying_loans(
    rate_sheet: &[RateSheetRow],
    profile: &ApplicantProfile,
) -> Result<Vec<RateSheetRow>, QualificationError> {
    let ratios = DerivedRatios::from_profile(profile)?;
    Ok(qualify_with_ratios(rate_sheet, profile, &ratios))
}

pub(crate) fn qualify_with_ratios(
    rate_sheet: &[RateSheetRow],
    profile: &ApplicantProfile,
    ratios: &DerivedRatios,
) -> Vec<RateSheetRow> {
    info!(
        monthly_debt_ratio = %format!("{:.2}", ratios.monthly_debt_ratio),
        loan_to_value_ratio = %format!("{:.2}", ratios.loan_to_value_ratio),
        "derived applicant ratios"
    );

    let candidates = filter_max_loan_size(profile.loan_amount, rate_sheet);
    debug!(stage = "max_loan_size", remaining = candidates.len(), "applied filter");

    let candidates = filter_credit_score(profile.credit_score, &candidates);
    debug!(stage = "credit_score", remaining = candidates.len(), "applied filter");

    let candidates = filter_debt_to_income(ratios.monthly_debt_ratio, &candidates);
    debug!(stage = "debt_to_income", remaining = candidates.len(), "applied filter");

    let candidates = filter_loan_to_value(ratios.loan_to_value_ratio, &candidates);
    debug!(stage = "loan_to_value", remaining = candidates.len(), "applied filter");

    info!(
        qualifying = candidates.len(),
        total = rate_sheet.len(),
        "found qualifying loans"
    );
    candidates
}
