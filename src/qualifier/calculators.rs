use super::domain::{ApplicantProfile, DerivedRatios, QualificationError};

/// Monthly debt payments divided by monthly income.
pub fn monthly_debt_ratio(
    monthly_debt: f64,
    monthly_income: f64,
) -> Result<f64, QualificationError> {
    divide(monthly_debt, "monthly_debt", monthly_income, "monthly_income")
}

/// Requested loan amount divided by home value.
pub fn loan_to_value_ratio(
    loan_amount: f64,
    home_value: f64,
) -> Result<f64, QualificationError> {
    divide(loan_amount, "loan_amount", home_value, "home_value")
}

impl DerivedRatios {
    pub fn from_profile(profile: &ApplicantProfile) -> Result<Self, QualificationError> {
        Ok(Self {
            monthly_debt_ratio: monthly_debt_ratio(profile.monthly_debt, profile.monthly_income)?,
            loan_to_value_ratio: loan_to_value_ratio(profile.loan_amount, profile.home_value)?,
        })
    }
}

fn divide(
    value: f64,
    numerator: &'static str,
    denominator: f64,
    field: &'static str,
) -> Result<f64, QualificationError> {
    if denominator == 0.0 {
        return Err(QualificationError::DivisionByZero {
            field,
            numerator,
            value,
        });
    }

    let ratio = value / denominator;
    if denominator < 0.0 || !ratio.is_finite() {
        return Err(QualificationError::UndefinedRatio {
            field,
            numerator,
            value,
            denominator,
        });
    }

    Ok(ratio)
}
