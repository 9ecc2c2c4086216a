use serde::Serialize;

/// One lender's offer as listed on a rate sheet.
///
/// Field order matches the column order of the rate-sheet file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateSheetRow {
    pub lender_name: String,
    pub max_loan_amount: u64,
    pub max_loan_to_value_ratio: f64,
    pub max_debt_to_income_ratio: f64,
    pub min_credit_score: u32,
}

impl RateSheetRow {
    pub fn new(
        lender_name: impl Into<String>,
        max_loan_amount: u64,
        max_loan_to_value_ratio: f64,
        max_debt_to_income_ratio: f64,
        min_credit_score: u32,
    ) -> Self {
        Self {
            lender_name: lender_name.into(),
            max_loan_amount,
            max_loan_to_value_ratio,
            max_debt_to_income_ratio,
            min_credit_score,
        }
    }
}

/// Financial profile collected from the applicant for a single run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ApplicantProfile {
    pub credit_score: u32,
    pub monthly_debt: f64,
    pub monthly_income: f64,
    pub loan_amount: f64,
    pub home_value: f64,
}

/// Ratios derived from an [`ApplicantProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedRatios {
    pub monthly_debt_ratio: f64,
    pub loan_to_value_ratio: f64,
}

/// First criterion a lender's limits rejected the applicant on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum DisqualificationReason {
    CreditScoreTooLow { credit_score: u32, minimum: u32 },
    LoanAmountTooHigh { loan_amount: f64, maximum: u64 },
    DebtToIncomeTooHigh { ratio: f64, maximum: f64 },
    LoanToValueTooHigh { ratio: f64, maximum: f64 },
}

impl DisqualificationReason {
    pub fn code(&self) -> &'static str {
        match self {
            DisqualificationReason::CreditScoreTooLow { .. } => "credit_score_too_low",
            DisqualificationReason::LoanAmountTooHigh { .. } => "loan_amount_too_high",
            DisqualificationReason::DebtToIncomeTooHigh { .. } => "debt_to_income_too_high",
            DisqualificationReason::LoanToValueTooHigh { .. } => "loan_to_value_too_high",
        }
    }

    pub fn describe(&self, lender_name: &str) -> String {
        match self {
            DisqualificationReason::CreditScoreTooLow {
                credit_score,
                minimum,
            } => format!(
                "The credit score of {credit_score} was below the minimum allowed ({minimum}) for {lender_name}."
            ),
            DisqualificationReason::LoanAmountTooHigh {
                loan_amount,
                maximum,
            } => format!(
                "The loan amount of {loan_amount} was above the maximum allowed ({maximum}) for {lender_name}."
            ),
            DisqualificationReason::DebtToIncomeTooHigh { ratio, maximum } => format!(
                "The debt-to-income ratio of {ratio:.2} was above the maximum allowed ({maximum}) for {lender_name}."
            ),
            DisqualificationReason::LoanToValueTooHigh { ratio, maximum } => format!(
                "The loan-to-value ratio of {ratio:.2} was above the maximum allowed ({maximum}) for {lender_name}."
            ),
        }
    }
}

/// A rate-sheet row paired with the reason the applicant failed it.
#[derive(Debug, Clone, PartialEq)]
pub struct NonQualifyingLoan {
    pub row: RateSheetRow,
    pub reason: DisqualificationReason,
}

impl NonQualifyingLoan {
    pub fn summary(&self) -> String {
        self.reason.describe(&self.row.lender_name)
    }
}

/// Errors raised while qualifying an applicant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QualificationError {
    #[error("{field} must not be zero (dividing {numerator} of {value})")]
    DivisionByZero {
        field: &'static str,
        numerator: &'static str,
        value: f64,
    },
    #[error("{numerator} / {field} is undefined for {value} / {denominator}")]
    UndefinedRatio {
        field: &'static str,
        numerator: &'static str,
        value: f64,
        denominator: f64,
    },
}
