//! Loan qualification core: ratio calculators, single-criterion filters, the
//! qualification pipeline and the diagnostic pass that explains rejections.
//!
//! Nothing in this module performs I/O. Callers hand in typed rows and an
//! [`ApplicantProfile`] and get back owned vectors.

mod calculators;
pub mod domain;
mod diagnostics;
mod filters;
mod pipeline;

pub use calculators::{loan_to_value_ratio, monthly_debt_ratio};
pub use diagnostics::explain_non_qualifying;
pub use domain::{
    ApplicantProfile, DerivedRatios, DisqualificationReason, NonQualifyingLoan,
    QualificationError, RateSheetRow,
};
pub use filters::{
    filter_credit_score, filter_debt_to_income, filter_loan_to_value, filter_max_loan_size,
};
pub use pipeline::find_qualifying_loans;

pub(crate) use diagnostics::explain_with_ratios;
pub(crate) use pipeline::qualify_with_ratios;
