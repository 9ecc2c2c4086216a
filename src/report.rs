use crate::qualifier::{
    explain_with_ratios, qualify_with_ratios, ApplicantProfile, DerivedRatios,
    DisqualificationReason, NonQualifyingLoan, QualificationError, RateSheetRow,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Console/JSON view of a single rejected lender.
#[derive(Debug, Clone, Serialize)]
pub struct NonQualifyingView {
    pub lender_name: String,
    pub reason_code: &'static str,
    pub reason: DisqualificationReason,
    pub message: String,
}

impl From<&NonQualifyingLoan> for NonQualifyingView {
    fn from(entry: &NonQualifyingLoan) -> Self {
        Self {
            lender_name: entry.row.lender_name.clone(),
            reason_code: entry.reason.code(),
            reason: entry.reason,
            message: entry.summary(),
        }
    }
}

/// Outcome of running both the qualification pipeline and the diagnostic pass.
#[derive(Debug, Clone, Serialize)]
pub struct QualificationReport {
    pub evaluated_at: DateTime<Utc>,
    pub profile: ApplicantProfile,
    pub ratios: DerivedRatios,
    pub total_lenders: usize,
    pub qualifying: Vec<RateSheetRow>,
    pub non_qualifying: Vec<NonQualifyingView>,
}

impl QualificationReport {
    pub fn build(
        rate_sheet: &[RateSheetRow],
        profile: &ApplicantProfile,
    ) -> Result<Self, QualificationError> {
        let ratios = DerivedRatios::from_profile(profile)?;
        let qualifying = qualify_with_ratios(rate_sheet, profile, &ratios);
        let non_qualifying = explain_with_ratios(rate_sheet, profile, &ratios)
            .iter()
            .map(NonQualifyingView::from)
            .collect();

        Ok(Self {
            evaluated_at: Utc::now(),
            profile: *profile,
            ratios,
            total_lenders: rate_sheet.len(),
            qualifying,
            non_qualifying,
        })
    }

    pub fn ratio_lines(&self) -> Vec<String> {
        vec![
            format!(
                "The monthly debt to income ratio is {:.2}",
                self.ratios.monthly_debt_ratio
            ),
            format!(
                "The loan to value ratio is {:.2}.",
                self.ratios.loan_to_value_ratio
            ),
            format!("Found {} qualifying loans", self.qualifying.len()),
        ]
    }

    pub fn non_qualifying_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!(
                "There are {} non-qualifying loans:",
                self.non_qualifying.len()
            ),
            String::new(),
        ];
        lines.extend(self.non_qualifying.iter().map(|view| view.message.clone()));
        lines
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
