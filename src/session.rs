//! Interactive qualification session: the console shell around the core.

use crate::config::FileDefaults;
use crate::error::AppError;
use crate::prompt::Prompter;
use crate::qualifier::ApplicantProfile;
use crate::rate_sheet::{write_qualifying_loans, RateSheet};
use crate::report::QualificationReport;
use clap::ValueEnum;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Applicant answers supplied up front; anything left `None` is prompted for.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileAnswers {
    pub credit_score: Option<u32>,
    pub monthly_debt: Option<f64>,
    pub monthly_income: Option<f64>,
    pub loan_amount: Option<f64>,
    pub home_value: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub rate_sheet: Option<PathBuf>,
    pub answers: ProfileAnswers,
    pub output: Option<PathBuf>,
    pub assume_yes: bool,
    pub explain: bool,
    pub format: OutputFormat,
}

/// What a completed session did.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub qualifying: usize,
    pub non_qualifying: usize,
    pub saved_to: Option<PathBuf>,
    pub explained: bool,
}

pub struct Session<R, W> {
    prompter: Prompter<R, W>,
    options: SessionOptions,
    defaults: FileDefaults,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(prompter: Prompter<R, W>, options: SessionOptions, defaults: FileDefaults) -> Self {
        Self {
            prompter,
            options,
            defaults,
        }
    }

    /// Load, qualify, optionally save, optionally explain.
    pub fn run(&mut self) -> Result<SessionOutcome, AppError> {
        let rate_sheet = self.load_rate_sheet()?;
        let profile = self.applicant_profile()?;
        let report = QualificationReport::build(rate_sheet.rows(), &profile)?;

        let mut outcome = SessionOutcome {
            qualifying: report.qualifying.len(),
            non_qualifying: report.non_qualifying.len(),
            saved_to: None,
            explained: false,
        };

        if self.options.format == OutputFormat::Json {
            if !report.qualifying.is_empty() {
                if let Some(path) = self.configured_output() {
                    write_qualifying_loans(&path, &report.qualifying)?;
                    outcome.saved_to = Some(path);
                }
            }
            self.prompter.say(report.to_json()?)?;
            outcome.explained = true;
            return Ok(outcome);
        }

        for line in report.ratio_lines() {
            self.prompter.say(line)?;
        }

        if report.qualifying.is_empty() {
            self.prompter
                .say("There are 0 qualifying loans, and no CSV file to save.")?;
        } else {
            outcome.saved_to = self.offer_save(&report)?;
        }

        if self.wants_explanation(&report)? {
            for line in report.non_qualifying_lines() {
                self.prompter.say(line)?;
            }
            outcome.explained = true;
        }

        info!(
            qualifying = outcome.qualifying,
            saved = outcome.saved_to.is_some(),
            "session finished"
        );
        Ok(outcome)
    }

    /// Print only the non-qualifying report.
    pub fn explain(&mut self) -> Result<SessionOutcome, AppError> {
        let rate_sheet = self.load_rate_sheet()?;
        let profile = self.applicant_profile()?;
        let report = QualificationReport::build(rate_sheet.rows(), &profile)?;

        match self.options.format {
            OutputFormat::Json => self.prompter.say(report.to_json()?)?,
            OutputFormat::Text => {
                for line in report.non_qualifying_lines() {
                    self.prompter.say(line)?;
                }
            }
        }

        Ok(SessionOutcome {
            qualifying: report.qualifying.len(),
            non_qualifying: report.non_qualifying.len(),
            saved_to: None,
            explained: true,
        })
    }

    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }

    fn load_rate_sheet(&mut self) -> Result<RateSheet, AppError> {
        let path = match self
            .options
            .rate_sheet
            .clone()
            .or_else(|| self.defaults.rate_sheet.clone())
        {
            Some(path) => path,
            None => PathBuf::from(
                self.prompter
                    .text("Enter a file path to a rate-sheet (.csv):")?,
            ),
        };

        Ok(RateSheet::from_path(path)?)
    }

    fn applicant_profile(&mut self) -> Result<ApplicantProfile, AppError> {
        let answers = self.options.answers;
        let prompter = &mut self.prompter;

        let credit_score = match answers.credit_score {
            Some(value) => value,
            None => prompter.number("What's your credit score?", "credit_score")?,
        };
        let monthly_debt = match answers.monthly_debt {
            Some(value) => value,
            None => prompter.number(
                "What's your current amount of monthly debt?",
                "monthly_debt",
            )?,
        };
        let monthly_income = match answers.monthly_income {
            Some(value) => value,
            None => prompter.number("What's your total monthly income?", "monthly_income")?,
        };
        let loan_amount = match answers.loan_amount {
            Some(value) => value,
            None => prompter.number("What's your desired loan amount?", "loan_amount")?,
        };
        let home_value = match answers.home_value {
            Some(value) => value,
            None => prompter.number("What's your home value?", "home_value")?,
        };

        Ok(ApplicantProfile {
            credit_score,
            monthly_debt,
            monthly_income,
            loan_amount,
            home_value,
        })
    }

    fn configured_output(&self) -> Option<PathBuf> {
        self.options
            .output
            .clone()
            .or_else(|| self.defaults.output.clone())
    }

    fn offer_save(&mut self, report: &QualificationReport) -> Result<Option<PathBuf>, AppError> {
        let count = report.qualifying.len();
        let save = self.options.assume_yes
            || self.prompter.confirm(&format!(
                "There are {count} qualifying loans. Would you like to save the list of qualifying loans to a CSV?"
            ))?;
        if !save {
            self.prompter
                .say("You have chosen not to save the list of qualifying loans to a CSV.")?;
            return Ok(None);
        }

        let path = match self.configured_output() {
            Some(path) => path,
            None => PathBuf::from(self.prompter.text(
                "Please enter the full path to which a CSV of the qualifying loans will be saved:",
            )?),
        };

        let confirmed = self.options.assume_yes
            || self.prompter.confirm(&format!(
                "You have chosen to save the CSV file to {}. Is this correct?",
                path.display()
            ))?;
        if !confirmed {
            self.prompter.say("Not saving the CSV file.")?;
            return Ok(None);
        }

        write_qualifying_loans(&path, &report.qualifying)?;
        self.prompter.say(format!(
            "Your CSV file containing the qualifying rows has been successfully saved to {}!",
            path.display()
        ))?;
        Ok(Some(path))
    }

    fn wants_explanation(&mut self, report: &QualificationReport) -> Result<bool, AppError> {
        if self.options.explain {
            return Ok(true);
        }
        if self.options.assume_yes || report.qualifying.is_empty() {
            return Ok(false);
        }

        Ok(self
            .prompter
            .confirm("Do you want to list the loans you did not qualify for?")?)
    }
}
