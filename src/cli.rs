use crate::config::AppConfig;
use crate::error::AppError;
use crate::prompt::{parse_numeric, Prompter};
use crate::session::{OutputFormat, ProfileAnswers, Session, SessionOptions};
use crate::telemetry;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "loan-qualifier",
    about = "Match a loan applicant against a bank rate sheet",
    version
)]
struct Cli {
    /// Raise log verbosity (repeat for more detail)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find qualifying loans, offer to save them and explain rejections (default command)
    Qualify(QualifyArgs),
    /// Print only the lenders the applicant does not qualify for, with reasons
    Explain(ExplainArgs),
}

#[derive(Args, Debug, Default)]
struct QualifyArgs {
    /// Rate sheet CSV to load instead of prompting
    #[arg(long)]
    rate_sheet: Option<PathBuf>,
    #[command(flatten)]
    profile: ProfileArgs,
    /// Where to save qualifying loans instead of prompting
    #[arg(long)]
    output: Option<PathBuf>,
    /// Answer yes to every confirmation
    #[arg(long, short = 'y')]
    yes: bool,
    /// Always list non-qualifying loans
    #[arg(long)]
    explain: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args, Debug, Default)]
struct ProfileArgs {
    /// Applicant credit score
    #[arg(long, value_parser = credit_score_arg)]
    credit_score: Option<u32>,
    /// Total monthly debt payments
    #[arg(long, value_parser = monthly_debt_arg)]
    monthly_debt: Option<f64>,
    /// Total monthly income
    #[arg(long, value_parser = monthly_income_arg)]
    monthly_income: Option<f64>,
    /// Desired loan amount
    #[arg(long, value_parser = loan_amount_arg)]
    loan_amount: Option<f64>,
    /// Estimated home value
    #[arg(long, value_parser = home_value_arg)]
    home_value: Option<f64>,
}

#[derive(Args, Debug)]
struct ExplainArgs {
    /// Rate sheet CSV to load
    #[arg(long)]
    rate_sheet: PathBuf,
    #[arg(long, value_parser = credit_score_arg)]
    credit_score: u32,
    #[arg(long, value_parser = monthly_debt_arg)]
    monthly_debt: f64,
    #[arg(long, value_parser = monthly_income_arg)]
    monthly_income: f64,
    #[arg(long, value_parser = loan_amount_arg)]
    loan_amount: f64,
    #[arg(long, value_parser = home_value_arg)]
    home_value: f64,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl From<ProfileArgs> for ProfileAnswers {
    fn from(args: ProfileArgs) -> Self {
        Self {
            credit_score: args.credit_score,
            monthly_debt: args.monthly_debt,
            monthly_income: args.monthly_income,
            loan_amount: args.loan_amount,
            home_value: args.home_value,
        }
    }
}

impl From<QualifyArgs> for SessionOptions {
    fn from(args: QualifyArgs) -> Self {
        Self {
            rate_sheet: args.rate_sheet,
            answers: args.profile.into(),
            output: args.output,
            assume_yes: args.yes,
            explain: args.explain,
            format: args.format,
        }
    }
}

impl From<ExplainArgs> for SessionOptions {
    fn from(args: ExplainArgs) -> Self {
        Self {
            rate_sheet: Some(args.rate_sheet),
            answers: ProfileAnswers {
                credit_score: Some(args.credit_score),
                monthly_debt: Some(args.monthly_debt),
                monthly_income: Some(args.monthly_income),
                loan_amount: Some(args.loan_amount),
                home_value: Some(args.home_value),
            },
            format: args.format,
            ..Self::default()
        }
    }
}

fn credit_score_arg(raw: &str) -> Result<u32, String> {
    parse_numeric("credit_score", raw).map_err(|err| err.to_string())
}

fn monthly_debt_arg(raw: &str) -> Result<f64, String> {
    decimal_arg("monthly_debt", raw)
}

fn monthly_income_arg(raw: &str) -> Result<f64, String> {
    decimal_arg("monthly_income", raw)
}

fn loan_amount_arg(raw: &str) -> Result<f64, String> {
    decimal_arg("loan_amount", raw)
}

fn home_value_arg(raw: &str) -> Result<f64, String> {
    decimal_arg("home_value", raw)
}

fn decimal_arg(field: &'static str, raw: &str) -> Result<f64, String> {
    parse_numeric(field, raw).map_err(|err| err.to_string())
}

pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, cli.verbose)?;
    debug!(?config.environment, "configuration loaded");

    let command = cli
        .command
        .unwrap_or_else(|| Command::Qualify(QualifyArgs::default()));

    match command {
        Command::Qualify(args) => {
            let mut session = Session::new(Prompter::stdio(), args.into(), config.files);
            session.run()?;
        }
        Command::Explain(args) => {
            let mut session = Session::new(Prompter::stdio(), args.into(), config.files);
            session.explain()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualify_is_the_default_command() {
        let cli = Cli::try_parse_from(["loan-qualifier", "-vv"]).expect("parses");
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn qualify_flags_become_session_options() {
        let cli = Cli::try_parse_from([
            "loan-qualifier",
            "qualify",
            "--rate-sheet",
            "data/daily_rate_sheet.csv",
            "--credit-score",
            "750",
            "--home-value",
            "210000",
            "--yes",
            "--format",
            "json",
        ])
        .expect("parses");

        let Some(Command::Qualify(args)) = cli.command else {
            panic!("expected qualify command");
        };
        let options = SessionOptions::from(args);
        assert_eq!(
            options.rate_sheet,
            Some(PathBuf::from("data/daily_rate_sheet.csv"))
        );
        assert_eq!(options.answers.credit_score, Some(750));
        assert_eq!(options.answers.home_value, Some(210_000.0));
        assert!(options.answers.monthly_debt.is_none());
        assert!(options.assume_yes);
        assert_eq!(options.format, OutputFormat::Json);
    }

    #[test]
    fn malformed_flag_is_rejected() {
        let error = Cli::try_parse_from([
            "loan-qualifier",
            "qualify",
            "--loan-amount",
            "lots",
        ])
        .expect_err("malformed amount");
        assert!(error
            .to_string()
            .contains("loan_amount must be a number, found 'lots'"));
    }

    #[test]
    fn explain_requires_full_profile() {
        assert!(Cli::try_parse_from([
            "loan-qualifier",
            "explain",
            "--rate-sheet",
            "sheet.csv",
            "--credit-score",
            "700",
        ])
        .is_err());
    }
}
