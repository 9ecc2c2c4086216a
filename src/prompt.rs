//! Line-oriented console prompts.
//!
//! The prompter is generic over its input and output so sessions can be driven
//! from stdin/stdout in the binary and from in-memory buffers in tests.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing::warn;

const MAX_NUMERIC_ATTEMPTS: usize = 3;

/// Errors raised while collecting answers.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("no input received for '{question}'")]
    Closed { question: String },
    #[error("{field} must be a number, found '{value}'")]
    MalformedNumericInput { field: &'static str, value: String },
    #[error("console error: {0}")]
    Io(#[from] io::Error),
}

/// Coerce raw text into a numeric answer.
///
/// Used for both prompted answers and command-line flags so that the two paths
/// accept exactly the same input. Non-finite decimals are rejected.
pub fn parse_numeric<T>(field: &'static str, raw: &str) -> Result<T, InputError>
where
    T: FromStr + Numeric,
{
    let trimmed = raw.trim();
    match trimmed.parse::<T>() {
        Ok(value) if value.is_finite_value() => Ok(value),
        _ => Err(InputError::MalformedNumericInput {
            field,
            value: trimmed.to_string(),
        }),
    }
}

/// Numeric answer types accepted by [`parse_numeric`].
pub trait Numeric: Copy {
    fn is_finite_value(&self) -> bool;
}

impl Numeric for f64 {
    fn is_finite_value(&self) -> bool {
        self.is_finite()
    }
}

impl Numeric for u32 {
    fn is_finite_value(&self) -> bool {
        true
    }
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask a free-text question and return the trimmed answer.
    pub fn text(&mut self, question: &str) -> Result<String, InputError> {
        write!(self.output, "{question} ")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            writeln!(self.output)?;
            return Err(InputError::Closed {
                question: question.to_string(),
            });
        }

        Ok(answer.trim().to_string())
    }

    /// Ask for a number, re-asking a few times on malformed answers.
    pub fn number<T>(&mut self, question: &str, field: &'static str) -> Result<T, InputError>
    where
        T: FromStr + Numeric,
    {
        let mut attempt = 1;
        loop {
            let answer = self.text(question)?;
            match parse_numeric(field, &answer) {
                Ok(value) => return Ok(value),
                Err(err) if attempt < MAX_NUMERIC_ATTEMPTS => {
                    warn!(field, attempt, "malformed numeric answer");
                    writeln!(self.output, "{err}. Please try again.")?;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Ask a yes/no question until the answer is one of yes, y, no or n.
    pub fn confirm(&mut self, question: &str) -> Result<bool, InputError> {
        loop {
            let answer = self.text(&format!("{question} [yes/no]"))?;
            match answer.to_ascii_lowercase().as_str() {
                "yes" | "y" => return Ok(true),
                "no" | "n" => return Ok(false),
                _ => writeln!(self.output, "Please answer yes or no.")?,
            }
        }
    }

    /// Print an informational line.
    pub fn say(&mut self, line: impl Display) -> Result<(), InputError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn parse_numeric_trims_and_coerces() {
        assert_eq!(parse_numeric::<u32>("credit_score", " 712 ").expect("parses"), 712);
        assert_eq!(parse_numeric::<f64>("home_value", "210000.5").expect("parses"), 210_000.5);
    }

    #[test]
    fn parse_numeric_rejects_non_finite_and_garbage() {
        for raw in ["NaN", "inf", "abc", ""] {
            assert!(
                matches!(
                    parse_numeric::<f64>("loan_amount", raw),
                    Err(InputError::MalformedNumericInput { .. })
                ),
                "{raw} should be rejected"
            );
        }
        assert!(parse_numeric::<u32>("credit_score", "-1").is_err());
        assert!(parse_numeric::<u32>("credit_score", "712.5").is_err());
    }

    #[test]
    fn number_reasks_after_malformed_answer() {
        let mut console = prompter("seven hundred\n700\n");

        let score: u32 = console
            .number("What's your credit score?", "credit_score")
            .expect("second answer parses");

        assert_eq!(score, 700);
        let output = String::from_utf8(console.into_output()).expect("utf8");
        assert!(output.contains("credit_score must be a number, found 'seven hundred'"));
    }

    #[test]
    fn number_gives_up_after_repeated_garbage() {
        let mut console = prompter("a\nb\nc\n700\n");

        let error = console
            .number::<u32>("What's your credit score?", "credit_score")
            .expect_err("three strikes");

        match error {
            InputError::MalformedNumericInput { field, value } => {
                assert_eq!(field, "credit_score");
                assert_eq!(value, "c");
            }
            other => panic!("expected malformed input, got {other:?}"),
        }
    }

    #[test]
    fn confirm_accepts_short_forms_and_reasks() {
        let mut first = prompter("maybe\nY\n");
        assert!(first.confirm("Save?").expect("answered"));

        let mut second = prompter("no\n");
        assert!(!second.confirm("Save?").expect("answered"));
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut closed = prompter("");
        assert!(matches!(
            closed.text("Enter a file path to a rate-sheet (.csv):"),
            Err(InputError::Closed { .. })
        ));
    }
}
