use std::env;
use std::fmt;
use std::path::PathBuf;

const ENV_KEY: &str = "LOAN_QUALIFIER_ENV";
const LOG_LEVEL_KEY: &str = "LOAN_QUALIFIER_LOG_LEVEL";
const RATE_SHEET_KEY: &str = "LOAN_QUALIFIER_RATE_SHEET";
const OUTPUT_KEY: &str = "LOAN_QUALIFIER_OUTPUT";

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub files: FileDefaults,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = optional_var(ENV_KEY)?
            .map(|value| AppEnvironment::from_str(&value))
            .unwrap_or(AppEnvironment::Development);
        let log_level = optional_var(LOG_LEVEL_KEY)?.unwrap_or_else(|| "warn".to_string());

        Ok(Self {
            environment,
            files: FileDefaults {
                rate_sheet: optional_var(RATE_SHEET_KEY)?.map(PathBuf::from),
                output: optional_var(OUTPUT_KEY)?.map(PathBuf::from),
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Default file locations used when the command line leaves them out.
#[derive(Debug, Clone, Default)]
pub struct FileDefaults {
    pub rate_sheet: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    Blank { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Blank { key } => write!(f, "{key} is set but empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

fn optional_var(key: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::Blank { key }),
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var(ENV_KEY);
        env::remove_var(LOG_LEVEL_KEY);
        env::remove_var(RATE_SHEET_KEY);
        env::remove_var(OUTPUT_KEY);
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "warn");
        assert!(config.files.rate_sheet.is_none());
        assert!(config.files.output.is_none());
    }

    #[test]
    fn reads_file_defaults() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var(ENV_KEY, "CI");
        env::set_var(RATE_SHEET_KEY, " data/daily_rate_sheet.csv ");
        env::set_var(OUTPUT_KEY, "qualifying_loans.csv");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(
            config.files.rate_sheet,
            Some(PathBuf::from("data/daily_rate_sheet.csv"))
        );
        assert_eq!(
            config.files.output,
            Some(PathBuf::from("qualifying_loans.csv"))
        );
        reset_env();
    }

    #[test]
    fn blank_values_are_rejected() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var(RATE_SHEET_KEY, "   ");
        let error = AppConfig::load().expect_err("blank path rejected");
        assert_eq!(
            error.to_string(),
            "LOAN_QUALIFIER_RATE_SHEET is set but empty"
        );
        reset_env();

        env::set_var(ENV_KEY, "");
        let error = AppConfig::load().expect_err("blank environment rejected");
        assert_eq!(error.to_string(), "LOAN_QUALIFIER_ENV is set but empty");
        reset_env();
    }
}
