pub mod cli;
pub mod config;
pub mod error;
pub mod prompt;
pub mod qualifier;
pub mod rate_sheet;
pub mod report;
pub mod session;
pub mod telemetry;

pub use cli::run;
