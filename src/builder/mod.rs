//! Builder API and configuration for calculator sessions.

pub mod config;
pub mod error;
pub mod machine;

pub use config::CalculatorConfig;
pub use error::BuildError;
pub use machine::CalculatorBuilder;
