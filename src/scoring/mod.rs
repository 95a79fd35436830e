pub mod bust;
pub mod config;
pub mod engine;
pub mod factors;
pub mod grade;
pub mod steal;
pub mod validation;

pub use bust::BustCalculator;
pub use config::*;
pub use engine::{build_calculator, score_roster, Calculator, CalculatorKind, CalculatorResult, Verdict};
pub use grade::GradeCalculator;
pub use steal::StealCalculator;
pub use validation::validate_config;
