//! EV charging session calculations.
//!
//! Every entry point is a pure function of its arguments: the same vehicle and
//! inputs always produce the same result, and nothing is cached between calls.

mod levels;
mod models;
mod scenario;
mod session;
mod units;

pub use crate::levels::{ChargingLevel, ChargingLevelInfo, visible_levels};
pub use crate::models::*;
pub use crate::scenario::{
    RULES, Scenario, ScenarioInputs, ScenarioRule, classify_scenario, describe_scenario,
};
pub use crate::session::compute_session;
pub use crate::units::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    #[error("Vehicle parameter {field} is invalid: {value}")]
    InvalidVehicle { field: &'static str, value: f64 },
    #[error("Session input {field} is out of range: {value}")]
    InputOutOfRange { field: &'static str, value: f64 },
}
