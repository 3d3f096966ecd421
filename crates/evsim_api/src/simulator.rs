use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use evsim_core::{DistanceUnit, SocUnit};
use evsim_engine::{RangedInput, Simulator, SimulatorError};
use serde::{Deserialize, Serialize};

use crate::{SharedSimulator, lock, simulator_error_to_response};

/// Partial update of the session inputs, absent fields are left untouched.
///
/// `startingSoc` is read in `startingSocUnit` when given, otherwise in the
/// unit the simulator currently shows it in.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInputsRequest {
    pub starting_soc: Option<f64>,
    pub starting_soc_unit: Option<SocUnit>,
    pub charging_speed_kw: Option<f64>,
    pub time_spent_hours: Option<f64>,
    pub price_per_kwh: Option<f64>,
    pub idle_fee_per_minute: Option<f64>,
    pub distance_unit: Option<DistanceUnit>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeRequest {
    pub min: f64,
    pub max: f64,
}

fn report_response(simulator: &Simulator) -> Response {
    match simulator.report() {
        Ok(report) => Json(report).into_response(),
        Err(error) => simulator_error_to_response(error),
    }
}

fn apply_inputs(
    simulator: &mut Simulator,
    payload: &UpdateInputsRequest,
) -> Result<(), SimulatorError> {
    if let Some(unit) = payload.starting_soc_unit {
        simulator.set_soc_unit(unit);
    }
    if let Some(value) = payload.starting_soc {
        simulator.set_starting_soc(value, simulator.soc_unit())?;
    }
    let ranged = [
        (RangedInput::ChargingSpeedKw, payload.charging_speed_kw),
        (RangedInput::TimeSpentHours, payload.time_spent_hours),
        (RangedInput::PricePerKwh, payload.price_per_kwh),
        (RangedInput::IdleFeePerMinute, payload.idle_fee_per_minute),
    ];
    for (input, value) in ranged {
        if let Some(value) = value {
            simulator.set_input(input, value)?;
        }
    }
    if let Some(unit) = payload.distance_unit {
        simulator.set_distance_unit(unit);
    }
    Ok(())
}

/// Get the report for the current inputs
pub async fn get_report(State(app_state): State<SharedSimulator>) -> Response {
    let simulator = lock(&app_state);
    report_response(&simulator)
}

/// Update some of the session inputs and return the new report.
///
/// Values outside their slider range are clamped, the update is all or nothing.
pub async fn update_inputs(
    State(app_state): State<SharedSimulator>,
    Json(payload): Json<UpdateInputsRequest>,
) -> Response {
    let mut simulator = lock(&app_state);
    let mut updated = simulator.clone();
    match apply_inputs(&mut updated, &payload) {
        Ok(()) => {
            *simulator = updated;
            report_response(&simulator)
        }
        Err(error) => simulator_error_to_response(error),
    }
}

/// Change the bounds of a slider
pub async fn update_range(
    State(app_state): State<SharedSimulator>,
    Path(input): Path<RangedInput>,
    Json(payload): Json<RangeRequest>,
) -> Response {
    let mut simulator = lock(&app_state);
    match simulator.set_range(input, payload.min, payload.max) {
        Ok(()) => report_response(&simulator),
        Err(error) => simulator_error_to_response(error),
    }
}
