use axum::{
    Json,
    extract::Query,
    response::{IntoResponse, Response},
};
use evsim_core::{
    ChargingLevelInfo, Scenario, ScenarioInputs, SessionInputs, SessionResult, VehicleParameters,
    classify_scenario, compute_session, visible_levels,
};
use serde::{Deserialize, Serialize};

use crate::calculation_error_to_response;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    /// Defaults to the stock vehicle when absent
    #[serde(default)]
    pub vehicle: VehicleParameters,
    pub inputs: SessionInputs,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    pub result: SessionResult,
    pub scenario: Scenario,
    pub narrative: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingLevelsQuery {
    pub max_speed_kw: Option<f64>,
}

/// Compute a session without touching the shared simulator
pub async fn calculate(Json(payload): Json<CalculateRequest>) -> Response {
    let inputs = payload.inputs;
    match compute_session(&payload.vehicle, &inputs) {
        Ok(result) => {
            let scenario = classify_scenario(&ScenarioInputs {
                charging_speed_kw: inputs.charging_speed_kw,
                time_spent_hours: inputs.time_spent_hours,
                starting_soc_percent: inputs.starting_soc_percent,
            });
            Json(CalculateResponse {
                result,
                scenario,
                narrative: scenario.narrative(),
            })
            .into_response()
        }
        Err(error) => calculation_error_to_response(error),
    }
}

/// List the charging levels offered up to a maximum speed
pub async fn charging_levels(
    Query(query): Query<ChargingLevelsQuery>,
) -> Json<Vec<ChargingLevelInfo>> {
    Json(visible_levels(query.max_speed_kw.unwrap_or(500.0)))
}
