//! EV Charging Simulator API Library
//!
//! This library provides the HTTP API over the charging session simulator.

mod calculate;
mod simulator;
mod vehicle;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use evsim_core::CalculationError;
use evsim_engine::{Simulator, SimulatorError};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tower_http::trace::TraceLayer;

pub type SharedSimulator = Arc<Mutex<Simulator>>;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
}

/// Every error the simulator can raise comes from a rejected value
pub(crate) fn simulator_error_to_response(error: SimulatorError) -> Response {
    tracing::warn!("Rejecting request: {}", error);
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

pub(crate) fn calculation_error_to_response(error: CalculationError) -> Response {
    simulator_error_to_response(SimulatorError::Calculation(error))
}

/// Handlers never leave the simulator half-updated, so a poisoned lock is still usable
pub(crate) fn lock(state: &SharedSimulator) -> MutexGuard<'_, Simulator> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Create the application router with all endpoints
pub fn create_app(simulator: Simulator) -> Router {
    let shared_state = Arc::new(Mutex::new(simulator));
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/vehicle",
            get(vehicle::get_vehicle).post(vehicle::save_vehicle),
        )
        .route("/vehicle/reset", post(vehicle::reset_vehicle))
        .route("/simulator", get(simulator::get_report))
        .route("/simulator/inputs", post(simulator::update_inputs))
        .route("/simulator/ranges/{input}", post(simulator::update_range))
        .route("/calculate", post(calculate::calculate))
        .route("/charging-levels", get(calculate::charging_levels))
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use tower::util::ServiceExt;

    pub fn create_test_app() -> Router {
        Router::new().route("/health", get(health_check))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_integration_save_vehicle_and_update_inputs() {
        let app = create_app(Simulator::default());

        // Save a smaller vehicle
        let vehicle = serde_json::json!({
            "name": "City Car",
            "batteryCapacityKwh": 40,
            "rangeAtFullMiles": 150,
            "maxChargingSpeedKw": 50,
            "time10To80Minutes": 35
        });

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/vehicle")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(vehicle.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        // Then move the sliders, the report uses the saved vehicle
        let update = serde_json::json!({
            "startingSoc": 50,
            "chargingSpeedKw": 7,
            "timeSpentHours": 1
        });

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/simulator/inputs")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(update.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let report: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(report["result"]["startingKwh"], 20.0);
        assert_eq!(report["result"]["efficiency"], 0.9);
        assert_eq!(report["chargingLevel"], "L2");
        assert_eq!(report["summary"]["energyDelivered"], "6.30 kWh");
    }
}
