use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use evsim_core::VehicleParameters;

use crate::{SharedSimulator, lock, simulator_error_to_response};

/// Get the current vehicle parameters
pub async fn get_vehicle(State(app_state): State<SharedSimulator>) -> Json<VehicleParameters> {
    tracing::info!("Getting vehicle parameters");
    let simulator = lock(&app_state);
    Json(simulator.vehicle().clone())
}

/// Replace the vehicle parameters
pub async fn save_vehicle(
    State(app_state): State<SharedSimulator>,
    Json(payload): Json<VehicleParameters>,
) -> Response {
    let mut simulator = lock(&app_state);
    match simulator.save_vehicle(payload) {
        Ok(()) => Json(simulator.vehicle().clone()).into_response(),
        Err(error) => simulator_error_to_response(error),
    }
}

/// Restore the default vehicle
pub async fn reset_vehicle(State(app_state): State<SharedSimulator>) -> Json<VehicleParameters> {
    let mut simulator = lock(&app_state);
    simulator.reset_vehicle();
    Json(simulator.vehicle().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    pub use axum::{
        Router,
        routing::{get, post},
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use evsim_engine::Simulator;
    use std::sync::{Arc, Mutex};
    use tower::util::ServiceExt;

    use crate::ErrorResponse;

    /// Create the application router with vehicle endpoints
    pub fn create_app(simulator: Simulator) -> Router {
        let shared_state = Arc::new(Mutex::new(simulator));
        Router::new()
            .route("/vehicle", get(get_vehicle).post(save_vehicle))
            .route("/vehicle/reset", post(reset_vehicle))
            .with_state(shared_state)
    }

    fn test_vehicle() -> VehicleParameters {
        VehicleParameters {
            name: "Test Truck".into(),
            battery_capacity_kwh: 131.0,
            range_at_full_miles: 320.0,
            max_charging_speed_kw: 155.0,
            time_10_to_80_minutes: 41.0,
        }
    }

    #[tokio::test]
    async fn test_get_vehicle_endpoint() {
        let app = create_app(Simulator::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/vehicle")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let vehicle: VehicleParameters = serde_json::from_slice(&body).unwrap();
        assert_eq!(vehicle, VehicleParameters::default());
    }

    #[tokio::test]
    async fn test_save_vehicle_endpoint() {
        let mut simulator = Simulator::default();
        simulator.save_vehicle(test_vehicle()).unwrap();
        let app = create_app(simulator);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/vehicle")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let vehicle: VehicleParameters = serde_json::from_slice(&body).unwrap();
        assert_eq!(vehicle, test_vehicle());
    }

    #[tokio::test]
    async fn test_save_invalid_vehicle() {
        let app = create_app(Simulator::default());
        let vehicle = VehicleParameters {
            battery_capacity_kwh: 0.0,
            ..test_vehicle()
        };

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/vehicle")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&vehicle).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error_response: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(error_response.error.contains("batteryCapacityKwh"));

        // The previous vehicle is still in place
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/vehicle")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let current: VehicleParameters = serde_json::from_slice(&body).unwrap();
        assert_eq!(current, VehicleParameters::default());
    }

    #[tokio::test]
    async fn test_reset_vehicle_endpoint() {
        let mut simulator = Simulator::default();
        simulator.save_vehicle(test_vehicle()).unwrap();
        let app = create_app(simulator);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/vehicle/reset")
                    .method("POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let vehicle: VehicleParameters = serde_json::from_slice(&body).unwrap();
        assert_eq!(vehicle, VehicleParameters::default());
    }
}
