use serde::{Deserialize, Serialize};

use crate::CalculationError;
use crate::units::DistanceUnit;

/// Represents the vehicle being charged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleParameters {
    pub name: String,
    /// Usable battery capacity in kWh
    pub battery_capacity_kwh: f64,
    /// Rated range at 100% state of charge, in miles
    pub range_at_full_miles: f64,
    /// Peak charging power accepted by the vehicle in kW
    pub max_charging_speed_kw: f64,
    #[serde(rename = "time10To80Minutes")]
    pub time_10_to_80_minutes: f64,
}

impl Default for VehicleParameters {
    fn default() -> Self {
        VehicleParameters {
            name: "2025 Hyundai IONIQ 5 SEL RWD".into(),
            battery_capacity_kwh: 84.0,
            range_at_full_miles: 320.0,
            max_charging_speed_kw: 350.0,
            time_10_to_80_minutes: 20.0,
        }
    }
}

impl VehicleParameters {
    /// Check that the record can be used for a calculation.
    ///
    /// Capacity and range must be strictly positive, the descriptive fields
    /// must not be negative, and nothing may be NaN or infinite.
    pub fn validate(&self) -> Result<(), CalculationError> {
        let strictly_positive = [
            ("batteryCapacityKwh", self.battery_capacity_kwh),
            ("rangeAtFullMiles", self.range_at_full_miles),
        ];
        for (field, value) in strictly_positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalculationError::InvalidVehicle { field, value });
            }
        }
        let non_negative = [
            ("maxChargingSpeedKw", self.max_charging_speed_kw),
            ("time10To80Minutes", self.time_10_to_80_minutes),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(CalculationError::InvalidVehicle { field, value });
            }
        }
        Ok(())
    }
}

/// The values a user adjusts for a single charging session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInputs {
    pub starting_soc_percent: f64,
    pub charging_speed_kw: f64,
    pub time_spent_hours: f64,
    pub price_per_kwh: f64,
    pub idle_fee_per_minute: f64,
    #[serde(default)]
    pub distance_unit: DistanceUnit,
}

impl Default for SessionInputs {
    fn default() -> Self {
        SessionInputs {
            starting_soc_percent: 20.0,
            charging_speed_kw: 50.0,
            time_spent_hours: 2.0,
            price_per_kwh: 0.25,
            idle_fee_per_minute: 0.50,
            distance_unit: DistanceUnit::Miles,
        }
    }
}

impl SessionInputs {
    pub fn validate(&self) -> Result<(), CalculationError> {
        let soc = self.starting_soc_percent;
        if !soc.is_finite() || !(0.0..=100.0).contains(&soc) {
            return Err(CalculationError::InputOutOfRange {
                field: "startingSocPercent",
                value: soc,
            });
        }
        let non_negative = [
            ("chargingSpeedKw", self.charging_speed_kw),
            ("timeSpentHours", self.time_spent_hours),
            ("pricePerKwh", self.price_per_kwh),
            ("idleFeePerMinute", self.idle_fee_per_minute),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(CalculationError::InputOutOfRange { field, value });
            }
        }
        Ok(())
    }
}

/// Distances of a session result expressed in the requested display unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeDisplay {
    pub unit: DistanceUnit,
    pub starting_range: f64,
    pub expected_range: f64,
    pub range_added: f64,
}

/// Everything derived from a vehicle and a set of session inputs.
///
/// Distances are kept in miles; `display` carries the same distances
/// converted to the unit the inputs asked for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResult {
    pub efficiency: f64,
    pub starting_kwh: f64,
    pub ending_kwh: f64,
    pub remaining_capacity_kwh: f64,
    pub max_possible_energy_kwh: f64,
    pub starting_soc_percent: f64,
    pub ending_soc_percent: f64,
    pub energy_delivered_kwh: f64,
    /// Hours needed to reach 100%, `None` when charging at zero power
    pub time_to_full_hours: Option<f64>,
    pub charging_time_hours: f64,
    pub idle_time_hours: f64,
    pub charging_cost: f64,
    pub idle_fee: f64,
    pub total_cost: f64,
    pub range_added_miles: f64,
    pub expected_range_miles: f64,
    pub starting_range_miles: f64,
    pub display: RangeDisplay,
}

impl SessionResult {
    /// Percentage points added during the session
    pub fn soc_added_percent(&self) -> f64 {
        (self.ending_soc_percent - self.starting_soc_percent).max(0.0)
    }

    pub fn has_idle_time(&self) -> bool {
        self.idle_time_hours > 0.0
    }
}
