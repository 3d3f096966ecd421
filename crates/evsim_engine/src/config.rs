use std::fmt;

use evsim_core::{SessionInputs, VehicleParameters};
use serde::{Deserialize, Serialize};

use crate::SimulatorError;

/// Represents the simulator configuration loaded at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulatorConfig {
    pub vehicle: VehicleParameters,
    /// Initial session inputs, including the distance unit
    pub inputs: SessionInputs,
    pub ranges: InputRanges,
}

impl SimulatorConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, SimulatorError> {
        let config: SimulatorConfig = serde_json::from_str(json)?;
        config.vehicle.validate()?;
        for input in RangedInput::ALL {
            config.ranges.get(input).validate(input)?;
        }
        Ok(config)
    }
}

/// Session inputs adjusted through a slider with editable bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RangedInput {
    ChargingSpeedKw,
    TimeSpentHours,
    PricePerKwh,
    IdleFeePerMinute,
}

impl RangedInput {
    pub const ALL: [RangedInput; 4] = [
        RangedInput::ChargingSpeedKw,
        RangedInput::TimeSpentHours,
        RangedInput::PricePerKwh,
        RangedInput::IdleFeePerMinute,
    ];

    pub fn field_name(&self) -> &'static str {
        match self {
            RangedInput::ChargingSpeedKw => "chargingSpeedKw",
            RangedInput::TimeSpentHours => "timeSpentHours",
            RangedInput::PricePerKwh => "pricePerKwh",
            RangedInput::IdleFeePerMinute => "idleFeePerMinute",
        }
    }
}

impl fmt::Display for RangedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Bounds of a slider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl InputRange {
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        InputRange { min, max, step }
    }

    /// Bounds must be finite, non-negative and strictly ordered.
    pub fn validate(&self, input: RangedInput) -> Result<(), SimulatorError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min < 0.0 || self.min >= self.max
        {
            return Err(SimulatorError::InvalidRange {
                input,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Clamp, then move to the nearest `min + k * step` like a slider does.
    /// A non-positive step only clamps.
    pub fn snap(&self, value: f64) -> f64 {
        let clamped = self.clamp(value);
        if self.step.is_nan() || self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).min(self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputRanges {
    pub charging_speed_kw: InputRange,
    pub time_spent_hours: InputRange,
    pub price_per_kwh: InputRange,
    pub idle_fee_per_minute: InputRange,
}

impl Default for InputRanges {
    fn default() -> Self {
        InputRanges {
            charging_speed_kw: InputRange::new(0.0, 500.0, 1.0),
            time_spent_hours: InputRange::new(0.0, 24.0, 0.25),
            price_per_kwh: InputRange::new(0.0, 1.0, 0.01),
            idle_fee_per_minute: InputRange::new(0.0, 5.0, 0.05),
        }
    }
}

impl InputRanges {
    pub fn get(&self, input: RangedInput) -> &InputRange {
        match input {
            RangedInput::ChargingSpeedKw => &self.charging_speed_kw,
            RangedInput::TimeSpentHours => &self.time_spent_hours,
            RangedInput::PricePerKwh => &self.price_per_kwh,
            RangedInput::IdleFeePerMinute => &self.idle_fee_per_minute,
        }
    }

    pub(crate) fn get_mut(&mut self, input: RangedInput) -> &mut InputRange {
        match input {
            RangedInput::ChargingSpeedKw => &mut self.charging_speed_kw,
            RangedInput::TimeSpentHours => &mut self.time_spent_hours,
            RangedInput::PricePerKwh => &mut self.price_per_kwh,
            RangedInput::IdleFeePerMinute => &mut self.idle_fee_per_minute,
        }
    }
}
