mod config;
mod report;

pub use crate::config::{InputRange, InputRanges, RangedInput, SimulatorConfig};
pub use crate::report::{SessionReport, SessionSummary, StartingSoc};

use evsim_core::{
    CalculationError, ChargingLevel, DistanceUnit, SessionInputs, SocUnit, VehicleParameters,
    classify_scenario, compute_session, soc_to_percentage,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error(transparent)]
    Calculation(#[from] CalculationError),
    #[error("Range for {input} is invalid: min {min} must be non-negative and below max {max}")]
    InvalidRange {
        input: RangedInput,
        min: f64,
        max: f64,
    },
    #[error("Failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// The state behind the calculator screen.
///
/// Holds the vehicle and the current inputs, clamps every edit into the
/// slider bounds and recomputes the whole report on demand. The vehicle is
/// only ever replaced as a whole through [`Simulator::save_vehicle`].
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    vehicle: VehicleParameters,
    inputs: SessionInputs,
    ranges: InputRanges,
    /// Unit the starting state of charge is edited and shown in
    soc_unit: SocUnit,
}

impl Simulator {
    pub fn new(config: SimulatorConfig) -> Result<Self, SimulatorError> {
        config.vehicle.validate()?;
        for input in RangedInput::ALL {
            config.ranges.get(input).validate(input)?;
        }
        let mut simulator = Simulator {
            vehicle: config.vehicle,
            inputs: config.inputs,
            ranges: config.ranges,
            soc_unit: SocUnit::Percentage,
        };
        simulator.set_starting_soc(config.inputs.starting_soc_percent, SocUnit::Percentage)?;
        for input in RangedInput::ALL {
            simulator.set_input(input, simulator.input_value(input))?;
        }
        Ok(simulator)
    }

    pub fn vehicle(&self) -> &VehicleParameters {
        &self.vehicle
    }

    pub fn inputs(&self) -> &SessionInputs {
        &self.inputs
    }

    pub fn ranges(&self) -> &InputRanges {
        &self.ranges
    }

    pub fn soc_unit(&self) -> SocUnit {
        self.soc_unit
    }

    pub fn input_value(&self, input: RangedInput) -> f64 {
        match input {
            RangedInput::ChargingSpeedKw => self.inputs.charging_speed_kw,
            RangedInput::TimeSpentHours => self.inputs.time_spent_hours,
            RangedInput::PricePerKwh => self.inputs.price_per_kwh,
            RangedInput::IdleFeePerMinute => self.inputs.idle_fee_per_minute,
        }
    }

    fn input_value_mut(&mut self, input: RangedInput) -> &mut f64 {
        match input {
            RangedInput::ChargingSpeedKw => &mut self.inputs.charging_speed_kw,
            RangedInput::TimeSpentHours => &mut self.inputs.time_spent_hours,
            RangedInput::PricePerKwh => &mut self.inputs.price_per_kwh,
            RangedInput::IdleFeePerMinute => &mut self.inputs.idle_fee_per_minute,
        }
    }

    /// Set an input, clamped into its current range and snapped to its step.
    /// Returns the stored value.
    pub fn set_input(&mut self, input: RangedInput, value: f64) -> Result<f64, SimulatorError> {
        if value.is_nan() {
            return Err(CalculationError::InputOutOfRange {
                field: input.field_name(),
                value,
            }
            .into());
        }
        let snapped = self.ranges.get(input).snap(value);
        tracing::debug!("Setting {} to {} (requested {})", input, snapped, value);
        *self.input_value_mut(input) = snapped;
        Ok(snapped)
    }

    /// Set the starting state of charge from a value in `unit`.
    ///
    /// The value is converted to a percentage of the current vehicle and
    /// clamped to `[0, 100]`. `unit` becomes the unit the report shows the
    /// starting charge in. Returns the stored percentage.
    pub fn set_starting_soc(&mut self, value: f64, unit: SocUnit) -> Result<f64, SimulatorError> {
        let percentage = soc_to_percentage(value, unit, &self.vehicle);
        if percentage.is_nan() {
            return Err(CalculationError::InputOutOfRange {
                field: "startingSocPercent",
                value,
            }
            .into());
        }
        let clamped = percentage.clamp(0.0, 100.0);
        tracing::debug!("Setting startingSocPercent to {}", clamped);
        self.inputs.starting_soc_percent = clamped;
        self.soc_unit = unit;
        Ok(clamped)
    }

    /// Switch the unit of the starting charge without changing its value
    pub fn set_soc_unit(&mut self, unit: SocUnit) {
        tracing::debug!("Showing starting charge as {:?}", unit);
        self.soc_unit = unit;
    }

    pub fn set_distance_unit(&mut self, unit: DistanceUnit) {
        tracing::debug!("Displaying distances in {}", unit.name());
        self.inputs.distance_unit = unit;
    }

    /// Replace the bounds of an input and pull its value back inside them
    pub fn set_range(
        &mut self,
        input: RangedInput,
        min: f64,
        max: f64,
    ) -> Result<(), SimulatorError> {
        let range = InputRange {
            min,
            max,
            step: self.ranges.get(input).step,
        };
        range.validate(input)?;
        tracing::info!("Updating range of {} to [{}, {}]", input, min, max);
        *self.ranges.get_mut(input) = range;
        self.set_input(input, self.input_value(input))?;
        Ok(())
    }

    /// Replace the vehicle. An invalid record leaves the current one in place.
    pub fn save_vehicle(&mut self, vehicle: VehicleParameters) -> Result<(), SimulatorError> {
        if let Err(error) = vehicle.validate() {
            tracing::warn!("Rejecting vehicle {}: {}", vehicle.name, error);
            return Err(error.into());
        }
        tracing::info!("Saving vehicle {}", vehicle.name);
        self.vehicle = vehicle;
        Ok(())
    }

    pub fn reset_vehicle(&mut self) {
        tracing::info!("Resetting vehicle to default");
        self.vehicle = VehicleParameters::default();
    }

    /// Recompute the session from the current vehicle and inputs
    pub fn report(&self) -> Result<SessionReport, SimulatorError> {
        let result = compute_session(&self.vehicle, &self.inputs)?;
        let scenario = classify_scenario(&evsim_core::ScenarioInputs {
            charging_speed_kw: self.inputs.charging_speed_kw,
            time_spent_hours: self.inputs.time_spent_hours,
            starting_soc_percent: self.inputs.starting_soc_percent,
        });
        tracing::debug!("Recomputed session, scenario {:?}", scenario);
        Ok(SessionReport {
            summary: SessionSummary::new(&self.inputs, &result),
            result,
            scenario,
            narrative: scenario.narrative(),
            charging_level: ChargingLevel::from_speed(self.inputs.charging_speed_kw),
            starting_soc: StartingSoc::new(
                self.inputs.starting_soc_percent,
                self.soc_unit,
                &self.vehicle,
            ),
            ranges: self.ranges,
        })
    }
}
