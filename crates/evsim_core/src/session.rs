use crate::units::{charging_efficiency, convert_distance};
use crate::{CalculationError, RangeDisplay, SessionInputs, SessionResult, VehicleParameters};

/// Compute the outcome of a charging session.
///
/// The battery can never go past its capacity: once it is full, the rest of
/// the session is idle time billed with the idle fee instead of energy.
/// Both records are validated first, so a zero capacity or a negative input
/// is reported as an error instead of leaking NaN or infinity into the result.
pub fn compute_session(
    vehicle: &VehicleParameters,
    inputs: &SessionInputs,
) -> Result<SessionResult, CalculationError> {
    vehicle.validate()?;
    inputs.validate()?;

    let capacity = vehicle.battery_capacity_kwh;
    let efficiency = charging_efficiency(inputs.charging_speed_kw);
    let effective_power = inputs.charging_speed_kw * efficiency;

    let starting_kwh = inputs.starting_soc_percent / 100.0 * capacity;
    let remaining_capacity_kwh = (capacity - starting_kwh).max(0.0);
    let max_possible_energy_kwh = inputs.time_spent_hours * effective_power;
    let energy_delivered_kwh = max_possible_energy_kwh.min(remaining_capacity_kwh);

    // At zero power the battery never fills up, so there is no idle time.
    let time_to_full_hours =
        (effective_power > 0.0).then(|| remaining_capacity_kwh / effective_power);
    let (charging_time_hours, idle_time_hours) = match time_to_full_hours {
        Some(time_to_full) if time_to_full < inputs.time_spent_hours => {
            (time_to_full, inputs.time_spent_hours - time_to_full)
        }
        _ => (inputs.time_spent_hours, 0.0),
    };

    let charging_cost = energy_delivered_kwh * inputs.price_per_kwh;
    let idle_fee = idle_time_hours * 60.0 * inputs.idle_fee_per_minute;
    let total_cost = charging_cost + idle_fee;

    let ending_kwh = (starting_kwh + energy_delivered_kwh).min(capacity);
    let ending_soc_percent = ending_kwh / capacity * 100.0;

    let range = vehicle.range_at_full_miles;
    let range_added_miles = energy_delivered_kwh / capacity * range;
    let expected_range_miles = ending_soc_percent / 100.0 * range;
    let starting_range_miles = inputs.starting_soc_percent / 100.0 * range;

    let unit = inputs.distance_unit;
    let display = RangeDisplay {
        unit,
        starting_range: convert_distance(starting_range_miles, unit),
        expected_range: convert_distance(expected_range_miles, unit),
        range_added: convert_distance(range_added_miles, unit),
    };

    tracing::trace!(
        "Computed session: {:.2} kWh delivered, {:.1}% -> {:.1}%",
        energy_delivered_kwh,
        inputs.starting_soc_percent,
        ending_soc_percent
    );

    Ok(SessionResult {
        efficiency,
        starting_kwh,
        ending_kwh,
        remaining_capacity_kwh,
        max_possible_energy_kwh,
        starting_soc_percent: inputs.starting_soc_percent,
        ending_soc_percent,
        energy_delivered_kwh,
        time_to_full_hours,
        charging_time_hours,
        idle_time_hours,
        charging_cost,
        idle_fee,
        total_cost,
        range_added_miles,
        expected_range_miles,
        starting_range_miles,
        display,
    })
}
