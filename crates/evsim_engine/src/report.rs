use evsim_core::{
    ChargingLevel, Scenario, SessionInputs, SessionResult, SocBounds, SocUnit, VehicleParameters,
    format_soc, format_time_hours_minutes, round_to, soc_bounds, soc_from_percentage,
};
use serde::Serialize;

use crate::InputRanges;

/// What the host displays after every input change
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub result: SessionResult,
    pub scenario: Scenario,
    pub narrative: &'static str,
    pub charging_level: ChargingLevel,
    pub summary: SessionSummary,
    pub starting_soc: StartingSoc,
    /// Current slider bounds, as last set through the range edits
    pub ranges: InputRanges,
}

/// The starting state of charge in the unit it is edited in
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartingSoc {
    pub unit: SocUnit,
    pub value: f64,
    pub bounds: SocBounds,
    pub display: String,
}

impl StartingSoc {
    pub fn new(percentage: f64, unit: SocUnit, vehicle: &VehicleParameters) -> Self {
        let value = soc_from_percentage(percentage, unit, vehicle);
        StartingSoc {
            unit,
            value,
            bounds: soc_bounds(unit, vehicle),
            display: format_soc(value, unit),
        }
    }
}

fn format_money(value: f64) -> String {
    format!("${:.2}", round_to(value, 2))
}

/// Display strings of a session, rounded the way the summary panel shows them
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub starting: String,
    pub ending: String,
    pub soc_added: String,
    pub efficiency: String,
    pub energy_delivered: String,
    pub range_added: String,
    pub charging_cost: String,
    pub idle_fee: String,
    pub total_cost: String,
    pub total_time: String,
    pub charging_time: String,
    pub idle_time: String,
    pub has_idle_time: bool,
}

impl SessionSummary {
    pub fn new(inputs: &SessionInputs, result: &SessionResult) -> Self {
        let unit = result.display.unit.label();
        SessionSummary {
            starting: format!(
                "{} ({}, {:.0} {unit})",
                format_soc(result.starting_soc_percent, SocUnit::Percentage),
                format_soc(result.starting_kwh, SocUnit::Kwh),
                round_to(result.display.starting_range, 0)
            ),
            ending: format!(
                "{} ({}, {:.0} {unit})",
                format_soc(result.ending_soc_percent, SocUnit::Percentage),
                format_soc(result.ending_kwh, SocUnit::Kwh),
                round_to(result.display.expected_range, 0)
            ),
            soc_added: format!("{:.0}% added", round_to(result.soc_added_percent(), 0)),
            efficiency: format!("{:.0}%", round_to(result.efficiency * 100.0, 0)),
            energy_delivered: format!("{:.2} kWh", round_to(result.energy_delivered_kwh, 2)),
            range_added: format!("{:.0} {unit}", round_to(result.display.range_added, 0)),
            charging_cost: format_money(result.charging_cost),
            idle_fee: format_money(result.idle_fee),
            total_cost: format_money(result.total_cost),
            total_time: format_time_hours_minutes(inputs.time_spent_hours),
            charging_time: format_time_hours_minutes(result.charging_time_hours),
            idle_time: format_time_hours_minutes(result.idle_time_hours),
            has_idle_time: result.has_idle_time(),
        }
    }
}
