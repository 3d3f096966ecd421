use serde::{Deserialize, Serialize};

use crate::VehicleParameters;

pub const MILES_TO_KM: f64 = 1.60934;

/// Distance unit used when displaying ranges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DistanceUnit {
    #[default]
    Miles,
    Km,
}

impl DistanceUnit {
    pub fn label(&self) -> &'static str {
        match self {
            DistanceUnit::Miles => "mi",
            DistanceUnit::Km => "km",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DistanceUnit::Miles => "Miles",
            DistanceUnit::Km => "Kilometers",
        }
    }
}

/// Energy conversion efficiency for a charging power.
///
/// Below 2 kW is Level 1 (75%), below 20 kW is Level 2 (90%), anything
/// faster is DC fast charging (97%). Negative speeds are treated as 0.
pub fn charging_efficiency(speed_kw: f64) -> f64 {
    let speed_kw = speed_kw.max(0.0);
    if speed_kw < 2.0 {
        0.75
    } else if speed_kw < 20.0 {
        0.90
    } else {
        0.97
    }
}

/// Convert a distance in miles to `unit`
pub fn convert_distance(miles: f64, unit: DistanceUnit) -> f64 {
    match unit {
        DistanceUnit::Miles => miles,
        DistanceUnit::Km => miles * MILES_TO_KM,
    }
}

/// Convert a distance expressed in `unit` back to miles
pub fn convert_to_miles(value: f64, unit: DistanceUnit) -> f64 {
    match unit {
        DistanceUnit::Miles => value,
        DistanceUnit::Km => value / MILES_TO_KM,
    }
}

/// Format a duration in hours as `"1h 30m"`, `"1h"` or `"45m"`.
///
/// Minutes are rounded, and a rounding up to 60 carries into the hours.
pub fn format_time_hours_minutes(hours: f64) -> String {
    let hours = if hours.is_finite() { hours.max(0.0) } else { 0.0 };
    // Saturates past u64::MAX hours, far outside any slider range
    let mut h = hours.floor() as u64;
    let mut m = ((hours - h as f64) * 60.0).round() as u64;
    if m >= 60 {
        h += m / 60;
        m %= 60;
    }

    if h == 0 {
        format!("{m}m")
    } else if m == 0 {
        format!("{h}h")
    } else {
        format!("{h}h {m}m")
    }
}

/// Round to `decimals` places, halves away from zero.
///
/// `format!("{:.2}")` rounds exact ties to even (`12.125` prints as `12.12`),
/// so display values go through this first.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Unit the starting state of charge can be entered in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SocUnit {
    #[default]
    Percentage,
    Miles,
    Kwh,
}

/// Slider bounds for a state of charge expressed in some unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SocBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

pub fn soc_from_percentage(percentage: f64, unit: SocUnit, vehicle: &VehicleParameters) -> f64 {
    match unit {
        SocUnit::Percentage => percentage,
        SocUnit::Miles => percentage / 100.0 * vehicle.range_at_full_miles,
        SocUnit::Kwh => percentage / 100.0 * vehicle.battery_capacity_kwh,
    }
}

/// Inverse of [`soc_from_percentage`].
///
/// The vehicle must have been validated, otherwise the division is undefined.
pub fn soc_to_percentage(value: f64, unit: SocUnit, vehicle: &VehicleParameters) -> f64 {
    match unit {
        SocUnit::Percentage => value,
        SocUnit::Miles => value / vehicle.range_at_full_miles * 100.0,
        SocUnit::Kwh => value / vehicle.battery_capacity_kwh * 100.0,
    }
}

pub fn soc_bounds(unit: SocUnit, vehicle: &VehicleParameters) -> SocBounds {
    match unit {
        SocUnit::Percentage => SocBounds {
            min: 0.0,
            max: 100.0,
            step: 1.0,
        },
        SocUnit::Miles => SocBounds {
            min: 0.0,
            max: vehicle.range_at_full_miles,
            step: 1.0,
        },
        SocUnit::Kwh => SocBounds {
            min: 0.0,
            max: vehicle.battery_capacity_kwh,
            step: 0.1,
        },
    }
}

pub fn format_soc(value: f64, unit: SocUnit) -> String {
    match unit {
        SocUnit::Percentage => format!("{:.0}%", round_to(value, 0)),
        SocUnit::Miles => format!("{:.0} mi", round_to(value, 0)),
        SocUnit::Kwh => format!("{:.1} kWh", round_to(value, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_efficiency_tiers() {
        assert_eq!(charging_efficiency(0.0), 0.75);
        assert_eq!(charging_efficiency(1.9), 0.75);
        assert_eq!(charging_efficiency(2.0), 0.90);
        assert_eq!(charging_efficiency(19.9), 0.90);
        assert_eq!(charging_efficiency(20.0), 0.97);
        assert_eq!(charging_efficiency(500.0), 0.97);
    }

    #[test]
    fn test_negative_speed_is_clamped() {
        assert_eq!(charging_efficiency(-5.0), 0.75);
    }

    #[test]
    fn test_convert_distance() {
        assert_eq!(convert_distance(100.0, DistanceUnit::Miles), 100.0);
        assert_relative_eq!(
            convert_distance(100.0, DistanceUnit::Km),
            160.934,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            convert_to_miles(160.934, DistanceUnit::Km),
            100.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_distance_round_trip() {
        for miles in [0.0, 0.1, 1.0, 64.0, 320.0, 12345.678] {
            let km = convert_distance(miles, DistanceUnit::Km);
            let back = convert_to_miles(km, DistanceUnit::Km);
            assert_relative_eq!(back, miles, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(DistanceUnit::Miles.label(), "mi");
        assert_eq!(DistanceUnit::Km.label(), "km");
        assert_eq!(DistanceUnit::Km.name(), "Kilometers");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time_hours_minutes(0.0), "0m");
        assert_eq!(format_time_hours_minutes(1.0), "1h");
        assert_eq!(format_time_hours_minutes(1.5), "1h 30m");
        assert_eq!(format_time_hours_minutes(0.25), "15m");
        assert_eq!(format_time_hours_minutes(2.75), "2h 45m");
    }

    #[test]
    /// Rounding up to a full hour must not print "60m"
    fn test_format_time_carries_minutes() {
        assert_eq!(format_time_hours_minutes(0.9917), "1h");
        assert_eq!(format_time_hours_minutes(0.999), "1h");
        assert_eq!(format_time_hours_minutes(2.9999), "3h");
    }

    #[test]
    fn test_soc_units() {
        let vehicle = VehicleParameters::default();
        assert_abs_diff_eq!(
            soc_from_percentage(50.0, SocUnit::Kwh, &vehicle),
            42.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            soc_from_percentage(50.0, SocUnit::Miles, &vehicle),
            160.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            soc_to_percentage(42.0, SocUnit::Kwh, &vehicle),
            50.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            soc_to_percentage(64.0, SocUnit::Miles, &vehicle),
            20.0,
            epsilon = 1e-9
        );
        assert_eq!(soc_bounds(SocUnit::Kwh, &vehicle).max, 84.0);
        assert_eq!(soc_bounds(SocUnit::Kwh, &vehicle).step, 0.1);
    }

    #[test]
    fn test_format_soc() {
        assert_eq!(format_soc(20.0, SocUnit::Percentage), "20%");
        assert_eq!(format_soc(16.8, SocUnit::Kwh), "16.8 kWh");
        assert_eq!(format_soc(64.2, SocUnit::Miles), "64 mi");
        // Ties round up, not to even
        assert_eq!(format_soc(62.5, SocUnit::Percentage), "63%");
        assert_eq!(format_soc(0.25, SocUnit::Kwh), "0.3 kWh");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(12.125, 2), 12.13);
        assert_eq!(round_to(12.375, 2), 12.38);
        assert_eq!(round_to(62.5, 0), 63.0);
        assert_eq!(round_to(48.5, 2), 48.5);
        assert_eq!(round_to(0.0, 2), 0.0);
    }
}
