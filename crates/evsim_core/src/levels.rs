use serde::{Deserialize, Serialize};

/// Charger class a charging power falls into, as shown on the speed control.
///
/// These brackets are for display only, the engine uses
/// [`crate::charging_efficiency`] for losses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChargingLevel {
    L1,
    L2,
    Dcfc1,
    Dcfc2,
    Dcfc3,
    Dcfc4,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingLevelInfo {
    pub level: ChargingLevel,
    pub label: &'static str,
    pub range: &'static str,
    pub min_kw: f64,
    pub max_kw: f64,
    /// Preset speed selected when the level is picked
    pub typical_kw: f64,
    pub efficiency: f64,
}

impl ChargingLevel {
    pub const ALL: [ChargingLevel; 6] = [
        ChargingLevel::L1,
        ChargingLevel::L2,
        ChargingLevel::Dcfc1,
        ChargingLevel::Dcfc2,
        ChargingLevel::Dcfc3,
        ChargingLevel::Dcfc4,
    ];

    /// Level highlighted for a given speed. Upper bounds are inclusive.
    pub fn from_speed(speed_kw: f64) -> Self {
        match speed_kw {
            s if s <= 1.9 => ChargingLevel::L1,
            s if s <= 19.2 => ChargingLevel::L2,
            s if s <= 75.0 => ChargingLevel::Dcfc1,
            s if s <= 150.0 => ChargingLevel::Dcfc2,
            s if s <= 250.0 => ChargingLevel::Dcfc3,
            _ => ChargingLevel::Dcfc4,
        }
    }

    pub fn info(&self) -> ChargingLevelInfo {
        let (label, range, min_kw, max_kw, typical_kw, efficiency) = match self {
            ChargingLevel::L1 => ("L1", "0-1.9 kW", 0.0, 1.9, 1.0, 0.75),
            ChargingLevel::L2 => ("L2", "2-19.2 kW", 2.0, 19.2, 11.0, 0.9),
            ChargingLevel::Dcfc1 => ("⚡", "20-75 kW", 20.0, 75.0, 50.0, 0.97),
            ChargingLevel::Dcfc2 => ("⚡⚡", "75-150 kW", 75.0, 150.0, 110.0, 0.97),
            ChargingLevel::Dcfc3 => ("⚡⚡⚡", "150-250 kW", 150.0, 250.0, 200.0, 0.97),
            ChargingLevel::Dcfc4 => ("⚡⚡⚡⚡", "250-500 kW", 250.0, 500.0, 350.0, 0.97),
        };
        ChargingLevelInfo {
            level: *self,
            label,
            range,
            min_kw,
            max_kw,
            typical_kw,
            efficiency,
        }
    }
}

/// Levels worth offering when the speed slider tops out at `max_speed_kw`
pub fn visible_levels(max_speed_kw: f64) -> Vec<ChargingLevelInfo> {
    ChargingLevel::ALL
        .iter()
        .map(ChargingLevel::info)
        .filter(|info| info.min_kw < max_speed_kw)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charging_efficiency;

    #[test]
    fn test_level_from_speed() {
        assert_eq!(ChargingLevel::from_speed(0.0), ChargingLevel::L1);
        assert_eq!(ChargingLevel::from_speed(1.9), ChargingLevel::L1);
        assert_eq!(ChargingLevel::from_speed(11.0), ChargingLevel::L2);
        assert_eq!(ChargingLevel::from_speed(19.2), ChargingLevel::L2);
        assert_eq!(ChargingLevel::from_speed(50.0), ChargingLevel::Dcfc1);
        assert_eq!(ChargingLevel::from_speed(75.0), ChargingLevel::Dcfc1);
        assert_eq!(ChargingLevel::from_speed(150.0), ChargingLevel::Dcfc2);
        assert_eq!(ChargingLevel::from_speed(250.0), ChargingLevel::Dcfc3);
        assert_eq!(ChargingLevel::from_speed(350.0), ChargingLevel::Dcfc4);
    }

    #[test]
    /// The typical preset of each level lands back in that level, with the
    /// efficiency the engine would use for it
    fn test_typical_speeds_are_consistent() {
        for level in ChargingLevel::ALL {
            let info = level.info();
            assert_eq!(ChargingLevel::from_speed(info.typical_kw), level);
            assert_eq!(charging_efficiency(info.typical_kw), info.efficiency);
        }
    }

    #[test]
    fn test_visible_levels() {
        assert_eq!(visible_levels(500.0).len(), 6);
        let levels = visible_levels(150.0);
        assert_eq!(levels.len(), 4);
        assert_eq!(levels.last().map(|l| l.level), Some(ChargingLevel::Dcfc2));
        assert_eq!(visible_levels(20.0).len(), 2);
    }
}
