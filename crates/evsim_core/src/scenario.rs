//! Narrative describing what a driver is likely doing during a session.
//!
//! Rules are evaluated top to bottom and the first match wins. Their ranges
//! overlap on purpose (a critically low battery overrides everything else,
//! exact boundaries such as 1.5 h match the earlier rule), so the order of
//! [`RULES`] is part of the observable behavior.

use serde::{Deserialize, Serialize};

/// The inputs the classifier looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioInputs {
    pub charging_speed_kw: f64,
    pub time_spent_hours: f64,
    pub starting_soc_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Scenario {
    EmergencyHighwayStop,
    RunningOnFumes,
    CriticallyLow,
    RoadTripPitStop,
    ErrandTopUp,
    RoadTripMealBreak,
    CoffeeShopVisit,
    ShoppingDay,
    WorkOrLongVisit,
    HomeFromRoadTrip,
    OvernightHome,
    OvernightLevel2,
    OpportunisticCharge,
    ExtendedSession,
    FastCharging,
    ModerateCharging,
    DestinationCharging,
    TrickleCharging,
}

impl Scenario {
    pub fn narrative(&self) -> &'static str {
        match self {
            Scenario::EmergencyHighwayStop => {
                "Emergency charge! You pushed your range a bit too far on a road trip and made a quick stop at a highway fast charger to get enough juice to reach your destination. 😅"
            }
            Scenario::RunningOnFumes => {
                "Running on fumes! You found a nearby charging station just in time and are getting enough charge to make it home or to your next stop. 🔋"
            }
            Scenario::CriticallyLow => {
                "Battery was critically low, but you're charging up at whatever station you could find. Time to grab a meal and relax while the battery recovers. 🍔"
            }
            Scenario::RoadTripPitStop => {
                "Quick pit stop on a road trip! You're topping up at a highway fast charger while grabbing coffee and using the restroom. ☕"
            }
            Scenario::ErrandTopUp => {
                "Strategic top-up during a grocery run or errand. Fast charging makes this quick and convenient! 🛒"
            }
            Scenario::RoadTripMealBreak => {
                "Perfect charging break during a road trip. Time for a sit-down meal at a nearby restaurant while the car charges to 80%. 🍽️"
            }
            Scenario::CoffeeShopVisit => {
                "Enjoying a leisurely coffee shop visit or catching a movie while your EV charges. The perfect excuse to take a break! ☕🎬"
            }
            Scenario::ShoppingDay => {
                "Shopping day! Your car is charging at the mall or shopping center while you browse stores with friends and family. 🛍️"
            }
            Scenario::WorkOrLongVisit => {
                "Charging at work or during a long visit with family/friends. Your EV will be fully charged and ready when you're done for the day. 💼👨‍👩‍👧‍👦"
            }
            Scenario::HomeFromRoadTrip => {
                "Home from a long road trip! Plugging in overnight to fully recover the battery for the week ahead. Sweet dreams! 😴🌙"
            }
            Scenario::OvernightHome => {
                "Typical overnight home charging. You'll wake up to a full battery, ready for whatever the day brings. Perfect for daily commuting! 🏠🌅"
            }
            Scenario::OvernightLevel2 => {
                "Overnight charging at home with Level 2. Your EV will be topped off and ready for a full day of driving or that weekend road trip! 🚗💨"
            }
            Scenario::OpportunisticCharge => {
                "Quick opportunistic charge while running a short errand. Every little bit helps add some extra range! 🎯"
            }
            Scenario::ExtendedSession => {
                "Extended charging session, likely overnight or during a full workday. Your battery will be completely refreshed and ready for maximum range! 🔋✨"
            }
            Scenario::FastCharging => {
                "Fast charging session. Perfect for a quick break during longer trips or when you need to add range in a hurry. ⚡"
            }
            Scenario::ModerateCharging => {
                "Moderate-speed charging while taking care of errands, shopping, or grabbing a bite to eat. 🍕"
            }
            Scenario::DestinationCharging => {
                "Level 2 charging during a longer activity. Great for destination charging at hotels, restaurants, or entertainment venues. 🏨"
            }
            Scenario::TrickleCharging => {
                "Trickle charging with Level 1. Slow but steady - perfect for when you have plenty of time and just need to maintain or slowly build up your charge. 🐌"
            }
        }
    }
}

/// A guard and the scenario it selects once the guard matches
pub struct ScenarioRule {
    pub name: &'static str,
    pub matches: fn(&ScenarioInputs) -> bool,
    pub select: fn(&ScenarioInputs) -> Scenario,
}

pub const RULES: [ScenarioRule; 10] = [
    ScenarioRule {
        name: "critically-low-battery",
        matches: |i| i.starting_soc_percent < 10.0,
        select: |i| {
            if i.charging_speed_kw >= 150.0 {
                Scenario::EmergencyHighwayStop
            } else if i.charging_speed_kw >= 50.0 {
                Scenario::RunningOnFumes
            } else {
                Scenario::CriticallyLow
            }
        },
    },
    ScenarioRule {
        name: "quick-fast-charge",
        matches: |i| i.time_spent_hours < 0.5 && i.charging_speed_kw >= 150.0,
        select: |i| {
            if i.starting_soc_percent < 30.0 {
                Scenario::RoadTripPitStop
            } else {
                Scenario::ErrandTopUp
            }
        },
    },
    ScenarioRule {
        name: "medium-fast-charge",
        matches: |i| {
            (0.5..=1.5).contains(&i.time_spent_hours) && i.charging_speed_kw >= 100.0
        },
        select: |_| Scenario::RoadTripMealBreak,
    },
    ScenarioRule {
        name: "level2-short-stay",
        matches: |i| {
            (1.5..=4.0).contains(&i.time_spent_hours) && (15.0..50.0).contains(&i.charging_speed_kw)
        },
        select: |i| {
            if i.time_spent_hours <= 2.5 {
                Scenario::CoffeeShopVisit
            } else {
                Scenario::ShoppingDay
            }
        },
    },
    ScenarioRule {
        name: "level2-long-stay",
        matches: |i| {
            (4.0..=8.0).contains(&i.time_spent_hours) && (10.0..50.0).contains(&i.charging_speed_kw)
        },
        select: |_| Scenario::WorkOrLongVisit,
    },
    ScenarioRule {
        name: "overnight-slow",
        matches: |i| i.time_spent_hours >= 6.0 && i.charging_speed_kw < 25.0,
        select: |i| {
            if i.starting_soc_percent < 20.0 {
                Scenario::HomeFromRoadTrip
            } else {
                Scenario::OvernightHome
            }
        },
    },
    ScenarioRule {
        name: "overnight-level2",
        matches: |i| i.time_spent_hours >= 6.0 && (25.0..50.0).contains(&i.charging_speed_kw),
        select: |_| Scenario::OvernightLevel2,
    },
    ScenarioRule {
        name: "short-slow",
        matches: |i| i.time_spent_hours < 0.5 && i.charging_speed_kw < 50.0,
        select: |_| Scenario::OpportunisticCharge,
    },
    ScenarioRule {
        name: "long-session",
        matches: |i| i.time_spent_hours >= 8.0,
        select: |_| Scenario::ExtendedSession,
    },
    ScenarioRule {
        name: "speed-tier",
        matches: |_| true,
        select: |i| {
            if i.charging_speed_kw >= 150.0 {
                Scenario::FastCharging
            } else if i.charging_speed_kw >= 50.0 {
                Scenario::ModerateCharging
            } else if i.charging_speed_kw >= 10.0 {
                Scenario::DestinationCharging
            } else {
                Scenario::TrickleCharging
            }
        },
    },
];

/// Pick the scenario of the first rule matching `inputs`
pub fn classify_scenario(inputs: &ScenarioInputs) -> Scenario {
    RULES
        .iter()
        .find(|rule| (rule.matches)(inputs))
        .map(|rule| (rule.select)(inputs))
        // The last rule always matches
        .unwrap_or(Scenario::TrickleCharging)
}

pub fn describe_scenario(
    charging_speed_kw: f64,
    time_spent_hours: f64,
    starting_soc_percent: f64,
) -> &'static str {
    classify_scenario(&ScenarioInputs {
        charging_speed_kw,
        time_spent_hours,
        starting_soc_percent,
    })
    .narrative()
}
