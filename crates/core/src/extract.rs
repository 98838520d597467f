use serde::{Deserialize, Serialize};

use crate::lexicon::{
    contains_any, extract_mileage, extract_year, first_match, normalize_message, BRAND_RULES,
    CITY_KEYWORDS, DUST_KEYWORDS, EFFICIENT_KEYWORDS, HIGHWAY_KEYWORDS, HOT_KEYWORDS,
    LOCATION_RULES, MILD_KEYWORDS, MODEL_RULES, SEVERE_KEYWORDS, THIRSTY_KEYWORDS,
};
use crate::models::{CarData, Conditions, FuelEfficiency, HeatResistance, DEFAULT_LOCATION};

/// Climate assumptions for the primary market. When a message resolves to
/// `location`, these are applied after every explicit keyword and may only
/// strengthen what the message said.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClimateProfile {
    pub location: String,
    pub heat_resistance: HeatResistance,
    pub dust_protection: bool,
    pub escalate_normal_to_severe: bool,
}

impl Default for ClimateProfile {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            heat_resistance: HeatResistance::High,
            dust_protection: true,
            escalate_normal_to_severe: true,
        }
    }
}

impl ClimateProfile {
    pub fn for_location(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Self::default()
        }
    }

    fn apply(&self, data: &mut CarData, normalized: &str) {
        if data.location != self.location {
            return;
        }

        data.heat_resistance = data.heat_resistance.strongest(self.heat_resistance);
        data.dust_protection |= self.dust_protection;

        if self.escalate_normal_to_severe
            && data.conditions == Conditions::Normal
            && !contains_any(normalized, CITY_KEYWORDS)
        {
            data.conditions = Conditions::Severe;
        }
    }
}

/// Never fails: anything undetected keeps its sentinel default.
pub fn extract_car_data(message: &str) -> CarData {
    extract_car_data_with(message, &ClimateProfile::default())
}

pub fn extract_car_data_with(message: &str, profile: &ClimateProfile) -> CarData {
    let normalized = normalize_message(message);

    let mut data = CarData {
        car_brand: first_match(&normalized, BRAND_RULES)
            .unwrap_or_default()
            .to_string(),
        car_model: first_match(&normalized, MODEL_RULES)
            .unwrap_or_default()
            .to_string(),
        year: extract_year(&normalized).unwrap_or(0),
        mileage: extract_mileage(&normalized).unwrap_or(0),
        conditions: detect_conditions(&normalized),
        heat_resistance: detect_heat(&normalized),
        dust_protection: contains_any(&normalized, DUST_KEYWORDS),
        fuel_efficiency: detect_fuel_efficiency(&normalized),
        location: first_match(&normalized, LOCATION_RULES)
            .unwrap_or(profile.location.as_str())
            .to_string(),
    };

    profile.apply(&mut data, &normalized);
    data
}

fn detect_conditions(text: &str) -> Conditions {
    if contains_any(text, SEVERE_KEYWORDS) {
        Conditions::Severe
    } else if contains_any(text, HIGHWAY_KEYWORDS) {
        Conditions::Highway
    } else if contains_any(text, CITY_KEYWORDS) {
        Conditions::City
    } else {
        Conditions::Normal
    }
}

fn detect_heat(text: &str) -> HeatResistance {
    if contains_any(text, HOT_KEYWORDS) {
        HeatResistance::High
    } else if contains_any(text, MILD_KEYWORDS) {
        HeatResistance::Low
    } else {
        HeatResistance::Medium
    }
}

fn detect_fuel_efficiency(text: &str) -> FuelEfficiency {
    if contains_any(text, EFFICIENT_KEYWORDS) {
        FuelEfficiency::High
    } else if contains_any(text, THIRSTY_KEYWORDS) {
        FuelEfficiency::Low
    } else {
        FuelEfficiency::Normal
    }
}
