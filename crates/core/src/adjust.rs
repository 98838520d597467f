use serde::{Deserialize, Serialize};

use crate::models::{
    AdjustmentRule, CarData, CarSpec, Conditions, HeatResistance, OilCatalog, OilType,
};

const HIGH_MILEAGE_KM: u32 = 150_000;
const MODERATE_MILEAGE_KM: u32 = 100_000;
const LARGE_ENGINES: &[&str] = &["2.5L", "3.0L"];

/// Tunable domain knowledge for the adjustment pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentPolicy {
    /// Brand whose high-mileage engines get 5W-40 full synthetic.
    pub heavy_oil_brand: String,
    /// Product-name prefixes treated as dust resistant.
    pub dust_resistant_lines: Vec<String>,
}

impl Default for AdjustmentPolicy {
    fn default() -> Self {
        Self {
            heavy_oil_brand: "chevrolet".to_string(),
            dust_resistant_lines: vec![
                "Castrol EDGE".to_string(),
                "Mobil 1".to_string(),
                "Liqui Moly".to_string(),
            ],
        }
    }
}

impl AdjustmentPolicy {
    pub fn is_dust_resistant(&self, product_name: &str) -> bool {
        self.dust_resistant_lines
            .iter()
            .any(|line| product_name.starts_with(line.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjustment {
    pub viscosity: String,
    pub oil_type: OilType,
    pub dust_protection_override: Option<String>,
    pub applied: Vec<AdjustmentRule>,
}

impl Adjustment {
    fn set(&mut self, rule: AdjustmentRule, viscosity: &str) {
        self.viscosity = viscosity.to_string();
        self.applied.push(rule);
    }
}

/// Runs the adjustment rules in fixed order over the manufacturer baseline.
/// Later rules see, and may override, the output of earlier ones.
///
/// The dust rule counts as satisfied only when a dust-resistant line sells
/// the chosen viscosity *and* oil type. A dust-resistant product at the right
/// viscosity but of another type (Castrol EDGE 5W-30 against a High Mileage
/// 5W-30 recommendation) does not satisfy it; the full-synthetic line is
/// recorded in `dust_protection_override` instead.
pub fn adjust_recommendation(
    baseline: &CarSpec,
    data: &CarData,
    catalog: &OilCatalog,
    policy: &AdjustmentPolicy,
) -> Adjustment {
    let mut out = Adjustment {
        viscosity: baseline.viscosity.clone(),
        oil_type: baseline.oil_type,
        dust_protection_override: None,
        applied: Vec::new(),
    };

    if data.car_brand == policy.heavy_oil_brand && data.mileage > MODERATE_MILEAGE_KM {
        out.set(AdjustmentRule::BrandHighMileage, "5W-40");
        out.oil_type = OilType::FullSynthetic;
    } else if data.mileage > HIGH_MILEAGE_KM {
        if matches!(baseline.viscosity.as_str(), "0W-20" | "0W-30") {
            out.set(AdjustmentRule::HighMileage, "5W-30");
            out.oil_type = OilType::HighMileage;
        }
    } else if data.mileage > MODERATE_MILEAGE_KM && baseline.viscosity == "0W-20" {
        out.set(AdjustmentRule::ModerateMileage, "5W-30");
    }

    if data.conditions == Conditions::Severe && out.viscosity == "0W-20" {
        out.set(AdjustmentRule::SevereUsage, "5W-30");
    }

    if data.heat_resistance == HeatResistance::High {
        if out.viscosity.starts_with("0W-") {
            out.set(AdjustmentRule::HeatClass, "5W-30");
        }
        if LARGE_ENGINES
            .iter()
            .any(|size| baseline.engine_size.contains(size))
            && out.viscosity == "5W-30"
        {
            out.set(AdjustmentRule::EngineDisplacement, "5W-40");
        }
    }

    if data.dust_protection {
        let mut dust_ready = catalog
            .iter()
            .filter(|oil| policy.is_dust_resistant(&oil.name));
        let satisfied = dust_ready
            .clone()
            .any(|oil| oil.spec.viscosity == out.viscosity && oil.spec.oil_type == out.oil_type);

        if !satisfied {
            if let Some(oil) = dust_ready.find(|oil| {
                oil.spec.viscosity == out.viscosity && oil.spec.oil_type == OilType::FullSynthetic
            }) {
                out.dust_protection_override = Some(oil.name.clone());
                out.applied.push(AdjustmentRule::DustProtection);
            }
        }
    }

    out
}
