use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Country assumed when the message names no known location.
pub const DEFAULT_LOCATION: &str = "العراق";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Conditions {
    #[default]
    #[serde(rename = "عادي")]
    Normal,
    #[serde(rename = "شاق")]
    Severe,
    #[serde(rename = "سفر")]
    Highway,
    #[serde(rename = "مدينة")]
    City,
}

impl Conditions {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Normal => "عادي",
            Self::Severe => "شاق",
            Self::Highway => "سفر",
            Self::City => "مدينة",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeatResistance {
    #[serde(rename = "عالية")]
    High,
    #[default]
    #[serde(rename = "متوسطة")]
    Medium,
    #[serde(rename = "منخفضة")]
    Low,
}

impl HeatResistance {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::High => "عالية",
            Self::Medium => "متوسطة",
            Self::Low => "منخفضة",
        }
    }

    fn strength(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    /// Returns whichever of the two classes demands more heat resistance.
    pub fn strongest(self, other: Self) -> Self {
        if other.strength() > self.strength() {
            other
        } else {
            self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FuelEfficiency {
    #[serde(rename = "عالية")]
    High,
    #[default]
    #[serde(rename = "عادي")]
    Normal,
    #[serde(rename = "منخفضة")]
    Low,
}

impl FuelEfficiency {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::High => "عالية",
            Self::Normal => "عادي",
            Self::Low => "منخفضة",
        }
    }
}

/// Structured view of one free-form message. Undetected fields keep their
/// sentinel value: empty strings for brand/model and `0` for year/mileage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarData {
    pub car_brand: String,
    pub car_model: String,
    pub year: u32,
    pub mileage: u32,
    pub conditions: Conditions,
    pub heat_resistance: HeatResistance,
    pub dust_protection: bool,
    pub fuel_efficiency: FuelEfficiency,
    pub location: String,
}

impl Default for CarData {
    fn default() -> Self {
        Self {
            car_brand: String::new(),
            car_model: String::new(),
            year: 0,
            mileage: 0,
            conditions: Conditions::default(),
            heat_resistance: HeatResistance::default(),
            dust_protection: false,
            fuel_efficiency: FuelEfficiency::default(),
            location: DEFAULT_LOCATION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OilType {
    #[serde(rename = "Full Synthetic")]
    FullSynthetic,
    #[serde(rename = "High Mileage")]
    HighMileage,
    #[serde(rename = "Semi Synthetic")]
    SemiSynthetic,
    #[serde(rename = "Conventional")]
    Conventional,
}

impl OilType {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::FullSynthetic => "Full Synthetic",
            Self::HighMileage => "High Mileage",
            Self::SemiSynthetic => "Semi Synthetic",
            Self::Conventional => "Conventional",
        }
    }

    pub fn arabic_label(self) -> &'static str {
        match self {
            Self::FullSynthetic => "تخليقي بالكامل",
            Self::HighMileage => "للمسافات العالية",
            Self::SemiSynthetic => "نصف تخليقي",
            Self::Conventional => "معدني",
        }
    }

    /// Lower is better. Used to order catalog candidates.
    pub fn quality_rank(self) -> u8 {
        match self {
            Self::FullSynthetic => 1,
            Self::HighMileage => 2,
            Self::SemiSynthetic => 3,
            Self::Conventional => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirFilterSpec {
    pub number: String,
    pub change_interval: String,
}

/// Manufacturer specification for one brand/model/year-range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarSpec {
    pub capacity: String,
    pub viscosity: String,
    pub oil_type: OilType,
    pub filter_number: String,
    pub engine_size: String,
    pub api_spec: String,
    pub change_interval: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_filter: Option<AirFilterSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OilSpec {
    pub brand: String,
    pub viscosity: String,
    #[serde(rename = "type")]
    pub oil_type: OilType,
    /// Price in Iraqi dinars.
    pub price: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_spec: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// A catalog product: the display name paired with its specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedOil {
    pub name: String,
    #[serde(flatten)]
    pub spec: OilSpec,
}

/// Inclusive `start-end` production window, e.g. `"2020-2024"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: u32,
    pub end: u32,
}

impl YearRange {
    pub fn parse(key: &str) -> Option<Self> {
        let (start, end) = key.split_once('-')?;
        let start = start.trim().parse::<u32>().ok()?;
        let end = end.trim().parse::<u32>().ok()?;
        (start <= end).then_some(Self { start, end })
    }

    pub fn contains(self, year: u32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

/// Year-range key to specification, iterated in lexicographic key order.
pub type ModelSpecs = BTreeMap<String, CarSpec>;

/// brand -> model -> year-range -> spec. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecTable {
    brands: HashMap<String, HashMap<String, ModelSpecs>>,
}

impl SpecTable {
    pub fn new(brands: HashMap<String, HashMap<String, ModelSpecs>>) -> Self {
        Self { brands }
    }

    pub fn model_specs(&self, brand: &str, model: &str) -> Option<&ModelSpecs> {
        self.brands.get(brand)?.get(model)
    }

    pub fn spec(&self, brand: &str, model: &str, year_category: &str) -> Option<&CarSpec> {
        self.model_specs(brand, model)?.get(year_category)
    }

    pub fn brands(&self) -> impl Iterator<Item = (&String, &HashMap<String, ModelSpecs>)> {
        self.brands.iter()
    }

    pub fn model_count(&self) -> usize {
        self.brands.values().map(HashMap::len).sum()
    }
}

/// Ordered oils catalog. Order is preserved so equal-rank products keep
/// their listing order when sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OilCatalog {
    oils: Vec<NamedOil>,
}

impl OilCatalog {
    pub fn new(oils: Vec<NamedOil>) -> Self {
        Self { oils }
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedOil> + Clone {
        self.oils.iter()
    }

    pub fn get(&self, name: &str) -> Option<&NamedOil> {
        self.oils.iter().find(|oil| oil.name == name)
    }

    pub fn len(&self) -> usize {
        self.oils.len()
    }

    pub fn is_empty(&self) -> bool {
        self.oils.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentRule {
    BrandHighMileage,
    HighMileage,
    ModerateMileage,
    SevereUsage,
    HeatClass,
    EngineDisplacement,
    DustProtection,
}

impl AdjustmentRule {
    pub fn arabic_note(self) -> &'static str {
        match self {
            Self::BrandHighMileage => "محرك هذه الشركة يحتاج زيتاً أثقل بعد تجاوز 100 ألف كم",
            Self::HighMileage => "المسافة تجاوزت 150 ألف كم لذلك نوصي بزيت للمسافات العالية",
            Self::ModerateMileage => "المسافة تجاوزت 100 ألف كم لذلك رفعنا اللزوجة",
            Self::SevereUsage => "الاستخدام الشاق يحتاج لزوجة أعلى",
            Self::HeatClass => "الحرارة العالية تحتاج لزوجة أعلى من 0W",
            Self::EngineDisplacement => "حجم المحرك الكبير مع الحرارة العالية يحتاج 5W-40",
            Self::DustProtection => "اخترنا منتجاً مقاوماً للغبار",
        }
    }
}

/// Successful engine answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OilRecommendation {
    pub car_data: CarData,
    pub car_specs: CarSpec,
    pub primary_oil: NamedOil,
    pub alternative_oil: Option<NamedOil>,
    pub recommended_viscosity: String,
    pub recommended_type: OilType,
    pub year_category: String,
    pub applied_rules: Vec<AdjustmentRule>,
    /// Product promoted by the dust-protection rule, if it fired.
    pub dust_protection_override: Option<String>,
    /// Warning text when no product matched the viscosity exactly.
    pub approximation_note: Option<String>,
    pub air_filter: Option<AirFilterSpec>,
}
