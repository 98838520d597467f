use tracing::warn;

use crate::models::{CarData, SpecTable, YearRange};

/// Picks the year-range key for the car. Returns `None` when the table has
/// no entry for the brand/model.
///
/// Keys are scanned newest first (descending lexicographic order, which
/// relies on four-digit years). A year outside every range falls back to
/// the newest range when it is newer than all of them, otherwise to the
/// oldest.
pub fn determine_year_category(data: &CarData, table: &SpecTable) -> Option<String> {
    let Some(ranges) = table.model_specs(&data.car_brand, &data.car_model) else {
        warn!(
            brand = %data.car_brand,
            model = %data.car_model,
            "no specification for brand/model"
        );
        return None;
    };

    let parsed = ranges
        .keys()
        .rev()
        .filter_map(|key| YearRange::parse(key).map(|range| (key, range)))
        .collect::<Vec<_>>();

    if let Some((key, _)) = parsed.iter().find(|(_, range)| range.contains(data.year)) {
        return Some(key.to_string());
    }

    let (newest_key, newest) = parsed.first()?;
    if data.year > newest.end {
        return Some(newest_key.to_string());
    }

    parsed.last().map(|(key, _)| key.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::models::{CarSpec, ModelSpecs, OilType};

    fn spec(viscosity: &str) -> CarSpec {
        CarSpec {
            capacity: "4.2".to_string(),
            viscosity: viscosity.to_string(),
            oil_type: OilType::FullSynthetic,
            filter_number: "26300-35505".to_string(),
            engine_size: "2.0L".to_string(),
            api_spec: "API SP".to_string(),
            change_interval: "5000 كم".to_string(),
            air_filter: None,
        }
    }

    fn table() -> SpecTable {
        let mut ranges = ModelSpecs::new();
        ranges.insert("2018-2019".to_string(), spec("5W-30"));
        ranges.insert("2020-2024".to_string(), spec("0W-20"));
        let mut models = HashMap::new();
        models.insert("elantra".to_string(), ranges);
        let mut brands = HashMap::new();
        brands.insert("hyundai".to_string(), models);
        SpecTable::new(brands)
    }

    fn car(year: u32) -> CarData {
        CarData {
            car_brand: "hyundai".to_string(),
            car_model: "elantra".to_string(),
            year,
            ..CarData::default()
        }
    }

    #[test]
    fn year_inside_range() {
        assert_eq!(determine_year_category(&car(2022), &table()).as_deref(), Some("2020-2024"));
        assert_eq!(determine_year_category(&car(2018), &table()).as_deref(), Some("2018-2019"));
    }

    #[test]
    fn newer_year_falls_forward() {
        assert_eq!(determine_year_category(&car(2026), &table()).as_deref(), Some("2020-2024"));
    }

    #[test]
    fn older_year_falls_back() {
        assert_eq!(determine_year_category(&car(2015), &table()).as_deref(), Some("2018-2019"));
    }

    #[test]
    fn unknown_model_has_no_category() {
        let data = CarData {
            car_model: "sonata".to_string(),
            ..car(2022)
        };
        assert_eq!(determine_year_category(&data, &table()), None);
    }
}
