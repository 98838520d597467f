use zayt_advisor::{AdvisorConfig, OilAdvisor};
use zayt_catalog::CatalogData;
use zayt_core::{
    create_recommendation_message, determine_year_category, extract_car_data, validate_car_data,
    AdjustmentRule, CarData, Conditions, OilType,
};
use zayt_observability::AppMetrics;

fn advisor() -> OilAdvisor {
    OilAdvisor::bundled().expect("bundled advisor should build")
}

#[test]
fn elantra_with_high_mileage_gets_5w30() {
    let message = "هيونداي النترا 2022 ماشية 130 ألف";

    let data = extract_car_data(message);
    assert_eq!(data.car_brand, "hyundai");
    assert_eq!(data.car_model, "elantra");
    assert_eq!(data.year, 2022);
    assert_eq!(data.mileage, 130_000);
    assert_eq!(data.conditions, Conditions::Severe);

    let rec = advisor()
        .analyze_car_and_recommend_oil(message)
        .expect("elantra should resolve");
    assert_eq!(rec.year_category, "2020-2024");
    assert_eq!(rec.recommended_viscosity, "5W-30");
    assert_eq!(rec.recommended_type, OilType::FullSynthetic);
    assert_eq!(rec.primary_oil.spec.viscosity, "5W-30");
    assert!(rec.alternative_oil.is_some());
    assert!(rec.approximation_note.is_none());
    assert!(rec.air_filter.is_some());
}

#[test]
fn camry_severe_usage_on_large_engine() {
    let message = "تويوتا كامري 2020 ماشية 80 ألف استخدام شاق";

    let data = extract_car_data(message);
    assert_eq!(data.car_brand, "toyota");
    assert_eq!(data.car_model, "camry");
    assert_eq!(data.conditions, Conditions::Severe);

    let rec = advisor().analyze_car_and_recommend_oil(message).unwrap();
    assert_eq!(rec.recommended_viscosity, "5W-40");
    assert_eq!(
        rec.applied_rules,
        vec![AdjustmentRule::SevereUsage, AdjustmentRule::EngineDisplacement]
    );
    assert_eq!(rec.primary_oil.spec.oil_type, OilType::FullSynthetic);
}

#[test]
fn unrecognised_car_reports_missing_type() {
    let err = advisor()
        .analyze_car_and_recommend_oil("سيارة غير موجودة 2022")
        .unwrap_err();
    assert!(err.to_string().contains("لم أتمكن من تحديد نوع السيارة"));
}

#[test]
fn missing_model_message() {
    let data = CarData {
        car_brand: "hyundai".to_string(),
        car_model: String::new(),
        year: 2022,
        mileage: 130_000,
        ..CarData::default()
    };
    let err = validate_car_data(&data).unwrap_err();
    assert!(err.to_string().contains("لم أتمكن من تحديد موديل السيارة"));
}

#[test]
fn elantra_2022_year_category() {
    let catalog = CatalogData::bundled().unwrap();
    let data = CarData {
        car_brand: "hyundai".to_string(),
        car_model: "elantra".to_string(),
        year: 2022,
        ..CarData::default()
    };
    assert_eq!(
        determine_year_category(&data, &catalog.specs).as_deref(),
        Some("2020-2024")
    );
}

#[test]
fn future_model_year_uses_newest_generation() {
    let rec = advisor()
        .analyze_car_and_recommend_oil("كيا سيراتو 2027 ماشية 20 ألف")
        .unwrap();
    assert_eq!(rec.year_category, "2019-2024");
}

#[test]
fn very_high_mileage_switches_to_high_mileage_oil() {
    // Kuwait: no default heat or dust escalation
    let rec = advisor()
        .analyze_car_and_recommend_oil("تويوتا كورولا 2020 ماشية 160 ألف في الكويت داخل المدينة")
        .unwrap();
    assert_eq!(rec.recommended_viscosity, "5W-30");
    assert_eq!(rec.recommended_type, OilType::HighMileage);
    assert_eq!(rec.applied_rules, vec![AdjustmentRule::HighMileage]);
    // full synthetic still outranks high mileage in the catalog ordering
    assert_eq!(rec.primary_oil.spec.oil_type, OilType::FullSynthetic);
}

#[test]
fn dust_protection_promotes_resistant_line() {
    let rec = advisor()
        .analyze_car_and_recommend_oil("تويوتا كورولا 2020 ماشية 160 ألف في بغداد")
        .unwrap();
    assert_eq!(rec.recommended_viscosity, "5W-30");
    assert_eq!(
        rec.dust_protection_override.as_deref(),
        Some("Castrol EDGE 5W-30")
    );
    assert_eq!(rec.primary_oil.name, "Castrol EDGE 5W-30");
}

#[test]
fn older_camry_falls_back_to_nearest_viscosity() {
    let rec = advisor()
        .analyze_car_and_recommend_oil("تويوتا كامري 2014 ماشية 90 ألف")
        .unwrap();
    assert_eq!(rec.year_category, "2012-2017");
    assert_eq!(rec.recommended_viscosity, "5W-20");
    assert!(rec.approximation_note.is_some());
}

#[test]
fn heavy_oil_brand_overrides_mileage_rules() {
    let rec = advisor()
        .analyze_car_and_recommend_oil("شفروليه ماليبو 2018 ماشية 120 ألف")
        .unwrap();
    assert_eq!(rec.recommended_viscosity, "5W-40");
    assert_eq!(rec.recommended_type, OilType::FullSynthetic);
    assert_eq!(rec.applied_rules[0], AdjustmentRule::BrandHighMileage);
}

#[test]
fn imported_civic_resolves_to_honda() {
    let rec = advisor()
        .analyze_car_and_recommend_oil("هوندا سيفيك 2018 ماشية 50 ألف وارد تركيا")
        .expect("civic is in the table");
    assert_eq!(rec.car_data.car_brand, "honda");
    assert_eq!(rec.year_category, "2016-2021");
}

#[test]
fn manufacture_year_wording_keeps_altima() {
    let rec = advisor()
        .analyze_car_and_recommend_oil("نيسان التيما سنة تصنيع 2019 ماشية 70 ألف")
        .expect("altima is in the table");
    assert_eq!(rec.car_data.car_model, "altima");
    assert_eq!(rec.year_category, "2019-2024");
}

#[test]
fn repeated_queries_are_identical() {
    let advisor = advisor();
    let message = "نيسان التيما 2019 قاطع 70 ألف سفر";
    let first = advisor.analyze_car_and_recommend_oil(message);
    let second = advisor.analyze_car_and_recommend_oil(&format!("  {message}  "));
    assert_eq!(first, second);
    assert_eq!(advisor.metrics_snapshot().cache_hits_total, 1);
}

#[test]
fn custom_primary_market() {
    let config = AdvisorConfig::default().with_primary_location("الكويت");
    let advisor = OilAdvisor::new(
        CatalogData::bundled().unwrap(),
        config,
        AppMetrics::shared(),
    );
    let data = advisor.extract_car_data("تويوتا كورولا 2020 ماشية 40 ألف");
    assert_eq!(data.location, "الكويت");
    assert!(data.dust_protection);
}

#[test]
fn message_renders_recommendation() {
    let rec = advisor()
        .analyze_car_and_recommend_oil("هيونداي النترا 2022 ماشية 130 ألف")
        .unwrap();
    let text = create_recommendation_message(&rec);
    assert!(text.contains("Hyundai Elantra"));
    assert!(text.contains(&rec.primary_oil.name));
    assert!(text.contains(&rec.car_specs.filter_number));
}
