mod cache;
mod config;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::{debug, error, info, instrument};
use zayt_catalog::CatalogData;
use zayt_core::{
    adjust_recommendation, determine_year_category, extract_car_data_with, select_oils,
    validate_car_data, AdvisorError, CarData, OilCatalog, OilRecommendation, Outcome, SpecTable,
};
use zayt_observability::{AppMetrics, MetricsSnapshot};

pub use cache::{cache_key, CacheEntry, RecommendationCache, DEFAULT_CACHE_TTL_MINUTES};
pub use config::{AdvisorConfig, MAX_CACHE_TTL_MINUTES};

/// Message-in, recommendation-out service. Owns its cache, so separate
/// advisors never share answers.
#[derive(Clone)]
pub struct OilAdvisor {
    specs: Arc<SpecTable>,
    oils: Arc<OilCatalog>,
    cache: RecommendationCache,
    config: AdvisorConfig,
    metrics: Arc<AppMetrics>,
}

impl OilAdvisor {
    pub fn new(catalog: CatalogData, config: AdvisorConfig, metrics: Arc<AppMetrics>) -> Self {
        Self {
            specs: Arc::new(catalog.specs),
            oils: Arc::new(catalog.oils),
            cache: RecommendationCache::new(config.cache_ttl),
            config,
            metrics,
        }
    }

    /// Advisor over the bundled tables with default configuration.
    pub fn bundled() -> Result<Self> {
        Ok(Self::new(
            CatalogData::bundled()?,
            AdvisorConfig::default(),
            AppMetrics::shared(),
        ))
    }

    pub fn extract_car_data(&self, message: &str) -> CarData {
        extract_car_data_with(message, &self.config.climate_profile)
    }

    pub fn determine_year_category(&self, data: &CarData) -> Option<String> {
        determine_year_category(data, &self.specs)
    }

    #[instrument(skip(self, message), fields(message_len = message.len()))]
    pub fn analyze_car_and_recommend_oil(&self, message: &str) -> Outcome {
        let started = Instant::now();
        self.metrics.inc_request();

        if let Some(cached) = self.cache.get(message) {
            self.metrics.inc_cache_hit();
            self.metrics.observe_latency(started.elapsed());
            debug!(ok = cached.is_ok(), "recommendation served from cache");
            return cached;
        }
        self.metrics.inc_cache_miss();

        let outcome = self.run_pipeline(message);

        match &outcome {
            Ok(rec) => {
                if rec.approximation_note.is_some() {
                    self.metrics.inc_approximation();
                }
                info!(
                    brand = %rec.car_data.car_brand,
                    model = %rec.car_data.car_model,
                    year = rec.car_data.year,
                    year_category = %rec.year_category,
                    viscosity = %rec.recommended_viscosity,
                    primary = %rec.primary_oil.name,
                    approximate = rec.approximation_note.is_some(),
                    "recommendation computed"
                );
            }
            Err(AdvisorError::Internal { detail }) => {
                self.metrics.inc_failure();
                error!(detail = %detail, "recommendation pipeline failed unexpectedly");
            }
            Err(err) => {
                self.metrics.inc_failure();
                info!(kind = err.kind(), "recommendation rejected");
            }
        }

        self.cache.set(message, outcome.clone());
        self.metrics.observe_latency(started.elapsed());
        outcome
    }

    pub fn cache(&self) -> &RecommendationCache {
        &self.cache
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn purge_expired_cache(&self) -> usize {
        self.cache.purge_expired(chrono::Utc::now())
    }

    fn run_pipeline(&self, message: &str) -> Result<OilRecommendation, AdvisorError> {
        let car_data = self.extract_car_data(message);
        validate_car_data(&car_data)?;

        let year_category =
            determine_year_category(&car_data, &self.specs).ok_or_else(|| {
                AdvisorError::UnknownSpecification {
                    brand: car_data.car_brand.clone(),
                    model: car_data.car_model.clone(),
                    year: car_data.year,
                }
            })?;

        let car_specs = self
            .specs
            .spec(&car_data.car_brand, &car_data.car_model, &year_category)
            .cloned()
            .ok_or_else(|| {
                AdvisorError::internal(format!(
                    "year category {year_category} resolved for {}/{} but has no spec",
                    car_data.car_brand, car_data.car_model
                ))
            })?;

        let adjustment = adjust_recommendation(
            &car_specs,
            &car_data,
            &self.oils,
            &self.config.adjustment_policy,
        );
        if let Some(product) = &adjustment.dust_protection_override {
            debug!(product = %product, "dust protection promoted a product");
        }

        let selection = select_oils(
            &adjustment.viscosity,
            adjustment.oil_type,
            &self.oils,
            adjustment.dust_protection_override.as_deref(),
        )?;

        Ok(OilRecommendation {
            air_filter: car_specs.air_filter.clone(),
            car_data,
            car_specs,
            primary_oil: selection.primary,
            alternative_oil: selection.alternative,
            recommended_viscosity: adjustment.viscosity,
            recommended_type: adjustment.oil_type,
            year_category,
            applied_rules: adjustment.applied,
            dust_protection_override: adjustment.dust_protection_override,
            approximation_note: selection.approximation_note,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zayt_core::AdjustmentRule;

    fn advisor() -> OilAdvisor {
        OilAdvisor::bundled().expect("bundled advisor")
    }

    #[test]
    fn repeated_message_is_served_from_cache() {
        let advisor = advisor();
        let message = "هيونداي النترا 2022 ماشية 130 ألف";

        let first = advisor.analyze_car_and_recommend_oil(message);
        let second = advisor.analyze_car_and_recommend_oil(message);

        assert_eq!(first, second);
        let snapshot = advisor.metrics_snapshot();
        assert_eq!(snapshot.cache_misses_total, 1);
        assert_eq!(snapshot.cache_hits_total, 1);
    }

    #[test]
    fn failures_are_cached_too() {
        let advisor = advisor();
        let message = "سيارة غير موجودة 2022";

        assert!(advisor.analyze_car_and_recommend_oil(message).is_err());
        assert_eq!(advisor.cache().len(), 1);
        assert!(advisor.analyze_car_and_recommend_oil(message).is_err());

        let snapshot = advisor.metrics_snapshot();
        assert_eq!(snapshot.cache_hits_total, 1);
        assert_eq!(snapshot.failures_total, 1);
    }

    #[test]
    fn different_wording_is_not_deduplicated() {
        let advisor = advisor();
        let _ = advisor.analyze_car_and_recommend_oil("تويوتا كامري 2020 ماشية 80 ألف");
        let _ = advisor.analyze_car_and_recommend_oil("كامري تويوتا 2020 ماشية 80 ألف");
        assert_eq!(advisor.cache().len(), 2);
    }

    #[test]
    fn unknown_model_is_unknown_specification() {
        let err = advisor()
            .analyze_car_and_recommend_oil("فورد توسان 2020 ماشية 50 ألف")
            .unwrap_err();
        assert_eq!(err.kind(), "unknown_specification");
    }

    #[test]
    fn missing_mileage_is_reported() {
        let err = advisor()
            .analyze_car_and_recommend_oil("تويوتا كامري 2020")
            .unwrap_err();
        assert!(err.to_string().contains("الكيلومترات"));
    }

    #[test]
    fn heavy_oil_brand_is_configurable() {
        let config = AdvisorConfig::default().with_heavy_oil_brand("hyundai");
        let advisor = OilAdvisor::new(
            CatalogData::bundled().unwrap(),
            config,
            AppMetrics::shared(),
        );
        let rec = advisor
            .analyze_car_and_recommend_oil("هيونداي النترا 2022 ماشية 130 ألف")
            .unwrap();
        assert_eq!(rec.recommended_viscosity, "5W-40");
        assert_eq!(rec.applied_rules[0], AdjustmentRule::BrandHighMileage);
    }

    #[test]
    fn huge_cache_ttl_still_answers() {
        let config = AdvisorConfig::default().with_cache_ttl_minutes(1_000_000_000_000);
        let advisor = OilAdvisor::new(
            CatalogData::bundled().unwrap(),
            config,
            AppMetrics::shared(),
        );
        let message = "تويوتا كامري 2020 ماشية 80 ألف";
        assert!(advisor.analyze_car_and_recommend_oil(message).is_ok());
        assert!(advisor.analyze_car_and_recommend_oil(message).is_ok());
        assert_eq!(advisor.metrics_snapshot().cache_hits_total, 1);
    }

    #[test]
    fn separate_advisors_keep_separate_caches() {
        let a = advisor();
        let b = advisor();
        let _ = a.analyze_car_and_recommend_oil("تويوتا كامري 2020 ماشية 80 ألف");
        assert_eq!(a.cache().len(), 1);
        assert!(b.cache().is_empty());
    }
}
