use chrono::Duration;
use zayt_core::{AdjustmentPolicy, ClimateProfile};

use crate::cache::DEFAULT_CACHE_TTL_MINUTES;

/// Upper bound on the cache TTL: one year.
pub const MAX_CACHE_TTL_MINUTES: i64 = 366 * 24 * 60;

#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub cache_ttl: Duration,
    pub climate_profile: ClimateProfile,
    pub adjustment_policy: AdjustmentPolicy,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::minutes(DEFAULT_CACHE_TTL_MINUTES),
            climate_profile: ClimateProfile::default(),
            adjustment_policy: AdjustmentPolicy::default(),
        }
    }
}

impl AdvisorConfig {
    /// Negative values disable caching; values past a year are capped.
    pub fn with_cache_ttl_minutes(mut self, minutes: i64) -> Self {
        let minutes = minutes.clamp(0, MAX_CACHE_TTL_MINUTES);
        self.cache_ttl = Duration::try_minutes(minutes).unwrap_or_else(Duration::zero);
        self
    }

    pub fn with_primary_location(mut self, location: impl Into<String>) -> Self {
        self.climate_profile.location = location.into();
        self
    }

    pub fn with_heavy_oil_brand(mut self, brand: impl AsRef<str>) -> Self {
        self.adjustment_policy.heavy_oil_brand = brand.as_ref().trim().to_lowercase();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = AdvisorConfig::default()
            .with_cache_ttl_minutes(5)
            .with_primary_location("السعودية")
            .with_heavy_oil_brand(" Nissan ");

        assert_eq!(config.cache_ttl, Duration::minutes(5));
        assert_eq!(config.climate_profile.location, "السعودية");
        assert!(config.climate_profile.dust_protection);
        assert_eq!(config.adjustment_policy.heavy_oil_brand, "nissan");
    }

    #[test]
    fn negative_ttl_clamps_to_zero() {
        let config = AdvisorConfig::default().with_cache_ttl_minutes(-3);
        assert_eq!(config.cache_ttl, Duration::zero());
    }

    #[test]
    fn huge_ttl_is_capped() {
        for minutes in [1_000_000_000_000, i64::MAX] {
            let config = AdvisorConfig::default().with_cache_ttl_minutes(minutes);
            assert_eq!(config.cache_ttl, Duration::minutes(MAX_CACHE_TTL_MINUTES));
        }
    }
}
