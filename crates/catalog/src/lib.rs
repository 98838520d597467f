use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::info;
use zayt_core::{ModelSpecs, NamedOil, OilCatalog, SpecTable, YearRange};

const BUNDLED_SPECS: &str = include_str!("../data/car_specs.json");
const BUNDLED_OILS: &str = include_str!("../data/oils.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid {what} json")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed year range `{key}` for {brand}/{model}")]
    MalformedYearRange {
        brand: String,
        model: String,
        key: String,
    },
    #[error("{brand}/{model} has no year ranges")]
    EmptyModel { brand: String, model: String },
    #[error("{brand}/{model}/{key} has an empty viscosity")]
    EmptyViscosity {
        brand: String,
        model: String,
        key: String,
    },
    #[error("duplicate oil product `{0}`")]
    DuplicateOil(String),
}

/// The two read-only tables the engine runs on.
#[derive(Debug, Clone)]
pub struct CatalogData {
    pub specs: SpecTable,
    pub oils: OilCatalog,
}

impl CatalogData {
    /// Tables compiled into the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        Ok(Self {
            specs: parse_spec_table(BUNDLED_SPECS)?,
            oils: parse_oil_catalog(BUNDLED_OILS)?,
        })
    }

    /// Reads whichever tables have a path; the rest fall back to the
    /// bundled copy.
    pub fn load(specs_path: Option<&Path>, oils_path: Option<&Path>) -> Result<Self> {
        let specs = match specs_path {
            Some(path) => parse_spec_table(&read(path)?)
                .with_context(|| format!("failed parsing specification table {}", path.display()))?,
            None => parse_spec_table(BUNDLED_SPECS)?,
        };
        let oils = match oils_path {
            Some(path) => parse_oil_catalog(&read(path)?)
                .with_context(|| format!("failed parsing oils catalog {}", path.display()))?,
            None => parse_oil_catalog(BUNDLED_OILS)?,
        };

        info!(
            models = specs.model_count(),
            oils = oils.len(),
            "catalog loaded"
        );
        Ok(Self { specs, oils })
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed reading catalog file: {}", path.display()))
}

/// Parses `brand -> model -> "start-end" -> spec`. Brand and model keys are
/// lowercased to match the extractor's canonical tokens.
pub fn parse_spec_table(raw: &str) -> Result<SpecTable, CatalogError> {
    let parsed: HashMap<String, HashMap<String, ModelSpecs>> =
        serde_json::from_str(raw).map_err(|source| CatalogError::Json {
            what: "specification table",
            source,
        })?;

    let mut brands = HashMap::with_capacity(parsed.len());
    for (brand, models) in parsed {
        let brand = brand.trim().to_lowercase();
        let mut normalized = HashMap::with_capacity(models.len());

        for (model, ranges) in models {
            let model = model.trim().to_lowercase();
            if ranges.is_empty() {
                return Err(CatalogError::EmptyModel { brand, model });
            }

            for (key, spec) in &ranges {
                if YearRange::parse(key).is_none() {
                    return Err(CatalogError::MalformedYearRange {
                        brand,
                        model,
                        key: key.clone(),
                    });
                }
                if spec.viscosity.trim().is_empty() {
                    return Err(CatalogError::EmptyViscosity {
                        brand,
                        model,
                        key: key.clone(),
                    });
                }
            }

            normalized.insert(model, ranges);
        }

        brands.insert(brand, normalized);
    }

    Ok(SpecTable::new(brands))
}

/// Parses an ordered JSON array of products. Names must be unique.
pub fn parse_oil_catalog(raw: &str) -> Result<OilCatalog, CatalogError> {
    let oils: Vec<NamedOil> = serde_json::from_str(raw).map_err(|source| CatalogError::Json {
        what: "oils catalog",
        source,
    })?;

    let mut seen = HashSet::with_capacity(oils.len());
    for oil in &oils {
        if !seen.insert(oil.name.as_str()) {
            return Err(CatalogError::DuplicateOil(oil.name.clone()));
        }
    }

    Ok(OilCatalog::new(oils))
}
