use crate::error::AdvisorError;
use crate::models::{NamedOil, OilCatalog, OilType};

#[derive(Debug, Clone, PartialEq)]
pub struct OilSelection {
    pub primary: NamedOil,
    pub alternative: Option<NamedOil>,
    /// Set when no product matched the viscosity and the pick is a
    /// best-effort substitute.
    pub approximation_note: Option<String>,
}

/// Picks a primary and alternative product for the adjusted
/// viscosity/type. `preferred` (the dust-protection pick) goes first when
/// it is among the exact matches.
pub fn select_oils(
    viscosity: &str,
    oil_type: OilType,
    catalog: &OilCatalog,
    preferred: Option<&str>,
) -> Result<OilSelection, AdvisorError> {
    let accepts_type =
        |candidate: OilType| candidate == oil_type || candidate == OilType::FullSynthetic;

    let mut exact = ranked(
        catalog
            .iter()
            .filter(|oil| oil.spec.viscosity == viscosity && accepts_type(oil.spec.oil_type)),
    );

    if let Some(position) =
        preferred.and_then(|name| exact.iter().position(|oil| oil.name == name))
    {
        let pick = exact.remove(position);
        exact.insert(0, pick);
    }
    if let Some(selection) = into_selection(exact, None) {
        return Ok(selection);
    }

    let approximate = ranked(catalog.iter().filter(|oil| accepts_type(oil.spec.oil_type)));
    let note = format!(
        "تنبيه: لا يتوفر حالياً زيت بلزوجة {viscosity} في الكتالوج، وهذه أقرب البدائل المتاحة. يرجى مراجعة دليل السيارة قبل الاستخدام."
    );
    into_selection(approximate, Some(note)).ok_or_else(|| AdvisorError::NoMatchingOil {
        viscosity: viscosity.to_string(),
        oil_type,
    })
}

fn ranked<'a>(oils: impl Iterator<Item = &'a NamedOil>) -> Vec<&'a NamedOil> {
    let mut oils = oils.collect::<Vec<_>>();
    oils.sort_by_key(|oil| oil.spec.oil_type.quality_rank());
    oils
}

fn into_selection(
    ranked: Vec<&NamedOil>,
    approximation_note: Option<String>,
) -> Option<OilSelection> {
    let mut picks = ranked.into_iter().cloned();
    Some(OilSelection {
        primary: picks.next()?,
        alternative: picks.next(),
        approximation_note,
    })
}
