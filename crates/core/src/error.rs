use thiserror::Error;

use crate::models::OilType;

/// Required field the extractor could not find, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MissingField {
    #[error("لم أتمكن من تحديد نوع السيارة. يرجى ذكر الشركة المصنعة، مثل: تويوتا أو هيونداي.")]
    Brand,
    #[error("لم أتمكن من تحديد موديل السيارة. يرجى ذكر اسم الموديل، مثل: كامري أو النترا.")]
    Model,
    #[error("لم أتمكن من تحديد سنة الصنع. يرجى ذكر السنة، مثل: 2020.")]
    Year,
    #[error("لم أتمكن من تحديد عدد الكيلومترات. يرجى ذكر المسافة المقطوعة، مثل: ماشية 80 ألف.")]
    Mileage,
}

impl MissingField {
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Brand => "car_brand",
            Self::Model => "car_model",
            Self::Year => "year",
            Self::Mileage => "mileage",
        }
    }
}

/// Every way a recommendation can fail. `Display` is the user-facing text;
/// the fields carry details for logs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdvisorError {
    #[error(transparent)]
    MissingField(#[from] MissingField),
    #[error("عذراً، مواصفات هذه السيارة غير متوفرة حالياً. يرجى التأكد من الشركة والموديل وسنة الصنع.")]
    UnknownSpecification { brand: String, model: String, year: u32 },
    #[error("عذراً، لم نجد زيتاً مناسباً في الكتالوج للزوجة {viscosity}.")]
    NoMatchingOil { viscosity: String, oil_type: OilType },
    #[error("حدث خطأ غير متوقع أثناء تحليل بيانات السيارة. يرجى المحاولة مرة أخرى.")]
    Internal { detail: String },
}

impl AdvisorError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::UnknownSpecification { .. } => "unknown_specification",
            Self::NoMatchingOil { .. } => "no_matching_oil",
            Self::Internal { .. } => "internal",
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message_passes_through() {
        let err = AdvisorError::from(MissingField::Model);
        assert!(err.to_string().contains("لم أتمكن من تحديد موديل السيارة"));
        assert_eq!(err.kind(), "missing_field");
    }

    #[test]
    fn internal_detail_stays_out_of_user_text() {
        let err = AdvisorError::internal("range key 20x0 unparsable");
        assert!(!err.to_string().contains("20x0"));
    }
}
