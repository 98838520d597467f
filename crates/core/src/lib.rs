pub mod adjust;
pub mod error;
pub mod extract;
pub mod format;
pub mod lexicon;
pub mod models;
pub mod resolve;
pub mod select;
pub mod validate;

pub use adjust::{adjust_recommendation, Adjustment, AdjustmentPolicy};
pub use error::{AdvisorError, MissingField};
pub use extract::{extract_car_data, extract_car_data_with, ClimateProfile};
pub use format::{create_recommendation_message, format_outcome};
pub use models::*;
pub use resolve::determine_year_category;
pub use select::{select_oils, OilSelection};
pub use validate::validate_car_data;

/// Terminal result of one recommendation request.
pub type Outcome = Result<OilRecommendation, AdvisorError>;
