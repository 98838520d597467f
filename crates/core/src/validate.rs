use crate::error::MissingField;
use crate::models::CarData;

/// Checks brand, model, year and mileage in that order and reports the
/// first one missing.
pub fn validate_car_data(data: &CarData) -> Result<(), MissingField> {
    if data.car_brand.is_empty() {
        return Err(MissingField::Brand);
    }
    if data.car_model.is_empty() {
        return Err(MissingField::Model);
    }
    if data.year == 0 {
        return Err(MissingField::Year);
    }
    if data.mileage == 0 {
        return Err(MissingField::Mileage);
    }
    Ok(())
}
