pub mod auth;
pub mod category;
pub mod delivery;
pub mod order;
pub mod payment;
pub mod product;

use rust_decimal::Decimal;
use validator::ValidationError;

// Validação compartilhada por preços e custos
pub(crate) fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("The value cannot be negative.".into());
        return Err(err);
    }
    Ok(())
}
