use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::errors::DomainError;

pub const MIN_CART_QUANTITY: i32 = 1;
pub const MAX_CART_QUANTITY: i32 = 10;

pub fn validate_quantity(quantity: i32) -> Result<(), DomainError> {
    if !(MIN_CART_QUANTITY..=MAX_CART_QUANTITY).contains(&quantity) {
        return Err(DomainError::invalid(format!(
            "quantity must be between {MIN_CART_QUANTITY} and {MAX_CART_QUANTITY}, got {quantity}"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct NewCartItem {
    pub product_id: Uuid,
    pub size: String,
    pub color: String,
    pub quantity: i32,
}

impl NewCartItem {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.size.trim().is_empty() {
            return Err(DomainError::invalid("size is required"));
        }
        validate_quantity(self.quantity)
    }
}

#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub unit_price: BigDecimal,
    pub size: String,
    pub color: String,
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_bounds_are_inclusive() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(10).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(11).is_err());
    }

    #[test]
    fn new_item_requires_size() {
        let item = NewCartItem {
            product_id: Uuid::new_v4(),
            size: " ".to_string(),
            color: "black".to_string(),
            quantity: 1,
        };
        assert!(matches!(item.validate(), Err(DomainError::InvalidInput(_))));
    }
}
