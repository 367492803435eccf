use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    #[default]
    Newest,
    PriceLow,
    PriceHigh,
}

impl FromStr for ProductSort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(ProductSort::Newest),
            "priceLow" => Ok(ProductSort::PriceLow),
            "priceHigh" => Ok(ProductSort::PriceHigh),
            other => Err(DomainError::invalid(format!("unknown sort '{other}'"))),
        }
    }
}

/// Prices are stored as `NUMERIC(12, 2)`.
pub const PRICE_SCALE: i64 = 2;
const PRICE_INTEGER_DIGITS: u32 = 10;

#[derive(Debug, Clone)]
pub struct NewVariantInput {
    pub size: String,
    pub color_code: String,
    /// Display name used when the color code is new; defaults to the code.
    pub color_name: Option<String>,
    pub stock: i32,
}

#[derive(Debug, Clone)]
pub struct NewProductInput {
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub category: String,
    pub variants: Vec<NewVariantInput>,
}

impl NewProductInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::invalid("product name is required"));
        }
        if self.category.trim().is_empty() {
            return Err(DomainError::invalid("product category is required"));
        }
        if self.price <= BigDecimal::zero() {
            return Err(DomainError::invalid("product price must be positive"));
        }
        if self.price.with_scale(PRICE_SCALE) != self.price {
            return Err(DomainError::invalid(format!(
                "product price {} has more than {PRICE_SCALE} decimal places",
                self.price
            )));
        }
        if self.price >= BigDecimal::from(10_i64.pow(PRICE_INTEGER_DIGITS)) {
            return Err(DomainError::invalid(format!(
                "product price {} is too large",
                self.price
            )));
        }
        if self.variants.is_empty() {
            return Err(DomainError::invalid("a product needs at least one variant"));
        }
        for v in &self.variants {
            if v.size.trim().is_empty() || v.color_code.trim().is_empty() {
                return Err(DomainError::invalid("variant size and color are required"));
            }
            if v.stock < 0 {
                return Err(DomainError::invalid(format!(
                    "stock for size {} cannot be negative",
                    v.size
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct VariantView {
    pub id: Uuid,
    pub size: String,
    pub color_name: String,
    pub color_code: String,
    pub stock: i32,
}

#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub variants: Vec<VariantView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> NewProductInput {
        NewProductInput {
            name: "Oxford shirt".to_string(),
            description: String::new(),
            price: BigDecimal::from(39000),
            category: "TOP".to_string(),
            variants: vec![NewVariantInput {
                size: "02".to_string(),
                color_code: "#000000".to_string(),
                color_name: Some("black".to_string()),
                stock: 5,
            }],
        }
    }

    #[test]
    fn sort_parses_known_values() {
        assert_eq!("newest".parse::<ProductSort>().unwrap(), ProductSort::Newest);
        assert_eq!("priceLow".parse::<ProductSort>().unwrap(), ProductSort::PriceLow);
        assert_eq!("priceHigh".parse::<ProductSort>().unwrap(), ProductSort::PriceHigh);
        assert!("cheapest".parse::<ProductSort>().is_err());
        assert_eq!(ProductSort::default(), ProductSort::Newest);
    }

    #[test]
    fn valid_product_passes() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn zero_price_is_rejected() {
        let mut p = input();
        p.price = BigDecimal::from(0);
        assert!(matches!(p.validate(), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn price_with_sub_cent_digits_is_rejected() {
        let mut p = input();
        p.price = BigDecimal::from_str("39000.555").unwrap();
        assert!(matches!(p.validate(), Err(DomainError::InvalidInput(_))));

        p.price = BigDecimal::from_str("39000.50").unwrap();
        assert!(p.validate().is_ok());
    }

    #[test]
    fn price_beyond_column_precision_is_rejected() {
        let mut p = input();
        p.price = BigDecimal::from(10_000_000_000_i64);
        assert!(matches!(p.validate(), Err(DomainError::InvalidInput(_))));

        p.price = BigDecimal::from_str("9999999999.99").unwrap();
        assert!(p.validate().is_ok());
    }

    #[test]
    fn negative_stock_is_rejected() {
        let mut p = input();
        p.variants[0].stock = -1;
        assert!(matches!(p.validate(), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn product_without_variants_is_rejected() {
        let mut p = input();
        p.variants.clear();
        assert!(matches!(p.validate(), Err(DomainError::InvalidInput(_))));
    }
}
