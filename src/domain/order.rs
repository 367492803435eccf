use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "PAID" => Ok(OrderStatus::Paid),
            "SHIPPED" => Ok(OrderStatus::Shipped),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::Persistence(format!(
                "unknown order status '{other}'"
            ))),
        }
    }
}

/// One line of a checkout request.
///
/// `quoted_unit_price` is whatever the client displayed; it is never used to
/// price the order.
#[derive(Debug, Clone)]
pub struct OrderLineInput {
    pub product_id: Uuid,
    pub size: String,
    pub color: String,
    pub quantity: i32,
    pub quoted_unit_price: Option<BigDecimal>,
    pub cart_item_id: Option<Uuid>,
}

/// Largest quantity a single checkout line may request.
pub const MAX_LINE_QUANTITY: i32 = 999;

#[derive(Debug, Clone)]
pub struct ShippingInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub detail_address: String,
}

impl ShippingInfo {
    pub fn full_address(&self) -> String {
        format!("{} {}", self.address, self.detail_address)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub lines: Vec<OrderLineInput>,
    pub shipping: ShippingInfo,
}

impl PlaceOrder {
    /// Rejects requests that must never reach the transaction.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.lines.is_empty() {
            return Err(DomainError::invalid("order must contain at least one item"));
        }
        for line in &self.lines {
            if !(1..=MAX_LINE_QUANTITY).contains(&line.quantity) {
                return Err(DomainError::invalid(format!(
                    "quantity for product {} must be between 1 and {MAX_LINE_QUANTITY}",
                    line.product_id
                )));
            }
            if line.size.trim().is_empty() {
                return Err(DomainError::invalid(format!(
                    "size for product {} is required",
                    line.product_id
                )));
            }
        }
        let shipping = &self.shipping;
        for (field, value) in [
            ("name", &shipping.name),
            ("phone", &shipping.phone),
            ("address", &shipping.address),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::invalid(format!(
                    "shipping {field} is required"
                )));
            }
        }
        Ok(())
    }

    /// Cart items the checkout consumes, without duplicates.
    pub fn cart_item_ids(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self.lines.iter().filter_map(|l| l.cart_item_id).collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

/// A line priced from the catalog at commit time.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub product_id: Uuid,
    pub size: String,
    pub color: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

impl PricedLine {
    pub fn line_total(&self) -> BigDecimal {
        &self.unit_price * BigDecimal::from(self.quantity)
    }
}

pub fn total_amount(lines: &[PricedLine]) -> BigDecimal {
    lines
        .iter()
        .fold(BigDecimal::from(0), |acc, l| acc + l.line_total())
}

#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub id: Uuid,
    pub total_amount: BigDecimal,
    pub items: Vec<PricedLine>,
}

#[derive(Debug, Clone)]
pub struct OrderItemView {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub size: String,
    pub color: String,
    pub price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: OrderStatus,
    pub total_amount: BigDecimal,
    pub shipping: ShippingInfo,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemView>,
}
