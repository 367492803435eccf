use std::collections::BTreeMap;

use uuid::Uuid;

use super::errors::DomainError;
use super::order::OrderLineInput;

/// How a checkout line names a variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariantKey {
    pub product_id: Uuid,
    pub size: String,
    pub color: String,
}

impl From<&OrderLineInput> for VariantKey {
    fn from(line: &OrderLineInput) -> Self {
        VariantKey {
            product_id: line.product_id,
            size: line.size.clone(),
            color: line.color.clone(),
        }
    }
}

/// Distinct variant keys in the order their rows must be locked.
///
/// Every checkout locks in the same global order so two multi-line orders
/// touching the same variants cannot deadlock each other.
pub fn lock_order(lines: &[OrderLineInput]) -> Vec<VariantKey> {
    let mut keys: Vec<VariantKey> = lines.iter().map(VariantKey::from).collect();
    keys.sort();
    keys.dedup();
    keys
}

/// A variant row as read under its row lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockedVariant {
    pub id: Uuid,
    pub stock: i32,
}

#[derive(Debug)]
struct Reservation {
    available: i32,
    reserved: i32,
}

/// Running tally of what a checkout takes from each locked variant.
///
/// Nothing is written while the ledger is filled; the decrements are applied
/// only once every line has been reserved.
#[derive(Debug, Default)]
pub struct StockLedger {
    reservations: BTreeMap<Uuid, Reservation>,
}

impl StockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reserve(
        &mut self,
        variant: LockedVariant,
        product_id: Uuid,
        size: &str,
        quantity: i32,
    ) -> Result<(), DomainError> {
        let entry = self
            .reservations
            .entry(variant.id)
            .or_insert(Reservation {
                available: variant.stock,
                reserved: 0,
            });

        if quantity < 1 {
            return Err(DomainError::invalid(format!(
                "quantity for product {product_id} must be at least 1"
            )));
        }

        // An overflowing sum can never be covered by stock.
        match entry.reserved.checked_add(quantity) {
            Some(requested) if requested <= entry.available => {
                entry.reserved = requested;
                Ok(())
            }
            requested => Err(DomainError::InsufficientStock {
                product_id,
                size: size.to_string(),
                requested: requested.unwrap_or(i32::MAX),
                available: entry.available,
            }),
        }
    }

    /// `(variant_id, quantity)` pairs to subtract from stock.
    pub fn decrements(&self) -> impl Iterator<Item = (Uuid, i32)> + '_ {
        self.reservations
            .iter()
            .filter(|(_, r)| r.reserved > 0)
            .map(|(id, r)| (*id, r.reserved))
    }
}
