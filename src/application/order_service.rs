use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{OrderView, PlaceOrder, PlacedOrder};
use crate::domain::ports::OrderRepository;

pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn place_order(
        &self,
        user_email: &str,
        order: PlaceOrder,
    ) -> Result<PlacedOrder, DomainError> {
        order.validate()?;
        let line_count = order.lines.len();

        match self.repo.place(user_email, order) {
            Ok(placed) => {
                log::info!(
                    "Order {} placed by {} ({} lines, total {})",
                    placed.id,
                    user_email,
                    line_count,
                    placed.total_amount
                );
                Ok(placed)
            }
            Err(e) => {
                log::warn!("Checkout for {} rejected: {}", user_email, e);
                Err(e)
            }
        }
    }

    pub fn get_order(&self, user_email: &str, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        self.repo.find_for_user(user_email, id)
    }

    pub fn list_orders(&self, user_email: &str) -> Result<Vec<OrderView>, DomainError> {
        self.repo.list_for_user(user_email)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use bigdecimal::BigDecimal;

    use super::*;
    use crate::domain::order::{OrderLineInput, ShippingInfo};

    #[derive(Default)]
    struct CountingRepo {
        placed: AtomicUsize,
    }

    impl OrderRepository for CountingRepo {
        fn place(&self, _: &str, _: PlaceOrder) -> Result<PlacedOrder, DomainError> {
            self.placed.fetch_add(1, Ordering::SeqCst);
            Ok(PlacedOrder {
                id: Uuid::new_v4(),
                total_amount: BigDecimal::from(0),
                items: vec![],
            })
        }

        fn find_for_user(&self, _: &str, _: Uuid) -> Result<Option<OrderView>, DomainError> {
            Ok(None)
        }

        fn list_for_user(&self, _: &str) -> Result<Vec<OrderView>, DomainError> {
            Ok(vec![])
        }
    }

    fn order(quantity: i32) -> PlaceOrder {
        PlaceOrder {
            lines: vec![OrderLineInput {
                product_id: Uuid::new_v4(),
                size: "02".to_string(),
                color: "black".to_string(),
                quantity,
                quoted_unit_price: None,
                cart_item_id: None,
            }],
            shipping: ShippingInfo {
                name: "Kim".to_string(),
                phone: "010".to_string(),
                address: "Seoul".to_string(),
                detail_address: String::new(),
            },
        }
    }

    #[test]
    fn valid_order_reaches_repository() {
        let service = OrderService::new(CountingRepo::default());
        service
            .place_order("kim@example.com", order(1))
            .expect("order should be placed");
        assert_eq!(service.repo.placed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn invalid_order_never_reaches_repository() {
        let service = OrderService::new(CountingRepo::default());
        let err = service
            .place_order("kim@example.com", order(0))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert_eq!(service.repo.placed.load(Ordering::SeqCst), 0);
    }
}
