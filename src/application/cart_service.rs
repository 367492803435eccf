use uuid::Uuid;

use crate::domain::cart::{validate_quantity, CartItemView, NewCartItem};
use crate::domain::errors::DomainError;
use crate::domain::ports::CartRepository;

pub struct CartService<R> {
    repo: R,
}

impl<R: CartRepository> CartService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn items(&self, user_email: &str) -> Result<Vec<CartItemView>, DomainError> {
        self.repo.items(user_email)
    }

    pub fn add_item(&self, user_email: &str, item: NewCartItem) -> Result<CartItemView, DomainError> {
        item.validate()?;
        let added = self.repo.add(user_email, item)?;
        log::debug!("Cart item {} added for {}", added.id, user_email);
        Ok(added)
    }

    pub fn update_quantity(
        &self,
        user_email: &str,
        item_id: Uuid,
        quantity: i32,
    ) -> Result<CartItemView, DomainError> {
        validate_quantity(quantity)?;
        self.repo.update_quantity(user_email, item_id, quantity)
    }

    pub fn remove_item(&self, user_email: &str, item_id: Uuid) -> Result<(), DomainError> {
        self.repo.remove(user_email, item_id)
    }
}
