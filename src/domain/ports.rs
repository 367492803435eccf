use uuid::Uuid;

use super::cart::{CartItemView, NewCartItem};
use super::catalog::{NewProductInput, ProductSort, ProductView};
use super::customer::CustomerProfile;
use super::errors::DomainError;
use super::order::{OrderView, PlaceOrder, PlacedOrder};

/// Repositories identify the caller by the email the identity provider
/// vouched for.
pub trait OrderRepository: Send + Sync + 'static {
    /// Runs the whole checkout as one transaction.
    fn place(&self, user_email: &str, order: PlaceOrder) -> Result<PlacedOrder, DomainError>;
    fn find_for_user(&self, user_email: &str, id: Uuid) -> Result<Option<OrderView>, DomainError>;
    fn list_for_user(&self, user_email: &str) -> Result<Vec<OrderView>, DomainError>;
}

pub trait CartRepository: Send + Sync + 'static {
    fn items(&self, user_email: &str) -> Result<Vec<CartItemView>, DomainError>;
    fn add(&self, user_email: &str, item: NewCartItem) -> Result<CartItemView, DomainError>;
    fn update_quantity(
        &self,
        user_email: &str,
        item_id: Uuid,
        quantity: i32,
    ) -> Result<CartItemView, DomainError>;
    fn remove(&self, user_email: &str, item_id: Uuid) -> Result<(), DomainError>;
}

pub trait CatalogRepository: Send + Sync + 'static {
    fn create(&self, product: NewProductInput) -> Result<Uuid, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<ProductView>, DomainError>;
    fn list(&self, sort: ProductSort) -> Result<Vec<ProductView>, DomainError>;
}

pub trait CustomerRepository: Send + Sync + 'static {
    fn profile(&self, user_email: &str) -> Result<Option<CustomerProfile>, DomainError>;
    fn save_profile(&self, user_email: &str, profile: CustomerProfile) -> Result<(), DomainError>;
}
