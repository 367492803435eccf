use uuid::Uuid;

use crate::domain::catalog::{NewProductInput, ProductSort, ProductView};
use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogRepository;

pub struct CatalogService<R> {
    repo: R,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_product(&self, product: NewProductInput) -> Result<Uuid, DomainError> {
        product.validate()?;
        let name = product.name.clone();
        let variants = product.variants.len();
        let id = self.repo.create(product)?;
        log::info!("Product {} '{}' created with {} variants", id, name, variants);
        Ok(id)
    }

    pub fn get_product(&self, id: Uuid) -> Result<Option<ProductView>, DomainError> {
        self.repo.find_by_id(id)
    }

    pub fn list_products(&self, sort: ProductSort) -> Result<Vec<ProductView>, DomainError> {
        self.repo.list(sort)
    }
}
