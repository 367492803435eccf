use actix_web::web;

use crate::application::cart_service::CartService;
use crate::application::catalog_service::CatalogService;
use crate::application::customer_service::CustomerService;
use crate::application::order_service::OrderService;
use crate::infrastructure::cart_repo::DieselCartRepository;
use crate::infrastructure::catalog_repo::DieselCatalogRepository;
use crate::infrastructure::customer_repo::DieselCustomerRepository;
use crate::infrastructure::order_repo::DieselOrderRepository;

pub mod admin;
pub mod cart;
pub mod customer;
pub mod orders;
pub mod products;

pub type OrderServiceData = web::Data<OrderService<DieselOrderRepository>>;
pub type CartServiceData = web::Data<CartService<DieselCartRepository>>;
pub type CatalogServiceData = web::Data<CatalogService<DieselCatalogRepository>>;
pub type CustomerServiceData = web::Data<CustomerService<DieselCustomerRepository>>;
