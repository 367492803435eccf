pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod identity;
pub mod infrastructure;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::cart_service::CartService;
use application::catalog_service::CatalogService;
use application::customer_service::CustomerService;
use application::order_service::OrderService;
use errors::AppError;
use infrastructure::cart_repo::DieselCartRepository;
use infrastructure::catalog_repo::DieselCatalogRepository;
use infrastructure::customer_repo::DieselCustomerRepository;
use infrastructure::order_repo::DieselOrderRepository;

pub use config::AppConfig;
pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::place_order,
        handlers::orders::get_order,
        handlers::orders::list_orders,
        handlers::cart::get_cart,
        handlers::cart::add_item,
        handlers::cart::update_item,
        handlers::cart::remove_item,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::admin::create_product,
        handlers::customer::get_profile,
        handlers::customer::save_profile,
    ),
    tags(
        (name = "orders", description = "Checkout and order history"),
        (name = "cart", description = "Shopping cart"),
        (name = "products", description = "Catalog"),
        (name = "admin", description = "Catalog administration"),
        (name = "user", description = "Customer profile"),
    )
)]
pub struct ApiDoc;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    for version in applied {
        log::info!("Applied migration {}", version);
    }
    Ok(())
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let orders = web::Data::new(OrderService::new(DieselOrderRepository::new(pool.clone())));
    let cart = web::Data::new(CartService::new(DieselCartRepository::new(pool.clone())));
    let catalog = web::Data::new(CatalogService::new(DieselCatalogRepository::new(
        pool.clone(),
    )));
    let customers = web::Data::new(CustomerService::new(DieselCustomerRepository::new(pool)));

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(orders.clone())
            .app_data(cart.clone())
            .app_data(catalog.clone())
            .app_data(customers.clone())
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(err.to_string()).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(err.to_string()).into()
            }))
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .service(
                web::scope("/orders")
                    .route("", web::post().to(handlers::orders::place_order))
                    .route("", web::get().to(handlers::orders::list_orders))
                    .route("/{id}", web::get().to(handlers::orders::get_order)),
            )
            .service(
                web::scope("/cart")
                    .route("", web::get().to(handlers::cart::get_cart))
                    .route("/items", web::post().to(handlers::cart::add_item))
                    .route("/items/{id}", web::patch().to(handlers::cart::update_item))
                    .route("/items/{id}", web::delete().to(handlers::cart::remove_item)),
            )
            .service(
                web::scope("/products")
                    .route("", web::get().to(handlers::products::list_products))
                    .route("/{id}", web::get().to(handlers::products::get_product)),
            )
            .service(
                web::scope("/admin")
                    .route("/products", web::post().to(handlers::admin::create_product)),
            )
            .service(
                web::resource("/user")
                    .route(web::get().to(handlers::customer::get_profile))
                    .route(web::put().to(handlers::customer::save_profile)),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
