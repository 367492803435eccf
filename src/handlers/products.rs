use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::catalog::{ProductSort, ProductView};
use crate::domain::errors::DomainError;
use crate::errors::AppError;

use super::CatalogServiceData;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProductsParams {
    /// `newest` (default), `priceLow` or `priceHigh`.
    pub sort: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VariantResponse {
    pub id: Uuid,
    pub size: String,
    pub color_name: String,
    pub color_code: String,
    pub stock: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub created_at: String,
    pub variants: Vec<VariantResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
}

impl From<ProductView> for ProductResponse {
    fn from(p: ProductView) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price.to_string(),
            category: p.category,
            created_at: p.created_at.to_rfc3339(),
            variants: p
                .variants
                .into_iter()
                .map(|v| VariantResponse {
                    id: v.id,
                    size: v.size,
                    color_name: v.color_name,
                    color_code: v.color_code,
                    stock: v.stock,
                })
                .collect(),
        }
    }
}

/// GET /products
#[utoipa::path(
    get,
    path = "/products",
    params(ListProductsParams),
    responses(
        (status = 200, description = "Catalog", body = ProductListResponse),
        (status = 400, description = "Unknown sort"),
    ),
    tag = "products"
)]
pub async fn list_products(
    service: CatalogServiceData,
    query: web::Query<ListProductsParams>,
) -> Result<HttpResponse, AppError> {
    let sort = match query.into_inner().sort.as_deref() {
        Some(raw) => raw.parse::<ProductSort>()?,
        None => ProductSort::default(),
    };

    let products = web::block(move || service.list_products(sort))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ProductListResponse {
        products: products.into_iter().map(ProductResponse::from).collect(),
    }))
}

/// GET /products/{id}
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = Uuid, Path, description = "Product UUID")),
    responses(
        (status = 200, description = "Product with its variants", body = ProductResponse),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn get_product(
    service: CatalogServiceData,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let product = web::block(move || service.get_product(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    match product {
        Some(p) => Ok(HttpResponse::Ok().json(ProductResponse::from(p))),
        None => Err(DomainError::NotFound("Product").into()),
    }
}
