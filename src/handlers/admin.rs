use std::str::FromStr;

use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::catalog::{NewProductInput, NewVariantInput};
use crate::domain::errors::DomainError;
use crate::errors::AppError;

use super::CatalogServiceData;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewVariantRequest {
    pub size: String,
    pub color_code: String,
    #[serde(default)]
    pub color_name: Option<String>,
    pub stock: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Decimal price as a string, e.g. "39000".
    pub price: String,
    pub category: String,
    pub variants: Vec<NewVariantRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateProductResponse {
    pub id: Uuid,
}

impl TryFrom<CreateProductRequest> for NewProductInput {
    type Error = DomainError;

    fn try_from(body: CreateProductRequest) -> Result<Self, Self::Error> {
        let price = BigDecimal::from_str(&body.price)
            .map_err(|e| DomainError::invalid(format!("Invalid price '{}': {}", body.price, e)))?;
        Ok(NewProductInput {
            name: body.name,
            description: body.description,
            price,
            category: body.category,
            variants: body
                .variants
                .into_iter()
                .map(|v| NewVariantInput {
                    size: v.size,
                    color_code: v.color_code,
                    color_name: v.color_name,
                    stock: v.stock,
                })
                .collect(),
        })
    }
}

/// POST /admin/products
///
/// Creates a product and its size/color variants in one transaction.
#[utoipa::path(
    post,
    path = "/admin/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = CreateProductResponse),
        (status = 400, description = "Invalid product"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "admin"
)]
pub async fn create_product(
    service: CatalogServiceData,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product = NewProductInput::try_from(body.into_inner())?;

    let id = web::block(move || service.create_product(product))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(CreateProductResponse { id }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_converts_with_decimal_price() {
        let body: CreateProductRequest = serde_json::from_value(serde_json::json!({
            "name": "Oxford shirt",
            "price": "39000.50",
            "category": "TOP",
            "variants": [{ "size": "02", "colorCode": "#000", "stock": 4 }]
        }))
        .expect("request should deserialize");

        let input = NewProductInput::try_from(body).expect("valid request");

        assert_eq!(input.price, BigDecimal::from_str("39000.50").unwrap());
        assert_eq!(input.variants[0].stock, 4);
        assert!(input.variants[0].color_name.is_none());
    }

    #[test]
    fn non_numeric_price_is_invalid_input() {
        let body: CreateProductRequest = serde_json::from_value(serde_json::json!({
            "name": "Oxford shirt",
            "price": "free",
            "category": "TOP",
            "variants": []
        }))
        .expect("request should deserialize");

        assert!(matches!(
            NewProductInput::try_from(body),
            Err(DomainError::InvalidInput(_))
        ));
    }
}
