use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::cart::{CartItemView, NewCartItem};
use crate::errors::AppError;
use crate::identity::AuthenticatedUser;

use super::CartServiceData;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    pub product_id: Uuid,
    pub size: String,
    #[serde(default)]
    pub color: String,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCartItemRequest {
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub unit_price: String,
    pub size: String,
    pub color: String,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartResponse {
    pub items: Vec<CartItemResponse>,
}

impl From<CartItemView> for CartItemResponse {
    fn from(item: CartItemView) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id,
            product_name: item.product_name,
            unit_price: item.unit_price.to_string(),
            size: item.size,
            color: item.color,
            quantity: item.quantity,
        }
    }
}

/// GET /cart
#[utoipa::path(
    get,
    path = "/cart",
    responses(
        (status = 200, description = "Lines in the caller's cart", body = CartResponse),
        (status = 401, description = "No authenticated identity"),
    ),
    tag = "cart"
)]
pub async fn get_cart(
    service: CartServiceData,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let items = web::block(move || service.items(&user.email))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CartResponse {
        items: items.into_iter().map(CartItemResponse::from).collect(),
    }))
}

/// POST /cart/items
#[utoipa::path(
    post,
    path = "/cart/items",
    request_body = AddCartItemRequest,
    responses(
        (status = 201, description = "Item added", body = CartItemResponse),
        (status = 400, description = "Quantity outside 1-10"),
        (status = 401, description = "No authenticated identity"),
        (status = 404, description = "Product not found"),
    ),
    tag = "cart"
)]
pub async fn add_item(
    service: CartServiceData,
    user: AuthenticatedUser,
    body: web::Json<AddCartItemRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let item = NewCartItem {
        product_id: body.product_id,
        size: body.size,
        color: body.color,
        quantity: body.quantity,
    };

    let added = web::block(move || service.add_item(&user.email, item))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(CartItemResponse::from(added)))
}

/// PATCH /cart/items/{id}
#[utoipa::path(
    patch,
    path = "/cart/items/{id}",
    params(("id" = Uuid, Path, description = "Cart item UUID")),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Quantity updated", body = CartItemResponse),
        (status = 400, description = "Quantity outside 1-10"),
        (status = 404, description = "Not in the caller's cart"),
    ),
    tag = "cart"
)]
pub async fn update_item(
    service: CartServiceData,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCartItemRequest>,
) -> Result<HttpResponse, AppError> {
    let item_id = path.into_inner();
    let quantity = body.quantity;

    let updated = web::block(move || service.update_quantity(&user.email, item_id, quantity))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CartItemResponse::from(updated)))
}

/// DELETE /cart/items/{id}
#[utoipa::path(
    delete,
    path = "/cart/items/{id}",
    params(("id" = Uuid, Path, description = "Cart item UUID")),
    responses(
        (status = 200, description = "Item removed"),
        (status = 404, description = "Not in the caller's cart"),
    ),
    tag = "cart"
)]
pub async fn remove_item(
    service: CartServiceData,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let item_id = path.into_inner();

    web::block(move || service.remove_item(&user.email, item_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}
