use std::str::FromStr;

use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{OrderLineInput, OrderView, PlaceOrder, ShippingInfo};
use crate::errors::AppError;
use crate::identity::AuthenticatedUser;

use super::OrderServiceData;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: Uuid,
    pub size: String,
    #[serde(default)]
    pub color: String,
    pub quantity: i32,
    /// Price shown to the shopper, e.g. "10000". Informational only: orders
    /// are always priced from the catalog.
    #[serde(default)]
    pub unit_price: Option<String>,
    /// Cart line this item was selected from; removed on success.
    #[serde(default)]
    pub cart_item_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfoDto {
    pub name: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub detail_address: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub order_items: Vec<OrderItemRequest>,
    pub shipping_info: ShippingInfoDto,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub order_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub size: String,
    pub color: String,
    pub price: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Uuid,
    pub status: String,
    pub total_amount: String,
    pub shipping_info: ShippingInfoDto,
    pub created_at: String,
    pub items: Vec<OrderItemResponse>,
}

impl TryFrom<PlaceOrderRequest> for PlaceOrder {
    type Error = DomainError;

    fn try_from(body: PlaceOrderRequest) -> Result<Self, Self::Error> {
        let lines = body
            .order_items
            .into_iter()
            .map(|item| {
                let quoted_unit_price = item
                    .unit_price
                    .as_deref()
                    .map(|raw| {
                        BigDecimal::from_str(raw).map_err(|e| {
                            DomainError::invalid(format!("Invalid unitPrice '{raw}': {e}"))
                        })
                    })
                    .transpose()?;
                Ok(OrderLineInput {
                    product_id: item.product_id,
                    size: item.size,
                    color: item.color,
                    quantity: item.quantity,
                    quoted_unit_price,
                    cart_item_id: item.cart_item_id,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let shipping = body.shipping_info;
        Ok(PlaceOrder {
            lines,
            shipping: ShippingInfo {
                name: shipping.name,
                phone: shipping.phone,
                address: shipping.address,
                detail_address: shipping.detail_address,
            },
        })
    }
}

impl From<OrderView> for OrderResponse {
    fn from(order: OrderView) -> Self {
        Self {
            id: order.id,
            status: order.status.to_string(),
            total_amount: order.total_amount.to_string(),
            shipping_info: ShippingInfoDto {
                name: order.shipping.name,
                phone: order.shipping.phone,
                address: order.shipping.address,
                detail_address: order.shipping.detail_address,
            },
            created_at: order.created_at.to_rfc3339(),
            items: order
                .items
                .into_iter()
                .map(|i| OrderItemResponse {
                    id: i.id,
                    product_id: i.product_id,
                    quantity: i.quantity,
                    size: i.size,
                    color: i.color,
                    price: i.price.to_string(),
                })
                .collect(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Checks out the submitted lines. Stock validation, stock decrement, order
/// creation and cart cleanup commit together or not at all.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = PlaceOrderRequest,
    responses(
        (status = 200, description = "Order placed", body = PlaceOrderResponse),
        (status = 400, description = "Malformed request or unknown variant"),
        (status = 401, description = "No authenticated identity"),
        (status = 409, description = "Insufficient stock"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn place_order(
    service: OrderServiceData,
    user: AuthenticatedUser,
    body: web::Json<PlaceOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let order = PlaceOrder::try_from(body.into_inner())?;

    let placed = web::block(move || service.place_order(&user.email, order))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(PlaceOrderResponse {
        order_id: placed.id,
    }))
}

/// GET /orders/{id}
///
/// Returns one of the caller's orders together with its items.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 401, description = "No authenticated identity"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: OrderServiceData,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let order = web::block(move || service.get_order(&user.email, order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    match order {
        Some(order) => Ok(HttpResponse::Ok().json(OrderResponse::from(order))),
        None => Err(DomainError::NotFound("Order").into()),
    }
}

/// GET /orders
///
/// The caller's orders, newest first.
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "Orders of the caller", body = [OrderResponse]),
        (status = 401, description = "No authenticated identity"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    service: OrderServiceData,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let orders = web::block(move || service.list_orders(&user.email))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(unit_price: Option<&str>) -> PlaceOrderRequest {
        serde_json::from_value(serde_json::json!({
            "orderItems": [{
                "productId": Uuid::nil(),
                "size": "02",
                "color": "black",
                "quantity": 2,
                "unitPrice": unit_price,
                "cartItemId": Uuid::nil()
            }],
            "shippingInfo": {
                "name": "Kim",
                "phone": "010-1234-5678",
                "address": "Seoul"
            }
        }))
        .expect("request should deserialize")
    }

    #[test]
    fn camel_case_body_converts_to_domain_order() {
        let order = PlaceOrder::try_from(request(Some("10000"))).expect("valid request");

        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.lines[0].quantity, 2);
        assert_eq!(order.lines[0].cart_item_id, Some(Uuid::nil()));
        assert_eq!(
            order.lines[0].quoted_unit_price,
            Some(BigDecimal::from(10000))
        );
        assert_eq!(order.shipping.detail_address, "");
    }

    #[test]
    fn unit_price_is_optional() {
        let order = PlaceOrder::try_from(request(None)).expect("valid request");
        assert!(order.lines[0].quoted_unit_price.is_none());
    }

    #[test]
    fn malformed_unit_price_is_invalid_input() {
        let err = PlaceOrder::try_from(request(Some("ten"))).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }
}
