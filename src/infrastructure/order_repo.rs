use std::collections::HashMap;

use bigdecimal::BigDecimal;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use serde_json::json;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::inventory::{lock_order, LockedVariant, StockLedger, VariantKey};
use crate::domain::order::{
    total_amount, OrderItemView, OrderStatus, OrderView, PlaceOrder, PlacedOrder, PricedLine,
    ShippingInfo,
};
use crate::domain::ports::OrderRepository;
use crate::schema::{
    cart_items, carts, colors, order_items, order_outbox, orders, product_variants, products,
    sizes,
};

use super::customer_repo::user_id_by_email;
use super::models::{
    ColorRow, NewOrderItemRow, NewOrderRow, NewOutboxEventRow, OrderItemRow, OrderRow,
    VariantRow,
};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Persistence(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Persistence(e.to_string())
    }
}

// ── Row locking ──────────────────────────────────────────────────────────────

/// A locked variant and the color name recorded on the order line.
struct ResolvedVariant {
    locked: LockedVariant,
    color: String,
}

/// Resolves a line's variant and takes its row lock (`SELECT ... FOR UPDATE`).
///
/// The stock returned is the committed value as of the lock, so a racing
/// checkout that committed first is always observed. A non-blank color must
/// match the variant's color name or code; a blank one is accepted only when
/// the size comes in a single color.
fn lock_variant(
    conn: &mut PgConnection,
    key: &VariantKey,
) -> Result<Option<ResolvedVariant>, DomainError> {
    let size_id = sizes::table
        .filter(sizes::name.eq(&key.size))
        .select(sizes::id)
        .first::<Uuid>(conn)
        .optional()?;
    let Some(size_id) = size_id else {
        return Ok(None);
    };

    let candidates: Vec<VariantRow> = product_variants::table
        .filter(product_variants::product_id.eq(key.product_id))
        .filter(product_variants::size_id.eq(size_id))
        .select(VariantRow::as_select())
        .order(product_variants::id)
        .for_update()
        .load(conn)?;
    if candidates.is_empty() {
        return Ok(None);
    }

    let color_ids: Vec<Uuid> = candidates.iter().map(|v| v.color_id).collect();
    let palette: HashMap<Uuid, ColorRow> = colors::table
        .filter(colors::id.eq_any(&color_ids))
        .select(ColorRow::as_select())
        .load(conn)?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let wanted = key.color.trim();
    let chosen = if wanted.is_empty() {
        match candidates.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    } else {
        candidates.iter().find(|v| {
            palette.get(&v.color_id).is_some_and(|c| {
                c.name.eq_ignore_ascii_case(wanted) || c.code.eq_ignore_ascii_case(wanted)
            })
        })
    };

    Ok(chosen.and_then(|v| {
        palette.get(&v.color_id).map(|c| ResolvedVariant {
            locked: LockedVariant {
                id: v.id,
                stock: v.stock,
            },
            color: c.name.clone(),
        })
    }))
}

fn to_view(order: OrderRow, items: Vec<OrderItemRow>) -> Result<OrderView, DomainError> {
    Ok(OrderView {
        id: order.id,
        user_id: order.user_id,
        status: order.status.parse::<OrderStatus>()?,
        total_amount: order.total_amount,
        shipping: ShippingInfo {
            name: order.name,
            phone: order.phone,
            address: order.address,
            detail_address: order.detail_address,
        },
        created_at: order.created_at,
        items: items
            .into_iter()
            .map(|i| OrderItemView {
                id: i.id,
                product_id: i.product_id,
                quantity: i.quantity,
                size: i.size,
                color: i.color,
                price: i.price,
            })
            .collect(),
    })
}

// ── Repository ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn place(&self, user_email: &str, order: PlaceOrder) -> Result<PlacedOrder, DomainError> {
        let mut conn = self.pool.get()?;

        conn.build_transaction()
            .read_committed()
            .run::<_, DomainError, _>(|conn| {
                let user_id =
                    user_id_by_email(conn, user_email)?.ok_or(DomainError::Unauthenticated)?;

                // 1. Lock every variant the order touches, in a stable order.
                let mut locked: HashMap<VariantKey, ResolvedVariant> = HashMap::new();
                for key in lock_order(&order.lines) {
                    if let Some(variant) = lock_variant(conn, &key)? {
                        locked.insert(key, variant);
                    }
                }

                // 2. Validate every line before anything is written.
                let mut ledger = StockLedger::new();
                for line in &order.lines {
                    let variant = locked.get(&VariantKey::from(line)).ok_or_else(|| {
                        DomainError::VariantNotFound {
                            product_id: line.product_id,
                            size: line.size.clone(),
                        }
                    })?;
                    ledger.reserve(variant.locked, line.product_id, &line.size, line.quantity)?;
                }

                // 3. Decrement stock.
                for (variant_id, quantity) in ledger.decrements() {
                    diesel::update(product_variants::table.find(variant_id))
                        .set(product_variants::stock.eq(product_variants::stock - quantity))
                        .execute(conn)?;
                }

                // 4. Price from the catalog and write the order.
                let mut product_ids: Vec<Uuid> =
                    order.lines.iter().map(|l| l.product_id).collect();
                product_ids.sort();
                product_ids.dedup();
                let prices: HashMap<Uuid, BigDecimal> = products::table
                    .filter(products::id.eq_any(&product_ids))
                    .select((products::id, products::price))
                    .load::<(Uuid, BigDecimal)>(conn)?
                    .into_iter()
                    .collect();

                let items = order
                    .lines
                    .iter()
                    .map(|line| {
                        let not_found = || DomainError::VariantNotFound {
                            product_id: line.product_id,
                            size: line.size.clone(),
                        };
                        let unit_price =
                            prices.get(&line.product_id).cloned().ok_or_else(not_found)?;
                        let variant = locked.get(&VariantKey::from(line)).ok_or_else(not_found)?;
                        if let Some(quoted) = &line.quoted_unit_price {
                            if quoted != &unit_price {
                                log::warn!(
                                    "Quoted price {} for product {} ignored, catalog price is {}",
                                    quoted,
                                    line.product_id,
                                    unit_price
                                );
                            }
                        }
                        Ok(PricedLine {
                            product_id: line.product_id,
                            size: line.size.clone(),
                            color: variant.color.clone(),
                            quantity: line.quantity,
                            unit_price,
                        })
                    })
                    .collect::<Result<Vec<_>, DomainError>>()?;
                let total = total_amount(&items);

                let order_id = Uuid::new_v4();
                let shipping = &order.shipping;
                diesel::insert_into(orders::table)
                    .values(&NewOrderRow {
                        id: order_id,
                        user_id,
                        total_amount: total.clone(),
                        name: shipping.name.clone(),
                        phone: shipping.phone.clone(),
                        address: shipping.address.clone(),
                        detail_address: shipping.detail_address.clone(),
                        shipping_address: shipping.full_address(),
                        status: OrderStatus::Paid.to_string(),
                    })
                    .execute(conn)?;

                let new_items: Vec<NewOrderItemRow> = items
                    .iter()
                    .map(|i| NewOrderItemRow {
                        id: Uuid::new_v4(),
                        order_id,
                        product_id: i.product_id,
                        quantity: i.quantity,
                        size: i.size.clone(),
                        color: i.color.clone(),
                        price: i.unit_price.clone(),
                    })
                    .collect();
                diesel::insert_into(order_items::table)
                    .values(&new_items)
                    .execute(conn)?;

                let item_payloads: Vec<serde_json::Value> = items
                    .iter()
                    .map(|i| {
                        json!({
                            "product_id": i.product_id,
                            "size": i.size,
                            "color": i.color,
                            "quantity": i.quantity,
                            "unit_price": i.unit_price.to_string()
                        })
                    })
                    .collect();
                diesel::insert_into(order_outbox::table)
                    .values(&NewOutboxEventRow {
                        id: Uuid::new_v4(),
                        aggregate_type: "Order".to_string(),
                        aggregate_id: order_id.to_string(),
                        event_type: "OrderPlaced".to_string(),
                        payload: json!({
                            "order_id": order_id,
                            "user_id": user_id,
                            "status": OrderStatus::Paid.as_str(),
                            "total_amount": total.to_string(),
                            "items": item_payloads
                        }),
                    })
                    .execute(conn)?;

                // 5. Clear the purchased lines from the caller's own cart.
                let cart_item_ids = order.cart_item_ids();
                if !cart_item_ids.is_empty() {
                    let cart_id = carts::table
                        .filter(carts::user_id.eq(user_id))
                        .select(carts::id)
                        .first::<Uuid>(conn)
                        .optional()?;
                    if let Some(cart_id) = cart_id {
                        diesel::delete(
                            cart_items::table
                                .filter(cart_items::cart_id.eq(cart_id))
                                .filter(cart_items::id.eq_any(&cart_item_ids)),
                        )
                        .execute(conn)?;
                    }
                }

                Ok(PlacedOrder {
                    id: order_id,
                    total_amount: total,
                    items,
                })
            })
    }

    fn find_for_user(&self, user_email: &str, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let Some(user_id) = user_id_by_email(&mut conn, user_email)? else {
            return Ok(None);
        };

        let order = orders::table
            .filter(orders::id.eq(id))
            .filter(orders::user_id.eq(user_id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = OrderItemRow::belonging_to(&order)
            .select(OrderItemRow::as_select())
            .order(order_items::created_at.asc())
            .load(&mut conn)?;

        to_view(order, items).map(Some)
    }

    fn list_for_user(&self, user_email: &str) -> Result<Vec<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let Some(user_id) = user_id_by_email(&mut conn, user_email)? else {
            return Ok(vec![]);
        };

        let rows = orders::table
            .filter(orders::user_id.eq(user_id))
            .select(OrderRow::as_select())
            .order(orders::created_at.desc())
            .load(&mut conn)?;

        let items = OrderItemRow::belonging_to(&rows)
            .select(OrderItemRow::as_select())
            .load(&mut conn)?;

        items
            .grouped_by(&rows)
            .into_iter()
            .zip(rows)
            .map(|(items, order)| to_view(order, items))
            .collect()
    }
}
