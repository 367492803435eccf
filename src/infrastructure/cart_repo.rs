use bigdecimal::BigDecimal;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::cart::{CartItemView, NewCartItem};
use crate::domain::errors::DomainError;
use crate::domain::ports::CartRepository;
use crate::schema::{cart_items, carts, products};

use super::customer_repo::user_id_by_email;
use super::models::{CartItemRow, NewCartItemRow};

fn require_user(conn: &mut PgConnection, user_email: &str) -> Result<Uuid, DomainError> {
    user_id_by_email(conn, user_email)?.ok_or(DomainError::Unauthenticated)
}

fn to_view((item, product_name, unit_price): (CartItemRow, String, BigDecimal)) -> CartItemView {
    CartItemView {
        id: item.id,
        product_id: item.product_id,
        product_name,
        unit_price,
        size: item.size,
        color: item.color,
        quantity: item.quantity,
    }
}

/// Loads one line of the user's cart together with its product.
fn owned_item(
    conn: &mut PgConnection,
    user_id: Uuid,
    item_id: Uuid,
) -> Result<Option<CartItemView>, DomainError> {
    let row = cart_items::table
        .inner_join(carts::table)
        .inner_join(products::table)
        .filter(cart_items::id.eq(item_id))
        .filter(carts::user_id.eq(user_id))
        .select((CartItemRow::as_select(), products::name, products::price))
        .first::<(CartItemRow, String, BigDecimal)>(conn)
        .optional()?;
    Ok(row.map(to_view))
}

#[derive(Clone)]
pub struct DieselCartRepository {
    pool: DbPool,
}

impl DieselCartRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CartRepository for DieselCartRepository {
    fn items(&self, user_email: &str) -> Result<Vec<CartItemView>, DomainError> {
        let mut conn = self.pool.get()?;
        let user_id = require_user(&mut conn, user_email)?;

        let rows = cart_items::table
            .inner_join(carts::table)
            .inner_join(products::table)
            .filter(carts::user_id.eq(user_id))
            .select((CartItemRow::as_select(), products::name, products::price))
            .order(cart_items::created_at.asc())
            .load::<(CartItemRow, String, BigDecimal)>(&mut conn)?;

        Ok(rows.into_iter().map(to_view).collect())
    }

    fn add(&self, user_email: &str, item: NewCartItem) -> Result<CartItemView, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let user_id = require_user(conn, user_email)?;

            let product_exists: bool = diesel::select(diesel::dsl::exists(
                products::table.filter(products::id.eq(item.product_id)),
            ))
            .get_result(conn)?;
            if !product_exists {
                return Err(DomainError::NotFound("Product"));
            }

            // A cart is created the first time the user adds something.
            let cart_id: Uuid = diesel::insert_into(carts::table)
                .values(carts::user_id.eq(user_id))
                .on_conflict(carts::user_id)
                .do_update()
                .set(carts::user_id.eq(user_id))
                .returning(carts::id)
                .get_result(conn)?;

            let item_id = Uuid::new_v4();
            diesel::insert_into(cart_items::table)
                .values(&NewCartItemRow {
                    id: item_id,
                    cart_id,
                    product_id: item.product_id,
                    size: item.size,
                    color: item.color,
                    quantity: item.quantity,
                })
                .execute(conn)?;

            owned_item(conn, user_id, item_id)?.ok_or(DomainError::NotFound("Cart item"))
        })
    }

    fn update_quantity(
        &self,
        user_email: &str,
        item_id: Uuid,
        quantity: i32,
    ) -> Result<CartItemView, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let user_id = require_user(conn, user_email)?;

            let updated = diesel::update(
                cart_items::table.filter(cart_items::id.eq(item_id)).filter(
                    cart_items::cart_id.eq_any(
                        carts::table
                            .filter(carts::user_id.eq(user_id))
                            .select(carts::id),
                    ),
                ),
            )
            .set(cart_items::quantity.eq(quantity))
            .execute(conn)?;
            if updated == 0 {
                return Err(DomainError::NotFound("Cart item"));
            }

            owned_item(conn, user_id, item_id)?.ok_or(DomainError::NotFound("Cart item"))
        })
    }

    fn remove(&self, user_email: &str, item_id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        let user_id = require_user(&mut conn, user_email)?;

        let deleted = diesel::delete(
            cart_items::table.filter(cart_items::id.eq(item_id)).filter(
                cart_items::cart_id.eq_any(
                    carts::table
                        .filter(carts::user_id.eq(user_id))
                        .select(carts::id),
                ),
            ),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(DomainError::NotFound("Cart item"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;
    use uuid::Uuid;

    use super::DieselCartRepository;
    use crate::domain::cart::NewCartItem;
    use crate::domain::errors::DomainError;
    use crate::domain::ports::CartRepository;
    use crate::infrastructure::test_support::{insert_product, insert_user, setup_db};

    fn new_item(product_id: Uuid, quantity: i32) -> NewCartItem {
        NewCartItem {
            product_id,
            size: "02".to_string(),
            color: "black".to_string(),
            quantity,
        }
    }

    #[tokio::test]
    async fn add_creates_cart_and_lists_item_with_product() {
        let (_container, pool) = setup_db().await;
        let mut conn = pool.get().expect("Failed to get connection");
        insert_user(&mut conn, "minji@example.com");
        let product = insert_product(&mut conn, "Oxford shirt", 39000);

        let repo = DieselCartRepository::new(pool.clone());
        assert!(repo.items("minji@example.com").expect("list failed").is_empty());

        let added = repo
            .add("minji@example.com", new_item(product, 2))
            .expect("add failed");
        repo.add("minji@example.com", new_item(product, 1))
            .expect("second add failed");

        let items = repo.items("minji@example.com").expect("list failed");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, added.id);
        assert_eq!(items[0].product_name, "Oxford shirt");
        assert_eq!(items[0].unit_price, BigDecimal::from(39000));
        assert_eq!(items[0].quantity, 2);
    }

    #[tokio::test]
    async fn add_unknown_product_is_not_found() {
        let (_container, pool) = setup_db().await;
        let mut conn = pool.get().expect("Failed to get connection");
        insert_user(&mut conn, "minji@example.com");

        let repo = DieselCartRepository::new(pool.clone());
        let err = repo
            .add("minji@example.com", new_item(Uuid::new_v4(), 1))
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound("Product")));
    }

    #[tokio::test]
    async fn update_and_remove_require_ownership() {
        let (_container, pool) = setup_db().await;
        let mut conn = pool.get().expect("Failed to get connection");
        insert_user(&mut conn, "minji@example.com");
        insert_user(&mut conn, "other@example.com");
        let product = insert_product(&mut conn, "Oxford shirt", 39000);

        let repo = DieselCartRepository::new(pool.clone());
        let added = repo
            .add("minji@example.com", new_item(product, 1))
            .expect("add failed");

        assert!(matches!(
            repo.update_quantity("other@example.com", added.id, 3),
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(
            repo.remove("other@example.com", added.id),
            Err(DomainError::NotFound(_))
        ));

        let updated = repo
            .update_quantity("minji@example.com", added.id, 3)
            .expect("update failed");
        assert_eq!(updated.quantity, 3);

        repo.remove("minji@example.com", added.id)
            .expect("remove failed");
        assert!(repo.items("minji@example.com").expect("list failed").is_empty());
    }

    #[tokio::test]
    async fn unknown_identity_cannot_use_a_cart() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCartRepository::new(pool);

        assert!(matches!(
            repo.items("ghost@example.com"),
            Err(DomainError::Unauthenticated)
        ));
    }
}
