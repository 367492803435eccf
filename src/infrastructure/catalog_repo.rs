use std::collections::HashMap;

use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::catalog::{NewProductInput, ProductSort, ProductView, VariantView};
use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogRepository;
use crate::schema::{colors, product_variants, products, sizes};

use super::models::{NewProductRow, NewVariantRow, ProductRow, VariantRow};

fn size_id(conn: &mut PgConnection, name: &str) -> QueryResult<Uuid> {
    diesel::insert_into(sizes::table)
        .values(sizes::name.eq(name))
        .on_conflict(sizes::name)
        .do_update()
        .set(sizes::name.eq(name))
        .returning(sizes::id)
        .get_result(conn)
}

/// Get-or-create by code; an existing color keeps its display name.
fn color_id(conn: &mut PgConnection, code: &str, name: &str) -> QueryResult<Uuid> {
    diesel::insert_into(colors::table)
        .values((colors::code.eq(code), colors::name.eq(name)))
        .on_conflict(colors::code)
        .do_update()
        .set(colors::code.eq(code))
        .returning(colors::id)
        .get_result(conn)
}

fn with_variants(
    conn: &mut PgConnection,
    rows: Vec<ProductRow>,
) -> Result<Vec<ProductView>, DomainError> {
    let ids: Vec<Uuid> = rows.iter().map(|p| p.id).collect();

    let variants = product_variants::table
        .inner_join(sizes::table)
        .inner_join(colors::table)
        .filter(product_variants::product_id.eq_any(&ids))
        .select((
            VariantRow::as_select(),
            sizes::name,
            colors::name,
            colors::code,
        ))
        .order((sizes::name.asc(), colors::code.asc()))
        .load::<(VariantRow, String, String, String)>(conn)?;

    let mut by_product: HashMap<Uuid, Vec<VariantView>> = HashMap::new();
    for (variant, size, color_name, color_code) in variants {
        by_product
            .entry(variant.product_id)
            .or_default()
            .push(VariantView {
                id: variant.id,
                size,
                color_name,
                color_code,
                stock: variant.stock,
            });
    }

    Ok(rows
        .into_iter()
        .map(|p| ProductView {
            variants: by_product.remove(&p.id).unwrap_or_default(),
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            category: p.category,
            created_at: p.created_at,
        })
        .collect())
}

#[derive(Clone)]
pub struct DieselCatalogRepository {
    pool: DbPool,
}

impl DieselCatalogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CatalogRepository for DieselCatalogRepository {
    fn create(&self, product: NewProductInput) -> Result<Uuid, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let product_id = Uuid::new_v4();
            diesel::insert_into(products::table)
                .values(&NewProductRow {
                    id: product_id,
                    name: product.name,
                    description: product.description,
                    price: product.price,
                    category: product.category,
                })
                .execute(conn)?;

            for variant in &product.variants {
                let size_id = size_id(conn, &variant.size)?;
                let color_name = variant.color_name.as_deref().unwrap_or(&variant.color_code);
                let color_id = color_id(conn, &variant.color_code, color_name)?;

                diesel::insert_into(product_variants::table)
                    .values(&NewVariantRow {
                        id: Uuid::new_v4(),
                        product_id,
                        size_id,
                        color_id,
                        stock: variant.stock,
                    })
                    .execute(conn)
                    .map_err(|e| match e {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            DomainError::invalid(format!(
                                "variant {} / {} listed twice",
                                variant.size, variant.color_code
                            ))
                        }
                        other => other.into(),
                    })?;
            }

            Ok(product_id)
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<ProductView>, DomainError> {
        let mut conn = self.pool.get()?;

        let product = products::table
            .filter(products::id.eq(id))
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(product) = product else {
            return Ok(None);
        };

        Ok(with_variants(&mut conn, vec![product])?.pop())
    }

    fn list(&self, sort: ProductSort) -> Result<Vec<ProductView>, DomainError> {
        let mut conn = self.pool.get()?;

        let query = products::table
            .select(ProductRow::as_select())
            .into_boxed();
        let query = match sort {
            ProductSort::Newest => query.order(products::created_at.desc()),
            ProductSort::PriceLow => {
                query.order((products::price.asc(), products::created_at.desc()))
            }
            ProductSort::PriceHigh => {
                query.order((products::price.desc(), products::created_at.desc()))
            }
        };
        let rows = query.load(&mut conn)?;

        with_variants(&mut conn, rows)
    }
}
