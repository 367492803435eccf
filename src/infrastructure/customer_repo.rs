use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::customer::CustomerProfile;
use crate::domain::errors::DomainError;
use crate::domain::ports::CustomerRepository;
use crate::schema::users;

use super::models::{UpsertUserRow, UserRow};

pub(crate) fn user_id_by_email(
    conn: &mut PgConnection,
    email: &str,
) -> Result<Option<Uuid>, DomainError> {
    Ok(users::table
        .filter(users::email.eq(email))
        .select(users::id)
        .first::<Uuid>(conn)
        .optional()?)
}

#[derive(Clone)]
pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CustomerRepository for DieselCustomerRepository {
    fn profile(&self, user_email: &str) -> Result<Option<CustomerProfile>, DomainError> {
        let mut conn = self.pool.get()?;

        let user = users::table
            .filter(users::email.eq(user_email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(user.map(|u| CustomerProfile {
            name: u.name,
            phone: u.phone,
            address: u.address,
            detail_address: u.detail_address,
        }))
    }

    fn save_profile(&self, user_email: &str, profile: CustomerProfile) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let row = UpsertUserRow {
            email: user_email,
            name: &profile.name,
            phone: &profile.phone,
            address: &profile.address,
            detail_address: &profile.detail_address,
        };
        diesel::insert_into(users::table)
            .values(&row)
            .on_conflict(users::email)
            .do_update()
            .set((&row, users::updated_at.eq(Utc::now())))
            .execute(&mut conn)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::DieselCustomerRepository;
    use crate::domain::customer::CustomerProfile;
    use crate::domain::ports::CustomerRepository;
    use crate::infrastructure::test_support::setup_db;

    fn profile(name: &str) -> CustomerProfile {
        CustomerProfile {
            name: name.to_string(),
            phone: "010-1234-5678".to_string(),
            address: "Seoul".to_string(),
            detail_address: "3F".to_string(),
        }
    }

    #[tokio::test]
    async fn profile_is_none_for_unknown_identity() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCustomerRepository::new(pool);

        assert!(repo
            .profile("nobody@example.com")
            .expect("lookup failed")
            .is_none());
    }

    #[tokio::test]
    async fn save_profile_creates_then_updates() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCustomerRepository::new(pool);

        repo.save_profile("minji@example.com", profile("Minji"))
            .expect("create failed");
        repo.save_profile("minji@example.com", profile("Kim Minji"))
            .expect("update failed");

        let stored = repo
            .profile("minji@example.com")
            .expect("lookup failed")
            .expect("profile should exist");
        assert_eq!(stored, profile("Kim Minji"));
    }
}
