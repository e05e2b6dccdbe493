use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::users::models::User;
use crate::shared::constants::ROLE_COLLECTOR;

/// Lookup of users, their role and assigned area
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Overwrite name and email; `None` if the user vanished
    async fn update_profile(&self, id: Uuid, name: &str, email: &str) -> Result<Option<User>>;

    /// Collectors, optionally restricted to one assigned city
    async fn list_collectors(&self, city: Option<&str>) -> Result<Vec<User>>;

    async fn increment_total_pickups(&self, collector_id: Uuid) -> Result<()>;

    /// `(role, count)` for every stored role value
    async fn count_by_role(&self) -> Result<Vec<(String, i64)>>;
}

const USER_COLUMNS: &str = "id, name, email, phone, role, assigned_city, assigned_state, \
                            total_pickups, created_at, updated_at";

pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch user {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch user by email: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn update_profile(&self, id: Uuid, name: &str, email: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET name = $2, email = $3, updated_at = NOW() WHERE id = $1 \
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(id)
        .bind(name)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            let taken = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());
            if taken {
                AppError::BadRequest("Email is already taken".to_string())
            } else {
                tracing::error!("Failed to update profile of user {}: {:?}", id, e);
                AppError::Database(e)
            }
        })
    }

    async fn list_collectors(&self, city: Option<&str>) -> Result<Vec<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE role = $1 AND ($2::TEXT IS NULL OR assigned_city = $2) \
             ORDER BY name",
            USER_COLUMNS
        ))
        .bind(ROLE_COLLECTOR)
        .bind(city)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list collectors: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn increment_total_pickups(&self, collector_id: Uuid) -> Result<()> {
        sqlx::query(
            "UPDATE users SET total_pickups = total_pickups + 1, updated_at = NOW() WHERE id = $1",
        )
        .bind(collector_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to increment pickups for collector {}: {:?}",
                collector_id,
                e
            );
            AppError::Database(e)
        })?;

        Ok(())
    }

    async fn count_by_role(&self) -> Result<Vec<(String, i64)>> {
        sqlx::query_as::<_, (String, i64)>(
            "SELECT role, COUNT(*) FROM users GROUP BY role ORDER BY role",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count users by role: {:?}", e);
            AppError::Database(e)
        })
    }
}
