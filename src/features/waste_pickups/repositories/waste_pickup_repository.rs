use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::lifecycle::{ScopeColumns, ScopedQuery, UpdatePlan};
use crate::features::waste_pickups::models::{NewWastePickup, PickupStatus, WastePickup};
use crate::shared::types::PaginationQuery;

const PICKUP_COLUMNS: ScopeColumns = ScopeColumns {
    owner: "user_id",
    city: "city",
    severity: None,
};

/// Storage of waste pickup requests
#[async_trait]
pub trait WastePickupRepository: Send + Sync {
    async fn create(&self, pickup: NewWastePickup) -> Result<WastePickup>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<WastePickup>>;

    /// One page of visible pickups, newest first, plus the total match count
    async fn list(
        &self,
        scope: &ScopedQuery<PickupStatus>,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<WastePickup>, i64)>;

    /// Write the planned fields; `None` if the row vanished
    async fn apply(&self, id: Uuid, plan: &UpdatePlan<PickupStatus>)
        -> Result<Option<WastePickup>>;

    async fn count_by_status(&self) -> Result<Vec<(PickupStatus, i64)>>;
}

pub struct PgWastePickupRepository {
    pool: PgPool,
}

impl PgWastePickupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WastePickupRepository for PgWastePickupRepository {
    async fn create(&self, pickup: NewWastePickup) -> Result<WastePickup> {
        sqlx::query_as::<_, WastePickup>(
            r#"
            INSERT INTO waste_pickups (
                id, user_id, street, city, state, pincode, landmark, waste_type,
                quantity, unit, preferred_date, preferred_time_slot, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(pickup.user_id)
        .bind(&pickup.street)
        .bind(&pickup.city)
        .bind(&pickup.state)
        .bind(&pickup.pincode)
        .bind(&pickup.landmark)
        .bind(pickup.waste_type)
        .bind(pickup.quantity)
        .bind(pickup.unit)
        .bind(pickup.preferred_date)
        .bind(pickup.preferred_time_slot)
        .bind(&pickup.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create waste pickup: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<WastePickup>> {
        sqlx::query_as::<_, WastePickup>("SELECT * FROM waste_pickups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch waste pickup {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn list(
        &self,
        scope: &ScopedQuery<PickupStatus>,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<WastePickup>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM waste_pickups");
        scope.push_where(&mut count, &PICKUP_COLUMNS);
        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count waste pickups: {:?}", e);
                AppError::Database(e)
            })?;

        let mut select = QueryBuilder::<Postgres>::new("SELECT * FROM waste_pickups");
        scope.push_where(&mut select, &PICKUP_COLUMNS);
        select.push(" ORDER BY created_at DESC LIMIT ");
        select.push_bind(pagination.limit());
        select.push(" OFFSET ");
        select.push_bind(pagination.offset());

        let pickups = select
            .build_query_as::<WastePickup>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list waste pickups: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((pickups, total))
    }

    async fn apply(
        &self,
        id: Uuid,
        plan: &UpdatePlan<PickupStatus>,
    ) -> Result<Option<WastePickup>> {
        sqlx::query_as::<_, WastePickup>(
            r#"
            UPDATE waste_pickups
            SET status = COALESCE($2, status),
                assigned_to = COALESCE($3, assigned_to),
                completed_at = COALESCE($4, completed_at),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(plan.status)
        .bind(plan.assigned_to)
        .bind(plan.finished_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update waste pickup {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn count_by_status(&self) -> Result<Vec<(PickupStatus, i64)>> {
        sqlx::query_as::<_, (PickupStatus, i64)>(
            "SELECT status, COUNT(*) FROM waste_pickups GROUP BY status ORDER BY status",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count waste pickups by status: {:?}", e);
            AppError::Database(e)
        })
    }
}
