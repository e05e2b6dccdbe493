use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::lifecycle::{ScopeColumns, ScopedQuery, UpdatePlan};
use crate::features::litter_reports::models::{LitterReport, LitterReportStatus, NewLitterReport};
use crate::shared::types::PaginationQuery;

const REPORT_COLUMNS: ScopeColumns = ScopeColumns {
    owner: "reported_by",
    city: "city",
    severity: Some("severity"),
};

/// Storage of litter reports
#[async_trait]
pub trait LitterReportRepository: Send + Sync {
    async fn create(&self, report: NewLitterReport) -> Result<LitterReport>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<LitterReport>>;

    async fn list(
        &self,
        scope: &ScopedQuery<LitterReportStatus>,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<LitterReport>, i64)>;

    async fn apply(
        &self,
        id: Uuid,
        plan: &UpdatePlan<LitterReportStatus>,
    ) -> Result<Option<LitterReport>>;

    async fn count_by_status(&self) -> Result<Vec<(LitterReportStatus, i64)>>;
}

pub struct PgLitterReportRepository {
    pool: PgPool,
}

impl PgLitterReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LitterReportRepository for PgLitterReportRepository {
    async fn create(&self, report: NewLitterReport) -> Result<LitterReport> {
        sqlx::query_as::<_, LitterReport>(
            r#"
            INSERT INTO litter_reports (
                id, reported_by, address, city, state, pincode, latitude, longitude,
                description, waste_type, severity, images
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(report.reported_by)
        .bind(&report.address)
        .bind(&report.city)
        .bind(&report.state)
        .bind(&report.pincode)
        .bind(report.latitude)
        .bind(report.longitude)
        .bind(&report.description)
        .bind(report.waste_type)
        .bind(report.severity)
        .bind(&report.images)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create litter report: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<LitterReport>> {
        sqlx::query_as::<_, LitterReport>("SELECT * FROM litter_reports WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch litter report {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn list(
        &self,
        scope: &ScopedQuery<LitterReportStatus>,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<LitterReport>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM litter_reports");
        scope.push_where(&mut count, &REPORT_COLUMNS);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count litter reports: {:?}", e);
                AppError::Database(e)
            })?;

        let mut select = QueryBuilder::<Postgres>::new("SELECT * FROM litter_reports");
        scope.push_where(&mut select, &REPORT_COLUMNS);
        select.push(" ORDER BY created_at DESC LIMIT ");
        select.push_bind(pagination.limit());
        select.push(" OFFSET ");
        select.push_bind(pagination.offset());

        let reports = select
            .build_query_as::<LitterReport>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list litter reports: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((reports, total))
    }

    async fn apply(
        &self,
        id: Uuid,
        plan: &UpdatePlan<LitterReportStatus>,
    ) -> Result<Option<LitterReport>> {
        sqlx::query_as::<_, LitterReport>(
            r#"
            UPDATE litter_reports
            SET status = COALESCE($2, status),
                assigned_to = COALESCE($3, assigned_to),
                resolved_at = COALESCE($4, resolved_at),
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
            tracing::error!("Failed to update litter report {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn count_by_status(&self) -> Result<Vec<(LitterReportStatus, i64)>> {
        sqlx::query_as::<_, (LitterReportStatus, i64)>(
            "SELECT status, COUNT(*) FROM litter_reports GROUP BY status ORDER BY status",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count litter reports by status: {:?}", e);
            AppError::Database(e)
        })
    }
}
