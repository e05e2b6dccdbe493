use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::lifecycle::{guard, ScopedQuery, UpdatePlan, UpdateRequest};
use crate::features::litter_reports::dtos::{
    CreateLitterReportDto, ListLitterReportsQuery, LitterReportResponseDto, UpdateLitterReportDto,
};
use crate::features::litter_reports::models::{LitterReport, LitterReportStatus};
use crate::features::litter_reports::repositories::LitterReportRepository;
use crate::features::users::UserService;
use crate::shared::types::Meta;

/// Service for litter reports
pub struct LitterReportService {
    repository: Arc<dyn LitterReportRepository>,
    users: Arc<UserService>,
}

impl LitterReportService {
    pub fn new(repository: Arc<dyn LitterReportRepository>, users: Arc<UserService>) -> Self {
        Self { repository, users }
    }

    pub async fn list(
        &self,
        auth: &AuthenticatedUser,
        query: ListLitterReportsQuery,
    ) -> Result<(Vec<LitterReportResponseDto>, Meta)> {
        let actor = self.users.actor(auth).await?;
        let pagination = query.pagination();
        let scope = ScopedQuery::for_actor(&actor, query.filter())?;

        let (reports, total) = self.repository.list(&scope, &pagination).await?;
        let items = reports.into_iter().map(Into::into).collect();

        Ok((items, Meta::paginated(total, &pagination)))
    }

    /// File a new report; open to every authenticated user
    pub async fn create(
        &self,
        auth: &AuthenticatedUser,
        dto: CreateLitterReportDto,
    ) -> Result<LitterReportResponseDto> {
        let reporter = self.users.current_user(auth).await?;
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let new = dto.into_new(reporter.id)?;

        let report = self.repository.create(new).await?;
        tracing::info!(report_id = %report.id, user_id = %reporter.id, "Created litter report");

        Ok(report.into())
    }

    pub async fn get(&self, auth: &AuthenticatedUser, id: Uuid) -> Result<LitterReportResponseDto> {
        let actor = self.users.actor(auth).await?;
        let report = self.find(id).await?;
        guard::ensure_visible(&actor, &report)?;

        Ok(report.into())
    }

    pub async fn update(
        &self,
        auth: &AuthenticatedUser,
        id: Uuid,
        dto: UpdateLitterReportDto,
    ) -> Result<LitterReportResponseDto> {
        let actor = self.users.actor(auth).await?;
        let report = self.find(id).await?;
        let request = UpdateRequest::from(dto);

        let candidate = match request.assigned_to {
            Some(target) => self.users.find_candidate(target).await?,
            None => None,
        };

        let plan = guard::plan_update(&actor, &report, &request, candidate.as_ref(), Utc::now())?;
        if plan.is_empty() {
            return Ok(report.into());
        }

        let updated = self.write(id, &plan).await?;
        tracing::info!(
            report_id = %id,
            actor_id = %actor.id,
            from = %report.status,
            to = %updated.status,
            assigned_to = ?updated.assigned_to,
            "Updated litter report"
        );

        Ok(updated.into())
    }

    /// Close a pending or verified report; reporter or admin only
    pub async fn close(&self, auth: &AuthenticatedUser, id: Uuid) -> Result<LitterReportResponseDto> {
        let actor = self.users.actor(auth).await?;
        let report = self.find(id).await?;
        let plan = guard::plan_withdrawal(&actor, &report)?;

        let updated = self.write(id, &plan).await?;
        tracing::info!(report_id = %id, actor_id = %actor.id, "Closed litter report");

        Ok(updated.into())
    }

    pub async fn count_by_status(&self) -> Result<Vec<(LitterReportStatus, i64)>> {
        self.repository.count_by_status().await
    }

    async fn find(&self, id: Uuid) -> Result<LitterReport> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Litter report not found".to_string()))
    }

    async fn write(&self, id: Uuid, plan: &UpdatePlan<LitterReportStatus>) -> Result<LitterReport> {
        self.repository
            .apply(id, plan)
            .await?
            .ok_or_else(|| AppError::NotFound("Litter report not found".to_string()))
    }
}
