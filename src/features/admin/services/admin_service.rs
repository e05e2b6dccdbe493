use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::{AdminStatsDto, CountDto};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::lifecycle::Lifecycle;
use crate::features::litter_reports::models::LitterReportStatus;
use crate::features::litter_reports::LitterReportService;
use crate::features::users::UserService;
use crate::features::waste_pickups::models::PickupStatus;
use crate::features::waste_pickups::WastePickupService;

/// Service for admin-only aggregate queries
pub struct AdminService {
    users: Arc<UserService>,
    pickups: Arc<WastePickupService>,
    reports: Arc<LitterReportService>,
}

/// One entry per status in table order, filling gaps with zero
fn per_status<S: Lifecycle>(all: &[S], counts: &[(S, i64)]) -> Vec<CountDto> {
    all.iter()
        .map(|status| {
            let count = counts
                .iter()
                .find(|(s, _)| s == status)
                .map_or(0, |(_, n)| *n);
            CountDto::new(status.to_string(), count)
        })
        .collect()
}

impl AdminService {
    pub fn new(
        users: Arc<UserService>,
        pickups: Arc<WastePickupService>,
        reports: Arc<LitterReportService>,
    ) -> Self {
        Self {
            users,
            pickups,
            reports,
        }
    }

    pub async fn stats(&self, auth: &AuthenticatedUser) -> Result<AdminStatsDto> {
        let actor = self.users.actor(auth).await?;
        if !actor.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        let roles = self.users.count_by_role().await?;
        let pickups = self.pickups.count_by_status().await?;
        let reports = self.reports.count_by_status().await?;

        Ok(AdminStatsDto {
            total_users: roles.iter().map(|(_, n)| n).sum(),
            users_by_role: roles
                .into_iter()
                .map(|(role, count)| CountDto::new(role, count))
                .collect(),
            total_pickups: pickups.iter().map(|(_, n)| n).sum(),
            pickups_by_status: per_status(&PickupStatus::ALL, &pickups),
            total_reports: reports.iter().map(|(_, n)| n).sum(),
            reports_by_status: per_status(&LitterReportStatus::ALL, &reports),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::models::User;
    use crate::shared::test_helpers::{
        fixtures, InMemoryLitterReportRepository, InMemoryUserDirectory,
        InMemoryWastePickupRepository,
    };

    fn service(
        users: Vec<User>,
        pickups: Arc<InMemoryWastePickupRepository>,
    ) -> AdminService {
        let users = Arc::new(UserService::new(Arc::new(InMemoryUserDirectory::new(users))));
        AdminService::new(
            users.clone(),
            Arc::new(WastePickupService::new(pickups, users.clone())),
            Arc::new(LitterReportService::new(
                Arc::new(InMemoryLitterReportRepository::default()),
                users,
            )),
        )
    }

    #[test]
    fn test_per_status_fills_gaps() {
        let counts = per_status(
            &PickupStatus::ALL,
            &[(PickupStatus::Completed, 4), (PickupStatus::Pending, 2)],
        );

        assert_eq!(counts.len(), 5);
        assert_eq!(counts[0], CountDto::new("pending", 2));
        assert_eq!(counts[1], CountDto::new("scheduled", 0));
        assert_eq!(counts[3], CountDto::new("completed", 4));
    }

    #[tokio::test]
    async fn test_stats_require_admin() {
        let collector = fixtures::collector("Pune");
        let service = service(vec![collector.clone()], Arc::default());

        let err = service.stats(&fixtures::auth(&collector)).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_stats_totals() {
        let admin = fixtures::admin();
        let citizen = fixtures::citizen();
        let pickups = Arc::new(InMemoryWastePickupRepository::default());
        pickups.insert(fixtures::pickup(citizen.id, "Pune"));
        pickups.insert(fixtures::pickup(citizen.id, "Delhi"));

        let service = service(vec![admin.clone(), citizen], pickups);
        let stats = service.stats(&fixtures::auth(&admin)).await.unwrap();

        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.total_pickups, 2);
        assert_eq!(stats.pickups_by_status[0], CountDto::new("pending", 2));
        assert_eq!(stats.total_reports, 0);
    }
}
