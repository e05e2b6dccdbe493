use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::lifecycle::{guard, ListFilter, ScopedQuery, UpdatePlan, UpdateRequest};
use crate::features::users::models::UserRole;
use crate::features::users::UserService;
use crate::features::waste_pickups::dtos::{
    CreateWastePickupDto, ListWastePickupsQuery, UpdateWastePickupDto, WastePickupResponseDto,
};
use crate::features::waste_pickups::models::{PickupStatus, WastePickup};
use crate::features::waste_pickups::repositories::WastePickupRepository;
use crate::shared::types::Meta;

/// Service for waste pickup requests
pub struct WastePickupService {
    repository: Arc<dyn WastePickupRepository>,
    users: Arc<UserService>,
}

impl WastePickupService {
    pub fn new(repository: Arc<dyn WastePickupRepository>, users: Arc<UserService>) -> Self {
        Self { repository, users }
    }

    /// List pickups visible to the caller, newest first
    pub async fn list(
        &self,
        auth: &AuthenticatedUser,
        query: ListWastePickupsQuery,
    ) -> Result<(Vec<WastePickupResponseDto>, Meta)> {
        let actor = self.users.actor(auth).await?;
        let pagination = query.pagination();
        let scope = ScopedQuery::for_actor(
            &actor,
            ListFilter {
                status: query.status,
                ..Default::default()
            },
        )?;

        let (pickups, total) = self.repository.list(&scope, &pagination).await?;
        let items = pickups.into_iter().map(Into::into).collect();

        Ok((items, Meta::paginated(total, &pagination)))
    }

    /// Schedule a new pickup; citizens only
    pub async fn create(
        &self,
        auth: &AuthenticatedUser,
        dto: CreateWastePickupDto,
    ) -> Result<WastePickupResponseDto> {
        let actor = self.users.actor(auth).await?;
        if actor.role != Some(UserRole::Citizen) {
            return Err(AppError::Forbidden(
                "Only citizens can create waste pickup requests".to_string(),
            ));
        }

        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let new = dto.into_new(actor.id)?;
        let pickup = self.repository.create(new).await?;
        tracing::info!(pickup_id = %pickup.id, user_id = %actor.id, "Created waste pickup request");

        Ok(pickup.into())
    }

    pub async fn get(&self, auth: &AuthenticatedUser, id: Uuid) -> Result<WastePickupResponseDto> {
        let actor = self.users.actor(auth).await?;
        let pickup = self.find(id).await?;
        guard::ensure_visible(&actor, &pickup)?;

        Ok(pickup.into())
    }

    /// Apply a status transition and/or assignment
    pub async fn update(
        &self,
        auth: &AuthenticatedUser,
        id: Uuid,
        dto: UpdateWastePickupDto,
    ) -> Result<WastePickupResponseDto> {
        let actor = self.users.actor(auth).await?;
        let pickup = self.find(id).await?;
        let request = UpdateRequest::from(dto);

        let candidate = match request.assigned_to {
            Some(target) => self.users.find_candidate(target).await?,
            None => None,
        };

        let plan = guard::plan_update(&actor, &pickup, &request, candidate.as_ref(), Utc::now())?;
        if plan.is_empty() {
            return Ok(pickup.into());
        }

        let updated = self.write(id, &plan).await?;
        tracing::info!(
            pickup_id = %id,
            actor_id = %actor.id,
            from = %pickup.status,
            to = %updated.status,
            assigned_to = ?updated.assigned_to,
            "Updated waste pickup"
        );

        Ok(updated.into())
    }

    /// Cancel a pending or scheduled pickup; owner or admin only
    pub async fn cancel(&self, auth: &AuthenticatedUser, id: Uuid) -> Result<WastePickupResponseDto> {
        let actor = self.users.actor(auth).await?;
        let pickup = self.find(id).await?;
        let plan = guard::plan_withdrawal(&actor, &pickup)?;

        let updated = self.write(id, &plan).await?;
        tracing::info!(pickup_id = %id, actor_id = %actor.id, "Cancelled waste pickup");

        Ok(updated.into())
    }

    pub async fn count_by_status(&self) -> Result<Vec<(PickupStatus, i64)>> {
        self.repository.count_by_status().await
    }

    async fn find(&self, id: Uuid) -> Result<WastePickup> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Waste pickup request not found".to_string()))
    }

    async fn write(&self, id: Uuid, plan: &UpdatePlan<PickupStatus>) -> Result<WastePickup> {
        let updated = self
            .repository
            .apply(id, plan)
            .await?
            .ok_or_else(|| AppError::NotFound("Waste pickup request not found".to_string()))?;

        if let Some(collector_id) = plan.credit_collector {
            self.users.credit_completed_pickup(collector_id).await?;
        }

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::models::User;
    use crate::shared::test_helpers::{
        fixtures, InMemoryUserDirectory, InMemoryWastePickupRepository,
    };

    struct Harness {
        service: WastePickupService,
        directory: Arc<InMemoryUserDirectory>,
        repository: Arc<InMemoryWastePickupRepository>,
    }

    fn harness(users: Vec<User>) -> Harness {
        let directory = Arc::new(InMemoryUserDirectory::new(users));
        let repository = Arc::new(InMemoryWastePickupRepository::default());
        let users = Arc::new(UserService::new(directory.clone()));
        Harness {
            service: WastePickupService::new(repository.clone(), users),
            directory,
            repository,
        }
    }

    fn status(status: PickupStatus) -> UpdateWastePickupDto {
        UpdateWastePickupDto {
            status: Some(status),
            assigned_to: None,
        }
    }

    #[tokio::test]
    async fn test_only_citizens_create() {
        let collector = fixtures::collector("Pune");
        let h = harness(vec![collector.clone()]);

        let err = h
            .service
            .create(&fixtures::auth(&collector), fixtures::pickup_body("Pune"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_role_is_checked_before_body_validation() {
        let collector = fixtures::collector("Pune");
        let h = harness(vec![collector.clone()]);
        let mut body = fixtures::pickup_body("Pune");
        body.quantity = Some(-3.0);

        let err = h
            .service
            .create(&fixtures::auth(&collector), body)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_citizen_invalid_quantity_is_rejected() {
        let citizen = fixtures::citizen();
        let h = harness(vec![citizen.clone()]);
        let mut body = fixtures::pickup_body("Pune");
        body.quantity = Some(0.0);

        let err = h
            .service
            .create(&fixtures::auth(&citizen), body)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(h.repository.len(), 0);
    }

    #[tokio::test]
    async fn test_created_pickup_starts_pending() {
        let citizen = fixtures::citizen();
        let h = harness(vec![citizen.clone()]);

        let created = h
            .service
            .create(&fixtures::auth(&citizen), fixtures::pickup_body("Pune"))
            .await
            .unwrap();

        assert_eq!(created.status, PickupStatus::Pending);
        assert_eq!(created.user_id, citizen.id);
        assert_eq!(created.assigned_to, None);
    }

    #[tokio::test]
    async fn test_full_lifecycle_credits_collector_once() {
        let citizen = fixtures::citizen();
        let admin = fixtures::admin();
        let collector = fixtures::collector("Pune");
        let h = harness(vec![citizen.clone(), admin.clone(), collector.clone()]);
        let admin_auth = fixtures::auth(&admin);

        let pickup = h.repository.insert(fixtures::pickup(citizen.id, "Pune"));

        let scheduled = h
            .service
            .update(
                &admin_auth,
                pickup.id,
                UpdateWastePickupDto {
                    status: None,
                    assigned_to: Some(collector.id),
                },
            )
            .await
            .unwrap();
        assert_eq!(scheduled.status, PickupStatus::Scheduled);
        assert_eq!(scheduled.assigned_to, Some(collector.id));

        let collector_auth = fixtures::auth(&collector);
        h.service
            .update(&collector_auth, pickup.id, status(PickupStatus::InProgress))
            .await
            .unwrap();
        let completed = h
            .service
            .update(&collector_auth, pickup.id, status(PickupStatus::Completed))
            .await
            .unwrap();

        assert_eq!(completed.status, PickupStatus::Completed);
        assert!(completed.completed_at.is_some());
        assert_eq!(h.directory.get(collector.id).unwrap().total_pickups, 1);

        let again = h
            .service
            .update(&admin_auth, pickup.id, status(PickupStatus::Completed))
            .await
            .unwrap_err();
        assert!(matches!(again, AppError::InvalidTransition(_)));
        assert_eq!(h.directory.get(collector.id).unwrap().total_pickups, 1);
    }

    #[tokio::test]
    async fn test_invalid_transition_leaves_pickup_unchanged() {
        let citizen = fixtures::citizen();
        let admin = fixtures::admin();
        let h = harness(vec![citizen.clone(), admin.clone()]);
        let pickup = h.repository.insert(fixtures::pickup(citizen.id, "Pune"));

        let err = h
            .service
            .update(&fixtures::auth(&admin), pickup.id, status(PickupStatus::Completed))
            .await
            .unwrap_err();

        assert!(
            matches!(err, AppError::InvalidTransition(msg) if msg == "Cannot transition from pending to completed")
        );
        let stored = h.repository.get(pickup.id).unwrap();
        assert_eq!(stored.status, PickupStatus::Pending);
        assert_eq!(stored.completed_at, None);
    }

    #[tokio::test]
    async fn test_assigning_non_collector_fails() {
        let citizen = fixtures::citizen();
        let admin = fixtures::admin();
        let h = harness(vec![citizen.clone(), admin.clone()]);
        let pickup = h.repository.insert(fixtures::pickup(citizen.id, "Pune"));

        let err = h
            .service
            .update(
                &fixtures::auth(&admin),
                pickup.id,
                UpdateWastePickupDto {
                    status: None,
                    assigned_to: Some(citizen.id),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidCollector(_)));
    }

    #[tokio::test]
    async fn test_cancel_rules() {
        let owner = fixtures::citizen();
        let stranger = fixtures::citizen();
        let h = harness(vec![owner.clone(), stranger.clone()]);
        let pickup = h.repository.insert(fixtures::pickup(owner.id, "Pune"));

        let err = h
            .service
            .cancel(&fixtures::auth(&stranger), pickup.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let cancelled = h
            .service
            .cancel(&fixtures::auth(&owner), pickup.id)
            .await
            .unwrap();
        assert_eq!(cancelled.status, PickupStatus::Cancelled);

        let err = h
            .service
            .cancel(&fixtures::auth(&owner), pickup.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));
    }

    #[tokio::test]
    async fn test_missing_pickup_is_not_found() {
        let admin = fixtures::admin();
        let h = harness(vec![admin.clone()]);

        let err = h
            .service
            .get(&fixtures::auth(&admin), Uuid::now_v7())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_collector_list_is_scoped() {
        let citizen = fixtures::citizen();
        let collector = fixtures::collector("Pune");
        let h = harness(vec![citizen.clone(), collector.clone()]);

        h.repository.insert(fixtures::pickup(citizen.id, "Pune"));
        h.repository.insert(fixtures::pickup(citizen.id, "Mumbai"));
        let mut assigned = fixtures::pickup(citizen.id, "Mumbai");
        assigned.status = PickupStatus::Scheduled;
        assigned.assigned_to = Some(collector.id);
        h.repository.insert(assigned);

        let (items, meta) = h
            .service
            .list(
                &fixtures::auth(&collector),
                ListWastePickupsQuery {
                    status: None,
                    page: 1,
                    limit: 10,
                },
            )
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(meta.total, 2);
        assert!(items
            .iter()
            .all(|p| p.assigned_to == Some(collector.id) || p.address.city.as_deref() == Some("Pune")));
    }
}
