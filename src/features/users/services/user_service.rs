use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use super::UserDirectory;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::lifecycle::Actor;
use crate::features::users::dtos::{UpdateProfileDto, UserResponseDto};
use crate::features::users::models::{User, UserRole};

/// Service resolving authenticated callers into users and actors
pub struct UserService {
    directory: Arc<dyn UserDirectory>,
}

impl UserService {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// Load the stored user behind a validated token
    pub async fn current_user(&self, auth: &AuthenticatedUser) -> Result<User> {
        self.directory
            .find_by_id(auth.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn actor(&self, auth: &AuthenticatedUser) -> Result<Actor> {
        let user = self.current_user(auth).await?;
        if user.role().is_none() {
            tracing::warn!(user_id = %user.id, role = %user.role, "User has an unknown role");
        }
        Ok(Actor::from(&user))
    }

    pub async fn profile(&self, auth: &AuthenticatedUser) -> Result<UserResponseDto> {
        Ok(self.current_user(auth).await?.into())
    }

    /// Change the caller's name and email; the email must not belong to
    /// another user
    pub async fn update_profile(
        &self,
        auth: &AuthenticatedUser,
        dto: UpdateProfileDto,
    ) -> Result<UserResponseDto> {
        let dto = UpdateProfileDto {
            name: dto.name.trim().to_string(),
            email: dto.email.trim().to_string(),
        };
        if dto.name.is_empty() || dto.email.is_empty() {
            return Err(AppError::Validation(
                "Please provide all required fields".to_string(),
            ));
        }
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let (name, email) = (dto.name.as_str(), dto.email.as_str());

        let user = self.current_user(auth).await?;
        if email != user.email {
            if let Some(other) = self.directory.find_by_email(email).await? {
                if other.id != user.id {
                    return Err(AppError::BadRequest("Email is already taken".to_string()));
                }
            }
        }

        let updated = self
            .directory
            .update_profile(user.id, name, email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        tracing::info!(user_id = %updated.id, "Updated user profile");

        Ok(updated.into())
    }

    /// Assignment candidate lookup; role is checked by the lifecycle guard
    pub async fn find_candidate(&self, id: Uuid) -> Result<Option<User>> {
        self.directory.find_by_id(id).await
    }

    pub async fn list_collectors(
        &self,
        actor: &Actor,
        city: Option<String>,
    ) -> Result<Vec<UserResponseDto>> {
        if !matches!(actor.role, Some(UserRole::Admin | UserRole::Collector)) {
            return Err(AppError::Forbidden(
                "Only admins and collectors can list collectors".to_string(),
            ));
        }

        let city = city.filter(|c| !c.trim().is_empty());
        let collectors = self.directory.list_collectors(city.as_deref()).await?;

        Ok(collectors.into_iter().map(Into::into).collect())
    }

    /// Add one completed pickup to a collector's lifetime counter
    pub async fn credit_completed_pickup(&self, collector_id: Uuid) -> Result<()> {
        self.directory.increment_total_pickups(collector_id).await?;
        tracing::info!(collector_id = %collector_id, "Credited completed pickup");
        Ok(())
    }

    pub async fn count_by_role(&self) -> Result<Vec<(String, i64)>> {
        self.directory.count_by_role().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{fixtures, InMemoryUserDirectory};

    fn service(users: Vec<User>) -> (UserService, Arc<InMemoryUserDirectory>) {
        let directory = Arc::new(InMemoryUserDirectory::new(users));
        (UserService::new(directory.clone()), directory)
    }

    fn auth(user: &User) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: user.id,
            email: Some(user.email.clone()),
        }
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let (service, _) = service(vec![]);
        let ghost = fixtures::citizen();

        let err = service.actor(&auth(&ghost)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "User not found"));
    }

    #[tokio::test]
    async fn test_actor_carries_role_and_city() {
        let collector = fixtures::collector("Pune");
        let (service, _) = service(vec![collector.clone()]);

        let actor = service.actor(&auth(&collector)).await.unwrap();
        assert_eq!(actor.role, Some(UserRole::Collector));
        assert_eq!(actor.assigned_city.as_deref(), Some("Pune"));
    }

    #[tokio::test]
    async fn test_citizen_cannot_list_collectors() {
        let citizen = fixtures::citizen();
        let (service, _) = service(vec![citizen.clone()]);

        let err = service
            .list_collectors(&Actor::from(&citizen), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_list_collectors_by_city() {
        let admin = fixtures::admin();
        let pune = fixtures::collector("Pune");
        let mumbai = fixtures::collector("Mumbai");
        let (service, _) = service(vec![admin.clone(), pune.clone(), mumbai]);

        let all = service
            .list_collectors(&Actor::from(&admin), None)
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let in_pune = service
            .list_collectors(&Actor::from(&admin), Some("Pune".to_string()))
            .await
            .unwrap();
        assert_eq!(in_pune.len(), 1);
        assert_eq!(in_pune[0].id, pune.id);
    }

    fn profile(name: &str, email: &str) -> UpdateProfileDto {
        UpdateProfileDto {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_update_profile_changes_name_and_email() {
        let citizen = fixtures::citizen();
        let (service, directory) = service(vec![citizen.clone()]);

        let updated = service
            .update_profile(&auth(&citizen), profile("  Meera Joshi ", "meera@wastex.in"))
            .await
            .unwrap();

        assert_eq!(updated.name, "Meera Joshi");
        let stored = directory.get(citizen.id).unwrap();
        assert_eq!(stored.email, "meera@wastex.in");
    }

    #[tokio::test]
    async fn test_update_profile_rejects_taken_email() {
        let citizen = fixtures::citizen();
        let other = fixtures::citizen();
        let (service, directory) = service(vec![citizen.clone(), other.clone()]);

        let err = service
            .update_profile(&auth(&citizen), profile("Meera", &other.email))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(msg) if msg == "Email is already taken"));
        assert_eq!(directory.get(citizen.id).unwrap().email, citizen.email);
    }

    #[tokio::test]
    async fn test_update_profile_keeps_own_email() {
        let citizen = fixtures::citizen();
        let (service, _) = service(vec![citizen.clone()]);

        let updated = service
            .update_profile(&auth(&citizen), profile("New Name", &citizen.email))
            .await
            .unwrap();
        assert_eq!(updated.email, citizen.email);
    }

    #[tokio::test]
    async fn test_update_profile_requires_fields() {
        let citizen = fixtures::citizen();
        let (service, _) = service(vec![citizen.clone()]);

        let err = service
            .update_profile(&auth(&citizen), profile("   ", "meera@wastex.in"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "Please provide all required fields"));
    }

    #[tokio::test]
    async fn test_credit_increments_once() {
        let collector = fixtures::collector("Pune");
        let (service, directory) = service(vec![collector.clone()]);

        service.credit_completed_pickup(collector.id).await.unwrap();

        assert_eq!(directory.get(collector.id).unwrap().total_pickups, 1);
    }
}
