use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::users::models::{AssignedArea, User};

/// User profile as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Stored role value (`admin`, `citizen`, `collector`)
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_area: Option<AssignedArea>,
    pub total_pickups: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(user: User) -> Self {
        let assigned_area = user.assigned_area();
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role,
            assigned_area,
            total_pickups: user.total_pickups,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Request body for updating the caller's own name and email
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
}

/// Query params for listing collectors
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListCollectorsQuery {
    /// Only collectors assigned to this city
    pub city: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_update_rules() {
        let ok = UpdateProfileDto {
            name: "Asha Patil".to_string(),
            email: "asha@example.org".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad_email = UpdateProfileDto {
            email: "asha-at-example".to_string(),
            ..ok.clone()
        };
        assert!(bad_email.validate().is_err());

        let empty_name = UpdateProfileDto {
            name: String::new(),
            ..ok
        };
        assert!(empty_name.validate().is_err());
    }
}
