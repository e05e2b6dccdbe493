use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::constants::{ROLE_ADMIN, ROLE_CITIZEN, ROLE_COLLECTOR};

/// Roles recognised by the lifecycle guards.
///
/// The `users.role` column is free text; values outside this set are kept
/// as-is and treated as an unknown role (no access).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Citizen,
    Collector,
}

impl UserRole {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            ROLE_ADMIN => Some(UserRole::Admin),
            ROLE_CITIZEN => Some(UserRole::Citizen),
            ROLE_COLLECTOR => Some(UserRole::Collector),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::Citizen => ROLE_CITIZEN,
            UserRole::Collector => ROLE_COLLECTOR,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// City/state a collector works in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssignedArea {
    pub city: String,
    pub state: String,
}

/// Database model for user
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub assigned_city: Option<String>,
    pub assigned_state: Option<String>,
    pub total_pickups: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Option<UserRole> {
        UserRole::parse(&self.role)
    }

    pub fn is_collector(&self) -> bool {
        self.role() == Some(UserRole::Collector)
    }

    pub fn assigned_area(&self) -> Option<AssignedArea> {
        match (&self.assigned_city, &self.assigned_state) {
            (Some(city), Some(state)) => Some(AssignedArea {
                city: city.clone(),
                state: state.clone(),
            }),
            _ => None,
        }
    }
}
