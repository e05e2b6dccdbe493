use uuid::Uuid;

use crate::features::users::models::{User, UserRole};

/// The user a guarded operation is performed on behalf of.
///
/// `role` is `None` when the stored role is not one the guards know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: Option<UserRole>,
    pub assigned_city: Option<String>,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == Some(UserRole::Admin)
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role(),
            assigned_city: user.assigned_city.clone(),
        }
    }
}
