use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Number of rows sharing one role or status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CountDto {
    pub key: String,
    pub count: i64,
}

impl CountDto {
    pub fn new(key: impl Into<String>, count: i64) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }
}

/// Dashboard counters for admins
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatsDto {
    pub total_users: i64,
    pub users_by_role: Vec<CountDto>,
    pub total_pickups: i64,
    /// Every pickup status, zero when unused
    pub pickups_by_status: Vec<CountDto>,
    pub total_reports: i64,
    /// Every litter report status, zero when unused
    pub reports_by_status: Vec<CountDto>,
}
