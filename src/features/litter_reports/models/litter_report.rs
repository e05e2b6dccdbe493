use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::lifecycle::Scoped;
use crate::shared::waste::WasteType;

/// Litter report status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "litter_report_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum LitterReportStatus {
    Pending,
    Verified,
    InProgress,
    Resolved,
    Closed,
}

impl LitterReportStatus {
    pub const ALL: [LitterReportStatus; 5] = [
        LitterReportStatus::Pending,
        LitterReportStatus::Verified,
        LitterReportStatus::InProgress,
        LitterReportStatus::Resolved,
        LitterReportStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LitterReportStatus::Pending => "pending",
            LitterReportStatus::Verified => "verified",
            LitterReportStatus::InProgress => "in-progress",
            LitterReportStatus::Resolved => "resolved",
            LitterReportStatus::Closed => "closed",
        }
    }
}

impl std::fmt::Display for LitterReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report severity enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_severity")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "Low"),
            Severity::Medium => write!(f, "Medium"),
            Severity::High => write!(f, "High"),
        }
    }
}

/// Database model for litter report
#[derive(Debug, Clone, FromRow)]
pub struct LitterReport {
    pub id: Uuid,
    pub reported_by: Uuid,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: String,
    pub waste_type: WasteType,
    pub severity: Severity,
    pub status: LitterReportStatus,
    pub images: Vec<String>,
    pub assigned_to: Option<Uuid>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Scoped for LitterReport {
    type Status = LitterReportStatus;

    fn owner_id(&self) -> Uuid {
        self.reported_by
    }

    fn assigned_to(&self) -> Option<Uuid> {
        self.assigned_to
    }

    fn status(&self) -> LitterReportStatus {
        self.status
    }

    fn city(&self) -> &str {
        &self.city
    }

    fn severity(&self) -> Option<Severity> {
        Some(self.severity)
    }
}

/// Data for creating a new litter report
#[derive(Debug, Clone)]
pub struct NewLitterReport {
    pub reported_by: Uuid,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: String,
    pub waste_type: WasteType,
    pub severity: Severity,
    pub images: Vec<String>,
}
