use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::lifecycle::Scoped;
use crate::shared::waste::WasteType;

/// Pickup status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "pickup_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PickupStatus {
    Pending,
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl PickupStatus {
    pub const ALL: [PickupStatus; 5] = [
        PickupStatus::Pending,
        PickupStatus::Scheduled,
        PickupStatus::InProgress,
        PickupStatus::Completed,
        PickupStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PickupStatus::Pending => "pending",
            PickupStatus::Scheduled => "scheduled",
            PickupStatus::InProgress => "in-progress",
            PickupStatus::Completed => "completed",
            PickupStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for PickupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "quantity_unit", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QuantityUnit {
    Kg,
    Pieces,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "time_slot")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

/// Database model for waste pickup
#[derive(Debug, Clone, FromRow)]
pub struct WastePickup {
    pub id: Uuid,
    pub user_id: Uuid,
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub landmark: Option<String>,
    pub waste_type: WasteType,
    pub quantity: f64,
    pub unit: QuantityUnit,
    pub preferred_date: NaiveDate,
    pub preferred_time_slot: TimeSlot,
    pub status: PickupStatus,
    pub notes: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Scoped for WastePickup {
    type Status = PickupStatus;

    fn owner_id(&self) -> Uuid {
        self.user_id
    }

    fn assigned_to(&self) -> Option<Uuid> {
        self.assigned_to
    }

    fn status(&self) -> PickupStatus {
        self.status
    }

    fn city(&self) -> &str {
        &self.city
    }
}

/// Data for creating a new pickup request
#[derive(Debug, Clone)]
pub struct NewWastePickup {
    pub user_id: Uuid,
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub landmark: Option<String>,
    pub waste_type: WasteType,
    pub quantity: f64,
    pub unit: QuantityUnit,
    pub preferred_date: NaiveDate,
    pub preferred_time_slot: TimeSlot,
    pub notes: Option<String>,
}
