use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::lifecycle::UpdateRequest;
use crate::features::waste_pickups::models::{
    NewWastePickup, PickupStatus, QuantityUnit, TimeSlot, WastePickup,
};
use crate::shared::constants::MAX_FREE_TEXT_LENGTH;
use crate::shared::types::{default_limit, default_page, PaginationQuery};
use crate::shared::waste::WasteType;

/// Pickup address, used both in requests and responses
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PickupAddressDto {
    #[validate(length(max = 255, message = "Street must not exceed 255 characters"))]
    pub street: Option<String>,
    #[validate(length(max = 100, message = "City must not exceed 100 characters"))]
    pub city: Option<String>,
    #[validate(length(max = 100, message = "State must not exceed 100 characters"))]
    pub state: Option<String>,
    #[validate(length(max = 20, message = "Pincode must not exceed 20 characters"))]
    pub pincode: Option<String>,
    #[validate(length(max = 255, message = "Landmark must not exceed 255 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
}

/// Request DTO for scheduling a pickup.
///
/// Required fields are optional here so every missing one can be reported
/// by name instead of failing on the first.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWastePickupDto {
    #[validate(nested)]
    pub address: Option<PickupAddressDto>,
    pub waste_type: Option<WasteType>,
    #[validate(range(exclusive_min = 0.0, message = "Quantity must be greater than 0"))]
    pub quantity: Option<f64>,
    pub unit: Option<QuantityUnit>,
    pub preferred_date: Option<NaiveDate>,
    pub preferred_time_slot: Option<TimeSlot>,
    #[validate(length(max = MAX_FREE_TEXT_LENGTH, message = "Notes are too long"))]
    pub notes: Option<String>,
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

impl CreateWastePickupDto {
    /// Check required fields and build the insert for `user_id`
    pub fn into_new(self, user_id: Uuid) -> Result<NewWastePickup> {
        let mut missing = Vec::new();
        if self.address.is_none() {
            missing.push("address");
        }
        if self.waste_type.is_none() {
            missing.push("wasteType");
        }
        if self.quantity.is_none() {
            missing.push("quantity");
        }
        if self.unit.is_none() {
            missing.push("unit");
        }
        if self.preferred_date.is_none() {
            missing.push("preferredDate");
        }
        if self.preferred_time_slot.is_none() {
            missing.push("preferredTimeSlot");
        }

        let (
            Some(address),
            Some(waste_type),
            Some(quantity),
            Some(unit),
            Some(preferred_date),
            Some(preferred_time_slot),
        ) = (
            self.address,
            self.waste_type,
            self.quantity,
            self.unit,
            self.preferred_date,
            self.preferred_time_slot,
        )
        else {
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        };

        let street = present(&address.street);
        let city = present(&address.city);
        let state = present(&address.state);
        let pincode = present(&address.pincode);

        let (Some(street), Some(city), Some(state), Some(pincode)) =
            (street.clone(), city.clone(), state.clone(), pincode.clone())
        else {
            let missing: Vec<&str> = [
                ("street", street.is_none()),
                ("city", city.is_none()),
                ("state", state.is_none()),
                ("pincode", pincode.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, absent)| absent.then_some(name))
            .collect();

            return Err(AppError::Validation(format!(
                "Missing required address fields: {}",
                missing.join(", ")
            )));
        };

        Ok(NewWastePickup {
            user_id,
            street,
            city,
            state,
            pincode,
            landmark: present(&address.landmark),
            waste_type,
            quantity,
            unit,
            preferred_date,
            preferred_time_slot,
            notes: present(&self.notes),
        })
    }
}

/// Request DTO for a status change and/or assignment
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWastePickupDto {
    pub status: Option<PickupStatus>,
    pub assigned_to: Option<Uuid>,
}

impl From<UpdateWastePickupDto> for UpdateRequest<PickupStatus> {
    fn from(dto: UpdateWastePickupDto) -> Self {
        UpdateRequest {
            status: dto.status,
            assigned_to: dto.assigned_to,
        }
    }
}

/// Query params for listing pickups
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListWastePickupsQuery {
    pub status: Option<PickupStatus>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl ListWastePickupsQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery::new(self.page, self.limit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WastePickupResponseDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub address: PickupAddressDto,
    pub waste_type: WasteType,
    pub quantity: f64,
    pub unit: QuantityUnit,
    pub preferred_date: NaiveDate,
    pub preferred_time_slot: TimeSlot,
    pub status: PickupStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WastePickup> for WastePickupResponseDto {
    fn from(p: WastePickup) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            address: PickupAddressDto {
                street: Some(p.street),
                city: Some(p.city),
                state: Some(p.state),
                pincode: Some(p.pincode),
                landmark: p.landmark,
            },
            waste_type: p.waste_type,
            quantity: p.quantity,
            unit: p.unit,
            preferred_date: p.preferred_date,
            preferred_time_slot: p.preferred_time_slot,
            status: p.status,
            notes: p.notes,
            assigned_to: p.assigned_to,
            completed_at: p.completed_at,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
