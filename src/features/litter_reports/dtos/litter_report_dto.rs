use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::lifecycle::{ListFilter, UpdateRequest};
use crate::features::litter_reports::models::{
    LitterReport, LitterReportStatus, NewLitterReport, Severity,
};
use crate::shared::constants::{
    MAX_FREE_TEXT_LENGTH, MAX_REPORT_IMAGES, MIN_REPORT_DESCRIPTION_LENGTH,
};
use crate::shared::types::{default_limit, default_page, PaginationQuery};
use crate::shared::waste::WasteType;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CoordinatesDto {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: f64,
}

/// Where the litter was found
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportLocationDto {
    #[validate(length(max = 255, message = "Address must not exceed 255 characters"))]
    pub address: Option<String>,
    #[validate(length(max = 100, message = "City must not exceed 100 characters"))]
    pub city: Option<String>,
    #[validate(length(max = 100, message = "State must not exceed 100 characters"))]
    pub state: Option<String>,
    #[validate(length(max = 20, message = "Pincode must not exceed 20 characters"))]
    pub pincode: Option<String>,
    #[validate(nested)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<CoordinatesDto>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLitterReportDto {
    #[validate(nested)]
    pub location: Option<ReportLocationDto>,
    #[validate(length(max = MAX_FREE_TEXT_LENGTH, message = "Description is too long"))]
    pub description: Option<String>,
    pub waste_type: Option<WasteType>,
    pub severity: Option<Severity>,
    #[validate(length(max = MAX_REPORT_IMAGES, message = "Too many images"))]
    #[serde(default)]
    pub images: Vec<String>,
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

impl CreateLitterReportDto {
    /// Check required fields and build the insert for `reported_by`
    pub fn into_new(self, reported_by: Uuid) -> Result<NewLitterReport> {
        let description = present(&self.description);

        let mut missing = Vec::new();
        if self.location.is_none() {
            missing.push("location");
        }
        if description.is_none() {
            missing.push("description");
        }
        if self.waste_type.is_none() {
            missing.push("wasteType");
        }
        if self.severity.is_none() {
            missing.push("severity");
        }

        let (Some(location), Some(description), Some(waste_type), Some(severity)) =
            (self.location, description, self.waste_type, self.severity)
        else {
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        };

        if (description.chars().count() as u64) < MIN_REPORT_DESCRIPTION_LENGTH {
            return Err(AppError::Validation(format!(
                "Description must be at least {} characters long",
                MIN_REPORT_DESCRIPTION_LENGTH
            )));
        }

        let address = present(&location.address);
        let city = present(&location.city);
        let state = present(&location.state);
        let pincode = present(&location.pincode);

        let (Some(address), Some(city), Some(state), Some(pincode)) =
            (address.clone(), city.clone(), state.clone(), pincode.clone())
        else {
            let missing: Vec<&str> = [
                ("address", address.is_none()),
                ("city", city.is_none()),
                ("state", state.is_none()),
                ("pincode", pincode.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, absent)| absent.then_some(name))
            .collect();

            return Err(AppError::Validation(format!(
                "Missing required location fields: {}",
                missing.join(", ")
            )));
        };

        let images = self
            .images
            .into_iter()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .collect();

        Ok(NewLitterReport {
            reported_by,
            address,
            city,
            state,
            pincode,
            latitude: location.coordinates.map(|c| c.latitude),
            longitude: location.coordinates.map(|c| c.longitude),
            description,
            waste_type,
            severity,
            images,
        })
    }
}

/// Request DTO for a status change and/or assignment
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLitterReportDto {
    pub status: Option<LitterReportStatus>,
    pub assigned_to: Option<Uuid>,
}

impl From<UpdateLitterReportDto> for UpdateRequest<LitterReportStatus> {
    fn from(dto: UpdateLitterReportDto) -> Self {
        UpdateRequest {
            status: dto.status,
            assigned_to: dto.assigned_to,
        }
    }
}

/// Query params for listing litter reports
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListLitterReportsQuery {
    pub status: Option<LitterReportStatus>,
    pub severity: Option<Severity>,
    /// Honoured for admins only
    pub city: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl ListLitterReportsQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery::new(self.page, self.limit)
    }

    pub fn filter(&self) -> ListFilter<LitterReportStatus> {
        ListFilter {
            status: self.status,
            severity: self.severity,
            city: self.city.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LitterReportResponseDto {
    pub id: Uuid,
    pub reported_by: Uuid,
    pub location: ReportLocationDto,
    pub description: String,
    pub waste_type: WasteType,
    pub severity: Severity,
    pub status: LitterReportStatus,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LitterReport> for LitterReportResponseDto {
    fn from(r: LitterReport) -> Self {
        let coordinates = match (r.latitude, r.longitude) {
            (Some(latitude), Some(longitude)) => Some(CoordinatesDto {
                latitude,
                longitude,
            }),
            _ => None,
        };

        Self {
            id: r.id,
            reported_by: r.reported_by,
            location: ReportLocationDto {
                address: Some(r.address),
                city: Some(r.city),
                state: Some(r.state),
                pincode: Some(r.pincode),
                coordinates,
            },
            description: r.description,
            waste_type: r.waste_type,
            severity: r.severity,
            status: r.status,
            images: r.images,
            assigned_to: r.assigned_to,
            resolved_at: r.resolved_at,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body() -> serde_json::Value {
        json!({
            "location": {
                "address": "Behind the bus depot",
                "city": "Indore",
                "state": "Madhya Pradesh",
                "pincode": "452001",
                "coordinates": { "latitude": 22.7196, "longitude": 75.8577 }
            },
            "description": "Construction debris dumped on the footpath",
            "wasteType": "Other",
            "severity": "High"
        })
    }

    #[test]
    fn test_complete_body_converts() {
        let dto: CreateLitterReportDto = serde_json::from_value(body()).unwrap();
        let new = dto.into_new(Uuid::now_v7()).unwrap();

        assert_eq!(new.city, "Indore");
        assert_eq!(new.severity, Severity::High);
        assert_eq!(new.latitude, Some(22.7196));
        assert!(new.images.is_empty());
    }

    #[test]
    fn test_short_description_is_rejected() {
        let mut body = body();
        body["description"] = json!("too short");
        let dto: CreateLitterReportDto = serde_json::from_value(body).unwrap();

        let err = dto.into_new(Uuid::now_v7()).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(msg) if msg == "Description must be at least 10 characters long"
        ));
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let dto: CreateLitterReportDto =
            serde_json::from_value(json!({ "wasteType": "Glass" })).unwrap();

        let err = dto.into_new(Uuid::now_v7()).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(msg) if msg == "Missing required fields: location, description, severity"
        ));
    }

    #[test]
    fn test_out_of_range_coordinates_fail_validation() {
        let mut body = body();
        body["location"]["coordinates"]["latitude"] = json!(123.0);
        let dto: CreateLitterReportDto = serde_json::from_value(body).unwrap();

        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_severity_wire_format() {
        assert!(serde_json::from_value::<Severity>(json!("Medium")).is_ok());
        assert!(serde_json::from_value::<Severity>(json!("medium")).is_err());
    }
}
