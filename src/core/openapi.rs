use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers::stats_handler};
use crate::features::litter_reports::{
    dtos as litter_dtos, handlers::litter_report_handler, models as litter_models,
};
use crate::features::users::{dtos as users_dtos, handlers::user_handler, models as users_models};
use crate::features::waste_pickups::{
    dtos as pickup_dtos, handlers::waste_pickup_handler, models as pickup_models,
};
use crate::shared::types::{ApiResponse, Meta};
use crate::shared::waste::WasteType;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Users
        user_handler::get_profile,
        user_handler::update_profile,
        user_handler::list_collectors,
        // Waste pickups
        waste_pickup_handler::list_pickups,
        waste_pickup_handler::create_pickup,
        waste_pickup_handler::get_pickup,
        waste_pickup_handler::update_pickup,
        waste_pickup_handler::cancel_pickup,
        // Litter reports
        litter_report_handler::list_reports,
        litter_report_handler::create_report,
        litter_report_handler::get_report,
        litter_report_handler::update_report,
        litter_report_handler::close_report,
        // Admin
        stats_handler::get_stats,
    ),
    components(
        schemas(
            Meta,
            WasteType,
            // Users
            users_models::UserRole,
            users_models::AssignedArea,
            users_dtos::UserResponseDto,
            users_dtos::UpdateProfileDto,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            // Waste pickups
            pickup_models::PickupStatus,
            pickup_models::QuantityUnit,
            pickup_models::TimeSlot,
            pickup_dtos::PickupAddressDto,
            pickup_dtos::CreateWastePickupDto,
            pickup_dtos::UpdateWastePickupDto,
            pickup_dtos::WastePickupResponseDto,
            ApiResponse<pickup_dtos::WastePickupResponseDto>,
            ApiResponse<Vec<pickup_dtos::WastePickupResponseDto>>,
            // Litter reports
            litter_models::LitterReportStatus,
            litter_models::Severity,
            litter_dtos::CoordinatesDto,
            litter_dtos::ReportLocationDto,
            litter_dtos::CreateLitterReportDto,
            litter_dtos::UpdateLitterReportDto,
            litter_dtos::LitterReportResponseDto,
            ApiResponse<litter_dtos::LitterReportResponseDto>,
            ApiResponse<Vec<litter_dtos::LitterReportResponseDto>>,
            // Admin
            admin_dtos::CountDto,
            admin_dtos::AdminStatsDto,
            ApiResponse<admin_dtos::AdminStatsDto>,
        )
    ),
    tags(
        (name = "users", description = "Current user and collector directory"),
        (name = "waste-pickups", description = "Waste pickup requests and their lifecycle"),
        (name = "litter-reports", description = "Litter reports and their lifecycle"),
        (name = "admin", description = "Admin endpoints (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "WasteX API",
        version = "0.1.0",
        description = "API documentation for the WasteX waste-collection service",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_lifecycle_paths() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/waste-pickups",
            "/api/waste-pickups/{id}",
            "/api/litter-reports",
            "/api/litter-reports/{id}",
            "/api/users/me",
            "/api/admin/stats",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Staging".into(),
            version: "9.9.9".into(),
            description: "staging build".into(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Staging");
        assert_eq!(doc.info.description.as_deref(), Some("staging build"));
    }
}
