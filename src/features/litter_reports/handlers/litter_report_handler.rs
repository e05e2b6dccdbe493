use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::litter_reports::dtos::{
    CreateLitterReportDto, ListLitterReportsQuery, LitterReportResponseDto, UpdateLitterReportDto,
};
use crate::features::litter_reports::services::LitterReportService;
use crate::shared::types::ApiResponse;

/// List litter reports visible to the caller
///
/// The `city` filter applies to admins only.
#[utoipa::path(
    get,
    path = "/api/litter-reports",
    params(ListLitterReportsQuery),
    responses(
        (status = 200, description = "Page of litter reports", body = ApiResponse<Vec<LitterReportResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Invalid user role")
    ),
    tag = "litter-reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_reports(
    user: AuthenticatedUser,
    State(service): State<Arc<LitterReportService>>,
    AppQuery(query): AppQuery<ListLitterReportsQuery>,
) -> Result<Json<ApiResponse<Vec<LitterReportResponseDto>>>> {
    let (reports, meta) = service.list(&user, query).await?;
    Ok(Json(ApiResponse::success(Some(reports), None, Some(meta))))
}

#[utoipa::path(
    post,
    path = "/api/litter-reports",
    request_body = CreateLitterReportDto,
    responses(
        (status = 201, description = "Report created", body = ApiResponse<LitterReportResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "litter-reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_report(
    user: AuthenticatedUser,
    State(service): State<Arc<LitterReportService>>,
    AppJson(dto): AppJson<CreateLitterReportDto>,
) -> Result<(StatusCode, Json<ApiResponse<LitterReportResponseDto>>)> {
    let report = service.create(&user, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(report),
            Some("Litter report created successfully".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/litter-reports/{id}",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<LitterReportResponseDto>),
        (status = 403, description = "Not visible to the caller"),
        (status = 404, description = "Report not found")
    ),
    tag = "litter-reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_report(
    user: AuthenticatedUser,
    State(service): State<Arc<LitterReportService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<LitterReportResponseDto>>> {
    let report = service.get(&user, id).await?;
    Ok(Json(ApiResponse::success(Some(report), None, None)))
}

/// Change status and/or assign a collector
///
/// Assigning without a status moves the report to `verified`.
#[utoipa::path(
    put,
    path = "/api/litter-reports/{id}",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    request_body = UpdateLitterReportDto,
    responses(
        (status = 200, description = "Report updated", body = ApiResponse<LitterReportResponseDto>),
        (status = 400, description = "Invalid transition or collector"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Report not found")
    ),
    tag = "litter-reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_report(
    user: AuthenticatedUser,
    State(service): State<Arc<LitterReportService>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<UpdateLitterReportDto>,
) -> Result<Json<ApiResponse<LitterReportResponseDto>>> {
    let report = service.update(&user, id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(report),
        Some("Litter report updated successfully".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/litter-reports/{id}",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report closed", body = ApiResponse<LitterReportResponseDto>),
        (status = 400, description = "Report can no longer be closed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Report not found")
    ),
    tag = "litter-reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn close_report(
    user: AuthenticatedUser,
    State(service): State<Arc<LitterReportService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<LitterReportResponseDto>>> {
    let report = service.close(&user, id).await?;
    Ok(Json(ApiResponse::success(
        Some(report),
        Some("Litter report closed successfully".to_string()),
        None,
    )))
}
