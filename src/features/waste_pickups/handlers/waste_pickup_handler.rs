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
use crate::features::waste_pickups::dtos::{
    CreateWastePickupDto, ListWastePickupsQuery, UpdateWastePickupDto, WastePickupResponseDto,
};
use crate::features::waste_pickups::services::WastePickupService;
use crate::shared::types::ApiResponse;

/// List waste pickups visible to the caller
///
/// Admins see every pickup, collectors their assignments plus pending
/// pickups in their city, citizens their own requests.
#[utoipa::path(
    get,
    path = "/api/waste-pickups",
    params(ListWastePickupsQuery),
    responses(
        (status = 200, description = "Page of waste pickups", body = ApiResponse<Vec<WastePickupResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Invalid user role")
    ),
    tag = "waste-pickups",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_pickups(
    user: AuthenticatedUser,
    State(service): State<Arc<WastePickupService>>,
    AppQuery(query): AppQuery<ListWastePickupsQuery>,
) -> Result<Json<ApiResponse<Vec<WastePickupResponseDto>>>> {
    let (pickups, meta) = service.list(&user, query).await?;
    Ok(Json(ApiResponse::success(Some(pickups), None, Some(meta))))
}

#[utoipa::path(
    post,
    path = "/api/waste-pickups",
    request_body = CreateWastePickupDto,
    responses(
        (status = 201, description = "Pickup request created", body = ApiResponse<WastePickupResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only citizens can create pickup requests")
    ),
    tag = "waste-pickups",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_pickup(
    user: AuthenticatedUser,
    State(service): State<Arc<WastePickupService>>,
    AppJson(dto): AppJson<CreateWastePickupDto>,
) -> Result<(StatusCode, Json<ApiResponse<WastePickupResponseDto>>)> {
    let pickup = service.create(&user, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(pickup),
            Some("Waste pickup request created successfully".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/waste-pickups/{id}",
    params(
        ("id" = Uuid, Path, description = "Pickup ID")
    ),
    responses(
        (status = 200, description = "Pickup found", body = ApiResponse<WastePickupResponseDto>),
        (status = 403, description = "Not visible to the caller"),
        (status = 404, description = "Pickup not found")
    ),
    tag = "waste-pickups",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_pickup(
    user: AuthenticatedUser,
    State(service): State<Arc<WastePickupService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<WastePickupResponseDto>>> {
    let pickup = service.get(&user, id).await?;
    Ok(Json(ApiResponse::success(Some(pickup), None, None)))
}

/// Change status and/or assign a collector
///
/// Assigning without a status moves the pickup to `scheduled`.
#[utoipa::path(
    put,
    path = "/api/waste-pickups/{id}",
    params(
        ("id" = Uuid, Path, description = "Pickup ID")
    ),
    request_body = UpdateWastePickupDto,
    responses(
        (status = 200, description = "Pickup updated", body = ApiResponse<WastePickupResponseDto>),
        (status = 400, description = "Invalid transition or collector"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Pickup not found")
    ),
    tag = "waste-pickups",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_pickup(
    user: AuthenticatedUser,
    State(service): State<Arc<WastePickupService>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<UpdateWastePickupDto>,
) -> Result<Json<ApiResponse<WastePickupResponseDto>>> {
    let pickup = service.update(&user, id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(pickup),
        Some("Waste pickup request updated successfully".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/waste-pickups/{id}",
    params(
        ("id" = Uuid, Path, description = "Pickup ID")
    ),
    responses(
        (status = 200, description = "Pickup cancelled", body = ApiResponse<WastePickupResponseDto>),
        (status = 400, description = "Pickup can no longer be cancelled"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Pickup not found")
    ),
    tag = "waste-pickups",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn cancel_pickup(
    user: AuthenticatedUser,
    State(service): State<Arc<WastePickupService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<WastePickupResponseDto>>> {
    let pickup = service.cancel(&user, id).await?;
    Ok(Json(ApiResponse::success(
        Some(pickup),
        Some("Waste pickup request cancelled successfully".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::json;

    use super::*;
    use crate::features::users::models::User;
    use crate::features::users::UserService;
    use crate::features::waste_pickups::models::PickupStatus;
    use crate::features::waste_pickups::routes::routes;
    use crate::shared::test_helpers::{
        fixtures, with_user, InMemoryUserDirectory, InMemoryWastePickupRepository,
    };

    fn server(
        users: Vec<User>,
        repository: Arc<InMemoryWastePickupRepository>,
        caller: &User,
    ) -> TestServer {
        let users = Arc::new(UserService::new(Arc::new(InMemoryUserDirectory::new(users))));
        let service = Arc::new(WastePickupService::new(repository, users));
        TestServer::new(with_user(routes(service), fixtures::auth(caller))).unwrap()
    }

    #[tokio::test]
    async fn test_create_returns_created() {
        let citizen = fixtures::citizen();
        let repository = Arc::new(InMemoryWastePickupRepository::default());
        let server = server(vec![citizen.clone()], repository, &citizen);

        let response = server
            .post("/api/waste-pickups")
            .json(&json!({
                "address": {
                    "street": "4 Station Road",
                    "city": "Nagpur",
                    "state": "Maharashtra",
                    "pincode": "440001",
                    "landmark": "Near the water tank"
                },
                "wasteType": "Plastic",
                "quantity": 12,
                "unit": "pieces",
                "preferredDate": "2026-11-05",
                "preferredTimeSlot": "Evening"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<WastePickupResponseDto> = response.json();
        let pickup = body.data.unwrap();
        assert_eq!(pickup.status, PickupStatus::Pending);
        assert_eq!(pickup.address.landmark.as_deref(), Some("Near the water tank"));
    }

    #[tokio::test]
    async fn test_create_reports_missing_fields() {
        let citizen = fixtures::citizen();
        let repository = Arc::new(InMemoryWastePickupRepository::default());
        let server = server(vec![citizen.clone()], repository, &citizen);

        let response = server
            .post("/api/waste-pickups")
            .json(&json!({ "wasteType": "Paper" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ApiResponse<()> = response.json();
        assert_eq!(
            body.message.as_deref(),
            Some("Missing required fields: address, quantity, unit, preferredDate, preferredTimeSlot")
        );
    }

    #[tokio::test]
    async fn test_status_filter_must_be_known() {
        let admin = fixtures::admin();
        let repository = Arc::new(InMemoryWastePickupRepository::default());
        let server = server(vec![admin.clone()], repository, &admin);

        let response = server
            .get("/api/waste-pickups")
            .add_query_param("status", "archived")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_paginates() {
        let citizen = fixtures::citizen();
        let repository = Arc::new(InMemoryWastePickupRepository::default());
        for _ in 0..3 {
            repository.insert(fixtures::pickup(citizen.id, "Pune"));
        }
        let server = server(vec![citizen.clone()], repository, &citizen);

        let response = server
            .get("/api/waste-pickups")
            .add_query_param("page", 2)
            .add_query_param("limit", 2)
            .await;

        response.assert_status_ok();
        let body: ApiResponse<Vec<WastePickupResponseDto>> = response.json();
        assert_eq!(body.data.unwrap().len(), 1);
        let meta = body.meta.unwrap();
        assert_eq!(meta.total, 3);
        assert_eq!(meta.pages, Some(2));
    }

    #[tokio::test]
    async fn test_huge_page_returns_empty_page() {
        let citizen = fixtures::citizen();
        let repository = Arc::new(InMemoryWastePickupRepository::default());
        repository.insert(fixtures::pickup(citizen.id, "Pune"));
        let server = server(vec![citizen.clone()], repository, &citizen);

        let response = server
            .get("/api/waste-pickups")
            .add_query_param("page", i64::MAX)
            .await;

        response.assert_status_ok();
        let body: ApiResponse<Vec<WastePickupResponseDto>> = response.json();
        assert!(body.data.unwrap().is_empty());
        assert_eq!(body.meta.unwrap().total, 1);
    }

    #[tokio::test]
    async fn test_malformed_id_gets_json_error() {
        let admin = fixtures::admin();
        let repository = Arc::new(InMemoryWastePickupRepository::default());
        let server = server(vec![admin.clone()], repository, &admin);

        for response in [
            server.get("/api/waste-pickups/not-a-uuid").await,
            server.delete("/api/waste-pickups/not-a-uuid").await,
            server
                .put("/api/waste-pickups/not-a-uuid")
                .json(&json!({ "status": "scheduled" }))
                .await,
        ] {
            response.assert_status(StatusCode::BAD_REQUEST);
            let body: ApiResponse<()> = response.json();
            assert!(!body.success);
            assert!(body
                .message
                .unwrap()
                .starts_with("Invalid path parameter"));
        }
    }

    #[tokio::test]
    async fn test_collector_outside_area_is_forbidden() {
        let citizen = fixtures::citizen();
        let collector = fixtures::collector("Pune");
        let other = fixtures::collector("Mumbai");
        let repository = Arc::new(InMemoryWastePickupRepository::default());
        let mut pickup = fixtures::pickup(citizen.id, "Mumbai");
        pickup.assigned_to = Some(collector.id);
        pickup.status = PickupStatus::Scheduled;
        let pickup = repository.insert(pickup);

        let server = server(
            vec![citizen, collector.clone(), other.clone()],
            repository.clone(),
            &collector,
        );

        let response = server
            .put(&format!("/api/waste-pickups/{}", pickup.id))
            .json(&json!({ "assignedTo": other.id }))
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
        assert_eq!(
            repository.get(pickup.id).unwrap().assigned_to,
            Some(collector.id)
        );
    }

    #[tokio::test]
    async fn test_citizen_cannot_read_foreign_pickup() {
        let owner = fixtures::citizen();
        let stranger = fixtures::citizen();
        let repository = Arc::new(InMemoryWastePickupRepository::default());
        let pickup = repository.insert(fixtures::pickup(owner.id, "Pune"));
        let server = server(vec![owner, stranger.clone()], repository, &stranger);

        server
            .get(&format!("/api/waste-pickups/{}", pickup.id))
            .await
            .assert_status(StatusCode::FORBIDDEN);
        server
            .delete(&format!("/api/waste-pickups/{}", pickup.id))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
