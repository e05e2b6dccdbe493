use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::waste_pickups::handlers::waste_pickup_handler;
use crate::features::waste_pickups::services::WastePickupService;

pub fn routes(service: Arc<WastePickupService>) -> Router {
    Router::new()
        .route(
            "/api/waste-pickups",
            get(waste_pickup_handler::list_pickups).post(waste_pickup_handler::create_pickup),
        )
        .route(
            "/api/waste-pickups/{id}",
            get(waste_pickup_handler::get_pickup)
                .put(waste_pickup_handler::update_pickup)
                .delete(waste_pickup_handler::cancel_pickup),
        )
        .with_state(service)
}
